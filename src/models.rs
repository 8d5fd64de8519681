use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One raw cutoff row as it appears in a yearly CSV. The same
/// (course, university, district) key may repeat across files.
#[derive(Debug, Clone, Deserialize)]
pub struct CutoffRecord {
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "University")]
    pub university: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Z_Score")]
    pub z_score: f64,
}

/// Consolidated cutoff entry: exactly one per unique
/// (course, university, district) key, with the multi-year mean score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedCutoff {
    #[serde(rename = "Course")]
    pub course: String,
    #[serde(rename = "University")]
    pub university: String,
    #[serde(rename = "District")]
    pub district: String,
    #[serde(rename = "Z_Score")]
    pub z_score: f64,
}

/// A/L subject stream. Keyword lists used for course eligibility live in
/// the scoring configuration, keyed by the stream name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Stream {
    Science,
    Technology,
    Arts,
    Commerce,
    Mathematics,
}

impl Stream {
    pub fn name(&self) -> &'static str {
        match self {
            Stream::Science => "Science",
            Stream::Technology => "Technology",
            Stream::Arts => "Arts",
            Stream::Commerce => "Commerce",
            Stream::Mathematics => "Mathematics",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StudentProfile {
    pub z_score: f64,
    pub district: String,
    pub stream: Stream,
    pub primary_field: String,
    pub secondary_field: String,
}

/// A ranked recommendation. `compatibility` and `safety_margin` are kept
/// unrounded; presentation layers round to 3 and 4 decimal places.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub course: String,
    pub university: String,
    pub cutoff: f64,
    pub district: String,
    pub compatibility: f64,
    pub safety_margin: f64,
}
