use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Stream;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weight_margin and weight_preference must sum to 1.0, got {0}")]
    WeightSum(f64),
    #[error("max_margin_cap must be positive, got {0}")]
    NonPositiveCap(f64),
    #[error("recommendation_count must be at least 1")]
    ZeroRecommendationCount,
}

/// Tunable scoring parameters. Defaults match the shipped recommendation
/// profile; a JSON file can override any subset of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub recommendation_count: usize,
    pub max_margin_cap: f64,
    pub primary_boost: f64,
    pub secondary_boost: f64,
    pub base_boost: f64,
    pub weight_margin: f64,
    pub weight_preference: f64,
    pub stream_courses: HashMap<String, Vec<String>>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recommendation_count: 10,
            max_margin_cap: 0.2,
            primary_boost: 1.0,
            secondary_boost: 0.5,
            base_boost: 0.1,
            weight_margin: 0.5,
            weight_preference: 0.5,
            stream_courses: default_stream_courses(),
        }
    }
}

fn default_stream_courses() -> HashMap<String, Vec<String>> {
    let entries: [(&str, &[&str]); 5] = [
        (
            "Science",
            &[
                "Medicine",
                "Dental",
                "Veterinary",
                "Science",
                "Bio",
                "Health",
                "Nursing",
                "Pharmacy",
            ],
        ),
        (
            "Technology",
            &[
                "Technology",
                "Engineering",
                "Architecture",
                "Design",
                "Surveying",
            ],
        ),
        (
            "Arts",
            &[
                "Arts",
                "Law",
                "Languages",
                "Sociology",
                "Archaeology",
                "Social",
            ],
        ),
        (
            "Commerce",
            &[
                "Management",
                "Accounting",
                "Business",
                "Finance",
                "Commerce",
            ],
        ),
        (
            "Mathematics",
            &[
                "Engineering",
                "IT",
                "Computer",
                "Statistics",
                "Quantity Surveying",
                "Applied Science",
            ],
        ),
    ];

    entries
        .into_iter()
        .map(|(stream, keywords)| {
            (
                stream.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

impl ScoringConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Startup invariants. A config that fails here must not be used for
    /// scoring, otherwise the weighted formula silently skews.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weight_sum = self.weight_margin + self.weight_preference;
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(weight_sum));
        }
        if self.max_margin_cap <= 0.0 {
            return Err(ConfigError::NonPositiveCap(self.max_margin_cap));
        }
        if self.recommendation_count == 0 {
            return Err(ConfigError::ZeroRecommendationCount);
        }
        Ok(())
    }

    pub fn stream_keywords(&self, stream: Stream) -> Option<&[String]> {
        self.stream_courses
            .get(stream.name())
            .map(|keywords| keywords.as_slice())
    }
}
