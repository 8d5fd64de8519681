use std::fmt;

use crate::config::ScoringConfig;
use crate::models::{AggregatedCutoff, Recommendation, StudentProfile};

/// Why a scoring run produced no recommendations. Not an error: the caller
/// reports the cause and the user retries with different inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    UnknownStream,
    NoStreamMatch,
    NoDistrictMatch,
    NoEligibleCourse,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            EmptyReason::UnknownStream => "no course keywords configured for this stream",
            EmptyReason::NoStreamMatch => "no courses match this stream",
            EmptyReason::NoDistrictMatch => "no cutoff data for this district",
            EmptyReason::NoEligibleCourse => "no course cutoff is within your z-score",
        };
        f.write_str(message)
    }
}

#[derive(Debug)]
pub enum RecommendOutcome {
    Ranked(Vec<Recommendation>),
    Empty(EmptyReason),
}

impl RecommendOutcome {
    pub fn records(&self) -> &[Recommendation] {
        match self {
            RecommendOutcome::Ranked(records) => records,
            RecommendOutcome::Empty(_) => &[],
        }
    }
}

/// Rank courses for a student against the averaged cutoff table.
///
/// The pipeline filters by stream keywords, then district, then score
/// eligibility, and scores each survivor as a weighted sum of the
/// cap-normalized safety margin and the preference boost. Callers must
/// validate `config` before scoring.
pub fn recommend(
    profile: &StudentProfile,
    cutoffs: &[AggregatedCutoff],
    config: &ScoringConfig,
) -> RecommendOutcome {
    let keywords = match config.stream_keywords(profile.stream) {
        Some(keywords) if !keywords.is_empty() => keywords,
        _ => return RecommendOutcome::Empty(EmptyReason::UnknownStream),
    };

    let stream_matches: Vec<&AggregatedCutoff> = cutoffs
        .iter()
        .filter(|cutoff| keywords.iter().any(|k| contains_ignore_case(&cutoff.course, k)))
        .collect();
    if stream_matches.is_empty() {
        return RecommendOutcome::Empty(EmptyReason::NoStreamMatch);
    }

    let in_district: Vec<&AggregatedCutoff> = stream_matches
        .into_iter()
        .filter(|cutoff| cutoff.district.eq_ignore_ascii_case(&profile.district))
        .collect();
    if in_district.is_empty() {
        return RecommendOutcome::Empty(EmptyReason::NoDistrictMatch);
    }

    let mut ranked = Vec::new();
    for cutoff in in_district {
        let safety_margin = profile.z_score - cutoff.z_score;
        if safety_margin < 0.0 {
            continue;
        }

        let margin_score = safety_margin.clamp(0.0, config.max_margin_cap) / config.max_margin_cap;
        let boost = preference_boost(
            &cutoff.course,
            &profile.primary_field,
            &profile.secondary_field,
            config,
        );
        let compatibility =
            margin_score * config.weight_margin + boost * config.weight_preference;

        ranked.push(Recommendation {
            course: cutoff.course.clone(),
            university: cutoff.university.clone(),
            cutoff: cutoff.z_score,
            district: cutoff.district.clone(),
            compatibility,
            safety_margin,
        });
    }
    if ranked.is_empty() {
        return RecommendOutcome::Empty(EmptyReason::NoEligibleCourse);
    }

    // Stable sort: ties keep aggregation key order.
    ranked.sort_by(|a, b| {
        b.compatibility
            .partial_cmp(&a.compatibility)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(config.recommendation_count);
    RecommendOutcome::Ranked(ranked)
}

/// Boost for one course: primary substring match wins outright, otherwise a
/// secondary match (when it differs from the primary field) applies, and
/// every stream-eligible course keeps at least the base boost.
pub fn preference_boost(
    course: &str,
    primary_field: &str,
    secondary_field: &str,
    config: &ScoringConfig,
) -> f64 {
    if !primary_field.is_empty() && contains_ignore_case(course, primary_field) {
        return config.primary_boost;
    }
    if !secondary_field.is_empty()
        && !secondary_field.eq_ignore_ascii_case(primary_field)
        && contains_ignore_case(course, secondary_field)
    {
        return config.secondary_boost;
    }
    config.base_boost
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
