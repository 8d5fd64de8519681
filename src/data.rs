use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{AggregatedCutoff, CutoffRecord};

const REQUIRED_COLUMNS: [&str; 4] = ["Course", "University", "District", "Z_Score"];

/// Loading is all-or-nothing: any unreadable source or missing required
/// column aborts the whole batch with no partial table.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("data file '{0}' not found")]
    SourceNotFound(PathBuf),
    #[error("required column '{column}' missing from '{path}'")]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("failed to read '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub fn read_source(path: &Path) -> Result<Vec<CutoffRecord>, DataError> {
    if !path.exists() {
        return Err(DataError::SourceNotFound(path.to_path_buf()));
    }

    let csv_error = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DataError::MissingColumn {
                path: path.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    for row in reader.deserialize::<CutoffRecord>() {
        records.push(row.map_err(csv_error)?);
    }
    Ok(records)
}

/// Collapse raw yearly rows into one entry per (course, university, district)
/// key, scored with the arithmetic mean across years. Output is in key order
/// so equal-score ties downstream break deterministically.
pub fn aggregate(records: &[CutoffRecord]) -> Vec<AggregatedCutoff> {
    let mut groups: BTreeMap<(String, String, String), (f64, usize)> = BTreeMap::new();

    for record in records {
        let key = (
            record.course.clone(),
            record.university.clone(),
            record.district.clone(),
        );
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += record.z_score;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((course, university, district), (total, count))| AggregatedCutoff {
            course,
            university,
            district,
            z_score: total / count as f64,
        })
        .collect()
}

pub fn load_cutoffs(paths: &[PathBuf]) -> Result<Vec<AggregatedCutoff>, DataError> {
    let mut combined = Vec::new();
    for path in paths {
        combined.extend(read_source(path)?);
    }
    Ok(aggregate(&combined))
}

pub fn write_consolidated(path: &Path, cutoffs: &[AggregatedCutoff]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for cutoff in cutoffs {
        writer.serialize(cutoff)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(course: &str, university: &str, district: &str, z_score: f64) -> CutoffRecord {
        CutoffRecord {
            course: course.to_string(),
            university: university.to_string(),
            district: district.to_string(),
            z_score,
        }
    }

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "course-recommender-{}-{}",
            std::process::id(),
            name
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn averages_scores_sharing_a_key() {
        let rows = vec![
            row("Computer Science", "Uni1", "COLOMBO", 1.70),
            row("Computer Science", "Uni1", "COLOMBO", 1.80),
        ];
        let aggregated = aggregate(&rows);
        assert_eq!(aggregated.len(), 1);
        assert!((aggregated[0].z_score - 1.75).abs() < 1e-9);
    }

    #[test]
    fn keeps_distinct_keys_apart() {
        let rows = vec![
            row("Medicine", "Uni1", "COLOMBO", 1.90),
            row("Medicine", "Uni1", "GALLE", 1.60),
            row("Medicine", "Uni2", "COLOMBO", 1.85),
        ];
        let aggregated = aggregate(&rows);
        assert_eq!(aggregated.len(), 3);
        for cutoff in &aggregated {
            let expected = rows
                .iter()
                .find(|r| {
                    r.course == cutoff.course
                        && r.university == cutoff.university
                        && r.district == cutoff.district
                })
                .unwrap();
            assert!((cutoff.z_score - expected.z_score).abs() < 1e-9);
        }
    }

    #[test]
    fn output_is_sorted_by_key() {
        let rows = vec![
            row("Medicine", "Uni1", "GALLE", 1.60),
            row("Engineering", "Uni2", "COLOMBO", 1.85),
            row("Engineering", "Uni1", "COLOMBO", 1.90),
        ];
        let aggregated = aggregate(&rows);
        let keys: Vec<(&str, &str)> = aggregated
            .iter()
            .map(|c| (c.course.as_str(), c.university.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Engineering", "Uni1"),
                ("Engineering", "Uni2"),
                ("Medicine", "Uni1"),
            ]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let missing = std::env::temp_dir().join("course-recommender-does-not-exist.csv");
        let result = read_source(&missing);
        assert!(matches!(result, Err(DataError::SourceNotFound(_))));
    }

    #[test]
    fn missing_column_is_reported() {
        let path = temp_csv(
            "missing-column.csv",
            "Course,University,District\nMedicine,Uni1,COLOMBO\n",
        );
        let result = read_source(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            result,
            Err(DataError::MissingColumn {
                column: "Z_Score",
                ..
            })
        ));
    }

    #[test]
    fn loads_and_aggregates_across_files() {
        let first = temp_csv(
            "year-one.csv",
            "Course,University,District,Z_Score\nComputer Science,Uni1,COLOMBO,1.70\n",
        );
        let second = temp_csv(
            "year-two.csv",
            "Course,University,District,Z_Score\nComputer Science,Uni1,COLOMBO,1.80\n",
        );
        let cutoffs = load_cutoffs(&[first.clone(), second.clone()]).unwrap();
        std::fs::remove_file(&first).unwrap();
        std::fs::remove_file(&second).unwrap();
        assert_eq!(cutoffs.len(), 1);
        assert!((cutoffs[0].z_score - 1.75).abs() < 1e-9);
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let path = temp_csv(
            "extra-column.csv",
            "Course,University,District,Z_Score,Year\nMedicine,Uni1,COLOMBO,1.90,2024\n",
        );
        let records = read_source(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course, "Medicine");
    }
}
