use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

mod config;
mod data;
mod models;
mod report;
mod scoring;

use config::ScoringConfig;
use models::{Stream, StudentProfile};
use scoring::RecommendOutcome;

#[derive(Parser)]
#[command(name = "course-recommender")]
#[command(about = "University course recommendations from multi-year z-score cutoffs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge yearly cutoff CSVs into one averaged table
    Aggregate {
        /// Yearly cutoff CSV files
        #[arg(long, required = true, num_args = 1..)]
        csv: Vec<PathBuf>,
        #[arg(long, default_value = "consolidated.csv")]
        out: PathBuf,
    },
    /// Print ranked course recommendations for a student
    Recommend {
        #[command(flatten)]
        inputs: StudentInputs,
    },
    /// Write a markdown recommendation report
    Report {
        #[command(flatten)]
        inputs: StudentInputs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct StudentInputs {
    /// Yearly cutoff CSV files
    #[arg(long, required = true, num_args = 1..)]
    csv: Vec<PathBuf>,
    #[arg(long)]
    z_score: f64,
    #[arg(long)]
    district: String,
    #[arg(long, value_enum)]
    stream: Stream,
    /// Primary field preference, matched as a substring of course names
    #[arg(long, default_value = "")]
    primary: String,
    /// Secondary field preference
    #[arg(long, default_value = "")]
    secondary: String,
    /// Override the configured recommendation count
    #[arg(long)]
    limit: Option<usize>,
    /// JSON file overriding the default scoring parameters
    #[arg(long)]
    config: Option<PathBuf>,
}

impl StudentInputs {
    fn profile(&self) -> StudentProfile {
        StudentProfile {
            z_score: self.z_score,
            district: self.district.clone(),
            stream: self.stream,
            primary_field: self.primary.clone(),
            secondary_field: self.secondary.clone(),
        }
    }

    fn scoring_config(&self) -> anyhow::Result<ScoringConfig> {
        let mut config = match &self.config {
            Some(path) => ScoringConfig::from_file(path)?,
            None => ScoringConfig::default(),
        };
        if let Some(limit) = self.limit {
            config.recommendation_count = limit;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate { csv, out } => {
            let cutoffs = data::load_cutoffs(&csv)?;
            data::write_consolidated(&out, &cutoffs)?;
            println!(
                "Wrote {} averaged cutoff entries to {}.",
                cutoffs.len(),
                out.display()
            );
        }
        Commands::Recommend { inputs } => {
            let config = inputs.scoring_config()?;
            let cutoffs = data::load_cutoffs(&inputs.csv)?;
            println!("Loaded {} averaged cutoff entries.", cutoffs.len());

            let profile = inputs.profile();
            match scoring::recommend(&profile, &cutoffs, &config) {
                RecommendOutcome::Empty(reason) => {
                    println!("No recommendations: {reason}.");
                }
                RecommendOutcome::Ranked(records) => {
                    println!("Top courses by compatibility score:");
                    for (rank, rec) in records.iter().enumerate() {
                        println!(
                            "{}. {} ({}) cutoff {:.4}, margin {:.4}, compatibility {:.3}",
                            rank + 1,
                            rec.course,
                            rec.university,
                            rec.cutoff,
                            rec.safety_margin,
                            rec.compatibility
                        );
                    }
                }
            }
        }
        Commands::Report { inputs, out } => {
            let config = inputs.scoring_config()?;
            let cutoffs = data::load_cutoffs(&inputs.csv)?;

            let profile = inputs.profile();
            let outcome = scoring::recommend(&profile, &cutoffs, &config);
            let report = report::build_report(&profile, cutoffs.len(), &outcome);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
