use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use maternal_risk::{
    assess_risk, build_risk_trajectory, generate_doctor_summary, get_risk_level_display,
    history_before, report, Assessment, CheckIn,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod import;

use config::Config;

#[derive(Parser)]
#[command(name = "maternal-risk")]
#[command(about = "Rule-based maternal health risk indicators from weekly check-ins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where check-ins come from: Postgres (by participant email) or a CSV export.
#[derive(Args)]
#[command(group(
    ArgGroup::new("source")
        .args(["email", "csv"])
        .required(true)
        .multiple(true)
))]
struct Source {
    #[arg(long)]
    email: Option<String>,
    /// Read check-ins from a CSV export instead of the database
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Import check-ins from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Assess one week against the weeks before it
    Assess {
        #[command(flatten)]
        source: Source,
        /// Week to assess (defaults to the latest check-in)
        #[arg(long)]
        week: Option<u32>,
        #[arg(long)]
        json: bool,
        /// Also print the indicator summary used for external insight text
        #[arg(long)]
        insight_context: bool,
    },
    /// Replay every check-in into a risk trajectory
    Trajectory {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        json: bool,
    },
    /// Write a clinician summary
    Summary {
        #[command(flatten)]
        source: Source,
        #[arg(long)]
        week: Option<u32>,
        #[arg(long, default_value = "summary.txt")]
        out: PathBuf,
    },
}

async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let database_url = config.require_database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    tracing::info!(max_connections = config.max_connections, "connected to Postgres");
    Ok(pool)
}

async fn load_check_ins(config: &Config, source: &Source) -> anyhow::Result<Vec<CheckIn>> {
    let check_ins = match (&source.csv, &source.email) {
        (Some(path), email) => import::check_ins_for(import::read_csv(path)?, email.as_deref())?,
        (None, Some(email)) => {
            let pool = connect(config).await?;
            db::fetch_check_ins(&pool, email).await?
        }
        (None, None) => anyhow::bail!("pass --email or --csv"),
    };

    if check_ins.is_empty() {
        anyhow::bail!("no check-ins found for this source");
    }
    tracing::info!(count = check_ins.len(), "loaded check-ins");
    Ok(check_ins)
}

fn assess_week(check_ins: &[CheckIn], week: Option<u32>) -> anyhow::Result<Assessment> {
    let current = match week {
        Some(week) => check_ins
            .iter()
            .find(|c| c.week == week)
            .with_context(|| format!("no check-in recorded for week {week}"))?,
        None => check_ins
            .iter()
            .max_by_key(|c| c.week)
            .context("no check-ins to assess")?,
    };
    let history = history_before(check_ins, current.week);
    Ok(assess_risk(current, &history))
}

/// Clinician summary for one week, listing that week and the ones before it.
fn summarize_week(check_ins: &[CheckIn], week: Option<u32>) -> anyhow::Result<String> {
    let assessment = assess_week(check_ins, week)?;
    let recent: Vec<CheckIn> = check_ins
        .iter()
        .filter(|c| c.week <= assessment.week)
        .cloned()
        .collect();
    Ok(generate_doctor_summary(&assessment, &recent))
}

fn print_assessment(assessment: &Assessment) {
    let display = get_risk_level_display(assessment.overall_level);
    println!(
        "Week {} overall risk: {} ({})",
        assessment.week, display.label, display.message
    );
    for indicator in &assessment.indicators {
        println!(
            "- {}: {} (confidence {})",
            indicator.condition, indicator.level, indicator.confidence
        );
        for trigger in &indicator.triggers {
            println!("    * {trigger}");
        }
        println!("    {}", indicator.recommendation);
    }

    if assessment.system_actions.is_empty() {
        println!("No system actions.");
    } else {
        println!("System actions:");
        for action in &assessment.system_actions {
            println!(
                "- {:?} [{:?}] {}",
                action.action_type, action.priority, action.description
            );
        }
    }
}

fn write_summary(out: &Path, summary: &str) -> anyhow::Result<()> {
    std::fs::write(out, summary).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "summary written");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("maternal_risk=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect(&config).await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect(&config).await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let pool = connect(&config).await?;
            let written = db::import_csv(&pool, &csv).await?;
            println!("Stored {written} check-ins from {}.", csv.display());
        }
        Commands::Assess {
            source,
            week,
            json,
            insight_context,
        } => {
            let check_ins = load_check_ins(&config, &source).await?;
            let assessment = assess_week(&check_ins, week)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment);
            }
            if insight_context {
                println!();
                print!("{}", report::insight_context(&assessment));
            }
        }
        Commands::Trajectory { source, json } => {
            let check_ins = load_check_ins(&config, &source).await?;
            let points = build_risk_trajectory(&check_ins);

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!("week  date        overall   preeclampsia  gest_diabetes  depression");
                for point in &points {
                    println!(
                        "{:<5} {} {:<9} {:<13} {:<14} {}",
                        point.week,
                        point.date.format("%Y-%m-%d"),
                        point.overall_level,
                        point.preeclampsia,
                        point.gestational_diabetes,
                        point.perinatal_depression
                    );
                }
            }
        }
        Commands::Summary { source, week, out } => {
            let check_ins = load_check_ins(&config, &source).await?;
            let summary = summarize_week(&check_ins, week)?;
            write_summary(&out, &summary)?;
            println!("Summary written to {}.", out.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maternal_risk::RiskLevel;

    fn sample() -> Vec<CheckIn> {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample_check_ins.csv");
        import::check_ins_for(import::read_csv(&path).unwrap(), None).unwrap()
    }

    #[test]
    fn assess_defaults_to_latest_week() {
        let assessment = assess_week(&sample(), None).unwrap();
        assert_eq!(assessment.week, 27);
        assert_eq!(assessment.overall_level, RiskLevel::High);
    }

    #[test]
    fn summary_handles_largest_week() {
        let mut check_ins = sample();
        check_ins[3].week = u32::MAX;
        assert!(maternal_risk::validate_check_in(&check_ins[3]).is_ok());

        let summary = summarize_week(&check_ins, None).unwrap();
        assert!(summary.contains(&format!("Week {} |", u32::MAX)));
        assert!(summary.contains(&format!("Week {} (", u32::MAX)));
        assert!(summary.contains("Week 24 ("));
    }

    #[test]
    fn summary_leaves_out_later_weeks() {
        let summary = summarize_week(&sample(), Some(25)).unwrap();
        assert!(summary.contains("Week 25 ("));
        assert!(!summary.contains("Week 26 ("));
        assert!(!summary.contains("Week 27 ("));
    }

    #[test]
    fn assess_rejects_unknown_week() {
        assert!(assess_week(&sample(), Some(40)).is_err());
    }

    #[test]
    fn cli_requires_a_source() {
        assert!(Cli::try_parse_from(["maternal-risk", "assess"]).is_err());
        assert!(Cli::try_parse_from(["maternal-risk", "assess", "--csv", "x.csv"]).is_ok());
    }
}
