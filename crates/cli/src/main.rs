//! Command-line driver for the CuraLink symptom triage core.
//!
//! ## Environment Variables
//! - `CURALINK_KNOWLEDGE_BASE`: YAML knowledge-base file (default: built-in table)
//! - `CURALINK_ANALYSIS_TYPE`: analysis type recorded when `--analysis-type` is absent (default: "text")
//! - `CURALINK_HISTORY_LIMIT`: history size (default: 10)
//! - `RUST_LOG`: log filter; logs go to stderr
//!
//! A `.env` file in the working directory is loaded first when present.

use clap::{Parser, Subcommand};
use curalink_core::{
    config::{
        analysis_type_from_env_value, history_limit_from_env_value,
        knowledge_base_from_env_value,
    },
    constants::{ANALYSIS_TYPE_ENV, HISTORY_LIMIT_ENV, KNOWLEDGE_BASE_ENV},
    severity::badge_label,
    AnalysisRequest, CoreConfig, SeverityBand, SymptomService,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "curalink")]
#[command(about = "CuraLink symptom triage CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a symptom description
    Analyze {
        /// Free-text symptom description
        symptoms: String,
        /// Analysis type tag stored with the record (e.g. text, voice)
        #[arg(long)]
        analysis_type: Option<String>,
        /// User the analysis is recorded for
        #[arg(long, default_value_t = 0)]
        user_id: i64,
        /// Print the full record as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the conditions in the active knowledge base
    Conditions,
    /// Show the display band and badge for a severity label
    Severity {
        /// Severity label, e.g. "High - Seek immediate medical attention"
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("curalink_cli=info".parse()?)
                .add_directive("curalink_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'curalink --help' for commands");
        return Ok(());
    };

    let cfg = Arc::new(load_config()?);
    let service = SymptomService::from_config(cfg);

    match command {
        Commands::Analyze {
            symptoms,
            analysis_type,
            user_id,
            json,
        } => {
            let mut request = AnalysisRequest::new(symptoms);
            request.analysis_type = analysis_type;

            let record = service.analyze(user_id, request)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let result = &record.analysis_result;
                println!("Illness: {}", result.illness);
                println!("Description: {}", result.description);
                println!(
                    "Severity: {} [{}]",
                    result.severity,
                    result.severity_band()
                );
                println!("Recommendations: {}", result.recommendations);
                println!("Confidence: {}%", result.confidence_score);
            }
        }
        Commands::Conditions => {
            for record in service.engine().knowledge_base() {
                let keywords: Vec<&str> = record.keywords().iter().map(|k| k.as_str()).collect();
                println!(
                    "{} [{}]: {}",
                    record.illness(),
                    SeverityBand::classify(record.severity()),
                    keywords.join(", ")
                );
            }
        }
        Commands::Severity { text } => {
            println!("Band: {}", SeverityBand::classify(&text));
            println!("Badge: {}", badge_label(&text));
        }
    }

    Ok(())
}

/// Resolve core configuration from the environment, once, before any command runs.
fn load_config() -> anyhow::Result<CoreConfig> {
    let knowledge_base = knowledge_base_from_env_value(std::env::var(KNOWLEDGE_BASE_ENV).ok())?;
    let analysis_type = analysis_type_from_env_value(std::env::var(ANALYSIS_TYPE_ENV).ok());
    let history_limit = history_limit_from_env_value(std::env::var(HISTORY_LIMIT_ENV).ok())?;

    tracing::debug!(
        conditions = knowledge_base.len(),
        analysis_type = %analysis_type,
        history_limit,
        "configuration resolved"
    );

    Ok(CoreConfig::new(knowledge_base, analysis_type, history_limit)?)
}
