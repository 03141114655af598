//! Wellbeing Risk - command line entry point
//!
//! Offline batch use: score a survey, predict from item answers, or retrain
//! the classifier from JSON-lines exports. Every command prints JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use wellbeing_risk_core::logic::dataset::{read_jsonl, MemorySource};
use wellbeing_risk_core::logic::features::ItemAnswers;
use wellbeing_risk_core::logic::model::ArtifactStore;
use wellbeing_risk_core::{AssessmentService, ClassObservation, EngineConfig, ModelTrainer, SurveyInput};

#[derive(Parser)]
#[command(name = "wellbeing-risk")]
#[command(about = "Bullying and wellbeing risk assessment engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Model artifact path (defaults to RISK_MODEL_PATH or the data dir)
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Heuristic score for a survey (plus model prediction when answers are given)
    Assess {
        /// Survey JSON file
        #[arg(long)]
        survey: PathBuf,

        /// Item answers JSON file (p_item_1..p_item_13)
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Observations JSON-lines file
        #[arg(long)]
        observations: Option<PathBuf>,
    },

    /// Model probability and explanation for item answers
    Predict {
        /// Item answers JSON file (p_item_1..p_item_13)
        #[arg(long)]
        answers: PathBuf,

        /// Observations JSON-lines file
        #[arg(long)]
        observations: Option<PathBuf>,
    },

    /// Retrain the classifier and replace the artifact
    Train {
        /// Historical surveys JSON-lines file
        #[arg(long)]
        surveys: PathBuf,

        /// Observations JSON-lines file
        #[arg(long)]
        observations: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env();
    if let Some(model) = cli.model {
        config = config.with_model_path(model);
    }
    log::debug!("Model artifact path: {}", config.model_path.display());

    match cli.command {
        Commands::Assess { survey, answers, observations } => {
            let service = AssessmentService::from_config(&config);
            let survey = load_survey(&survey)?;
            let answers = answers.as_deref().map(load_answers).transpose()?;
            let observations = load_observations(observations.as_deref())?;

            let assessment = service.assess(&survey, answers.as_ref(), &observations)?;
            print_json(&assessment, cli.pretty)
        }

        Commands::Predict { answers, observations } => {
            let service = AssessmentService::from_config(&config);
            let answers = load_answers(&answers)?;
            let observations = load_observations(observations.as_deref())?;

            let prediction = service.predict(&answers, &observations)?;
            if !prediction.model_available {
                log::warn!("{}", prediction.explanation);
            }
            print_json(&prediction, cli.pretty)
        }

        Commands::Train { surveys, observations } => {
            let source = MemorySource::from_jsonl(&surveys, Some(&observations))?;
            let store = Arc::new(ArtifactStore::new(&config.model_path));
            let trainer = ModelTrainer::from_config(&config, store);

            let report = trainer
                .train(&source)
                .context("Training failed; the previous model (if any) is still in place")?;
            print_json(&report, cli.pretty)
        }
    }
}

fn load_survey(path: &Path) -> Result<SurveyInput> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read survey file {}", path.display()))?;
    SurveyInput::from_json(&raw).with_context(|| format!("Invalid survey in {}", path.display()))
}

fn load_answers(path: &Path) -> Result<ItemAnswers> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Cannot read answers file {}", path.display()))?;
    ItemAnswers::from_json(&raw).with_context(|| format!("Invalid item answers in {}", path.display()))
}

fn load_observations(path: Option<&Path>) -> Result<Vec<ClassObservation>> {
    match path {
        Some(path) => read_jsonl(path)
            .with_context(|| format!("Cannot read observations file {}", path.display())),
        None => Ok(Vec::new()),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
