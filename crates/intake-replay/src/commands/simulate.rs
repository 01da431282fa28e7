use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{bail, Result, WrapErr};
use uuid::Uuid;

use intake_bank::standard_bank;
use intake_core::models::outcome::NextQuestionOutcome;
use intake_core::models::question::Sex;
use intake_core::models::session::{RespondentProfile, ValidationChoice};
use intake_engine::config::{load_config, EngineConfig};
use intake_engine::narrative::{Narrator, SummaryNarrator};
use intake_engine::AssessmentEngine;

use super::load_bank;

#[derive(Clone, Copy, ValueEnum)]
pub enum SexArg {
    Female,
    Male,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Female => Sex::Female,
            SexArg::Male => Sex::Male,
        }
    }
}

#[derive(Args)]
pub struct SimulateArgs {
    /// JSON object mapping question ids to answers
    #[arg(long)]
    pub transcript: PathBuf,

    /// Engine configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bank definition file (defaults to the compiled-in bank)
    #[arg(long)]
    pub bank: Option<PathBuf>,

    /// Respondent sex, for sex-specific questions
    #[arg(long, value_enum)]
    pub sex: Option<SexArg>,

    /// Also print a plain-text narrative after the snapshot
    #[arg(long)]
    pub narrative: bool,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let transcript = std::fs::read_to_string(&args.transcript)
        .wrap_err_with(|| format!("failed to read transcript {}", args.transcript.display()))?;
    let answers: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&transcript).wrap_err("transcript must be a JSON object of answers")?;

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };
    let loaded = load_bank(args.bank.as_deref())?;
    let bank = loaded.as_ref().unwrap_or_else(|| standard_bank());
    let engine = AssessmentEngine::new(bank, config)?;

    let respondent = RespondentProfile {
        sex: args.sex.map(Sex::from),
    };
    let mut session = engine.start_session(Uuid::new_v4(), respondent);

    loop {
        let (next, outcome) = engine.next_step(&session)?;
        session = next;
        match outcome {
            NextQuestionOutcome::Question { question, .. } => {
                let Some(raw) = answers.get(&question.id) else {
                    bail!("transcript has no answer for question '{}'", question.id);
                };
                session = engine.record_raw(&session, &question.id, raw)?;
            }
            NextQuestionOutcome::ValidationRequired { .. } => {
                session = engine.acknowledge_validation(&session, ValidationChoice::Continue)?;
            }
            NextQuestionOutcome::ModuleComplete { .. } => {}
            NextQuestionOutcome::AssessmentComplete { .. } => break,
        }
    }

    let unused = answers.keys().filter(|id| !session.has_answered(id)).count();
    if unused > 0 {
        tracing::info!(unused, "transcript answers never asked");
    }

    let snapshot = engine.snapshot(&session)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    if args.narrative {
        println!();
        println!("{}", SummaryNarrator.generate_narrative(&snapshot)?);
    }
    Ok(())
}
