use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use intake_bank::standard_bank;

use super::load_bank;

#[derive(Args)]
pub struct BankArgs {
    /// Bank definition file (defaults to the compiled-in bank)
    #[arg(long)]
    pub bank: Option<PathBuf>,
}

pub fn run(args: BankArgs) -> Result<()> {
    let loaded = load_bank(args.bank.as_deref())?;
    let bank = loaded.as_ref().unwrap_or_else(|| standard_bank());

    println!("Question bank {}", bank.version());
    println!("{} questions, {} patterns", bank.question_count(), bank.patterns().len());
    println!();
    println!("{:<20} {:>5} {:>10} {:>4} {:>8}", "MODULE", "BASE", "FOLLOW-UP", "MIN", "EMPHASIS");
    for module in bank.modules() {
        let follow_ups = module.questions.iter().filter(|q| q.is_follow_up).count();
        println!(
            "{:<20} {:>5} {:>10} {:>4} {:>8.1}",
            module.id,
            module.full_question_count(),
            follow_ups,
            module.min_questions,
            module.emphasis,
        );
    }
    println!();
    println!("{:<28} {:>8} {:>8}  {}", "PATTERN", "MARKERS", "URGENCY", "NAME");
    for pattern in bank.patterns() {
        println!(
            "{:<28} {:>8} {:>8}  {}",
            pattern.name,
            pattern.conditions().count(),
            format!("{:?}", pattern.urgency),
            pattern.display_name,
        );
    }
    Ok(())
}
