pub mod aggregate;
pub mod bank;
pub mod simulate;

use std::path::Path;

use eyre::{Result, WrapErr};
use intake_bank::QuestionBank;

/// Load a bank definition file, or `None` to use the compiled-in bank.
pub fn load_bank(path: Option<&Path>) -> Result<Option<QuestionBank>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read bank file {}", path.display()))?;
    let bank = QuestionBank::from_json(&json)
        .wrap_err_with(|| format!("invalid bank file {}", path.display()))?;
    tracing::info!(path = %path.display(), version = bank.version(), "bank loaded");
    Ok(Some(bank))
}
