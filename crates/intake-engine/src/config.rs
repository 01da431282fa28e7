use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use intake_bank::catalog::ModuleDefinition;

use crate::error::ConfigError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 2;

/// Tunables for selection, detection, monitoring and aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    /// Hard cap on questions per session.
    pub max_questions: usize,
    /// Confidence a pattern must exceed to become active, unless the
    /// pattern definition overrides it.
    pub activation_threshold: f64,
    /// Under-reporting risk above which the validation step is shown.
    pub validation_risk_threshold: f64,
    pub under_reporting: UnderReportingConfig,
    /// Relative change between halves that counts as a trend.
    pub trend_change: f64,
    pub seconds_per_question: u32,
    /// Questions after which a module closes as sufficient, unless the
    /// module definition or an override sets its own cap.
    pub module_question_cap: usize,
    /// Per-module overrides keyed by module id.
    pub modules: BTreeMap<String, ModuleOverride>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderReportingConfig {
    /// Share of scale answers at the mildest tier that counts as suspicious.
    pub mild_fraction: f64,
    pub high_risk: f64,
    pub baseline_risk: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_questions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_questions: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            max_questions: 250,
            activation_threshold: 0.5,
            validation_risk_threshold: 0.7,
            under_reporting: UnderReportingConfig::default(),
            trend_change: 0.10,
            seconds_per_question: 15,
            module_question_cap: 20,
            modules: BTreeMap::new(),
        }
    }
}

impl Default for UnderReportingConfig {
    fn default() -> Self {
        Self {
            mild_fraction: 0.7,
            high_risk: 0.8,
            baseline_risk: 0.2,
        }
    }
}

impl EngineConfig {
    pub fn min_questions(&self, module: &ModuleDefinition) -> usize {
        self.modules
            .get(&module.id)
            .and_then(|o| o.min_questions)
            .unwrap_or(module.min_questions)
    }

    /// Override first, then the module definition, then the engine default.
    pub fn question_cap(&self, module: &ModuleDefinition) -> usize {
        self.modules
            .get(&module.id)
            .and_then(|o| o.max_questions)
            .or(module.max_questions)
            .unwrap_or(self.module_question_cap)
    }

    pub fn emphasis(&self, module: &ModuleDefinition) -> f64 {
        self.modules
            .get(&module.id)
            .and_then(|o| o.emphasis)
            .unwrap_or(module.emphasis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_questions == 0 {
            return Err(invalid("max_questions", "must be at least 1"));
        }
        unit_interval("activation_threshold", self.activation_threshold)?;
        unit_interval("validation_risk_threshold", self.validation_risk_threshold)?;
        unit_interval("under_reporting.mild_fraction", self.under_reporting.mild_fraction)?;
        unit_interval("under_reporting.high_risk", self.under_reporting.high_risk)?;
        unit_interval("under_reporting.baseline_risk", self.under_reporting.baseline_risk)?;
        if self.under_reporting.baseline_risk > self.under_reporting.high_risk {
            return Err(invalid(
                "under_reporting.baseline_risk",
                "must not exceed under_reporting.high_risk",
            ));
        }
        if !(self.trend_change > 0.0 && self.trend_change.is_finite()) {
            return Err(invalid("trend_change", "must be a positive number"));
        }
        if self.module_question_cap == 0 {
            return Err(invalid("module_question_cap", "must be at least 1"));
        }
        for (module_id, o) in &self.modules {
            if o.max_questions == Some(0) {
                return Err(invalid(
                    &format!("modules.{module_id}.max_questions"),
                    "must be at least 1",
                ));
            }
            if let Some(emphasis) = o.emphasis
                && !(emphasis > 0.0 && emphasis.is_finite())
            {
                return Err(invalid(
                    &format!("modules.{module_id}.emphasis"),
                    "must be a positive number",
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, &format!("{value} is outside [0, 1]")))
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<EngineConfig, ConfigError> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: EngineConfig = serde_json::from_value(migrated)?;
    config.validate()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: target_max_questions renamed to max_questions
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        if let Some(cap) = obj.remove("target_max_questions") {
            obj.entry("max_questions").or_insert(cap);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed target_max_questions)");
    }

    // v1 → v2: module_question_cap added; its default applies
    if from_version < 2 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(2.into()),
        );
        tracing::info!("migrated config v1 → v2 (module_question_cap)");
    }

    Ok(json)
}

pub fn save_config(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    config.validate()?;
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "engine config saved");
    Ok(())
}
