//! intake-bank
//!
//! The question bank: modules, their questions, and the symptom-pattern
//! rule table. Pure data; the engine interprets it.

pub mod catalog;
pub mod error;
pub mod modules;
pub mod patterns;
mod questions;

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use catalog::{ModuleDefinition, PatternDefinition};
use error::BankError;
use intake_core::models::question::{Question, QuestionType};

/// Version tag of the compiled-in catalog.
pub const STANDARD_VERSION: &str = "2024.3";

/// Serialized form of a bank, as loaded from JSON at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankDefinition {
    pub version: String,
    pub modules: Vec<ModuleDefinition>,
    pub patterns: Vec<PatternDefinition>,
}

/// A validated, indexed question bank. Immutable once built.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    version: String,
    modules: Vec<ModuleDefinition>,
    patterns: Vec<PatternDefinition>,
    /// question id -> (module index, question index)
    index: HashMap<String, (usize, usize)>,
}

impl QuestionBank {
    pub fn new(definition: BankDefinition) -> Result<Self, BankError> {
        let BankDefinition {
            version,
            modules,
            patterns,
        } = definition;

        let mut module_ids = HashSet::new();
        let mut index = HashMap::new();
        for (mi, module) in modules.iter().enumerate() {
            if !module_ids.insert(module.id.clone()) {
                return Err(BankError::DuplicateModule(module.id.clone()));
            }
            if module.emphasis <= 0.0 {
                return Err(BankError::InvalidModule {
                    module_id: module.id.clone(),
                    reason: "emphasis must be positive".to_string(),
                });
            }
            if let Some(max) = module.max_questions
                && (max == 0 || max < module.min_questions)
            {
                return Err(BankError::InvalidModule {
                    module_id: module.id.clone(),
                    reason: format!("max_questions {max} must be at least 1 and not below min_questions"),
                });
            }
            for (qi, question) in module.questions.iter().enumerate() {
                if question.module_id != module.id {
                    return Err(BankError::ModuleMismatch {
                        question_id: question.id.clone(),
                        declared: question.module_id.clone(),
                        listed: module.id.clone(),
                    });
                }
                if index.insert(question.id.clone(), (mi, qi)).is_some() {
                    return Err(BankError::DuplicateQuestion(question.id.clone()));
                }
                check_question(question)?;
            }
        }

        let bank = Self {
            version,
            modules,
            patterns,
            index,
        };
        bank.check_references()?;
        Ok(bank)
    }

    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let definition: BankDefinition = serde_json::from_str(json)?;
        Self::new(definition)
    }

    pub fn to_definition(&self) -> BankDefinition {
        BankDefinition {
            version: self.version.clone(),
            modules: self.modules.clone(),
            patterns: self.patterns.clone(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Modules in their fixed priority order.
    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.modules
    }

    pub fn module(&self, id: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn module_position(&self, id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    pub fn patterns(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    pub fn pattern(&self, name: &str) -> Option<&PatternDefinition> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.index
            .get(id)
            .map(|&(mi, qi)| &self.modules[mi].questions[qi])
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.modules.iter().flat_map(|m| m.questions.iter())
    }

    pub fn question_count(&self) -> usize {
        self.index.len()
    }

    fn check_references(&self) -> Result<(), BankError> {
        let mut names = HashSet::new();
        for pattern in &self.patterns {
            if !names.insert(pattern.name.as_str()) {
                return Err(BankError::DuplicatePattern(pattern.name.clone()));
            }
            if pattern.required.is_empty() {
                return Err(BankError::InvalidPattern {
                    name: pattern.name.clone(),
                    reason: "no required markers".to_string(),
                });
            }
            if pattern.min_required == 0 || pattern.min_required > pattern.required.len() {
                return Err(BankError::InvalidPattern {
                    name: pattern.name.clone(),
                    reason: format!(
                        "min_required {} must be between 1 and {}",
                        pattern.min_required,
                        pattern.required.len()
                    ),
                });
            }
            if let Some(threshold) = pattern.activation_threshold
                && !(0.0..1.0).contains(&threshold)
            {
                return Err(BankError::InvalidPattern {
                    name: pattern.name.clone(),
                    reason: format!("activation threshold {threshold} outside [0, 1)"),
                });
            }
            let referenced = pattern
                .conditions()
                .map(|c| &c.question_id)
                .chain(pattern.follow_ups.iter());
            for question_id in referenced {
                if self.question(question_id).is_none() {
                    return Err(BankError::UnknownQuestion {
                        referenced_by: pattern.name.clone(),
                        question_id: question_id.clone(),
                    });
                }
            }
            for module_id in &pattern.related_modules {
                if self.module(module_id).is_none() {
                    return Err(BankError::UnknownModule {
                        referenced_by: pattern.name.clone(),
                        module_id: module_id.clone(),
                    });
                }
            }
        }

        for question in self.questions() {
            for pattern in &question.trigger_patterns {
                if !names.contains(pattern.as_str()) {
                    return Err(BankError::UnknownPattern {
                        question_id: question.id.clone(),
                        pattern: pattern.clone(),
                    });
                }
            }
            for trigger in &question.module_triggers {
                if self.module(&trigger.module_id).is_none() {
                    return Err(BankError::UnknownModule {
                        referenced_by: question.id.clone(),
                        module_id: trigger.module_id.clone(),
                    });
                }
            }
            if let Some(precondition) = &question.precondition
                && self.question(&precondition.question_id).is_none()
            {
                return Err(BankError::UnknownQuestion {
                    referenced_by: question.id.clone(),
                    question_id: precondition.question_id.clone(),
                });
            }
            for skipped in question.options.iter().flat_map(|o| o.skips.iter()) {
                if self.question(skipped).is_none() {
                    return Err(BankError::UnknownQuestion {
                        referenced_by: question.id.clone(),
                        question_id: skipped.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_question(question: &Question) -> Result<(), BankError> {
    let invalid = |reason: &str| BankError::InvalidQuestion {
        question_id: question.id.clone(),
        reason: reason.to_string(),
    };

    if question.scoring_weight < 0.0 {
        return Err(invalid("scoring weight is negative"));
    }
    match question.question_type {
        QuestionType::MultipleChoice | QuestionType::Frequency | QuestionType::MultiSelect
            if question.options.is_empty() =>
        {
            Err(invalid("choice questions need options"))
        }
        QuestionType::LikertScale | QuestionType::Number => match question.scale_range() {
            Some(range) if range.max <= range.min => Err(invalid("scale max must exceed min")),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

/// The compiled-in bank: every module in [`modules::all_modules`] and the
/// pattern table in [`patterns::all_patterns`].
///
/// # Panics
///
/// Panics on first use if the compiled-in tables fail validation. The
/// tables are constants, so a panic indicates a catalog definition bug.
pub fn standard_bank() -> &'static QuestionBank {
    static BANK: LazyLock<QuestionBank> = LazyLock::new(|| {
        QuestionBank::new(BankDefinition {
            version: STANDARD_VERSION.to_string(),
            modules: modules::all_modules(),
            patterns: patterns::all_patterns(),
        })
        .unwrap_or_else(|e| panic!("standard question bank is malformed: {e}"))
    });
    &BANK
}
