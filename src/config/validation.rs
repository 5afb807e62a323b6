//! Configuration validation with non-fatal warnings.
use super::Config;

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration section (e.g., "sync", "link").
    pub source: String,
    /// The specific item that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a new warning.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for configuration validators.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;
}

/// Validator for the `[sync]` table.
#[derive(Debug)]
pub struct SyncValidator<'a> {
    config: &'a super::SyncConfig,
}

impl<'a> SyncValidator<'a> {
    /// Create a validator over `config`.
    #[must_use]
    pub const fn new(config: &'a super::SyncConfig) -> Self {
        Self { config }
    }
}

impl ConfigValidator for SyncValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        if self.config.steps.is_empty() {
            warnings.push(ValidationWarning::new(
                "sync",
                "steps",
                "no commands configured; update will fail",
            ));
        }
        for (index, step) in self.config.steps.iter().enumerate() {
            if step.command.trim().is_empty() {
                warnings.push(ValidationWarning::new(
                    "sync",
                    format!("steps[{index}]"),
                    "command is empty",
                ));
            }
            if step.stage.as_deref().is_some_and(|s| s.trim().is_empty()) {
                warnings.push(ValidationWarning::new(
                    "sync",
                    format!("steps[{index}]"),
                    "stage label is empty",
                ));
            }
        }
        warnings
    }
}

/// Validator for the `[link]` table.
#[derive(Debug)]
pub struct LinkValidator<'a> {
    config: &'a super::LinkConfig,
}

impl<'a> LinkValidator<'a> {
    /// Create a validator over `config`.
    #[must_use]
    pub const fn new(config: &'a super::LinkConfig) -> Self {
        Self { config }
    }
}

impl ConfigValidator for LinkValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        match &self.config.destination {
            Some(dest) if dest.is_relative() => vec![ValidationWarning::new(
                "link",
                "destination",
                format!(
                    "relative path {} is resolved against the current directory",
                    dest.display()
                ),
            )],
            _ => Vec::new(),
        }
    }
}

/// Run every validator over `config`.
#[must_use]
pub fn validate_all(config: &Config) -> Vec<ValidationWarning> {
    let validators: [&dyn ConfigValidator; 2] = [
        &SyncValidator::new(&config.sync),
        &LinkValidator::new(&config.link),
    ];
    validators.iter().flat_map(|v| v.validate()).collect()
}
