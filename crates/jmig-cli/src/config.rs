//! Optional TOML configuration for batch runs.
//!
//! ```toml
//! format = "%Y-%m-%d %H:%M"
//! date_columns = ["Created", "Updated", "Resolved"]
//! on_unresolved = "skip"
//! unattended = true
//!
//! [schemas]
//! "Custom Audit" = ["datetime", "username", "comment"]
//! ```
//!
//! Command-line flags override file values.

use std::path::Path;

use anyhow::{Context, Result, bail};
use jmig_model::{DELIMITER, OnUnresolved, SchemaRegistry, SchemaTable};
use jmig_temporal::FormatSpec;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Target pattern for normalized dates.
    pub format: Option<FormatSpec>,
    /// Plain date columns, matched case-insensitively against CSV headers.
    pub date_columns: Vec<String>,
    pub on_unresolved: OnUnresolved,
    /// Never prompt; unresolved values fall through to `on_unresolved`.
    pub unattended: bool,
    /// Extra compound-field schemas keyed by column header.
    pub schemas: SchemaTable,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if let Some(format) = &config.format {
            check_target_format(format)?;
        }
        Ok(config)
    }

    /// Builtin schemas extended by `[schemas]`.
    pub fn registry(&self) -> Result<SchemaRegistry> {
        let mut registry = SchemaRegistry::builtin();
        registry
            .extend(self.schemas.clone())
            .context("invalid [schemas] entry")?;
        Ok(registry)
    }
}

/// A target pattern that can emit the delimiter would corrupt compound fields.
pub fn check_target_format(format: &FormatSpec) -> Result<()> {
    if format.as_str().contains(DELIMITER) {
        bail!(
            "target format {:?} must not contain {DELIMITER:?}",
            format.as_str()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = Config::parse(
            r#"
            format = "%Y-%m-%d %H:%M"
            date_columns = ["Created", "Updated"]
            on_unresolved = "skip"
            unattended = true

            [schemas]
            "Custom Audit" = ["datetime", "username", "comment"]
            "#,
        )
        .unwrap();

        assert_eq!(config.format.as_ref().map(FormatSpec::as_str), Some("%Y-%m-%d %H:%M"));
        assert_eq!(config.on_unresolved, OnUnresolved::Skip);
        assert!(config.unattended);
        assert_eq!(config.date_columns, vec!["Created", "Updated"]);

        let registry = config.registry().unwrap();
        assert_eq!(registry.get("Custom Audit").map(|schema| schema.len()), Some(3));
        assert!(registry.get("Attachment").is_some());
    }

    #[test]
    fn defaults_when_empty() {
        let config = Config::parse("").unwrap();
        assert!(config.format.is_none());
        assert_eq!(config.on_unresolved, OnUnresolved::Abort);
        assert!(!config.unattended);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_formats() {
        assert!(Config::parse("fromat = \"%Y\"").is_err());
        assert!(Config::parse("format = \"%Y;%m\"").is_err());
        assert!(Config::parse("format = \"%Q\"").is_err());
        assert!(Config::parse("on_unresolved = \"retry\"").is_err());
    }

    #[test]
    fn invalid_schema_is_reported() {
        let config = Config::parse("[schemas]\nBroken = [\"datetime\", \"priority\"]").unwrap();
        assert!(config.registry().is_err());
    }
}
