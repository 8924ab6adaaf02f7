//! Tree construction settings.
//!
//! Defaults match the Toba Batak tarombo sheet the tool was first written
//! for: a `Nama` column for each person, an `Ayah` (father) column for the
//! parent, and `Mula Jadi Nabolon` as the synthetic common ancestor.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaromboError};

pub const DEFAULT_ROOT_NAME: &str = "Mula Jadi Nabolon";
pub const DEFAULT_NAME_COLUMN: &str = "Nama";
pub const DEFAULT_PARENT_COLUMN: &str = "Ayah";

/// Settings shared by record ingestion and tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Name of the synthetic root that every unparented record hangs from.
    #[serde(default = "default_root_name")]
    pub root_name: String,

    /// CSV header holding each person's name.
    #[serde(default = "default_name_column")]
    pub name_column: String,

    /// CSV header holding the parent's name.
    #[serde(default = "default_parent_column")]
    pub parent_column: String,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root_name: default_root_name(),
            name_column: default_name_column(),
            parent_column: default_parent_column(),
        }
    }
}

impl TreeConfig {
    /// Parse a config from TOML text. Missing keys fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML, or if the root name
    /// or a column name is blank.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: TreeConfig =
            toml::from_str(s).map_err(|e| TaromboError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails to parse.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Override the root name.
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Override the CSV column names.
    pub fn with_columns(
        mut self,
        name_column: impl Into<String>,
        parent_column: impl Into<String>,
    ) -> Self {
        self.name_column = name_column.into();
        self.parent_column = parent_column.into();
        self
    }

    /// Reject blank root and column names.
    ///
    /// # Errors
    /// Returns [`TaromboError::Config`] naming the blank field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("root_name", &self.root_name),
            ("name_column", &self.name_column),
            ("parent_column", &self.parent_column),
        ] {
            if value.trim().is_empty() {
                return Err(TaromboError::Config(format!("'{}' must not be empty", field)));
            }
        }
        if self.name_column.eq_ignore_ascii_case(&self.parent_column) {
            return Err(TaromboError::Config(format!(
                "name and parent columns must differ (both are '{}')",
                self.name_column
            )));
        }
        Ok(())
    }
}

fn default_root_name() -> String {
    DEFAULT_ROOT_NAME.to_string()
}

fn default_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

fn default_parent_column() -> String {
    DEFAULT_PARENT_COLUMN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeConfig::default();
        assert_eq!(config.root_name, "Mula Jadi Nabolon");
        assert_eq!(config.name_column, "Nama");
        assert_eq!(config.parent_column, "Ayah");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = TreeConfig::from_toml_str("root_name = \"Siraja Batak\"\n").unwrap();
        assert_eq!(config.root_name, "Siraja Batak");
        assert_eq!(config.name_column, "Nama");
        assert_eq!(config.parent_column, "Ayah");
    }

    #[test]
    fn test_from_toml_full() {
        let text = "root_name = \"R\"\nname_column = \"name\"\nparent_column = \"father\"\n";
        let config = TreeConfig::from_toml_str(text).unwrap();
        let expected = TreeConfig::default()
            .with_root_name("R")
            .with_columns("name", "father");
        assert_eq!(config, expected);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        let config = TreeConfig::from_toml_str("").unwrap();
        assert_eq!(config, TreeConfig::default());
    }

    #[test]
    fn test_blank_root_rejected() {
        let result = TreeConfig::from_toml_str("root_name = \"  \"\n");
        let msg = format!("{}", result.unwrap_err());
        assert!(msg.contains("root_name"), "Error was: {}", msg);
    }

    #[test]
    fn test_same_columns_rejected() {
        let config = TreeConfig::default().with_columns("name", "NAME");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = TreeConfig::from_toml_str("root_name = ");
        assert!(matches!(result, Err(TaromboError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = TreeConfig::from_toml_file("/nonexistent/tarombo.toml");
        assert!(matches!(result, Err(TaromboError::Io(_))));
    }
}
