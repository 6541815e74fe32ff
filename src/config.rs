//! Export and helper configuration.
//!
//! Settings are read from a JSON file; every field is optional and falls
//! back to the defaults below.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Export Configuration
// ============================================================================

fn default_dpi() -> u32 {
    600
}

fn default_converter() -> String {
    "gs".to_string()
}

fn default_converter_args() -> Vec<String> {
    ["-q", "-dNOCACHE", "-dNOPAUSE", "-dBATCH", "-dSAFER", "-sDEVICE=eps2write"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// How figures are written to disk.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Resolution the vector output is quantized to
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    /// Program that turns a PDF into a transparency-preserving EPS
    #[serde(default = "default_converter")]
    pub converter: String,
    /// Converter arguments placed before the output and input file arguments
    #[serde(default = "default_converter_args")]
    pub converter_args_prefix: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            dpi: default_dpi(),
            converter: default_converter(),
            converter_args_prefix: default_converter_args(),
        }
    }
}

// ============================================================================
// Helper Configuration
// ============================================================================

/// Top-level configuration file contents.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct HelperConfig {
    #[serde(default)]
    pub export: ExportOptions,
    /// Use the science theme unless the command line says otherwise
    #[serde(default)]
    pub science: bool,
}

impl HelperConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let config: HelperConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.export.dpi == 0 {
            bail!("export.dpi must be positive");
        }
        if self.export.converter.trim().is_empty() {
            bail!("export.converter must name a program");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let opts = ExportOptions::default();
        assert_eq!(opts.dpi, 600);
        assert_eq!(opts.converter, "gs");
        assert_eq!(opts.converter_args_prefix.last().map(String::as_str), Some("-sDEVICE=eps2write"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = write_config(r#"{"export": {"dpi": 300}, "science": true}"#);
        let config = HelperConfig::load(file.path()).unwrap();
        assert_eq!(config.export.dpi, 300);
        assert_eq!(config.export.converter, "gs");
        assert!(config.science);
    }

    #[test]
    fn test_empty_object_is_default() {
        let file = write_config("{}");
        assert_eq!(HelperConfig::load(file.path()).unwrap(), HelperConfig::default());
    }

    #[test]
    fn test_zero_dpi_rejected() {
        let file = write_config(r#"{"export": {"dpi": 0}}"#);
        let err = HelperConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("dpi"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = HelperConfig::load("/nonexistent/wackyplot.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open config file"));
    }
}
