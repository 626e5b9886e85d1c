use crate::constants::{DEFAULT_CUT_PERCENT, DEFAULT_MEDIA};
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Poster run configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PosterOptions {
    // Files
    pub input_file: PathBuf,
    pub output_file: PathBuf,

    // Sizes: paper names or "W U x H U" strings
    /// Media paper override; `None` uses `default_media`
    pub media: Option<String>,
    /// Poster size override; `None` keeps the input page size
    pub poster: Option<String>,

    // Cut margin: "N%" of the media width or a length
    pub cut_margin: Option<String>,

    // Defaults
    pub default_media: String,
    pub cut_percent: f64,

    // Tool identity, shown by front ends
    pub author: String,
    pub version: String,
}

impl Default for PosterOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::new(),
            media: None,
            poster: None,
            cut_margin: None,
            default_media: DEFAULT_MEDIA.to_string(),
            cut_percent: DEFAULT_CUT_PERCENT,
            author: String::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl PosterOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| PosterError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PosterError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(PosterError::Config("No input file specified".to_string()));
        }

        if self.output_file.as_os_str().is_empty() {
            return Err(PosterError::Config("No output file specified".to_string()));
        }

        let is_pdf = self
            .output_file
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(PosterError::Config(format!(
                "Output file {} is not a pdf file",
                self.output_file.display()
            )));
        }

        let same_file = self
            .input_file
            .to_string_lossy()
            .eq_ignore_ascii_case(&self.output_file.to_string_lossy());
        if same_file {
            return Err(PosterError::Config(
                "Input and output pdf file cannot be the same".to_string(),
            ));
        }

        if self.default_media.trim().is_empty() {
            return Err(PosterError::Config("No default media specified".to_string()));
        }

        if !self.cut_percent.is_finite() || !(0.0..100.0).contains(&self.cut_percent) {
            return Err(PosterError::Config(format!(
                "Cut percent must be in [0, 100), got {}",
                self.cut_percent
            )));
        }

        Ok(())
    }
}
