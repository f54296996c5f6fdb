use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

use crate::format::numberformat::LargeNumberFormat;


#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummationSettings {
    /// Panels computed per scheduling turn.
    pub chunk_size: u64,
    /// Sums with fewer panels than this run in a single chunk.
    pub chunk_threshold: u64,
}

impl Default for SummationSettings {
    fn default() -> Self {
        SummationSettings {
            chunk_size: 1_000_000,
            chunk_threshold: 2_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChunkTier {
    pub below_degree: u64,
    pub chunk_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EDigitsSettings {
    /// Degrees below this are summed in one go.
    pub synchronous_below: u64,
    /// Checked in order; the first tier whose bound exceeds the degree wins.
    pub chunk_tiers: Vec<ChunkTier>,
    pub fallback_chunk_size: u64,
}

impl Default for EDigitsSettings {
    fn default() -> Self {
        EDigitsSettings {
            synchronous_below: 2000,
            chunk_tiers: vec![
                ChunkTier { below_degree: 10_000, chunk_size: 500 },
                ChunkTier { below_degree: 25_000, chunk_size: 200 },
            ],
            fallback_chunk_size: 100,
        }
    }
}

impl EDigitsSettings {
    /// Terms summed per chunk: smaller chunks for larger degrees.
    pub fn chunk_size_for(&self, degree: u64) -> u64 {
        if degree < self.synchronous_below {
            return degree.saturating_add(1);
        }
        self.chunk_tiers
            .iter()
            .find(|tier| degree < tier.below_degree)
            .map_or(self.fallback_chunk_size, |tier| tier.chunk_size)
            .max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EulerSettings {
    /// Rows kept per trajectory, not counting the final row.
    pub row_divisions: u64,
}

impl Default for EulerSettings {
    fn default() -> Self {
        EulerSettings { row_divisions: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    pub large_number_format: LargeNumberFormat,
    pub scientific_decimals: u32,
    pub scientific_high: f64,
    pub scientific_low: f64,
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            large_number_format: LargeNumberFormat::Default,
            scientific_decimals: 4,
            scientific_high: 1e13,
            scientific_low: 1e-10,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    pub summation: SummationSettings,
    pub e_digits: EDigitsSettings,
    pub euler: EulerSettings,
    pub format: FormatSettings,
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::new();
        assert_eq!(config.summation.chunk_size, 1_000_000);
        assert_eq!(config.summation.chunk_threshold, 2_000_000);
        assert_eq!(config.euler.row_divisions, 10);
        assert_eq!(config.format.large_number_format, LargeNumberFormat::Default);
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = Configuration::from_json_str(r#"{ "summation": { "chunk_size": 10 } }"#).unwrap();
        assert_eq!(config.summation.chunk_size, 10);
        assert_eq!(config.summation.chunk_threshold, 2_000_000);
        assert_eq!(config.e_digits, EDigitsSettings::default());
    }

    #[test]
    fn test_e_digit_chunk_tiers() {
        let settings = EDigitsSettings::default();
        assert_eq!(settings.chunk_size_for(100), 101);
        assert_eq!(settings.chunk_size_for(5_000), 500);
        assert_eq!(settings.chunk_size_for(20_000), 200);
        assert_eq!(settings.chunk_size_for(100_000), 100);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "format": {{ "large_number_format": "e_engineering" }} }}"#).unwrap();
        let config = Configuration::from_file(file.path()).unwrap();
        assert_eq!(config.format.large_number_format, LargeNumberFormat::EEngineering);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let result = Configuration::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigurationError::Json(_))));
    }
}
