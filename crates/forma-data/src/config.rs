// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Engine configuration, stored as RON.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Logging options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// An `env_logger` filter such as `"info,forma_agents=debug"`.
    /// `None` defers to `RUST_LOG`.
    pub filter: Option<String>,
}

/// Reconstruction limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionSection {
    /// Children nested deeper than this are replaced by placeholders.
    pub max_child_depth: usize,
}

impl Default for ReconstructionSection {
    fn default() -> Self {
        Self {
            max_child_depth: 32,
        }
    }
}

/// Synchronization behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSection {
    /// Remove local entities missing from a collection snapshot.
    pub prune_missing: bool,
}

impl Default for SyncSection {
    fn default() -> Self {
        Self {
            prune_missing: true,
        }
    }
}

/// The full engine configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormaConfig {
    /// Logging options.
    pub logging: LoggingSection,
    /// Reconstruction limits.
    pub reconstruction: ReconstructionSection,
    /// Synchronization behavior.
    pub sync: SyncSection,
}

/// An error raised while loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    Io(std::io::Error),
    /// The file is not valid RON for this layout.
    Parse(ron::error::SpannedError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read configuration: {e}"),
            ConfigError::Parse(e) => write!(f, "Failed to parse configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl FormaConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        ron::from_str(source).map_err(ConfigError::Parse)
    }

    /// Loads a configuration file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(source) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::from_ron_str(&source)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No configuration at {}, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Serializes the configuration as pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormaConfig::default();
        assert_eq!(config.logging.filter, None);
        assert_eq!(config.reconstruction.max_child_depth, 32);
        assert!(config.sync.prune_missing);
    }

    #[test]
    fn test_partial_ron_keeps_other_defaults() {
        let config = FormaConfig::from_ron_str("(sync: (prune_missing: false))")
            .expect("valid RON");
        assert!(!config.sync.prune_missing);
        assert_eq!(config.reconstruction.max_child_depth, 32);
    }

    #[test]
    fn test_ron_round_trip() {
        let mut config = FormaConfig::default();
        config.logging.filter = Some("debug".into());
        config.reconstruction.max_child_depth = 4;

        let text = config.to_ron_string().expect("config should serialize");
        let parsed = FormaConfig::from_ron_str(&text).expect("round trip");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_ron_is_an_error() {
        assert!(matches!(
            FormaConfig::from_ron_str("(sync: 12"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = FormaConfig::load("/definitely/not/here/forma.ron").expect("defaults");
        assert_eq!(config, FormaConfig::default());
    }
}
