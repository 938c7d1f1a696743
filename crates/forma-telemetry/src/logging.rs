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

//! Process-wide logger setup.

use std::sync::Once;

/// Logger configuration.
///
/// `filter` follows the `env_logger` syntax, e.g. `"info"` or
/// `"warn,forma_agents=debug"`. When it is `None`, `RUST_LOG` is honored and
/// the level falls back to `info`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Explicit filter directives.
    pub filter: Option<String>,
    /// ANSI coloring behavior.
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Creates a configuration with an explicit filter.
    pub fn with_filter(filter: Option<String>) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.filter.as_deref() {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        // Another logger may already be installed, e.g. by a test harness.
        if let Err(e) = builder.try_init() {
            eprintln!("Logger already initialized: {e}");
            return;
        }

        log::debug!("Logging initialized");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_logging(LoggingConfig::with_filter(Some("debug".into())));
        init_logging(LoggingConfig::default());
        log::info!("still alive");
    }
}
