// Copyright 2026 the Arbor authors
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

//! Runtime configuration, loaded from an optional JSON file.
//!
//! Config parsing lives here in the runtime crate only; the lifecycle core
//! never sees it. Applying config to the adapter is a separate step driven
//! by `main`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for a headless runtime session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Name used in startup logging.
    pub app_name: String,
    /// When `true`, the runtime exits once stdin closes or reads `quit`.
    /// Turn this off when running detached from any terminal.
    pub watch_stdin: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            app_name: "arbor".to_string(),
            watch_stdin: true,
        }
    }
}

impl RuntimeConfig {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.app_name, "arbor");
        assert!(config.watch_stdin);
    }

    #[test]
    fn fields_override_defaults() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"app_name": "sim", "watch_stdin": false}"#).unwrap();
        assert_eq!(config.app_name, "sim");
        assert!(!config.watch_stdin);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<RuntimeConfig>(r#"{"app_nam": "typo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = RuntimeConfig::load(Path::new("/nonexistent/arbor.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/arbor.json"));
    }
}
