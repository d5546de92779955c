// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration, read from an optional JSON file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::scene::reconcile::{ReconcileConfig, DEFAULT_POSITION_EPSILON};
use crate::store::DEFAULT_HISTORY_CAPACITY;

/// Every field falls back to its default when absent, so `{}` is a valid file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub history_capacity: usize,
    pub position_epsilon: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            position_epsilon: DEFAULT_POSITION_EPSILON,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })
    }

    pub fn reconcile(&self) -> ReconcileConfig {
        ReconcileConfig { position_epsilon: self.position_epsilon }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read config {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid config {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{Config, ConfigError};

    static TEMP_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct TempFile {
        path: PathBuf,
    }

    impl TempFile {
        fn with_contents(contents: &str) -> Self {
            let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
            let mut path = env::temp_dir();
            path.push(format!("dryad-config-{}-{counter}.json", std::process::id()));
            std::fs::write(&path, contents).unwrap();
            Self { path }
        }
    }

    impl Drop for TempFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    #[test]
    fn empty_object_yields_defaults() {
        let file = TempFile::with_contents("{}");
        let config = Config::load(&file.path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.history_capacity, 250);
        assert_eq!(config.reconcile().position_epsilon, 0.5);
        assert_eq!(config.layout.horizontal_gap, 280.0);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let file = TempFile::with_contents(r#"{ "layout": { "vertical_gap": 20 }, "history_capacity": 5 }"#);
        let config = Config::load(&file.path).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.layout.vertical_gap, 20.0);
        assert_eq!(config.layout.node_height, 44.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = env::temp_dir().join("dryad-config-does-not-exist.json");
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read config"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let file = TempFile::with_contents("{ history_capacity: }");
        let err = Config::load(&file.path).unwrap_err();
        assert!(matches!(err, ConfigError::Json { .. }));
    }
}
