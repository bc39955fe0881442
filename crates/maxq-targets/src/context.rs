//! Build context supplied by the host when it instantiates a target.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::TargetPlatform;

/// Build configuration requested by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetConfiguration {
    Debug,
    DebugGame,
    #[default]
    Development,
    Test,
    Shipping,
}

impl fmt::Display for TargetConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TargetConfiguration::Debug => "Debug",
            TargetConfiguration::DebugGame => "DebugGame",
            TargetConfiguration::Development => "Development",
            TargetConfiguration::Test => "Test",
            TargetConfiguration::Shipping => "Shipping",
        };
        f.write_str(s)
    }
}

/// What the host knows about the target being instantiated.
///
/// Target definitions only consult `platform`; the remaining fields are
/// carried so that placeholder values can be derived from the same record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetInfo {
    /// Target name (e.g., "SpiceEditor").
    pub name: String,
    /// Platform being compiled for.
    pub platform: TargetPlatform,
    /// Build configuration.
    #[serde(default)]
    pub configuration: TargetConfiguration,
    /// Architecture suffix, if the host distinguishes one.
    #[serde(default)]
    pub architecture: Option<String>,
    /// Directory containing the project file.
    #[serde(default)]
    pub project_dir: Option<PathBuf>,
}

impl TargetInfo {
    /// Context with the default configuration and no project directory.
    pub fn new(name: impl Into<String>, platform: TargetPlatform) -> Self {
        Self {
            name: name.into(),
            platform,
            configuration: TargetConfiguration::default(),
            architecture: None,
            project_dir: None,
        }
    }

    /// Set the build configuration.
    pub fn with_configuration(mut self, configuration: TargetConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Set the project directory.
    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }
}
