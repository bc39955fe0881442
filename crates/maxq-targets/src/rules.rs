//! Target rules: the declarative description of one binary.
//!
//! A [`TargetRulesBuilder`] is filled in while a target is being
//! instantiated and then frozen into [`TargetRules`], which the host only
//! reads. The builder is append-only: every `add_*` ignores values that are
//! already present, and nothing can be removed or reordered.

use serde::{Deserialize, Serialize};

use crate::platform::TargetPlatform;
use crate::step::PostBuildStep;

/// Kind of binary a target produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    #[default]
    Game,
    Editor,
    Client,
    Server,
    Program,
}

/// Version tag selecting the host's default build settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildSettingsVersion {
    #[default]
    V1,
    V2,
    Latest,
}

/// Compiler and linker switches. `None` leaves the host default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildFlags {
    /// Fast incremental PDB linking.
    #[serde(default)]
    pub use_fast_pdb_linking: Option<bool>,
    /// Export public symbols without explicit annotation.
    #[serde(default)]
    pub public_symbols_by_default: Option<bool>,
}

/// Settings consulted only when building for Windows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WindowsPlatformSettings {
    /// Strip symbols no module references. The host enables this by default.
    #[serde(default)]
    pub strip_unreferenced_symbols: Option<bool>,
}

/// Frozen target rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetRules {
    name: String,
    platform: TargetPlatform,
    target_type: TargetType,
    build_settings: BuildSettingsVersion,
    extra_module_names: Vec<String>,
    #[serde(default)]
    global_definitions: Vec<String>,
    #[serde(default)]
    include_paths: Vec<String>,
    #[serde(default)]
    additional_libraries: Vec<String>,
    #[serde(default)]
    runtime_dependencies: Vec<String>,
    #[serde(default)]
    flags: BuildFlags,
    #[serde(default)]
    windows: WindowsPlatformSettings,
    #[serde(default)]
    post_build_steps: Vec<PostBuildStep>,
}

impl TargetRules {
    /// Target name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Platform the rules were instantiated for.
    pub fn platform(&self) -> TargetPlatform {
        self.platform
    }

    /// Kind of binary produced.
    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    /// Default build settings version.
    pub fn build_settings(&self) -> BuildSettingsVersion {
        self.build_settings
    }

    /// Modules compiled into the binary, without duplicates.
    pub fn extra_module_names(&self) -> &[String] {
        &self.extra_module_names
    }

    /// Compiler and linker switches.
    pub fn flags(&self) -> &BuildFlags {
        &self.flags
    }

    /// Windows-only settings.
    pub fn windows(&self) -> &WindowsPlatformSettings {
        &self.windows
    }

    /// Preprocessor definitions applied to every module.
    pub fn global_definitions(&self) -> &[String] {
        &self.global_definitions
    }

    /// Extra header search paths.
    pub fn include_paths(&self) -> &[String] {
        &self.include_paths
    }

    /// Extra libraries passed to the linker.
    pub fn additional_libraries(&self) -> &[String] {
        &self.additional_libraries
    }

    /// Files staged next to the binary.
    pub fn runtime_dependencies(&self) -> &[String] {
        &self.runtime_dependencies
    }

    /// Post-build steps in the order they run.
    pub fn post_build_steps(&self) -> &[PostBuildStep] {
        &self.post_build_steps
    }
}

/// Append-only builder for [`TargetRules`].
#[derive(Debug, Clone)]
pub struct TargetRulesBuilder {
    rules: TargetRules,
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

impl TargetRulesBuilder {
    /// Start from host defaults.
    pub fn new(name: impl Into<String>, platform: TargetPlatform) -> Self {
        Self {
            rules: TargetRules {
                name: name.into(),
                platform,
                target_type: TargetType::default(),
                build_settings: BuildSettingsVersion::default(),
                extra_module_names: Vec::new(),
                flags: BuildFlags::default(),
                windows: WindowsPlatformSettings::default(),
                global_definitions: Vec::new(),
                include_paths: Vec::new(),
                additional_libraries: Vec::new(),
                runtime_dependencies: Vec::new(),
                post_build_steps: Vec::new(),
            },
        }
    }

    /// Platform being built for.
    pub fn platform(&self) -> TargetPlatform {
        self.rules.platform
    }

    /// Set the kind of binary.
    pub fn target_type(&mut self, target_type: TargetType) -> &mut Self {
        self.rules.target_type = target_type;
        self
    }

    /// Set the build settings version.
    pub fn build_settings(&mut self, version: BuildSettingsVersion) -> &mut Self {
        self.rules.build_settings = version;
        self
    }

    /// Compiler and linker switches, for assignment.
    pub fn flags(&mut self) -> &mut BuildFlags {
        &mut self.rules.flags
    }

    /// Windows-only settings, for assignment.
    pub fn windows(&mut self) -> &mut WindowsPlatformSettings {
        &mut self.rules.windows
    }

    /// Add a module unless already listed.
    pub fn add_module(&mut self, name: impl Into<String>) -> &mut Self {
        push_unique(&mut self.rules.extra_module_names, name.into());
        self
    }

    /// Add several modules, skipping any already listed.
    pub fn add_modules<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_module(name);
        }
        self
    }

    /// Add a global preprocessor definition.
    pub fn add_definition(&mut self, definition: impl Into<String>) -> &mut Self {
        push_unique(&mut self.rules.global_definitions, definition.into());
        self
    }

    /// Add a header search path.
    pub fn add_include_path(&mut self, path: impl Into<String>) -> &mut Self {
        push_unique(&mut self.rules.include_paths, path.into());
        self
    }

    /// Add a library to link.
    pub fn add_library(&mut self, path: impl Into<String>) -> &mut Self {
        push_unique(&mut self.rules.additional_libraries, path.into());
        self
    }

    /// Add a file to stage next to the binary.
    pub fn add_runtime_dependency(&mut self, path: impl Into<String>) -> &mut Self {
        push_unique(&mut self.rules.runtime_dependencies, path.into());
        self
    }

    /// Append a post-build step. A step equal to one already present is dropped.
    pub fn add_post_build_step(&mut self, step: PostBuildStep) -> &mut Self {
        if self.rules.post_build_steps.contains(&step) {
            tracing::debug!(step = %step.render(), "post-build step already registered");
        } else {
            self.rules.post_build_steps.push(step);
        }
        self
    }

    /// Freeze the rules.
    pub fn build(self) -> TargetRules {
        self.rules
    }
}

/// How serious a validation issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A problem found in a set of target rules.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

/// Check target rules for structural problems.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with every problem found.
/// Rules produced by [`TargetRulesBuilder`] never contain duplicates; the
/// duplicate checks matter for rules read back from an exported file.
pub fn validate_rules(rules: &TargetRules) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if rules.extra_module_names.is_empty() {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            message: "target has no modules".into(),
        });
    }

    for (i, module) in rules.extra_module_names.iter().enumerate() {
        if rules.extra_module_names[..i].contains(module) {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("module '{module}' listed more than once"),
            });
        }
    }

    for (i, step) in rules.post_build_steps.iter().enumerate() {
        if rules.post_build_steps[..i].contains(step) {
            let command = step.render();
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("post-build step {command} registered more than once"),
            });
        }
        if step.has_embedded_quote() {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("post-build step {i} contains a double quote"),
            });
        }
        if let Err(e) = step.placeholders() {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("post-build step {i}: {e}"),
            });
        }
        if step.program.trim().is_empty() {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("post-build step {i} has an empty program"),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}
