//! Native-library build delegation.
//!
//! A target hands itself to a [`NativeLibraryLinker`] so the wrapped native
//! library can contribute modules, paths, and definitions. The linker only
//! sees a [`NativeLinkage`], which can add to the configuration but never
//! remove or reorder what is already there.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::platform::TargetPlatform;
use crate::rules::TargetRulesBuilder;

/// Something that knows how to link a native library into a target.
///
/// Implementations must be idempotent: linking twice into the same
/// configuration leaves it as after the first call. [`NativeLinkage`]
/// ignores repeated values, so purely additive linkers get this for free.
pub trait NativeLibraryLinker {
    /// Library name, for diagnostics.
    fn name(&self) -> &str;

    /// Augment the target configuration.
    fn link(&self, linkage: &mut NativeLinkage<'_>) -> Result<()>;
}

/// Additive view of a target under construction.
pub struct NativeLinkage<'a> {
    builder: &'a mut TargetRulesBuilder,
}

impl<'a> NativeLinkage<'a> {
    /// Wrap a target under construction.
    pub fn new(builder: &'a mut TargetRulesBuilder) -> Self {
        Self { builder }
    }

    /// Platform being built for.
    pub fn platform(&self) -> TargetPlatform {
        self.builder.platform()
    }

    /// Add a module unless already listed.
    pub fn add_module(&mut self, name: impl Into<String>) -> &mut Self {
        self.builder.add_module(name);
        self
    }

    /// Add a global preprocessor definition.
    pub fn add_definition(&mut self, definition: impl Into<String>) -> &mut Self {
        self.builder.add_definition(definition);
        self
    }

    /// Add a header search path.
    pub fn add_include_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.builder.add_include_path(path);
        self
    }

    /// Add a library to link.
    pub fn add_library(&mut self, path: impl Into<String>) -> &mut Self {
        self.builder.add_library(path);
        self
    }

    /// Add a file to stage next to the binary.
    pub fn add_runtime_dependency(&mut self, path: impl Into<String>) -> &mut Self {
        self.builder.add_runtime_dependency(path);
        self
    }
}

/// Links nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNativeLibrary;

impl NativeLibraryLinker for NoNativeLibrary {
    fn name(&self) -> &str {
        "none"
    }

    fn link(&self, _linkage: &mut NativeLinkage<'_>) -> Result<()> {
        Ok(())
    }
}

/// Platform-independent part of a linkage descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LibrarySection {
    /// Library name (e.g., "cspice").
    pub name: String,
    /// Modules that wrap the library.
    #[serde(default)]
    pub modules: Vec<String>,
    /// Preprocessor definitions applied target-wide.
    #[serde(default)]
    pub definitions: Vec<String>,
    /// Header search paths.
    #[serde(default)]
    pub include_paths: Vec<String>,
}

/// Per-platform part of a linkage descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformLinkage {
    /// Static or import libraries to link.
    #[serde(default)]
    pub libraries: Vec<String>,
    /// Files that must ship next to the binary.
    #[serde(default)]
    pub runtime_dependencies: Vec<String>,
}

/// A declarative linker read from a `native.toml` descriptor.
///
/// ```toml
/// [library]
/// name = "cspice"
/// modules = ["CSpice_Library"]
/// include-paths = ["$(PluginDir)/Source/ThirdParty/CSpice_Library/include"]
///
/// [platforms.win64]
/// libraries = ["$(PluginDir)/Source/ThirdParty/CSpice_Library/lib/Win64/cspice.lib"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinkageManifest {
    pub library: LibrarySection,
    /// Sections keyed by lowercase platform name.
    #[serde(default)]
    pub platforms: BTreeMap<String, PlatformLinkage>,
}

impl LinkageManifest {
    /// The section for `platform`, if the descriptor has one.
    pub fn platform(&self, platform: TargetPlatform) -> Option<&PlatformLinkage> {
        self.platforms.get(platform.as_str())
    }
}

impl NativeLibraryLinker for LinkageManifest {
    fn name(&self) -> &str {
        &self.library.name
    }

    fn link(&self, linkage: &mut NativeLinkage<'_>) -> Result<()> {
        for module in &self.library.modules {
            linkage.add_module(module.as_str());
        }
        for definition in &self.library.definitions {
            linkage.add_definition(definition.as_str());
        }
        for path in &self.library.include_paths {
            linkage.add_include_path(path.as_str());
        }

        let platform = linkage.platform();
        match self.platform(platform) {
            Some(section) => {
                for lib in &section.libraries {
                    linkage.add_library(lib.as_str());
                }
                for dep in &section.runtime_dependencies {
                    linkage.add_runtime_dependency(dep.as_str());
                }
            }
            None => tracing::debug!(
                library = %self.library.name,
                %platform,
                "no platform-specific linkage"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LinkageManifest {
        let mut platforms = BTreeMap::new();
        platforms.insert(
            "win64".to_string(),
            PlatformLinkage {
                libraries: vec!["lib/Win64/cspice.lib".into()],
                runtime_dependencies: vec![],
            },
        );
        platforms.insert(
            "linux".to_string(),
            PlatformLinkage {
                libraries: vec!["lib/Linux/cspice.a".into()],
                runtime_dependencies: vec!["lib/Linux/data.bin".into()],
            },
        );
        LinkageManifest {
            library: LibrarySection {
                name: "cspice".into(),
                modules: vec!["CSpice_Library".into()],
                definitions: vec!["WITH_CSPICE=1".into()],
                include_paths: vec!["include".into()],
            },
            platforms,
        }
    }

    fn link_into(platform: TargetPlatform, linker: &dyn NativeLibraryLinker) -> TargetRulesBuilder {
        let mut builder = TargetRulesBuilder::new("Test", platform);
        linker.link(&mut NativeLinkage::new(&mut builder)).unwrap();
        builder
    }

    #[test]
    fn manifest_links_platform_section() {
        let rules = link_into(TargetPlatform::Linux, &manifest()).build();
        assert_eq!(rules.extra_module_names(), ["CSpice_Library"]);
        assert_eq!(rules.global_definitions(), ["WITH_CSPICE=1"]);
        assert_eq!(rules.include_paths(), ["include"]);
        assert_eq!(rules.additional_libraries(), ["lib/Linux/cspice.a"]);
        assert_eq!(rules.runtime_dependencies(), ["lib/Linux/data.bin"]);
    }

    #[test]
    fn manifest_without_platform_section() {
        let rules = link_into(TargetPlatform::Android, &manifest()).build();
        assert_eq!(rules.extra_module_names(), ["CSpice_Library"]);
        assert!(rules.additional_libraries().is_empty());
    }

    #[test]
    fn linking_twice_is_idempotent() {
        let linker = manifest();
        let once = link_into(TargetPlatform::Win64, &linker).build();
        let mut builder = link_into(TargetPlatform::Win64, &linker);
        linker.link(&mut NativeLinkage::new(&mut builder)).unwrap();
        assert_eq!(builder.build(), once);
    }

    #[test]
    fn linking_keeps_existing_order() {
        let mut builder = TargetRulesBuilder::new("Test", TargetPlatform::Win64);
        let existing = ["Spice", "CSpice_Library", "MaxQMain"];
        builder.add_modules(existing);
        manifest().link(&mut NativeLinkage::new(&mut builder)).unwrap();
        let rules = builder.build();
        assert_eq!(rules.extra_module_names(), existing);
    }

    #[test]
    fn no_native_library_links_nothing() {
        let rules = link_into(TargetPlatform::Win64, &NoNativeLibrary).build();
        let untouched = TargetRulesBuilder::new("Test", TargetPlatform::Win64).build();
        assert_eq!(rules, untouched);
        assert_eq!(NoNativeLibrary.name(), "none");
    }
}
