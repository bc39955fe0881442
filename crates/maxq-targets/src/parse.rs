//! Loading build contexts and linkage descriptors, and exporting rules.
//!
//! Build contexts and `native.toml` descriptors are kebab-case TOML. Frozen
//! rules can be exported as TOML or JSON and read back from TOML.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::context::TargetInfo;
use crate::error::{Result, TargetError};
use crate::native::LinkageManifest;
use crate::rules::TargetRules;

fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load a build context from a TOML file.
pub fn load_target_info_toml(path: &Path) -> Result<TargetInfo> {
    load_toml(path)
}

/// Parse a build context from a TOML string.
pub fn parse_target_info_toml(toml_str: &str) -> Result<TargetInfo> {
    Ok(toml::from_str(toml_str)?)
}

/// Load a native-library linkage descriptor from a TOML file.
pub fn load_linkage_manifest(path: &Path) -> Result<LinkageManifest> {
    load_toml(path)
}

/// Parse a native-library linkage descriptor from a TOML string.
pub fn parse_linkage_manifest(toml_str: &str) -> Result<LinkageManifest> {
    Ok(toml::from_str(toml_str)?)
}

/// Serialize rules to pretty TOML.
pub fn rules_to_toml(rules: &TargetRules) -> Result<String> {
    Ok(toml::to_string_pretty(rules)?)
}

/// Serialize rules to pretty JSON.
pub fn rules_to_json(rules: &TargetRules) -> Result<String> {
    Ok(serde_json::to_string_pretty(rules)?)
}

/// Parse previously exported rules.
pub fn parse_rules_toml(toml_str: &str) -> Result<TargetRules> {
    Ok(toml::from_str(toml_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TargetConfiguration;
    use crate::editor::SpiceEditorTarget;
    use crate::native::NoNativeLibrary;
    use crate::platform::TargetPlatform;

    const NATIVE_TOML: &str = r#"
[library]
name = "cspice"
modules = ["CSpice_Library"]
definitions = ["WITH_CSPICE=1"]
include-paths = ["$(PluginDir)/Source/ThirdParty/CSpice_Library/include"]

[platforms.win64]
libraries = ["$(PluginDir)/Source/ThirdParty/CSpice_Library/lib/Win64/cspice.lib"]

[platforms.mac]
libraries = ["$(PluginDir)/Source/ThirdParty/CSpice_Library/lib/Mac/cspice.a"]
runtime-dependencies = ["$(PluginDir)/Content/kernels/naif0012.tls"]
"#;

    #[test]
    fn parse_full_context() {
        let info = parse_target_info_toml(
            r#"
name = "SpiceEditor"
platform = "win64"
configuration = "debug-game"
architecture = "x64"
project-dir = "C:/Work/MaxQ"
"#,
        )
        .unwrap();
        assert_eq!(info.platform, TargetPlatform::Win64);
        assert_eq!(info.configuration, TargetConfiguration::DebugGame);
        assert_eq!(info.architecture.as_deref(), Some("x64"));
        assert!(info.project_dir.is_some());
    }

    #[test]
    fn parse_minimal_context() {
        let toml_str = "name = \"SpiceEditor\"\nplatform = \"linux\"\n";
        let info = parse_target_info_toml(toml_str).unwrap();
        assert_eq!(info, TargetInfo::new("SpiceEditor", TargetPlatform::Linux));
    }

    #[test]
    fn parse_context_host_spelling() {
        for platform in TargetPlatform::ALL {
            let toml_str = format!("name = \"SpiceEditor\"\nplatform = \"{platform}\"\n");
            let info = parse_target_info_toml(&toml_str).unwrap();
            assert_eq!(info.platform, platform);
        }
    }

    #[test]
    fn parse_context_unknown_platform() {
        assert!(parse_target_info_toml("name = \"X\"\nplatform = \"amiga\"\n").is_err());
    }

    #[test]
    fn parse_native_manifest() {
        let manifest = parse_linkage_manifest(NATIVE_TOML).unwrap();
        assert_eq!(manifest.library.name, "cspice");
        assert_eq!(manifest.platforms.len(), 2);
        let mac = manifest.platform(TargetPlatform::Mac).unwrap();
        assert_eq!(mac.runtime_dependencies.len(), 1);
        assert!(manifest.platform(TargetPlatform::Linux).is_none());
    }

    #[test]
    fn parse_native_manifest_missing_library() {
        assert!(parse_linkage_manifest("[platforms.win64]\nlibraries = []\n").is_err());
    }

    #[test]
    fn exported_rules_read_back() {
        let info = TargetInfo::new("SpiceEditor", TargetPlatform::Win64);
        let manifest = parse_linkage_manifest(NATIVE_TOML).unwrap();
        let rules = SpiceEditorTarget::rules(&info, &manifest).unwrap();
        let toml_str = rules_to_toml(&rules).unwrap();
        assert!(toml_str.contains("updateplugindocs.bat"));
        assert_eq!(parse_rules_toml(&toml_str).unwrap(), rules);
    }

    #[test]
    fn json_export_uses_kebab_case() {
        let info = TargetInfo::new("SpiceEditor", TargetPlatform::Linux);
        let rules = SpiceEditorTarget::rules(&info, &NoNativeLibrary).unwrap();
        let json_str = rules_to_json(&rules).unwrap();
        let json: serde_json::Value = serde_json::from_str(&json_str).unwrap();
        assert_eq!(json["target-type"], "editor");
        assert_eq!(json["build-settings"], "v2");
        assert_eq!(json["extra-module-names"].as_array().unwrap().len(), 4);
        assert_eq!(json["flags"]["use-fast-pdb-linking"], false);
    }

    #[test]
    fn load_not_found() {
        let err = load_target_info_toml(Path::new("/nonexistent/context.toml")).unwrap_err();
        assert!(matches!(err, TargetError::NotFound { .. }));
        assert!(load_linkage_manifest(Path::new("/nonexistent/native.toml")).is_err());
    }

    #[test]
    fn load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = dir.path().join("context.toml");
        let native = dir.path().join("native.toml");
        std::fs::write(&ctx, "name = \"SpiceEditor\"\nplatform = \"mac\"\n").unwrap();
        std::fs::write(&native, NATIVE_TOML).unwrap();

        let info = load_target_info_toml(&ctx).unwrap();
        let manifest = load_linkage_manifest(&native).unwrap();
        let rules = SpiceEditorTarget::rules(&info, &manifest).unwrap();
        assert_eq!(rules.runtime_dependencies().len(), 1);
        assert!(rules.post_build_steps().is_empty());
    }
}
