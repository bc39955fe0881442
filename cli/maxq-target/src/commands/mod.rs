//! CLI command implementations.

pub mod steps;
pub mod target;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use maxq_targets::parse::{load_linkage_manifest, load_target_info_toml};
use maxq_targets::{
    LinkageManifest, NativeLibraryLinker, NoNativeLibrary, SpiceEditorTarget, TargetInfo,
    TargetPlatform, TargetRules,
};

/// Where the build context and native linkage come from.
#[derive(Debug, Default)]
pub struct TargetSource {
    /// Platform name; overrides the one in `context`.
    pub platform: Option<String>,
    pub context: Option<PathBuf>,
    pub native: Option<PathBuf>,
    /// Overrides the project directory in `context`.
    pub project_dir: Option<PathBuf>,
}

impl TargetSource {
    /// Assemble the build context the host would pass.
    pub fn target_info(&self) -> Result<TargetInfo> {
        let mut info = match (&self.context, &self.platform) {
            (Some(path), _) => load_target_info_toml(path)
                .with_context(|| format!("loading build context {}", path.display()))?,
            (None, Some(_)) => TargetInfo::new(SpiceEditorTarget::NAME, TargetPlatform::Win64),
            (None, None) => bail!("no platform given. Use --platform or --context."),
        };
        if let Some(name) = &self.platform {
            info.platform = name.parse::<TargetPlatform>()?;
        }
        if let Some(dir) = &self.project_dir {
            info.project_dir = Some(dir.clone());
        }
        Ok(info)
    }

    fn linkage(&self) -> Result<Option<LinkageManifest>> {
        self.native
            .as_ref()
            .map(|path| {
                load_linkage_manifest(path)
                    .with_context(|| format!("loading linkage descriptor {}", path.display()))
            })
            .transpose()
    }

    /// Instantiate the editor target.
    pub fn instantiate(&self) -> Result<(TargetInfo, TargetRules)> {
        let info = self.target_info()?;
        let manifest = self.linkage()?;
        tracing::debug!(
            platform = %info.platform,
            native = manifest.as_ref().map(|m| m.library.name.as_str()),
            "resolved build context"
        );
        let linker: &dyn NativeLibraryLinker = match &manifest {
            Some(m) => m,
            None => &NoNativeLibrary,
        };
        let rules = SpiceEditorTarget::rules(&info, linker)?;
        Ok((info, rules))
    }
}
