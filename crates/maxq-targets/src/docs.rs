//! Plugin documentation regeneration after a build.

use crate::context::TargetInfo;
use crate::rules::TargetRulesBuilder;
use crate::step::{PostBuildStep, StepKind};

/// Batch script that regenerates the plugin documentation.
pub const UPDATE_DOCS_SCRIPT: &str = r"$(ProjectDir)\updateplugindocs.bat";

/// Post-build steps that regenerate documentation for this target.
///
/// The script is a Windows batch file, so only the primary desktop platform
/// gets a step.
pub fn documentation_steps(info: &TargetInfo) -> Vec<PostBuildStep> {
    info.platform
        .is_primary_desktop()
        .then(|| {
            PostBuildStep::new(StepKind::DocumentationUpdate, UPDATE_DOCS_SCRIPT)
                .arg("$(ProjectDir)")
        })
        .into_iter()
        .collect()
}

/// Register the documentation steps on a target under construction.
pub fn update_docs(builder: &mut TargetRulesBuilder, info: &TargetInfo) {
    tracing::info!("setting post-build steps");
    for step in documentation_steps(info) {
        builder.add_post_build_step(step);
    }
}
