//! `maxq-target steps`: post-build step listing.

use anyhow::Result;
use maxq_targets::{PathVariables, TargetInfo, TargetRules};

use super::TargetSource;

/// Print each post-build step, resolved when the project directory is known.
pub fn run(source: &TargetSource) -> Result<()> {
    let (info, rules) = source.instantiate()?;
    let lines = step_lines(&info, &rules)?;
    if lines.is_empty() {
        let name = rules.name();
        println!("No post-build steps for {name} on {}.", info.platform);
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Command line of every post-build step, in run order.
///
/// Placeholders are substituted only when `info` carries a project
/// directory; otherwise the host-facing form is returned unchanged.
pub fn step_lines(info: &TargetInfo, rules: &TargetRules) -> Result<Vec<String>> {
    let vars = PathVariables::for_target(info);
    let mut lines = Vec::new();
    for step in rules.post_build_steps() {
        let line = if info.project_dir.is_some() {
            step.resolve(&vars)?
        } else {
            step.render()
        };
        lines.push(line);
    }
    Ok(lines)
}
