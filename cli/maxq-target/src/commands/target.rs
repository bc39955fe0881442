//! `maxq-target platforms | describe | validate`.

use std::fmt::Write;

use anyhow::{bail, Result};
use maxq_targets::parse::{rules_to_json, rules_to_toml};
use maxq_targets::{validate_rules, Severity, TargetPlatform, TargetRules};

use super::TargetSource;

/// List all platforms.
pub fn list() -> Result<()> {
    println!("Platforms:");
    println!();
    for platform in TargetPlatform::ALL {
        let note = if platform.is_primary_desktop() {
            "primary desktop (documentation update)"
        } else if platform.is_desktop() {
            "desktop"
        } else {
            ""
        };
        println!("  {:<12} {note}", platform.host_name());
    }
    Ok(())
}

/// Describe the rules the target produces.
pub fn describe(source: &TargetSource, format: Option<&str>) -> Result<()> {
    let (_, rules) = source.instantiate()?;
    print!("{}", render(&rules, format.unwrap_or("human"))?);
    Ok(())
}

/// Render rules in one of the `describe` output formats.
pub fn render(rules: &TargetRules, format: &str) -> Result<String> {
    match format {
        "human" => render_human(rules),
        "toml" => Ok(rules_to_toml(rules)?),
        "json" => Ok(rules_to_json(rules)? + "\n"),
        other => bail!("unknown format: '{other}'. Expected human, toml, or json."),
    }
}

fn render_human(rules: &TargetRules) -> Result<String> {
    fn flag(value: Option<bool>) -> String {
        value.map_or_else(|| "host default".into(), |v| v.to_string())
    }

    let mut out = String::new();
    writeln!(out, "=== Target: {} ===", rules.name())?;
    writeln!(out, "Platform:       {}", rules.platform())?;
    writeln!(out, "Type:           {:?}", rules.target_type())?;
    writeln!(out, "Build settings: {:?}", rules.build_settings())?;
    writeln!(out)?;

    writeln!(out, "--- Modules ---")?;
    for module in rules.extra_module_names() {
        writeln!(out, "  {module}")?;
    }
    writeln!(out)?;

    let fast_pdb = flag(rules.flags().use_fast_pdb_linking);
    let public_symbols = flag(rules.flags().public_symbols_by_default);
    let strip = flag(rules.windows().strip_unreferenced_symbols);
    writeln!(out, "--- Flags ---")?;
    writeln!(out, "  Fast PDB linking:           {fast_pdb}")?;
    writeln!(out, "  Public symbols by default:  {public_symbols}")?;
    writeln!(out, "  Windows strip unreferenced: {strip}")?;

    let sections = [
        ("Definitions", rules.global_definitions()),
        ("Include paths", rules.include_paths()),
        ("Libraries", rules.additional_libraries()),
        ("Runtime dependencies", rules.runtime_dependencies()),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        writeln!(out)?;
        writeln!(out, "--- {title} ---")?;
        for item in items {
            writeln!(out, "  {item}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "--- Post-build steps ---")?;
    if rules.post_build_steps().is_empty() {
        writeln!(out, "  (none)")?;
    }
    for step in rules.post_build_steps() {
        writeln!(out, "  {}", step.render())?;
    }
    Ok(out)
}

/// Validate the rules; fails if any error-level issue is found.
pub fn validate(source: &TargetSource) -> Result<()> {
    let (info, rules) = source.instantiate()?;
    report(&rules)?;
    println!("{} ({}): OK", rules.name(), info.platform);
    Ok(())
}

/// Print every validation issue to stderr. Warnings alone pass.
pub fn report(rules: &TargetRules) -> Result<()> {
    let Err(issues) = validate_rules(rules) else {
        return Ok(());
    };
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("error: {}", issue.message),
            Severity::Warning => eprintln!("warning: {}", issue.message),
        }
    }
    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    if errors > 0 {
        bail!("{} has {errors} error(s)", rules.name());
    }
    Ok(())
}
