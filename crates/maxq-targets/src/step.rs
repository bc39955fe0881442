//! Post-build steps and `$(Name)` placeholder resolution.
//!
//! Steps are stored unresolved: the host substitutes placeholders such as
//! `$(ProjectDir)` when it runs them. [`PostBuildStep::resolve`] performs the
//! same substitution for previews and tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::context::TargetInfo;
use crate::error::{Result, TargetError};

/// What a post-build step is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    /// Regenerates the plugin documentation.
    DocumentationUpdate,
    Custom,
}

/// An external command executed after compilation and linking complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostBuildStep {
    pub kind: StepKind,
    /// Program to invoke; may contain placeholders.
    pub program: String,
    /// Arguments; may contain placeholders.
    #[serde(default)]
    pub args: Vec<String>,
}

impl PostBuildStep {
    /// Create a step with no arguments.
    pub fn new(kind: StepKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program followed by arguments.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        let args = self.args.iter().map(String::as_str);
        std::iter::once(self.program.as_str()).chain(args)
    }

    /// Whether any token contains a double quote, which `render` cannot
    /// represent.
    pub fn has_embedded_quote(&self) -> bool {
        self.tokens().any(|t| t.contains('"'))
    }

    /// Shell command line with every token double-quoted.
    pub fn render(&self) -> String {
        let quoted: Vec<String> = self.tokens().map(|t| format!("\"{t}\"")).collect();
        quoted.join(" ")
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for token in self.tokens() {
            for segment in segments(token)? {
                if let Segment::Placeholder(name) = segment {
                    if !names.iter().any(|n| n == name) {
                        names.push(name.to_string());
                    }
                }
            }
        }
        Ok(names)
    }

    /// Render with every placeholder substituted from `vars`.
    pub fn resolve(&self, vars: &PathVariables) -> Result<String> {
        let mut quoted = Vec::new();
        for token in self.tokens() {
            let value = vars.substitute(token)?;
            quoted.push(format!("\"{value}\""));
        }
        Ok(quoted.join(" "))
    }
}

/// A piece of a token.
enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Split a token at its placeholders.
///
/// An unterminated `$(` or an empty name is a `MalformedPlaceholder`.
fn segments(token: &str) -> Result<Vec<Segment<'_>>> {
    let malformed = || TargetError::MalformedPlaceholder { text: token.into() };
    let mut out = Vec::new();
    let mut rest = token;
    while let Some(start) = rest.find("$(") {
        out.push(Segment::Text(&rest[..start]));
        let after = &rest[start + 2..];
        let end = after.find(')').ok_or_else(malformed)?;
        let name = &after[..end];
        if name.trim().is_empty() {
            return Err(malformed());
        }
        out.push(Segment::Placeholder(name));
        rest = &after[end + 1..];
    }
    out.push(Segment::Text(rest));
    Ok(out)
}

/// Values substituted for `$(Name)` placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVariables {
    values: BTreeMap<String, String>,
}

impl PathVariables {
    /// An empty set of variables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Variables the host derives from the build context.
    pub fn for_target(info: &TargetInfo) -> Self {
        let mut vars = Self::new();
        vars.insert("TargetName", info.name.clone());
        vars.insert("TargetPlatform", info.platform.host_name());
        vars.insert("TargetConfiguration", info.configuration.to_string());
        if let Some(dir) = &info.project_dir {
            vars.insert("ProjectDir", dir.display().to_string());
        }
        vars
    }

    /// Set a variable, replacing any previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace each placeholder in `text`.
    pub fn substitute(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        for segment in segments(text)? {
            match segment {
                Segment::Text(s) => out.push_str(s),
                Segment::Placeholder(name) => {
                    let value = self
                        .get(name)
                        .ok_or_else(|| TargetError::UnresolvedVariable { name: name.into() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
