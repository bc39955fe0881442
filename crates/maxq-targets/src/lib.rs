//! Target rules for the MaxQ plugin's editor binary.
//!
//! A target is instantiated once per build from a host-supplied
//! [`TargetInfo`]. Instantiation produces frozen [`TargetRules`]:
//! - **Modules and flags:** which modules the binary contains and how it links
//! - **Post-build steps:** external commands, with `$(Name)` placeholders the
//!   host resolves
//! - **Native linkage:** whatever a [`NativeLibraryLinker`] contributes for
//!   the wrapped numerical library

pub mod context;
pub mod docs;
pub mod editor;
pub mod error;
pub mod native;
pub mod parse;
pub mod platform;
pub mod rules;
pub mod step;

pub use context::{TargetConfiguration, TargetInfo};
pub use editor::{SpiceEditorTarget, EDITOR_MODULES};
pub use error::{Result, TargetError};
pub use native::{LinkageManifest, NativeLibraryLinker, NativeLinkage, NoNativeLibrary};
pub use platform::TargetPlatform;
pub use rules::{
    validate_rules, BuildFlags, BuildSettingsVersion, Severity, TargetRules, TargetRulesBuilder,
    TargetType, ValidationIssue, WindowsPlatformSettings,
};
pub use step::{PathVariables, PostBuildStep, StepKind};
