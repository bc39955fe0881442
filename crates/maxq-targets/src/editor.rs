//! The `SpiceEditor` target: the editor binary of the MaxQ plugin.

use crate::context::TargetInfo;
use crate::docs::update_docs;
use crate::error::Result;
use crate::native::{NativeLibraryLinker, NativeLinkage};
use crate::rules::{BuildSettingsVersion, TargetRules, TargetRulesBuilder, TargetType};

/// Modules compiled into the editor binary.
pub const EDITOR_MODULES: [&str; 4] = ["Spice", "SpiceEditor", "SpiceUncooked", "MaxQMain"];

/// Target definition for the plugin's editor binary.
pub struct SpiceEditorTarget;

impl SpiceEditorTarget {
    /// Name the host registers the target under.
    pub const NAME: &'static str = "SpiceEditor";

    /// Instantiate the target for `info`, letting `linker` add the wrapped
    /// native library.
    pub fn rules(info: &TargetInfo, linker: &dyn NativeLibraryLinker) -> Result<TargetRules> {
        tracing::info!(platform = %info.platform, "instantiating SpiceEditor target");

        let mut builder = TargetRulesBuilder::new(Self::NAME, info.platform);
        builder
            .target_type(TargetType::Editor)
            .build_settings(BuildSettingsVersion::V2)
            .add_modules(EDITOR_MODULES);

        let flags = builder.flags();
        flags.use_fast_pdb_linking = Some(false);
        flags.public_symbols_by_default = Some(true);
        // Windows-scoped property; assigned whatever the platform.
        builder.windows().strip_unreferenced_symbols = Some(false);

        update_docs(&mut builder, info);

        tracing::debug!(library = linker.name(), "linking native library");
        linker.link(&mut NativeLinkage::new(&mut builder))?;

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::TargetError;
    use crate::native::NoNativeLibrary;
    use crate::platform::TargetPlatform;
    use crate::step::StepKind;

    /// Records every call and adds one module.
    #[derive(Default)]
    struct RecordingLinker {
        calls: RefCell<Vec<TargetPlatform>>,
    }

    impl NativeLibraryLinker for RecordingLinker {
        fn name(&self) -> &str {
            "recording"
        }

        fn link(&self, linkage: &mut NativeLinkage<'_>) -> Result<()> {
            self.calls.borrow_mut().push(linkage.platform());
            linkage.add_module("CSpice_Library");
            linkage.add_include_path("include");
            Ok(())
        }
    }

    struct FailingLinker;

    impl NativeLibraryLinker for FailingLinker {
        fn name(&self) -> &str {
            "failing"
        }

        fn link(&self, _linkage: &mut NativeLinkage<'_>) -> Result<()> {
            Err(TargetError::Linker {
                library: "failing".into(),
                detail: "toolchain missing".into(),
            })
        }
    }

    fn rules_for(platform: TargetPlatform) -> TargetRules {
        let info = TargetInfo::new("SpiceEditor", platform);
        SpiceEditorTarget::rules(&info, &NoNativeLibrary).unwrap()
    }

    #[test]
    fn fixed_settings_on_every_platform() {
        for platform in TargetPlatform::ALL {
            let rules = rules_for(platform);
            assert_eq!(rules.name(), "SpiceEditor");
            assert_eq!(rules.platform(), platform);
            assert_eq!(rules.target_type(), TargetType::Editor);
            assert_eq!(rules.build_settings(), BuildSettingsVersion::V2);
            assert_eq!(rules.extra_module_names(), EDITOR_MODULES);
            assert_eq!(rules.flags().use_fast_pdb_linking, Some(false));
            assert_eq!(rules.flags().public_symbols_by_default, Some(true));
            assert_eq!(rules.windows().strip_unreferenced_symbols, Some(false));
        }
    }

    #[test]
    fn docs_step_only_on_primary_desktop() {
        let win = rules_for(TargetPlatform::Win64);
        assert_eq!(win.post_build_steps().len(), 1);
        let step = &win.post_build_steps()[0];
        assert_eq!(step.kind, StepKind::DocumentationUpdate);
        assert_eq!(step.args.len(), 1);
        assert_eq!(step.placeholders().unwrap(), vec!["ProjectDir"]);

        for platform in TargetPlatform::ALL {
            if !platform.is_primary_desktop() {
                assert!(rules_for(platform).post_build_steps().is_empty());
            }
        }
    }

    #[test]
    fn construction_is_deterministic() {
        for platform in TargetPlatform::ALL {
            assert_eq!(rules_for(platform), rules_for(platform));
        }
    }

    #[test]
    fn linker_called_once_and_appends() {
        let linker = RecordingLinker::default();
        let info = TargetInfo::new("SpiceEditor", TargetPlatform::Linux);
        let rules = SpiceEditorTarget::rules(&info, &linker).unwrap();
        assert_eq!(*linker.calls.borrow(), vec![TargetPlatform::Linux]);
        let mut expected = EDITOR_MODULES.to_vec();
        expected.push("CSpice_Library");
        assert_eq!(rules.extra_module_names(), expected);
        assert_eq!(rules.include_paths(), ["include"]);
    }

    #[test]
    fn linker_error_propagates() {
        let info = TargetInfo::new("SpiceEditor", TargetPlatform::Win64);
        let err = SpiceEditorTarget::rules(&info, &FailingLinker).unwrap_err();
        assert!(matches!(err, TargetError::Linker { ref library, .. } if library == "failing"));
    }
}
