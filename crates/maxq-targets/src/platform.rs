//! Compilation target platforms.
//!
//! The host supplies one of these when it instantiates a target. Names follow
//! the host's spelling on input and a lowercase form when serialized.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// Operating system a target is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
    #[serde(alias = "Win64")]
    Win64,
    #[serde(alias = "Mac")]
    Mac,
    #[serde(alias = "Linux")]
    Linux,
    #[serde(alias = "LinuxArm64")]
    LinuxArm64,
    #[serde(alias = "Android")]
    Android,
    #[serde(alias = "IOS")]
    Ios,
    #[serde(alias = "TVOS")]
    Tvos,
}

impl TargetPlatform {
    /// Every known platform, in declaration order.
    pub const ALL: [TargetPlatform; 7] = [
        TargetPlatform::Win64,
        TargetPlatform::Mac,
        TargetPlatform::Linux,
        TargetPlatform::LinuxArm64,
        TargetPlatform::Android,
        TargetPlatform::Ios,
        TargetPlatform::Tvos,
    ];

    /// The platform that gets documentation regeneration after a build.
    pub const PRIMARY_DESKTOP: TargetPlatform = TargetPlatform::Win64;

    /// Lowercase identifier, as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            TargetPlatform::Win64 => "win64",
            TargetPlatform::Mac => "mac",
            TargetPlatform::Linux => "linux",
            TargetPlatform::LinuxArm64 => "linuxarm64",
            TargetPlatform::Android => "android",
            TargetPlatform::Ios => "ios",
            TargetPlatform::Tvos => "tvos",
        }
    }

    /// Name as the host build engine spells it.
    pub fn host_name(self) -> &'static str {
        match self {
            TargetPlatform::Win64 => "Win64",
            TargetPlatform::Mac => "Mac",
            TargetPlatform::Linux => "Linux",
            TargetPlatform::LinuxArm64 => "LinuxArm64",
            TargetPlatform::Android => "Android",
            TargetPlatform::Ios => "IOS",
            TargetPlatform::Tvos => "TVOS",
        }
    }

    /// Whether this is [`Self::PRIMARY_DESKTOP`].
    pub fn is_primary_desktop(self) -> bool {
        self == Self::PRIMARY_DESKTOP
    }

    /// Whether this is a desktop operating system.
    pub fn is_desktop(self) -> bool {
        matches!(
            self,
            TargetPlatform::Win64
                | TargetPlatform::Mac
                | TargetPlatform::Linux
                | TargetPlatform::LinuxArm64
        )
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

impl FromStr for TargetPlatform {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TargetError::UnknownPlatform { name: s.into() })
    }
}
