//! Domain value objects: Platform, TargetSet, SourceSet.
//!
//! # Design
//!
//! These are pure value types with no I/O. Everything that differs per
//! platform (labels, source-set names, idempotence markers) is answered by
//! the enum itself so that the filter, the fragment builder and the patcher
//! never repeat a `match` on platform names.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ── Platform ─────────────────────────────────────────────────────────────────

/// A platform backend the generated application can run on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Jvm,
    Ios,
    Web,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Self::Android, Self::Jvm, Self::Ios, Self::Web];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Jvm => "jvm",
            Self::Ios => "ios",
            Self::Web => "web",
        }
    }

    /// Human-readable label used in prompts and summaries.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Jvm => "JVM (Desktop)",
            Self::Ios => "iOS",
            Self::Web => "Web",
        }
    }

    /// Source-set directory names owned by this platform.
    pub const fn source_sets(&self) -> &'static [&'static str] {
        match self {
            Self::Android => &["androidMain"],
            Self::Jvm => &["jvmMain"],
            Self::Ios => &["iosMain"],
            Self::Web => &["jsMain", "wasmJsMain", "webMain"],
        }
    }

    /// Substrings whose presence in a module build file proves the platform
    /// is already configured.
    pub const fn markers(&self) -> &'static [&'static str] {
        match self {
            Self::Android => &["androidTarget {", "android {"],
            Self::Jvm => &["jvm()"],
            Self::Ios => &["iosArm64()", "iosSimulatorArm64()"],
            Self::Web => &["js {", "js(", "wasmJs {", "wasmJs("],
        }
    }

    /// `true` when any marker for this platform occurs in `content`.
    pub fn is_configured_in(&self, content: &str) -> bool {
        self.markers().iter().any(|marker| content.contains(marker))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "jvm" | "desktop" => Ok(Self::Jvm),
            "ios" => Ok(Self::Ios),
            "web" | "js" | "wasm" => Ok(Self::Web),
            other => Err(DomainError::UnknownPlatform(other.to_string())),
        }
    }
}

// ── TargetSet ────────────────────────────────────────────────────────────────

/// A non-empty, ordered selection of platforms.
///
/// Iteration order is always android, jvm, ios, web regardless of the order
/// the user picked them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet(BTreeSet<Platform>);

impl TargetSet {
    /// Build a selection, rejecting an empty one.
    pub fn new(platforms: impl IntoIterator<Item = Platform>) -> Result<Self, DomainError> {
        let set: BTreeSet<_> = platforms.into_iter().collect();
        if set.is_empty() {
            return Err(DomainError::EmptyTargetSet);
        }
        Ok(Self(set))
    }

    /// Every supported platform.
    pub fn all() -> Self {
        Self(Platform::ALL.into_iter().collect())
    }

    pub fn single(platform: Platform) -> Self {
        Self(BTreeSet::from([platform]))
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains(&platform)
    }

    pub fn iter(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|p| p.as_str()).collect();
        f.write_str(&names.join(", "))
    }
}

impl FromStr for TargetSet {
    type Err = DomainError;

    /// Parse a comma-separated list such as `android,web`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let platforms = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Platform::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(platforms)
    }
}

// ── SourceSet ────────────────────────────────────────────────────────────────

/// Classification of a Kotlin source-set directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSet {
    /// `commonMain`, shared by every platform.
    Common,
    /// A source set that only exists for one platform.
    Platform(Platform),
}

impl SourceSet {
    pub const COMMON: &'static str = "commonMain";

    /// Classify a directory name, `None` for names no platform owns.
    pub fn classify(name: &str) -> Option<Self> {
        if name == Self::COMMON {
            return Some(Self::Common);
        }
        Platform::ALL
            .into_iter()
            .find(|p| p.source_sets().contains(&name))
            .map(Self::Platform)
    }

    pub fn is_selected(&self, targets: &TargetSet) -> bool {
        match self {
            Self::Common => true,
            Self::Platform(p) => targets.contains(*p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_aliases() {
        assert_eq!("ANDROID".parse::<Platform>().unwrap(), Platform::Android);
        assert_eq!("desktop".parse::<Platform>().unwrap(), Platform::Jvm);
        assert_eq!("wasm".parse::<Platform>().unwrap(), Platform::Web);
        assert!(matches!(
            "windows".parse::<Platform>(),
            Err(DomainError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn target_set_rejects_empty_selection() {
        assert_eq!(TargetSet::new([]), Err(DomainError::EmptyTargetSet));
        assert!(",,".parse::<TargetSet>().is_err());
    }

    #[test]
    fn target_set_iterates_in_canonical_order() {
        let set: TargetSet = "web, android,ios".parse().unwrap();
        let order: Vec<_> = set.iter().collect();
        assert_eq!(order, vec![Platform::Android, Platform::Ios, Platform::Web]);
        assert_eq!(set.to_string(), "android, ios, web");
    }

    #[test]
    fn source_sets_map_to_platforms() {
        assert_eq!(SourceSet::classify("commonMain"), Some(SourceSet::Common));
        assert_eq!(
            SourceSet::classify("wasmJsMain"),
            Some(SourceSet::Platform(Platform::Web))
        );
        assert_eq!(SourceSet::classify("linuxMain"), None);
    }

    #[test]
    fn web_markers_match_block_and_call_forms() {
        assert!(Platform::Web.is_configured_in("kotlin {\n    js {\n"));
        assert!(Platform::Web.is_configured_in("    wasmJs(IR)"));
        assert!(!Platform::Web.is_configured_in("    jvm()\n"));
    }
}
