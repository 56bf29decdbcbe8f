//! Versioned assets and the cross-backend state bitmask.
//!
//! Every backend maps its native status vocabulary onto the single
//! `AssetState` mask so the host renders all backends uniformly. Bits are
//! additive and independently clearable; OR and AND-NOT are the only
//! mutators.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Paths ending in this suffix are sidecar meta files and always carry
/// [`AssetState::META_FILE`].
pub const META_SUFFIX: &str = ".meta";

bitflags! {
    /// Per-asset version-control state.
    ///
    /// No bit is implicitly exclusive with another; handlers apply their own
    /// business rules (e.g. clearing `OUT_OF_SYNC` when a tracked deletion
    /// has no local copy).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AssetState: u32 {
        const LOCAL              = 1 << 0;
        const SYNCED             = 1 << 1;
        const OUT_OF_SYNC        = 1 << 2;
        const MISSING            = 1 << 3;
        const CHECKED_OUT_LOCAL  = 1 << 4;
        const CHECKED_OUT_REMOTE = 1 << 5;
        const DELETED_LOCAL      = 1 << 6;
        const DELETED_REMOTE     = 1 << 7;
        const ADDED_LOCAL        = 1 << 8;
        const ADDED_REMOTE       = 1 << 9;
        const CONFLICTED         = 1 << 10;
        const LOCKED_LOCAL       = 1 << 11;
        const LOCKED_REMOTE      = 1 << 12;
        const UPDATING           = 1 << 13;
        const READ_ONLY          = 1 << 14;
        const META_FILE          = 1 << 15;
        const MOVED              = 1 << 16;
    }
}

impl AssetState {
    /// Decode a wire-level decimal mask, rejecting unknown bits.
    pub fn from_wire(bits: u32) -> Result<Self> {
        Self::from_bits(bits).ok_or(Error::InvalidStateBits(bits))
    }
}

/// Conflict resolution strategies accepted by the `resolve` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMethod {
    Mine,
    Theirs,
    Merged,
}

impl ResolveMethod {
    pub fn from_wire(token: &str) -> Result<Self> {
        match token {
            "mine" => Ok(ResolveMethod::Mine),
            "theirs" => Ok(ResolveMethod::Theirs),
            "merged" => Ok(ResolveMethod::Merged),
            other => Err(Error::InvalidResolveMethod(other.to_string())),
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            ResolveMethod::Mine => "mine",
            ResolveMethod::Theirs => "theirs",
            ResolveMethod::Merged => "merged",
        }
    }
}

/// File modes accepted by the `fileMode` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Binary,
    Text,
}

impl FileMode {
    pub fn from_wire(token: &str) -> Result<Self> {
        match token {
            "binary" => Ok(FileMode::Binary),
            "text" => Ok(FileMode::Text),
            other => Err(Error::InvalidFileMode(other.to_string())),
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            FileMode::Binary => "binary",
            FileMode::Text => "text",
        }
    }
}

/// A single asset as seen by the host during one command round-trip.
///
/// Instances are created per command, mutated by the handler and backend,
/// serialized on the response, and discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedAsset {
    path: String,
    state: AssetState,
    /// Backend revision identifier, empty when unknown.
    pub revision: String,
    /// Owning changelist, if the backend groups changes.
    pub changelist: Option<String>,
    /// Previous path when the asset was moved.
    pub moved_from: Option<String>,
}

impl VersionedAsset {
    pub fn new(path: impl Into<String>) -> Self {
        let mut asset = VersionedAsset {
            path: String::new(),
            state: AssetState::empty(),
            revision: String::new(),
            changelist: None,
            moved_from: None,
        };
        asset.set_path(path.into());
        asset
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the path, re-deriving the meta-file flag.
    pub fn set_path(&mut self, path: String) {
        if path.ends_with(META_SUFFIX) {
            self.state |= AssetState::META_FILE;
        } else {
            self.state &= !AssetState::META_FILE;
        }
        self.path = path;
    }

    /// A trailing path separator marks a directory. Several commands skip
    /// directories when expanding wildcards.
    pub fn is_folder(&self) -> bool {
        self.path.ends_with('/') || self.path.ends_with('\\')
    }

    pub fn is_meta(&self) -> bool {
        self.state.contains(AssetState::META_FILE)
    }

    pub fn state(&self) -> AssetState {
        self.state
    }

    /// OR the given bits into the mask. Idempotent.
    pub fn add_state(&mut self, bits: AssetState) {
        self.state |= bits;
    }

    /// AND-NOT the given bits out of the mask.
    pub fn remove_state(&mut self, bits: AssetState) {
        self.state &= !bits;
    }

    pub fn has_state(&self, bits: AssetState) -> bool {
        self.state.contains(bits)
    }

    pub fn has_any_state(&self, bits: AssetState) -> bool {
        self.state.intersects(bits)
    }

    /// Overwrite the mask wholesale. Used when decoding wire state; command
    /// handlers should prefer `add_state`/`remove_state`.
    pub fn set_state(&mut self, state: AssetState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_state_is_idempotent() {
        let mut asset = VersionedAsset::new("Assets/a.png");
        asset.add_state(AssetState::LOCAL | AssetState::SYNCED);
        let once = asset.state();
        asset.add_state(AssetState::SYNCED);
        assert_eq!(asset.state(), once);
    }

    #[test]
    fn test_remove_restores_prior_mask() {
        let mut asset = VersionedAsset::new("Assets/a.png");
        asset.add_state(AssetState::LOCAL | AssetState::CHECKED_OUT_LOCAL);
        let prior = asset.state();
        asset.add_state(AssetState::LOCKED_LOCAL);
        asset.remove_state(AssetState::LOCKED_LOCAL);
        assert_eq!(asset.state(), prior);
    }

    #[test]
    fn test_meta_suffix_sets_flag() {
        let asset = VersionedAsset::new("Assets/a.png.meta");
        assert!(asset.is_meta());

        let mut asset = VersionedAsset::new("Assets/a.png");
        assert!(!asset.is_meta());
        asset.set_path("Assets/a.png.meta".to_string());
        assert!(asset.is_meta());
    }

    #[test]
    fn test_trailing_separator_is_folder() {
        assert!(VersionedAsset::new("Assets/Textures/").is_folder());
        assert!(!VersionedAsset::new("Assets/Textures").is_folder());
    }

    #[test]
    fn test_state_wire_round_trip() {
        let state = AssetState::LOCAL | AssetState::CONFLICTED | AssetState::MOVED;
        assert_eq!(AssetState::from_wire(state.bits()).unwrap(), state);
        assert!(AssetState::from_wire(u32::MAX).is_err());
    }
}
