//! VCBridge Core - Asset State Model and Shared Types
//!
//! This crate provides the backend-agnostic data model for VCBridge:
//! - `AssetState` bitmask and `VersionedAsset` entities
//! - Severity-tagged `Status` collections
//! - `Changelist` revisions with reserved sentinels
//! - `ConfigField` and capability trait declarations

pub mod asset;
pub mod changes;
pub mod config;
pub mod error;
pub mod status;

pub use asset::{AssetState, FileMode, ResolveMethod, VersionedAsset, META_SUFFIX};
pub use changes::{Changelist, DEFAULT_REVISION, NEW_REVISION};
pub use config::{ConfigField, ConfigFieldFlags, CustomCommandDesc, PluginTraits, StateOverlay};
pub use error::{Error, Result};
pub use status::{Severity, Status, StatusList};
