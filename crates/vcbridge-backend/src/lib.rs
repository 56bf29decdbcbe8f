//! VCBridge Backend Interface
//!
//! The capability-set interface every version-control adapter implements:
//! connect/disconnect plus one operation per protocol command. Exactly one
//! concrete backend is selected at process start; there is no runtime
//! switching.
//!
//! Operations consume and produce [`VersionedAsset`] or [`Changelist`]
//! collections in place, return a success flag, and accumulate
//! per-request rejections into the shared [`StatusList`]. Only
//! connectivity-class failures surface as `Err`.

pub mod error;
#[cfg(feature = "stub")]
pub mod stub;

pub use error::{BackendError, BackendResult};
#[cfg(feature = "stub")]
pub use stub::StubBackend;

use vcbridge_core::{
    Changelist, ConfigField, CustomCommandDesc, FileMode, PluginTraits, ResolveMethod,
    StateOverlay, StatusList, VersionedAsset,
};

/// Asset collections are mutated in place during one command round-trip.
pub type AssetList = Vec<VersionedAsset>;

/// A concrete version-control adapter.
pub trait Backend {
    /// Short plugin name; forms the `vc<Plugin><Field>` config key prefix.
    fn name(&self) -> &str;

    /// Capability flags advertised during the `pluginTraits` handshake.
    fn plugin_traits(&self) -> PluginTraits;

    /// Host-configurable settings, streamed during negotiation.
    fn config_fields(&self) -> &[ConfigField];

    /// State overlays the host may render; empty by default.
    fn overlays(&self) -> Vec<StateOverlay> {
        Vec::new()
    }

    /// Protocol extensions reachable through `customCommand`.
    fn custom_commands(&self) -> &[CustomCommandDesc] {
        &[]
    }

    /// Store a config value on a declared field. Returns false for unknown
    /// field names; the engine warns but does not abort.
    fn set_config_value(&mut self, field: &str, value: &str) -> bool;

    // Connection lifecycle.

    fn connect(&mut self, status: &mut StatusList) -> BackendResult<bool>;
    fn disconnect(&mut self);
    fn is_connected(&self) -> bool;

    // One operation per command.

    fn add_assets(&mut self, assets: &mut AssetList, status: &mut StatusList)
        -> BackendResult<bool>;

    fn checkout_assets(
        &mut self,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn remove_assets(
        &mut self,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    /// Serves both `getLatest` and `download`; requested revisions ride on
    /// each asset.
    fn get_assets(&mut self, assets: &mut AssetList, status: &mut StatusList)
        -> BackendResult<bool>;

    fn revert_assets(
        &mut self,
        assets: &mut AssetList,
        unchanged_only: bool,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn lock_assets(&mut self, assets: &mut AssetList, status: &mut StatusList)
        -> BackendResult<bool>;

    fn unlock_assets(
        &mut self,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    /// Each pair is (from, to); the produced list holds the moved assets.
    fn move_assets(
        &mut self,
        pairs: &[(String, String)],
        out: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn resolve_assets(
        &mut self,
        assets: &mut AssetList,
        method: ResolveMethod,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn submit_assets(
        &mut self,
        change: &Changelist,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn set_assets_file_mode(
        &mut self,
        assets: &mut AssetList,
        mode: FileMode,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_assets_status(
        &mut self,
        assets: &mut AssetList,
        recursive: bool,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_assets_change_status(
        &mut self,
        revision: &str,
        out: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_incoming_assets_change_status(
        &mut self,
        revision: &str,
        out: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_assets_changes(
        &mut self,
        out: &mut Vec<Changelist>,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_assets_incoming_changes(
        &mut self,
        out: &mut Vec<Changelist>,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn get_change_description(
        &mut self,
        revision: &str,
        status: &mut StatusList,
    ) -> BackendResult<String>;

    /// Move assets onto the given changelist revision.
    fn update_revision(
        &mut self,
        assets: &mut AssetList,
        revision: &str,
        status: &mut StatusList,
    ) -> BackendResult<bool>;

    fn delete_revision(&mut self, revision: &str, status: &mut StatusList)
        -> BackendResult<bool>;

    fn revert_changes(&mut self, revision: &str, status: &mut StatusList)
        -> BackendResult<bool>;

    fn perform_custom_command(
        &mut self,
        name: &str,
        status: &mut StatusList,
    ) -> BackendResult<bool>;
}
