//! In-memory stub backend.
//!
//! Keeps an asset/changelist table in memory so the engine and its tests
//! exercise every operation without a real version-control system. The
//! state rules follow the cross-backend bitmask model; nothing touches the
//! filesystem.

use std::collections::BTreeMap;

use tracing::debug;

use vcbridge_core::{
    AssetState, Changelist, ConfigField, ConfigFieldFlags, CustomCommandDesc, FileMode,
    PluginTraits, ResolveMethod, StateOverlay, Severity, StatusList, VersionedAsset,
    DEFAULT_REVISION, NEW_REVISION,
};

use crate::error::{BackendError, BackendResult};
use crate::{AssetList, Backend};

#[derive(Debug, Clone)]
struct Entry {
    state: AssetState,
    revision: String,
    changelist: String,
}

impl Entry {
    fn new(state: AssetState) -> Self {
        Entry {
            state,
            revision: "1".to_string(),
            changelist: DEFAULT_REVISION.to_string(),
        }
    }
}

/// A filesystem-free backend with fully deterministic behavior.
pub struct StubBackend {
    connected: bool,
    /// When set, `connect` reports a connectivity failure with this reason.
    fail_connect: Option<String>,
    /// When set, the next operation reports an unrecoverable failure.
    fail_fatal: Option<String>,
    entries: BTreeMap<String, Entry>,
    changelists: Vec<Changelist>,
    next_submit_revision: u64,
    fields: Vec<ConfigField>,
}

impl Default for StubBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StubBackend {
    pub fn new() -> Self {
        StubBackend {
            connected: false,
            fail_connect: None,
            fail_fatal: None,
            entries: BTreeMap::new(),
            changelists: Vec::new(),
            next_submit_revision: 2,
            fields: vec![
                ConfigField::new(
                    "Username",
                    "Username",
                    "Account used for stub sessions",
                    "",
                    ConfigFieldFlags::REQUIRED,
                ),
                ConfigField::new(
                    "Password",
                    "Password",
                    "Account credential",
                    "",
                    ConfigFieldFlags::REQUIRED | ConfigFieldFlags::PASSWORD,
                ),
                ConfigField::new(
                    "Server",
                    "Server",
                    "Ignored by the stub",
                    "localhost",
                    ConfigFieldFlags::empty(),
                ),
            ],
        }
    }

    /// Make the next `connect` fail with a connectivity error. Test hook.
    pub fn fail_next_connect(&mut self, reason: impl Into<String>) {
        self.fail_connect = Some(reason.into());
    }

    /// Make the next operation fail with an unrecoverable error. Test hook.
    pub fn fail_next_operation(&mut self, reason: impl Into<String>) {
        self.fail_fatal = Some(reason.into());
    }

    /// Seed a tracked asset. Test hook.
    pub fn seed_asset(&mut self, path: &str, state: AssetState) {
        self.entries.insert(path.to_string(), Entry::new(state));
    }

    /// Seed a changelist. Test hook.
    pub fn seed_changelist(&mut self, change: Changelist) {
        self.changelists.push(change);
    }

    /// JSON snapshot of the tracked table, for diagnostics and tests.
    pub fn dump(&self) -> serde_json::Value {
        let assets: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|(path, entry)| {
                (
                    path.clone(),
                    serde_json::json!({
                        "state": entry.state.bits(),
                        "revision": entry.revision,
                        "changelist": entry.changelist,
                    }),
                )
            })
            .collect();
        serde_json::json!({
            "connected": self.connected,
            "assets": assets,
            "changelists": self.changelists.len(),
        })
    }

    fn ensure_connected(&mut self) -> BackendResult<()> {
        if let Some(reason) = self.fail_fatal.take() {
            return Err(BackendError::Fatal(reason));
        }
        if self.connected {
            Ok(())
        } else {
            Err(BackendError::Connectivity("stub backend is offline".to_string()))
        }
    }

    /// Apply `mutate` to every non-directory asset, refreshing each asset's
    /// wire state from the table afterwards.
    fn for_each_file<F>(&mut self, assets: &mut AssetList, mut mutate: F)
    where
        F: FnMut(&mut Entry),
    {
        for asset in assets.iter_mut() {
            if asset.is_folder() {
                continue;
            }
            let entry = self
                .entries
                .entry(asset.path().to_string())
                .or_insert_with(|| Entry::new(AssetState::LOCAL));
            mutate(entry);
            let meta = asset.state() & AssetState::META_FILE;
            asset.set_state(entry.state | meta);
            asset.revision = entry.revision.clone();
            asset.changelist = Some(entry.changelist.clone());
        }
    }
}

impl Backend for StubBackend {
    fn name(&self) -> &str {
        "Stub"
    }

    fn plugin_traits(&self) -> PluginTraits {
        PluginTraits {
            requires_network: false,
            enables_checkout: true,
            enables_locking: true,
            enables_revert_unchanged: true,
            enables_changelists: true,
            enables_conflict_handling: false,
        }
    }

    fn config_fields(&self) -> &[ConfigField] {
        &self.fields
    }

    fn overlays(&self) -> Vec<StateOverlay> {
        vec![
            StateOverlay {
                state: AssetState::CONFLICTED,
                overlay: "conflicted".to_string(),
            },
            StateOverlay {
                state: AssetState::LOCKED_REMOTE,
                overlay: "lockedByOther".to_string(),
            },
        ]
    }

    fn custom_commands(&self) -> &[CustomCommandDesc] {
        static COMMANDS: std::sync::OnceLock<Vec<CustomCommandDesc>> = std::sync::OnceLock::new();
        COMMANDS.get_or_init(|| {
            vec![CustomCommandDesc {
                name: "flushCache".to_string(),
                label: "Flush Cache".to_string(),
            }]
        })
    }

    fn set_config_value(&mut self, field: &str, value: &str) -> bool {
        match self.fields.iter_mut().find(|f| f.name == field) {
            Some(f) => {
                f.value = value.to_string();
                true
            }
            None => false,
        }
    }

    fn connect(&mut self, status: &mut StatusList) -> BackendResult<bool> {
        if let Some(reason) = self.fail_connect.take() {
            return Err(BackendError::Connectivity(reason));
        }
        self.connected = true;
        status.add(Severity::Ok, "stub backend connected");
        Ok(true)
    }

    fn disconnect(&mut self) {
        debug!("stub backend disconnected");
        self.connected = false;
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn add_assets(
        &mut self,
        assets: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        self.for_each_file(assets, |entry| {
            entry.state |= AssetState::ADDED_LOCAL | AssetState::LOCAL;
            entry.state &= !AssetState::SYNCED;
        });
        Ok(true)
    }

    fn checkout_assets(
        &mut self,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let mut ok = true;
        for asset in assets.iter_mut() {
            if asset.is_folder() {
                continue;
            }
            match self.entries.get_mut(asset.path()) {
                Some(entry) if entry.state.contains(AssetState::LOCKED_REMOTE) => {
                    status.add(
                        Severity::Error,
                        format!("{} is locked by another user", asset.path()),
                    );
                    ok = false;
                }
                Some(entry) => {
                    entry.state |= AssetState::CHECKED_OUT_LOCAL;
                    entry.state &= !AssetState::READ_ONLY;
                    let meta = asset.state() & AssetState::META_FILE;
                    asset.set_state(entry.state | meta);
                }
                None => {
                    status.add(Severity::Error, format!("{} is not tracked", asset.path()));
                    ok = false;
                }
            }
        }
        Ok(ok)
    }

    fn remove_assets(
        &mut self,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let mut ok = true;
        for asset in assets.iter_mut() {
            if asset.is_folder() {
                continue;
            }
            match self.entries.get_mut(asset.path()) {
                Some(entry) => {
                    entry.state |= AssetState::DELETED_LOCAL;
                    // A tracked deletion has no local copy left to sync.
                    entry.state &= !(AssetState::LOCAL | AssetState::OUT_OF_SYNC);
                    let meta = asset.state() & AssetState::META_FILE;
                    asset.set_state(entry.state | meta);
                }
                None => {
                    status.add(Severity::Error, format!("{} is not tracked", asset.path()));
                    ok = false;
                }
            }
        }
        Ok(ok)
    }

    fn get_assets(
        &mut self,
        assets: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        self.for_each_file(assets, |entry| {
            entry.state |= AssetState::LOCAL | AssetState::SYNCED;
            entry.state &= !(AssetState::OUT_OF_SYNC | AssetState::MISSING);
        });
        Ok(true)
    }

    fn revert_assets(
        &mut self,
        assets: &mut AssetList,
        unchanged_only: bool,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let edits = AssetState::CHECKED_OUT_LOCAL
            | AssetState::ADDED_LOCAL
            | AssetState::DELETED_LOCAL
            | AssetState::CONFLICTED
            | AssetState::MOVED;
        self.for_each_file(assets, |entry| {
            // The stub tracks no file contents, so every checkout counts as
            // unchanged.
            let _ = unchanged_only;
            entry.state &= !edits;
            entry.state |= AssetState::LOCAL | AssetState::SYNCED;
            entry.changelist = DEFAULT_REVISION.to_string();
        });
        Ok(true)
    }

    fn lock_assets(
        &mut self,
        assets: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        self.for_each_file(assets, |entry| {
            entry.state |= AssetState::LOCKED_LOCAL;
        });
        Ok(true)
    }

    fn unlock_assets(
        &mut self,
        assets: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        self.for_each_file(assets, |entry| {
            entry.state &= !AssetState::LOCKED_LOCAL;
        });
        Ok(true)
    }

    fn move_assets(
        &mut self,
        pairs: &[(String, String)],
        out: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let mut ok = true;
        for (from, to) in pairs {
            let Some(mut entry) = self.entries.remove(from) else {
                status.add(Severity::Error, format!("{from} is not tracked"));
                ok = false;
                continue;
            };
            entry.state |= AssetState::MOVED | AssetState::CHECKED_OUT_LOCAL;
            let mut moved = VersionedAsset::new(to.clone());
            moved.set_state(entry.state | (moved.state() & AssetState::META_FILE));
            moved.revision = entry.revision.clone();
            moved.moved_from = Some(from.clone());
            self.entries.insert(to.clone(), entry);
            out.push(moved);
        }
        Ok(ok)
    }

    fn resolve_assets(
        &mut self,
        assets: &mut AssetList,
        method: ResolveMethod,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        debug!(method = method.wire_name(), "stub resolve");
        self.for_each_file(assets, |entry| {
            entry.state &= !AssetState::CONFLICTED;
            entry.state |= AssetState::SYNCED;
        });
        Ok(true)
    }

    fn submit_assets(
        &mut self,
        change: &Changelist,
        assets: &mut AssetList,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        if assets.iter().all(|a| a.is_folder()) {
            status.add(Severity::Error, "nothing to submit");
            return Ok(false);
        }
        let revision = self.next_submit_revision.to_string();
        self.next_submit_revision += 1;
        let edits = AssetState::CHECKED_OUT_LOCAL
            | AssetState::ADDED_LOCAL
            | AssetState::DELETED_LOCAL
            | AssetState::LOCKED_LOCAL;
        self.for_each_file(assets, |entry| {
            entry.state &= !edits;
            entry.state |= AssetState::SYNCED;
            entry.revision = revision.clone();
            entry.changelist = DEFAULT_REVISION.to_string();
        });
        let mut committed = Changelist::new(revision, change.description.clone());
        committed.committer = "stub".to_string();
        self.changelists.push(committed);
        Ok(true)
    }

    fn set_assets_file_mode(
        &mut self,
        assets: &mut AssetList,
        mode: FileMode,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        debug!(mode = mode.wire_name(), "stub file mode");
        self.for_each_file(assets, |_entry| {});
        Ok(true)
    }

    fn get_assets_status(
        &mut self,
        assets: &mut AssetList,
        recursive: bool,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        if recursive {
            // Expand directory markers into the tracked assets below them.
            let mut expanded = Vec::new();
            for asset in assets.iter() {
                if asset.is_folder() {
                    let prefix = asset.path().to_string();
                    for path in self.entries.keys().filter(|p| p.starts_with(&prefix)) {
                        expanded.push(VersionedAsset::new(path.clone()));
                    }
                } else {
                    expanded.push(asset.clone());
                }
            }
            *assets = expanded;
        }
        self.for_each_file(assets, |_entry| {});
        Ok(true)
    }

    fn get_assets_change_status(
        &mut self,
        revision: &str,
        out: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        for (path, entry) in &self.entries {
            if entry.changelist == revision {
                let mut asset = VersionedAsset::new(path.clone());
                asset.set_state(entry.state | (asset.state() & AssetState::META_FILE));
                asset.revision = entry.revision.clone();
                asset.changelist = Some(entry.changelist.clone());
                out.push(asset);
            }
        }
        Ok(true)
    }

    fn get_incoming_assets_change_status(
        &mut self,
        revision: &str,
        out: &mut AssetList,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        // The stub has no remote, so incoming changelists carry no assets.
        debug!(revision, "stub incoming change assets");
        out.clear();
        Ok(true)
    }

    fn get_assets_changes(
        &mut self,
        out: &mut Vec<Changelist>,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        out.push(Changelist::new(DEFAULT_REVISION, "default"));
        out.extend(self.changelists.iter().cloned());
        Ok(true)
    }

    fn get_assets_incoming_changes(
        &mut self,
        out: &mut Vec<Changelist>,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        out.clear();
        Ok(true)
    }

    fn get_change_description(
        &mut self,
        revision: &str,
        status: &mut StatusList,
    ) -> BackendResult<String> {
        self.ensure_connected()?;
        if revision == DEFAULT_REVISION {
            return Ok("default".to_string());
        }
        if revision == NEW_REVISION {
            return Ok(String::new());
        }
        match self.changelists.iter().find(|c| c.revision == revision) {
            Some(change) => Ok(change.description.clone()),
            None => {
                status.add(Severity::Error, format!("unknown changelist {revision}"));
                Ok(String::new())
            }
        }
    }

    fn update_revision(
        &mut self,
        assets: &mut AssetList,
        revision: &str,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let target = if revision == NEW_REVISION {
            let created = self.next_submit_revision.to_string();
            self.next_submit_revision += 1;
            self.changelists
                .push(Changelist::new(created.clone(), "pending"));
            created
        } else {
            revision.to_string()
        };
        self.for_each_file(assets, |entry| {
            entry.changelist = target.clone();
        });
        Ok(true)
    }

    fn delete_revision(
        &mut self,
        revision: &str,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        if revision == DEFAULT_REVISION {
            status.add(Severity::Error, "cannot delete the default changelist");
            return Ok(false);
        }
        let before = self.changelists.len();
        self.changelists.retain(|c| c.revision != revision);
        for entry in self.entries.values_mut() {
            if entry.changelist == revision {
                entry.changelist = DEFAULT_REVISION.to_string();
            }
        }
        Ok(self.changelists.len() < before)
    }

    fn revert_changes(
        &mut self,
        revision: &str,
        _status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        let edits = AssetState::CHECKED_OUT_LOCAL
            | AssetState::ADDED_LOCAL
            | AssetState::DELETED_LOCAL
            | AssetState::CONFLICTED;
        for entry in self.entries.values_mut() {
            if entry.changelist == revision {
                entry.state &= !edits;
                entry.state |= AssetState::SYNCED;
                entry.changelist = DEFAULT_REVISION.to_string();
            }
        }
        Ok(true)
    }

    fn perform_custom_command(
        &mut self,
        name: &str,
        status: &mut StatusList,
    ) -> BackendResult<bool> {
        self.ensure_connected()?;
        match name {
            "flushCache" => {
                status.add(Severity::Info, "stub cache flushed");
                Ok(true)
            }
            other => {
                status.add(Severity::Error, format!("unknown custom command {other}"));
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> StubBackend {
        let mut backend = StubBackend::new();
        let mut status = StatusList::new();
        backend.connect(&mut status).unwrap();
        backend
    }

    #[test]
    fn test_operations_require_connection() {
        let mut backend = StubBackend::new();
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        assert!(matches!(
            backend.add_assets(&mut assets, &mut status),
            Err(BackendError::Connectivity(_))
        ));
    }

    #[test]
    fn test_fatal_failure_is_not_connectivity() {
        let mut backend = connected();
        backend.fail_next_operation("index corrupt");
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        assert!(matches!(
            backend.add_assets(&mut assets, &mut status),
            Err(BackendError::Fatal(_))
        ));
        // One-shot: the backend works again afterwards.
        assert!(backend.add_assets(&mut assets, &mut status).unwrap());
    }

    #[test]
    fn test_add_then_submit_assigns_revision() {
        let mut backend = connected();
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        backend.add_assets(&mut assets, &mut status).unwrap();
        assert!(assets[0].has_state(AssetState::ADDED_LOCAL));

        let change = Changelist::new(DEFAULT_REVISION, "first");
        assert!(backend
            .submit_assets(&change, &mut assets, &mut status)
            .unwrap());
        assert!(assets[0].has_state(AssetState::SYNCED));
        assert!(!assets[0].has_state(AssetState::ADDED_LOCAL));
        assert_eq!(assets[0].revision, "2");
    }

    #[test]
    fn test_checkout_untracked_is_partial_failure() {
        let mut backend = connected();
        backend.seed_asset("Assets/known.png", AssetState::LOCAL | AssetState::SYNCED);
        let mut status = StatusList::new();
        let mut assets = vec![
            VersionedAsset::new("Assets/known.png"),
            VersionedAsset::new("Assets/unknown.png"),
        ];
        let ok = backend.checkout_assets(&mut assets, &mut status).unwrap();
        assert!(!ok);
        assert!(status.has_errors());
        assert!(assets[0].has_state(AssetState::CHECKED_OUT_LOCAL));
    }

    #[test]
    fn test_folders_are_skipped() {
        let mut backend = connected();
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/Textures/")];
        backend.add_assets(&mut assets, &mut status).unwrap();
        assert!(backend.dump()["assets"]
            .as_object()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_move_records_moved_from() {
        let mut backend = connected();
        backend.seed_asset("Assets/old.png", AssetState::LOCAL | AssetState::SYNCED);
        let mut status = StatusList::new();
        let mut out = Vec::new();
        let pairs = vec![("Assets/old.png".to_string(), "Assets/new.png".to_string())];
        assert!(backend.move_assets(&pairs, &mut out, &mut status).unwrap());
        assert_eq!(out[0].path(), "Assets/new.png");
        assert_eq!(out[0].moved_from.as_deref(), Some("Assets/old.png"));
        assert!(out[0].has_state(AssetState::MOVED));
    }

    #[test]
    fn test_change_description_lookup() {
        let mut backend = connected();
        backend.seed_changelist(Changelist::new("7", "seven"));
        let mut status = StatusList::new();
        assert_eq!(
            backend.get_change_description("7", &mut status).unwrap(),
            "seven"
        );
        assert_eq!(
            backend.get_change_description(DEFAULT_REVISION, &mut status).unwrap(),
            "default"
        );
        backend.get_change_description("404", &mut status).unwrap();
        assert!(status.has_errors());
    }

    #[test]
    fn test_delete_revision_reassigns_assets() {
        let mut backend = connected();
        backend.seed_changelist(Changelist::new("9", "nine"));
        backend.seed_asset("Assets/a.png", AssetState::CHECKED_OUT_LOCAL);
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        backend.update_revision(&mut assets, "9", &mut status).unwrap();
        assert_eq!(assets[0].changelist.as_deref(), Some("9"));

        assert!(backend.delete_revision("9", &mut status).unwrap());
        let mut out = Vec::new();
        backend
            .get_assets_change_status(DEFAULT_REVISION, &mut out, &mut status)
            .unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_recursive_status_expands_folders() {
        let mut backend = connected();
        backend.seed_asset("Assets/Textures/a.png", AssetState::SYNCED);
        backend.seed_asset("Assets/Textures/b.png", AssetState::SYNCED);
        backend.seed_asset("Other/c.png", AssetState::SYNCED);
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/Textures/")];
        backend
            .get_assets_status(&mut assets, true, &mut status)
            .unwrap();
        assert_eq!(assets.len(), 2);
    }

    #[test]
    fn test_revert_changes_releases_the_changelist() {
        let mut backend = connected();
        backend.seed_changelist(Changelist::new("9", "nine"));
        backend.seed_asset("Assets/a.png", AssetState::CHECKED_OUT_LOCAL);
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        backend.update_revision(&mut assets, "9", &mut status).unwrap();

        assert!(backend.revert_changes("9", &mut status).unwrap());
        let mut out = Vec::new();
        backend
            .get_assets_change_status("9", &mut out, &mut status)
            .unwrap();
        assert!(out.is_empty());
        backend
            .get_assets_change_status(DEFAULT_REVISION, &mut out, &mut status)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert!(!out[0].has_state(AssetState::CHECKED_OUT_LOCAL));
    }

    #[test]
    fn test_incoming_queries_are_empty_without_a_remote() {
        let mut backend = connected();
        let mut status = StatusList::new();
        let mut assets = vec![VersionedAsset::new("Assets/a.png")];
        backend
            .get_incoming_assets_change_status("3", &mut assets, &mut status)
            .unwrap();
        assert!(assets.is_empty());
        let mut changes = Vec::new();
        backend
            .get_assets_incoming_changes(&mut changes, &mut status)
            .unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_set_config_value() {
        let mut backend = StubBackend::new();
        assert!(backend.set_config_value("Username", "alice"));
        assert!(!backend.set_config_value("Nonsense", "x"));
        assert_eq!(
            backend
                .config_fields()
                .iter()
                .find(|f| f.name == "Username")
                .unwrap()
                .value,
            "alice"
        );
    }
}
