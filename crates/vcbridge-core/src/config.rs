//! Backend-declared configuration fields and capability traits.
//!
//! These declarations are immutable after startup apart from each field's
//! current value, which the host sets through the `vc<Plugin><Field>`
//! config keys during negotiation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::asset::AssetState;

bitflags! {
    /// Declaration flags on a [`ConfigField`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ConfigFieldFlags: u32 {
        /// Negotiation cannot complete until the host supplies a value.
        const REQUIRED = 1 << 0;
        /// The value is a credential and must never reach the diagnostic log.
        const PASSWORD = 1 << 1;
    }
}

/// One host-configurable setting declared by a backend and streamed to the
/// host during the `pluginTraits` handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    pub label: String,
    pub description: String,
    pub default_value: String,
    pub flags: ConfigFieldFlags,
    pub value: String,
}

impl ConfigField {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
        default_value: impl Into<String>,
        flags: ConfigFieldFlags,
    ) -> Self {
        let default_value = default_value.into();
        ConfigField {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            value: default_value.clone(),
            default_value,
            flags,
        }
    }

    pub fn is_required(&self) -> bool {
        self.flags.contains(ConfigFieldFlags::REQUIRED)
    }

    pub fn is_password(&self) -> bool {
        self.flags.contains(ConfigFieldFlags::PASSWORD)
    }

    /// True when a required field still holds its (possibly empty) default.
    pub fn needs_value(&self) -> bool {
        self.is_required() && self.value.is_empty()
    }
}

/// A named visual hint the host shows for assets in a given state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateOverlay {
    pub state: AssetState,
    pub overlay: String,
}

/// A backend-specific protocol extension reachable through the
/// `customCommand` dispatcher table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomCommandDesc {
    pub name: String,
    pub label: String,
}

/// Boolean capabilities a backend advertises to the host during the
/// `pluginTraits` handshake. Emission order is fixed by the protocol.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PluginTraits {
    pub requires_network: bool,
    pub enables_checkout: bool,
    pub enables_locking: bool,
    pub enables_revert_unchanged: bool,
    pub enables_changelists: bool,
    pub enables_conflict_handling: bool,
}

impl PluginTraits {
    /// Trait names paired with their set/unset state, in wire order.
    pub fn entries(&self) -> [(&'static str, bool); 6] {
        [
            ("requiresNetwork", self.requires_network),
            ("enablesCheckout", self.enables_checkout),
            ("enablesLocking", self.enables_locking),
            ("enablesRevertUnchanged", self.enables_revert_unchanged),
            ("enablesChangelists", self.enables_changelists),
            ("enablesConflictHandlingByPlugin", self.enables_conflict_handling),
        ]
    }
}
