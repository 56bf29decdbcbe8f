//! Per-process session state and version negotiation.

use tracing::{debug, info};

/// Protocol versions this engine speaks.
pub const SUPPORTED_VERSIONS: &[i32] = &[1, 2];

/// Pick the newest protocol version both sides support, or `-1` when the
/// sets are disjoint. The `-1` outcome is fatal to further negotiation.
pub fn select_version(host: &[i32], ours: &[i32]) -> i32 {
    host.iter()
        .filter(|v| ours.contains(v))
        .copied()
        .max()
        .unwrap_or(-1)
}

type LogLevelHook = Box<dyn FnMut(&str)>;

/// Mutable state negotiated through the config handshake and consulted by
/// request decoding. Never touches the asset state model.
pub struct Session {
    /// Root used to relativize inbound asset paths; empty until the host
    /// sends `projectPath`.
    pub project_path: String,
    pub negotiated_version: Option<i32>,
    pub negotiation_failed: bool,
    log_level_hook: Option<LogLevelHook>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            project_path: String::new(),
            negotiated_version: None,
            negotiation_failed: false,
            log_level_hook: None,
        }
    }

    /// Install the callback invoked when the host sends `vcSharedLogLevel`.
    /// The binary wires this to its tracing reload handle.
    pub fn with_log_level_hook(mut self, hook: impl FnMut(&str) + 'static) -> Self {
        self.log_level_hook = Some(Box::new(hook));
        self
    }

    pub fn set_project_path(&mut self, path: String) {
        info!(path = %path, "project path set");
        self.project_path = path;
    }

    pub fn set_log_level(&mut self, level: &str) {
        debug!(level, "log level requested");
        if let Some(hook) = self.log_level_hook.as_mut() {
            hook(level);
        }
    }

    /// Strip the project root from an inbound absolute path. Paths outside
    /// the project (or received before `projectPath`) pass through intact;
    /// the directory-marker trailing separator is preserved exactly.
    ///
    /// The root must end at a path-separator boundary: a sibling directory
    /// sharing the root as a string prefix is outside the project.
    pub fn relativize(&self, path: &str) -> String {
        const SEPARATORS: &[char] = &['/', '\\'];
        if self.project_path.is_empty() {
            return path.to_string();
        }
        let root = self.project_path.trim_end_matches(SEPARATORS);
        match path.strip_prefix(root) {
            Some(rest) if rest.is_empty() || rest.starts_with(SEPARATORS) => {
                rest.trim_start_matches(SEPARATORS).to_string()
            }
            _ => path.to_string(),
        }
    }
}
