//! Online/offline lifecycle and host command notifications.

use std::io::{Read, Write};

use tracing::info;

use vcbridge_protocol::{Area, Command, Connection, ProtocolResult};

/// Commands the host surfaces in its palette; each gets an explicit
/// enable/disable notification on every lifecycle edge so the host never
/// polls for reachability.
pub const UI_COMMANDS: &[Command] = &[
    Command::Add,
    Command::Checkout,
    Command::Delete,
    Command::Download,
    Command::GetLatest,
    Command::Lock,
    Command::Unlock,
    Command::Move,
    Command::Resolve,
    Command::Revert,
    Command::Submit,
    Command::Status,
    Command::Changes,
    Command::ChangeStatus,
    Command::IncomingChangeAssets,
    Command::ChangeDescription,
    Command::ChangeMove,
    Command::DeleteChanges,
    Command::CustomCommand,
    Command::FileMode,
];

/// Two-state connectivity machine; initial state Offline. Notification
/// bursts fire exactly once per edge, never while the state is unchanged.
pub struct Lifecycle {
    online: bool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Lifecycle { online: false }
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Enter Online, notifying the host once on the edge.
    pub fn set_online<R: Read, W: Write>(
        &mut self,
        conn: &mut Connection<R, W>,
    ) -> ProtocolResult<()> {
        if self.online {
            return Ok(());
        }
        self.online = true;
        info!("lifecycle: online");
        conn.command("online", Area::GENERAL)?;
        for cmd in UI_COMMANDS {
            conn.command(&format!("enableCommand {}", cmd.wire_name()), Area::GENERAL)?;
        }
        Ok(())
    }

    /// Enter Offline, notifying the host once on the edge.
    pub fn set_offline<R: Read, W: Write>(
        &mut self,
        conn: &mut Connection<R, W>,
        reason: &str,
    ) -> ProtocolResult<()> {
        if !self.online {
            return Ok(());
        }
        self.online = false;
        info!(reason, "lifecycle: offline");
        conn.command(&format!("offline {reason}"), Area::GENERAL)?;
        for cmd in UI_COMMANDS {
            conn.command(&format!("disableCommand {}", cmd.wire_name()), Area::GENERAL)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn conn() -> Connection<Cursor<Vec<u8>>, Vec<u8>> {
        Connection::new(Cursor::new(Vec::new()), Vec::new())
    }

    fn burst_count(output: &str) -> usize {
        output
            .lines()
            .filter(|l| l.contains(":online") || l.contains(":offline"))
            .count()
    }

    #[test]
    fn test_no_duplicate_bursts_on_same_state() {
        let mut lifecycle = Lifecycle::new();

        // Reach Online first, on a throwaway connection.
        let mut warmup = conn();
        lifecycle.set_online(&mut warmup).unwrap();

        // Online -> Offline -> Offline -> Online: two edges, two bursts.
        let mut c = conn();
        lifecycle.set_offline(&mut c, "server unreachable").unwrap();
        lifecycle.set_offline(&mut c, "server unreachable").unwrap();
        lifecycle.set_online(&mut c).unwrap();

        let (_, out) = c.into_parts();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(burst_count(&text), 2);
    }

    #[test]
    fn test_burst_covers_every_ui_command() {
        let mut lifecycle = Lifecycle::new();
        let mut c = conn();
        lifecycle.set_online(&mut c).unwrap();
        let (_, out) = c.into_parts();
        let text = String::from_utf8(out).unwrap();
        for cmd in UI_COMMANDS {
            assert!(text.contains(&format!("enableCommand {}", cmd.wire_name())));
        }
    }

    #[test]
    fn test_initial_offline_is_not_an_edge() {
        let mut lifecycle = Lifecycle::new();
        let mut c = conn();
        lifecycle.set_offline(&mut c, "still offline").unwrap();
        let (_, out) = c.into_parts();
        assert!(out.is_empty());
    }
}
