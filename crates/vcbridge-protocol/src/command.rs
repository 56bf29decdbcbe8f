//! The fixed command set and its wire-name mapping.

use crate::connection::Area;
use crate::error::{ProtocolError, ProtocolResult};

/// Every operation the host can request, plus `Invalid` as the parse
/// failure marker. The set is fixed; backend-specific extensions go through
/// `CustomCommand` instead of new variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Add,
    Checkout,
    Delete,
    Download,
    GetLatest,
    Lock,
    Unlock,
    Move,
    Resolve,
    Revert,
    Submit,
    Status,
    Changes,
    ChangeStatus,
    IncomingChangeAssets,
    ChangeDescription,
    ChangeMove,
    DeleteChanges,
    Config,
    CustomCommand,
    FileMode,
    Login,
    QueryConfigParameters,
    Exit,
    Shutdown,
    Invalid,
}

/// All dispatchable commands, in wire-name order. `Invalid` is excluded.
pub const ALL_COMMANDS: &[Command] = &[
    Command::Add,
    Command::ChangeDescription,
    Command::ChangeMove,
    Command::ChangeStatus,
    Command::Changes,
    Command::Checkout,
    Command::CustomCommand,
    Command::Delete,
    Command::DeleteChanges,
    Command::Download,
    Command::Exit,
    Command::FileMode,
    Command::GetLatest,
    Command::IncomingChangeAssets,
    Command::Lock,
    Command::Login,
    Command::Move,
    Command::Config,
    Command::QueryConfigParameters,
    Command::Resolve,
    Command::Revert,
    Command::Shutdown,
    Command::Status,
    Command::Submit,
    Command::Unlock,
];

impl Command {
    pub fn wire_name(self) -> &'static str {
        match self {
            Command::Add => "add",
            Command::Checkout => "checkout",
            Command::Delete => "delete",
            Command::Download => "download",
            Command::GetLatest => "getLatest",
            Command::Lock => "lock",
            Command::Unlock => "unlock",
            Command::Move => "move",
            Command::Resolve => "resolve",
            Command::Revert => "revert",
            Command::Submit => "submit",
            Command::Status => "status",
            Command::Changes => "changes",
            Command::ChangeStatus => "changeStatus",
            Command::IncomingChangeAssets => "incomingChangeAssets",
            Command::ChangeDescription => "changeDescription",
            Command::ChangeMove => "changeMove",
            Command::DeleteChanges => "deleteChanges",
            Command::Config => "pluginConfig",
            Command::CustomCommand => "customCommand",
            Command::FileMode => "fileMode",
            Command::Login => "login",
            Command::QueryConfigParameters => "queryConfigParameters",
            Command::Exit => "exit",
            Command::Shutdown => "shutdown",
            Command::Invalid => "invalid",
        }
    }

    /// Map a wire name back to the command; unknown names yield `Invalid`.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "add" => Command::Add,
            "checkout" => Command::Checkout,
            "delete" => Command::Delete,
            "download" => Command::Download,
            "getLatest" => Command::GetLatest,
            "lock" => Command::Lock,
            "unlock" => Command::Unlock,
            "move" => Command::Move,
            "resolve" => Command::Resolve,
            "revert" => Command::Revert,
            "submit" => Command::Submit,
            "status" => Command::Status,
            "changes" => Command::Changes,
            "changeStatus" => Command::ChangeStatus,
            "incomingChangeAssets" => Command::IncomingChangeAssets,
            "changeDescription" => Command::ChangeDescription,
            "changeMove" => Command::ChangeMove,
            "deleteChanges" => Command::DeleteChanges,
            "pluginConfig" => Command::Config,
            "customCommand" => Command::CustomCommand,
            "fileMode" => Command::FileMode,
            "login" => Command::Login,
            "queryConfigParameters" => Command::QueryConfigParameters,
            "exit" => Command::Exit,
            "shutdown" => Command::Shutdown,
            _ => Command::Invalid,
        }
    }
}

/// A parsed inbound command line: `c:<area><name> <arg1> <arg2> ...`
#[derive(Debug, Clone)]
pub struct CommandLine {
    pub area: Area,
    pub command: Command,
    /// The wire name as received; kept for diagnostics on unknown commands.
    pub name: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Parse a full (already unescaped) inbound line. Returns `None` when
    /// the line does not carry the command channel marker at all, which the
    /// dispatcher counts against its bogus-line tolerance.
    pub fn parse(line: &str) -> ProtocolResult<Option<CommandLine>> {
        let Some(rest) = line.strip_prefix("c:") else {
            return Ok(None);
        };

        let digits_end = rest
            .char_indices()
            .find(|(_, ch)| !ch.is_ascii_digit())
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(ProtocolError::MalformedCommandLine(line.to_string()));
        }
        let bits: u32 = rest[..digits_end]
            .parse()
            .map_err(|_| ProtocolError::MalformedCommandLine(line.to_string()))?;
        let area = Area::from_bits(bits).ok_or(ProtocolError::InvalidArea(bits))?;

        let mut tokens = rest[digits_end..].split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| ProtocolError::MalformedCommandLine(line.to_string()))?
            .to_string();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        Ok(Some(CommandLine {
            area,
            command: Command::from_wire(&name),
            name,
            args,
        }))
    }

    pub fn arg(&self, idx: usize) -> Option<&str> {
        self.args.get(idx).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_round_trip() {
        for &cmd in ALL_COMMANDS {
            assert_eq!(Command::from_wire(cmd.wire_name()), cmd);
        }
    }

    #[test]
    fn test_unknown_name_is_invalid() {
        assert_eq!(Command::from_wire("frobnicate"), Command::Invalid);
    }

    #[test]
    fn test_parse_command_line() {
        let parsed = CommandLine::parse("c:1status recursive").unwrap().unwrap();
        assert_eq!(parsed.command, Command::Status);
        assert_eq!(parsed.area, Area::GENERAL);
        assert_eq!(parsed.arg(0), Some("recursive"));
    }

    #[test]
    fn test_parse_config_line_with_args() {
        let parsed = CommandLine::parse("c:8pluginConfig pluginVersions 1 2")
            .unwrap()
            .unwrap();
        assert_eq!(parsed.command, Command::Config);
        assert_eq!(parsed.area, Area::CONFIG);
        assert_eq!(parsed.args, vec!["pluginVersions", "1", "2"]);
    }

    #[test]
    fn test_non_command_line_yields_none() {
        assert!(CommandLine::parse("stray output").unwrap().is_none());
        assert!(CommandLine::parse("o1:data").unwrap().is_none());
    }

    #[test]
    fn test_missing_area_is_malformed() {
        assert!(matches!(
            CommandLine::parse("c:status"),
            Err(ProtocolError::MalformedCommandLine(_))
        ));
    }
}
