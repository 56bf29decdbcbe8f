//! Structured connection layer over the raw transport.
//!
//! Adds severity/area-tagged writes, list framing, typed entity
//! encodings, and a mirrored diagnostic log. Credential values go through
//! [`Connection::write_secret_value`] so they never reach the log.

use std::io::{Read, Write};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::trace;

use vcbridge_core::{Changelist, Severity, StatusList, VersionedAsset};

use crate::error::{ProtocolError, ProtocolResult};
use crate::transport::{escape, Transport};

/// Terminates an unknown-length list.
pub const END_LIST_MARKER: &str = "endOfList";

/// Terminates every command reply, success or failure.
pub const END_RESPONSE_MARKER: &str = "endOfResponse";

/// Sentinel count announcing an unknown-length list.
pub const UNKNOWN_LENGTH: &str = "-1";

/// Outbound line channel, encoded as a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Data,
    Error,
    Warn,
    Info,
    Verbose,
    Progress,
    Command,
}

impl Channel {
    pub fn code(self) -> char {
        match self {
            Channel::Data => 'o',
            Channel::Error => 'e',
            Channel::Warn => 'w',
            Channel::Info => 'i',
            Channel::Verbose => 'v',
            Channel::Progress => 'p',
            Channel::Command => 'c',
        }
    }

    /// The channel a status message of the given severity is written on.
    pub fn for_severity(severity: Severity) -> Self {
        match severity {
            Severity::Ok | Severity::Info => Channel::Info,
            Severity::Warn => Channel::Warn,
            Severity::Error => Channel::Error,
            Severity::Command => Channel::Command,
        }
    }
}

bitflags! {
    /// Additive bitmask classifying which subsystem a line concerns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Area: u32 {
        const GENERAL  = 1;
        const SYSTEM   = 2;
        const PLUGIN   = 4;
        const CONFIG   = 8;
        const CONNECT  = 16;
        const PROTOCOL = 32;
        const REMOTE   = 64;
        const INVALID  = 128;
    }
}

/// Wraps [`Transport`] with the structured write surface every handler
/// uses. One instance per worker process.
pub struct Connection<R: Read, W: Write> {
    transport: Transport<R, W>,
}

impl<R: Read, W: Write> Connection<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Connection {
            transport: Transport::new(reader, writer),
        }
    }

    /// Consume the connection, returning the underlying reader and writer.
    pub fn into_parts(self) -> (R, W) {
        self.transport.into_parts()
    }

    /// Read the next inbound line; `None` is end-of-stream.
    pub fn read_line(&mut self) -> ProtocolResult<Option<String>> {
        self.transport.read_line()
    }

    pub fn peek_line(&mut self) -> ProtocolResult<Option<&str>> {
        self.transport.peek_line()
    }

    /// Read a line, treating end-of-stream as a protocol error. Request
    /// decoding uses this for fields that must be present.
    pub fn expect_line(&mut self) -> ProtocolResult<String> {
        self.transport
            .read_line()?
            .ok_or(ProtocolError::UnexpectedEof)
    }

    /// Read a counted-collection header line.
    pub fn read_count(&mut self) -> ProtocolResult<i64> {
        let line = self.expect_line()?;
        line.trim()
            .parse()
            .map_err(|_| ProtocolError::InvalidCount(line))
    }

    /// Escape, frame as `<channel><area>:<value>`, flush, and mirror to the
    /// diagnostic log.
    pub fn write_value(&mut self, value: &str, channel: Channel, area: Area) -> ProtocolResult<()> {
        trace!(channel = %channel.code(), area = area.bits(), value, "wire out");
        self.write_framed(value, channel, area)
    }

    /// Like [`Connection::write_value`] but logs a redaction marker instead
    /// of the value. Used for password-flagged config fields.
    pub fn write_secret_value(
        &mut self,
        value: &str,
        channel: Channel,
        area: Area,
    ) -> ProtocolResult<()> {
        trace!(channel = %channel.code(), area = area.bits(), value = "<redacted>", "wire out");
        self.write_framed(value, channel, area)
    }

    fn write_framed(&mut self, value: &str, channel: Channel, area: Area) -> ProtocolResult<()> {
        let line = format!("{}{}:{}", channel.code(), area.bits(), escape(value));
        self.transport.write_raw_line(&line)
    }

    pub fn data(&mut self, value: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(value, Channel::Data, area)
    }

    pub fn error(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Error, area)
    }

    pub fn warn(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Warn, area)
    }

    pub fn info(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Info, area)
    }

    pub fn verbose(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Verbose, area)
    }

    pub fn progress(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Progress, area)
    }

    /// Host-directed command notification (enable/disable, online/offline).
    pub fn command(&mut self, message: &str, area: Area) -> ProtocolResult<()> {
        self.write_value(message, Channel::Command, area)
    }

    /// Open an unknown-length list; elements stream as produced.
    pub fn begin_list(&mut self, area: Area) -> ProtocolResult<()> {
        self.data(UNKNOWN_LENGTH, area)
    }

    pub fn end_list(&mut self, area: Area) -> ProtocolResult<()> {
        self.data(END_LIST_MARKER, area)
    }

    /// Mandatory terminator for every command reply, success or failure,
    /// so the host's read loop never blocks indefinitely.
    pub fn end_response(&mut self) -> ProtocolResult<()> {
        self.data(END_RESPONSE_MARKER, Area::GENERAL)
    }

    /// Write a counted-collection header.
    pub fn write_count(&mut self, count: usize, area: Area) -> ProtocolResult<()> {
        self.data(&count.to_string(), area)
    }

    // Entity encodings. Inbound assets are a single path line; outbound
    // assets carry the path and the decimal state mask.

    pub fn read_asset(&mut self) -> ProtocolResult<VersionedAsset> {
        let path = self.expect_line()?;
        if path.is_empty() {
            return Err(vcbridge_core::Error::EmptyPath.into());
        }
        Ok(VersionedAsset::new(path))
    }

    pub fn write_asset(&mut self, asset: &VersionedAsset, area: Area) -> ProtocolResult<()> {
        self.data(asset.path(), area)?;
        self.data(&asset.state().bits().to_string(), area)
    }

    /// Read a counted asset list. A zero count yields an empty vector; the
    /// caller decides whether that invalidates the request.
    pub fn read_asset_list(&mut self) -> ProtocolResult<Vec<VersionedAsset>> {
        let count = self.read_count()?;
        if count < 0 {
            return Err(ProtocolError::InvalidCount(count.to_string()));
        }
        let mut assets = Vec::with_capacity(count as usize);
        for _ in 0..count {
            assets.push(self.read_asset()?);
        }
        Ok(assets)
    }

    pub fn write_asset_list(
        &mut self,
        assets: &[VersionedAsset],
        area: Area,
    ) -> ProtocolResult<()> {
        self.begin_list(area)?;
        for asset in assets {
            self.write_asset(asset, area)?;
        }
        self.end_list(area)
    }

    /// Inbound changelist header: revision line then description line.
    pub fn read_changelist(&mut self) -> ProtocolResult<Changelist> {
        let revision = self.expect_line()?;
        let description = self.expect_line()?;
        Ok(Changelist::new(revision, description))
    }

    pub fn write_changelist(&mut self, change: &Changelist, area: Area) -> ProtocolResult<()> {
        self.data(&change.revision, area)?;
        self.data(&change.description, area)?;
        self.data(&change.timestamp, area)?;
        self.data(&change.committer, area)
    }

    pub fn write_changelist_list(
        &mut self,
        changes: &[Changelist],
        area: Area,
    ) -> ProtocolResult<()> {
        self.begin_list(area)?;
        for change in changes {
            self.write_changelist(change, area)?;
        }
        self.end_list(area)
    }

    /// Flush the accumulated per-command status, one line per item on the
    /// channel matching its severity.
    pub fn write_status_list(&mut self, status: &StatusList) -> ProtocolResult<()> {
        for item in status.iter() {
            self.write_value(
                &item.message,
                Channel::for_severity(item.severity),
                Area::GENERAL,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vcbridge_core::AssetState;

    fn connection(input: &str) -> Connection<Cursor<Vec<u8>>, Vec<u8>> {
        Connection::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(conn: Connection<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        let (_, writer) = conn.into_parts();
        String::from_utf8(writer).unwrap()
    }

    #[test]
    fn test_write_value_frames_channel_and_area() {
        let mut conn = connection("");
        conn.write_value("hello", Channel::Data, Area::GENERAL).unwrap();
        conn.write_value("multi\nline", Channel::Error, Area::PROTOCOL)
            .unwrap();
        assert_eq!(output(conn), "o1:hello\ne32:multi\\nline\n");
    }

    #[test]
    fn test_list_framing() {
        let mut conn = connection("");
        conn.begin_list(Area::GENERAL).unwrap();
        conn.end_list(Area::GENERAL).unwrap();
        conn.end_response().unwrap();
        assert_eq!(output(conn), "o1:-1\no1:endOfList\no1:endOfResponse\n");
    }

    #[test]
    fn test_write_asset_emits_path_then_state() {
        let mut conn = connection("");
        let mut asset = VersionedAsset::new("Assets/a.png");
        asset.add_state(AssetState::LOCAL | AssetState::SYNCED);
        conn.write_asset(&asset, Area::GENERAL).unwrap();
        assert_eq!(output(conn), "o1:Assets/a.png\no1:3\n");
    }

    #[test]
    fn test_read_asset_list() {
        let mut conn = connection("2\nAssets/a.png\nAssets/b.png.meta\n");
        let assets = conn.read_asset_list().unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].path(), "Assets/a.png");
        assert!(assets[1].is_meta());
    }

    #[test]
    fn test_read_asset_list_rejects_negative_count() {
        let mut conn = connection("-3\n");
        assert!(matches!(
            conn.read_asset_list(),
            Err(ProtocolError::InvalidCount(_))
        ));
    }

    #[test]
    fn test_read_asset_rejects_empty_path() {
        let mut conn = connection("2\n\nAssets/b.png\n");
        assert!(matches!(
            conn.read_asset_list(),
            Err(ProtocolError::Core(vcbridge_core::Error::EmptyPath))
        ));
    }

    #[test]
    fn test_read_changelist() {
        let mut conn = connection("42\nFix lighting\n");
        let change = conn.read_changelist().unwrap();
        assert_eq!(change.revision, "42");
        assert_eq!(change.description, "Fix lighting");
    }

    #[test]
    fn test_status_list_write_order_and_channels() {
        let mut status = StatusList::new();
        status.add(Severity::Info, "b");
        status.add(Severity::Error, "a");
        let mut conn = connection("");
        conn.write_status_list(&status).unwrap();
        assert_eq!(output(conn), "e1:a\ni1:b\n");
    }
}
