//! Typed request payloads and their wire decoders.
//!
//! Each decoder reads exactly the fields its command defines, in wire
//! order. When a payload is unusable (an empty required asset list, a bad
//! enum token) the decoder itself drains any remaining expected fields,
//! emits a diagnostic, and yields `None` so the handler body is skipped;
//! the dispatcher still flushes status and ends the response.

use std::io::{Read, Write};

use vcbridge_backend::AssetList;
use vcbridge_core::{Changelist, FileMode, ResolveMethod, Severity, StatusList};
use vcbridge_protocol::{CommandLine, Connection, ProtocolError};

use crate::error::EngineResult;
use crate::session::Session;

/// The one tagged-union request type the dispatcher table operates on.
#[derive(Debug)]
pub enum Request {
    /// Plain asset list (add, checkout, delete, download, getLatest, lock,
    /// unlock).
    Assets { assets: AssetList },
    Resolve {
        assets: AssetList,
        method: ResolveMethod,
    },
    Revert {
        assets: AssetList,
        unchanged_only: bool,
    },
    FileMode {
        assets: AssetList,
        mode: FileMode,
    },
    StatusQuery {
        assets: AssetList,
        recursive: bool,
    },
    Move { pairs: Vec<(String, String)> },
    Submit {
        change: Changelist,
        assets: AssetList,
    },
    /// Single changelist revision (changeStatus, incomingChangeAssets,
    /// changeDescription).
    Revision { revision: String },
    ChangeMove {
        revision: String,
        assets: AssetList,
    },
    Revisions { revisions: Vec<String> },
    Config {
        key: String,
        values: Vec<String>,
    },
    Custom { name: String },
    /// Commands with no payload beyond the command line.
    Empty,
}

fn read_assets<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    session: &Session,
) -> EngineResult<AssetList> {
    let mut assets = conn.read_asset_list()?;
    for asset in assets.iter_mut() {
        let relative = session.relativize(asset.path());
        asset.set_path(relative);
    }
    Ok(assets)
}

fn invalid_empty(cmd: &CommandLine, status: &mut StatusList) {
    status.add(
        Severity::Warn,
        format!("{}: empty asset list, request ignored", cmd.name),
    );
}

/// Asset-list commands where an empty list is unusable.
pub fn decode_assets<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let assets = read_assets(conn, session)?;
    if assets.is_empty() {
        invalid_empty(cmd, status);
        return Ok(None);
    }
    Ok(Some(Request::Assets { assets }))
}

pub fn decode_resolve<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    // Drain the asset list before validating the method token so an
    // unusable request leaves the stream positioned on the next command.
    let assets = read_assets(conn, session)?;
    let method = match cmd.arg(0) {
        None => ResolveMethod::Merged,
        Some(token) => match ResolveMethod::from_wire(token) {
            Ok(method) => method,
            Err(err) => {
                status.add(Severity::Warn, err.to_string());
                return Ok(None);
            }
        },
    };
    if assets.is_empty() {
        invalid_empty(cmd, status);
        return Ok(None);
    }
    Ok(Some(Request::Resolve { assets, method }))
}

pub fn decode_revert<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let assets = read_assets(conn, session)?;
    let unchanged_only = cmd.arg(0) == Some("unchangedOnly");
    if assets.is_empty() {
        invalid_empty(cmd, status);
        return Ok(None);
    }
    Ok(Some(Request::Revert {
        assets,
        unchanged_only,
    }))
}

pub fn decode_file_mode<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let assets = read_assets(conn, session)?;
    let mode = match cmd.arg(0) {
        None => {
            status.add(Severity::Warn, "fileMode: missing mode argument");
            return Ok(None);
        }
        Some(token) => match FileMode::from_wire(token) {
            Ok(mode) => mode,
            Err(err) => {
                status.add(Severity::Warn, err.to_string());
                return Ok(None);
            }
        },
    };
    if assets.is_empty() {
        invalid_empty(cmd, status);
        return Ok(None);
    }
    Ok(Some(Request::FileMode { assets, mode }))
}

/// `status` accepts an empty list: the reply is then just empty framing.
pub fn decode_status_query<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    _status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let assets = read_assets(conn, session)?;
    let recursive = cmd.arg(0) == Some("recursive");
    Ok(Some(Request::StatusQuery { assets, recursive }))
}

pub fn decode_move<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let count = conn.read_count()?;
    if count < 0 {
        return Err(ProtocolError::InvalidCount(count.to_string()).into());
    }
    let mut pairs = Vec::new();
    for _ in 0..count {
        let from = session.relativize(&conn.expect_line()?);
        let to = session.relativize(&conn.expect_line()?);
        pairs.push((from, to));
    }
    if pairs.is_empty() {
        status.add(Severity::Warn, format!("{}: no move pairs", cmd.name));
        return Ok(None);
    }
    Ok(Some(Request::Move { pairs }))
}

pub fn decode_submit<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let change = conn.read_changelist()?;
    let assets = read_assets(conn, session)?;
    if assets.is_empty() {
        invalid_empty(cmd, status);
        return Ok(None);
    }
    Ok(Some(Request::Submit { change, assets }))
}

pub fn decode_revision<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let revision = conn.expect_line()?;
    if revision.is_empty() {
        status.add(Severity::Warn, format!("{}: empty revision", cmd.name));
        return Ok(None);
    }
    Ok(Some(Request::Revision { revision }))
}

pub fn decode_change_move<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let revision = conn.expect_line()?;
    let assets = read_assets(conn, session)?;
    if revision.is_empty() || assets.is_empty() {
        status.add(
            Severity::Warn,
            format!("{}: missing revision or assets", cmd.name),
        );
        return Ok(None);
    }
    Ok(Some(Request::ChangeMove { revision, assets }))
}

pub fn decode_revisions<R: Read, W: Write>(
    conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let count = conn.read_count()?;
    if count < 0 {
        return Err(ProtocolError::InvalidCount(count.to_string()).into());
    }
    let mut revisions = Vec::new();
    for _ in 0..count {
        revisions.push(conn.expect_line()?);
    }
    if revisions.is_empty() {
        status.add(Severity::Warn, format!("{}: no revisions", cmd.name));
        return Ok(None);
    }
    Ok(Some(Request::Revisions { revisions }))
}

pub fn decode_config<R: Read, W: Write>(
    _conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let Some(key) = cmd.arg(0) else {
        status.add(Severity::Warn, "pluginConfig: missing key");
        return Ok(None);
    };
    Ok(Some(Request::Config {
        key: key.to_string(),
        values: cmd.args[1..].to_vec(),
    }))
}

pub fn decode_custom<R: Read, W: Write>(
    _conn: &mut Connection<R, W>,
    cmd: &CommandLine,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    let Some(name) = cmd.arg(0) else {
        status.add(Severity::Warn, "customCommand: missing extension name");
        return Ok(None);
    };
    Ok(Some(Request::Custom {
        name: name.to_string(),
    }))
}

pub fn decode_empty<R: Read, W: Write>(
    _conn: &mut Connection<R, W>,
    _cmd: &CommandLine,
    _session: &mut Session,
    _status: &mut StatusList,
) -> EngineResult<Option<Request>> {
    Ok(Some(Request::Empty))
}
