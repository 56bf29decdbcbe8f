//! VCBridge wire protocol.
//!
//! A fixed, line-oriented protocol spoken over a pipe between the host
//! editor and a version-control worker process.
//!
//! ## Line Format
//! ```text
//! c:<area><command-name> <arg1> <arg2> ...   # inbound command
//! <channel><area>:<value>                    # outbound value
//! ```
//!
//! Channels: `o` data, `e` error, `w` warn, `i` info, `v` verbose,
//! `p` progress, `c` command. Areas are an additive bitmask.
//!
//! Values are backslash-escaped so one logical value always occupies one
//! physical line. Unknown-length lists open with a `-1` sentinel and close
//! with a literal terminator line; every command reply ends with an
//! end-of-response line.

pub mod command;
pub mod connection;
pub mod error;
pub mod transport;

pub use command::{Command, CommandLine, ALL_COMMANDS};
pub use connection::{
    Area, Channel, Connection, END_LIST_MARKER, END_RESPONSE_MARKER, UNKNOWN_LENGTH,
};
pub use error::{ProtocolError, ProtocolResult};
pub use transport::{escape, unescape, Transport};
