//! The command dispatch table.
//!
//! Dispatch is one explicit registry object mapping each wire command to a
//! `(decode, handle, encode)` triple of plain function pointers. Adding a
//! command means adding one row here; nothing else in the engine changes.

use std::collections::HashMap;
use std::io::{Read, Write};

use vcbridge_backend::Backend;
use vcbridge_core::StatusList;
use vcbridge_protocol::{Area, Command, CommandLine, Connection};

use crate::error::EngineResult;
use crate::handlers;
use crate::request::{self, Request};
use crate::response::{self, Response};
use crate::session::Session;

/// What a handler hands back to the dispatcher: the command-level verdict
/// plus the payload for the encode step.
#[derive(Debug)]
pub struct Outcome {
    /// Overall success; partial failures report `false` alongside whatever
    /// per-asset results the response carries.
    pub success: bool,
    pub response: Response,
}

pub type DecodeFn<R, W> = fn(
    &mut Connection<R, W>,
    &CommandLine,
    &mut Session,
    &mut StatusList,
) -> EngineResult<Option<Request>>;

pub type HandleFn<B> =
    fn(&mut B, Request, &mut Session, &mut StatusList) -> EngineResult<Outcome>;

pub type EncodeFn<R, W> = fn(&mut Connection<R, W>, &Response, Area) -> EngineResult<()>;

pub struct CommandSpec<B, R: Read, W: Write> {
    pub decode: DecodeFn<R, W>,
    pub handle: HandleFn<B>,
    pub encode: EncodeFn<R, W>,
}

/// Registry of every dispatchable command.
pub struct CommandRegistry<B, R: Read, W: Write> {
    table: HashMap<Command, CommandSpec<B, R, W>>,
}

impl<B: Backend, R: Read, W: Write> CommandRegistry<B, R, W> {
    /// The standard command set. `invalid` is deliberately absent: an
    /// unknown command name is a protocol error, not a dispatchable row.
    pub fn standard() -> Self {
        let mut table: HashMap<Command, CommandSpec<B, R, W>> = HashMap::new();
        let mut row =
            |cmd: Command, decode: DecodeFn<R, W>, handle: HandleFn<B>, encode: EncodeFn<R, W>| {
                table.insert(
                    cmd,
                    CommandSpec {
                        decode,
                        handle,
                        encode,
                    },
                );
            };

        row(
            Command::Add,
            request::decode_assets,
            handlers::handle_add,
            response::encode_assets,
        );
        row(
            Command::Checkout,
            request::decode_assets,
            handlers::handle_checkout,
            response::encode_assets,
        );
        row(
            Command::Delete,
            request::decode_assets,
            handlers::handle_delete,
            response::encode_assets,
        );
        row(
            Command::Download,
            request::decode_assets,
            handlers::handle_get,
            response::encode_assets,
        );
        row(
            Command::GetLatest,
            request::decode_assets,
            handlers::handle_get,
            response::encode_assets,
        );
        row(
            Command::Lock,
            request::decode_assets,
            handlers::handle_lock,
            response::encode_assets,
        );
        row(
            Command::Unlock,
            request::decode_assets,
            handlers::handle_unlock,
            response::encode_assets,
        );
        row(
            Command::Move,
            request::decode_move,
            handlers::handle_move,
            response::encode_assets,
        );
        row(
            Command::Resolve,
            request::decode_resolve,
            handlers::handle_resolve,
            response::encode_assets,
        );
        row(
            Command::Revert,
            request::decode_revert,
            handlers::handle_revert,
            response::encode_assets,
        );
        row(
            Command::Submit,
            request::decode_submit,
            handlers::handle_submit,
            response::encode_assets,
        );
        row(
            Command::Status,
            request::decode_status_query,
            handlers::handle_status,
            response::encode_assets,
        );
        row(
            Command::Changes,
            request::decode_empty,
            handlers::handle_changes,
            response::encode_changes,
        );
        row(
            Command::ChangeStatus,
            request::decode_revision,
            handlers::handle_change_status,
            response::encode_assets,
        );
        row(
            Command::IncomingChangeAssets,
            request::decode_revision,
            handlers::handle_incoming_change_assets,
            response::encode_assets,
        );
        row(
            Command::ChangeDescription,
            request::decode_revision,
            handlers::handle_change_description,
            response::encode_text,
        );
        row(
            Command::ChangeMove,
            request::decode_change_move,
            handlers::handle_change_move,
            response::encode_assets,
        );
        row(
            Command::DeleteChanges,
            request::decode_revisions,
            handlers::handle_delete_changes,
            response::encode_none,
        );
        row(
            Command::Config,
            request::decode_config,
            handlers::handle_config,
            response::encode_config,
        );
        row(
            Command::CustomCommand,
            request::decode_custom,
            handlers::handle_custom,
            response::encode_none,
        );
        row(
            Command::FileMode,
            request::decode_file_mode,
            handlers::handle_file_mode,
            response::encode_assets,
        );
        row(
            Command::Login,
            request::decode_empty,
            handlers::handle_login,
            response::encode_none,
        );
        row(
            Command::QueryConfigParameters,
            request::decode_empty,
            handlers::handle_query_config_parameters,
            response::encode_field_names,
        );
        row(
            Command::Exit,
            request::decode_empty,
            handlers::handle_exit,
            response::encode_none,
        );
        row(
            Command::Shutdown,
            request::decode_empty,
            handlers::handle_exit,
            response::encode_none,
        );

        CommandRegistry { table }
    }

    pub fn get(&self, command: Command) -> Option<&CommandSpec<B, R, W>> {
        self.table.get(&command)
    }
}
