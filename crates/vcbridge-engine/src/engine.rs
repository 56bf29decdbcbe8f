//! The read-dispatch-write loop.
//!
//! One command per round-trip, strictly in order: clear status, decode the
//! request, run the handler, encode the response, flush status, apply any
//! lifecycle edge, terminate the reply. The loop is single-threaded and
//! blocks on I/O; a command runs to completion before the next line is
//! read.

use std::io::{Read, Write};

use tracing::{debug, error, warn};

use vcbridge_backend::{Backend, BackendError};
use vcbridge_core::{Severity, StatusList};
use vcbridge_protocol::{Command, CommandLine, Connection, ProtocolError};

use crate::error::{EngineError, EngineResult};
use crate::lifecycle::Lifecycle;
use crate::registry::{CommandRegistry, Outcome};
use crate::response::Response;
use crate::session::Session;

/// Non-command lines tolerated between commands before the stream is
/// declared corrupt.
const DEFAULT_BOGUS_LINE_LIMIT: usize = 1000;

enum Flow {
    Continue,
    Exit,
}

/// The protocol engine: one connection, one backend, one session.
pub struct Engine<B, R: Read, W: Write> {
    conn: Connection<R, W>,
    backend: B,
    session: Session,
    lifecycle: Lifecycle,
    status: StatusList,
    registry: CommandRegistry<B, R, W>,
    bogus_line_limit: usize,
}

impl<B: Backend, R: Read, W: Write> Engine<B, R, W> {
    pub fn new(reader: R, writer: W, backend: B) -> Self {
        Engine {
            conn: Connection::new(reader, writer),
            backend,
            session: Session::new(),
            lifecycle: Lifecycle::new(),
            status: StatusList::new(),
            registry: CommandRegistry::standard(),
            bogus_line_limit: DEFAULT_BOGUS_LINE_LIMIT,
        }
    }

    /// Replace the default session, e.g. to install a log-level hook.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn with_bogus_line_limit(mut self, limit: usize) -> Self {
        self.bogus_line_limit = limit;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_parts(self) -> (R, W, B) {
        let (reader, writer) = self.conn.into_parts();
        (reader, writer, self.backend)
    }

    /// Serve the connection until the host disconnects or asks to exit.
    pub fn run(&mut self) -> EngineResult<()> {
        loop {
            let Some(cmd) = self.next_command()? else {
                debug!("host closed the stream, shutting down");
                self.backend.disconnect();
                return Ok(());
            };
            match self.dispatch(cmd)? {
                Flow::Continue => {}
                Flow::Exit => {
                    self.backend.disconnect();
                    return Ok(());
                }
            }
        }
    }

    /// Read lines until a command arrives. End-of-stream between commands
    /// is a clean shutdown; mid-request it surfaces later as a decode
    /// error. Non-command lines count against the bogus-line tolerance.
    fn next_command(&mut self) -> EngineResult<Option<CommandLine>> {
        let mut bogus = 0usize;
        loop {
            let Some(line) = self.conn.read_line()? else {
                return Ok(None);
            };
            match CommandLine::parse(&line)? {
                Some(cmd) => return Ok(Some(cmd)),
                None => {
                    warn!(line = %line, "ignoring non-command line");
                    bogus += 1;
                    if bogus >= self.bogus_line_limit {
                        return Err(ProtocolError::TooManyBogusLines(self.bogus_line_limit).into());
                    }
                }
            }
        }
    }

    fn dispatch(&mut self, cmd: CommandLine) -> EngineResult<Flow> {
        self.status.clear();
        self.log_inbound(&cmd);

        if cmd.command == Command::Invalid {
            return Err(ProtocolError::UnknownCommand(cmd.name).into());
        }
        let Some(spec) = self.registry.get(cmd.command) else {
            return Err(EngineError::NoHandler(cmd.name));
        };
        let decode = spec.decode;
        let handle = spec.handle;
        let encode = spec.encode;
        let area = cmd.area;

        let request = match decode(&mut self.conn, &cmd, &mut self.session, &mut self.status) {
            Ok(request) => request,
            Err(
                err @ EngineError::Protocol(ProtocolError::Io(_) | ProtocolError::UnexpectedEof),
            ) => return Err(err),
            Err(err) => {
                // Malformed payload with the stream still framed: report
                // and keep serving.
                error!(command = %cmd.name, %err, "request decode failed");
                self.conn.error(&err.to_string(), area)?;
                self.finish_response()?;
                return Ok(Flow::Continue);
            }
        };

        let mut offline_reason = None;
        let outcome = match request {
            // The decoder rejected the payload and already explained why.
            None => Outcome {
                success: false,
                response: Response::None,
            },
            Some(request) => {
                match handle(&mut self.backend, request, &mut self.session, &mut self.status) {
                    Ok(outcome) => outcome,
                    Err(EngineError::Backend(BackendError::Connectivity(reason))) => {
                        self.status.add(Severity::Error, reason.clone());
                        offline_reason = Some(reason);
                        Outcome {
                            success: false,
                            response: Response::None,
                        }
                    }
                    Err(err) => return Err(err),
                }
            }
        };

        encode(&mut self.conn, &outcome.response, area)?;
        self.conn.write_status_list(&self.status)?;

        if let Some(reason) = offline_reason {
            self.lifecycle.set_offline(&mut self.conn, &reason)?;
        } else if outcome.success && flips_online(cmd.command) {
            self.lifecycle.set_online(&mut self.conn)?;
        }

        self.conn.end_response()?;

        match cmd.command {
            Command::Exit | Command::Shutdown => Ok(Flow::Exit),
            _ => Ok(Flow::Continue),
        }
    }

    fn finish_response(&mut self) -> EngineResult<()> {
        self.conn.write_status_list(&self.status)?;
        self.conn.end_response()?;
        Ok(())
    }

    /// Mirror the inbound command to the diagnostic log. Arguments of a
    /// config command targeting a password field are redacted.
    fn log_inbound(&self, cmd: &CommandLine) {
        if self.is_secret_config(cmd) {
            debug!(command = %cmd.name, args = "<redacted>", "command in");
        } else {
            debug!(command = %cmd.name, args = ?cmd.args, "command in");
        }
    }

    fn is_secret_config(&self, cmd: &CommandLine) -> bool {
        if cmd.command != Command::Config {
            return false;
        }
        let Some(field) = cmd
            .arg(0)
            .and_then(|key| key.strip_prefix("vc"))
            .and_then(|key| key.strip_prefix(self.backend.name()))
        else {
            return false;
        };
        self.backend
            .config_fields()
            .iter()
            .any(|f| f.name == field && f.is_password())
    }
}

/// Whether a successful run of this command proves the backend reachable.
/// Negotiation and session commands never flip the lifecycle.
fn flips_online(command: Command) -> bool {
    !matches!(
        command,
        Command::Config | Command::QueryConfigParameters | Command::Exit | Command::Shutdown
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vcbridge_backend::StubBackend;

    fn run_engine(input: &str, backend: StubBackend) -> (String, StubBackend) {
        let mut engine = Engine::new(
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            backend,
        );
        engine.run().unwrap();
        let (_, out, backend) = engine.into_parts();
        (String::from_utf8(out).unwrap(), backend)
    }

    #[test]
    fn test_eof_between_commands_is_clean_shutdown() {
        let (out, backend) = run_engine("", StubBackend::new());
        assert!(out.is_empty());
        assert!(!backend.is_connected());
    }

    #[test]
    fn test_exit_stops_the_loop_before_later_commands() {
        let input = "c:1exit\nc:1login\n";
        let (out, backend) = run_engine(input, StubBackend::new());
        assert_eq!(out.matches("endOfResponse").count(), 1);
        assert!(!backend.is_connected());
    }

    #[test]
    fn test_unknown_command_is_fatal() {
        let mut engine = Engine::new(
            Cursor::new(b"c:1frobnicate\n".to_vec()),
            Vec::new(),
            StubBackend::new(),
        );
        assert!(matches!(
            engine.run(),
            Err(EngineError::Protocol(ProtocolError::UnknownCommand(_)))
        ));
    }

    #[test]
    fn test_bogus_line_limit() {
        let mut engine = Engine::new(
            Cursor::new(b"noise\nmore noise\n".to_vec()),
            Vec::new(),
            StubBackend::new(),
        )
        .with_bogus_line_limit(2);
        assert!(matches!(
            engine.run(),
            Err(EngineError::Protocol(ProtocolError::TooManyBogusLines(2)))
        ));
    }

    #[test]
    fn test_fatal_backend_error_stops_the_engine() {
        let mut backend = StubBackend::new();
        let mut status = StatusList::new();
        backend.connect(&mut status).unwrap();
        backend.fail_next_operation("index corrupt");
        let mut engine = Engine::new(
            Cursor::new(b"c:1add\n1\nAssets/a.png\n".to_vec()),
            Vec::new(),
            backend,
        );
        assert!(matches!(
            engine.run(),
            Err(EngineError::Backend(BackendError::Fatal(_)))
        ));
    }

    #[test]
    fn test_connectivity_failure_reports_and_recovers() {
        let mut backend = StubBackend::new();
        backend.fail_next_connect("server unreachable");
        // Second login succeeds; the engine must survive the first.
        let input = "c:1login\nc:1login\n";
        let (out, backend) = run_engine(input, backend);
        assert!(out.contains("server unreachable"));
        assert_eq!(out.matches("endOfResponse").count(), 2);
        // No offline burst: the engine never reached Online first. The
        // online burst proves the second login succeeded.
        assert!(!out.contains(":offline"));
        assert!(out.contains(":online"));
        // The engine drops the backend connection when the stream closes.
        assert!(!backend.is_connected());
    }
}
