//! VCBridge Engine
//!
//! The protocol engine shared by every backend: reads one command per
//! round-trip from the host, dispatches it through a typed
//! decode/handle/encode table, and maintains the online/offline lifecycle.
//!
//! The engine is single-threaded and strictly synchronous: one
//! read-dispatch-write cycle at a time, blocking I/O throughout, no
//! mid-command cancellation.

pub mod engine;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod registry;
pub mod request;
pub mod response;
pub mod session;

pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use lifecycle::{Lifecycle, UI_COMMANDS};
pub use registry::{CommandRegistry, CommandSpec, Outcome};
pub use request::Request;
pub use response::Response;
pub use session::{select_version, Session, SUPPORTED_VERSIONS};
