//! NetworkManager integration module
//!
//! Everything that talks to nmcli: command construction and execution,
//! the read-only connection observer and the mutating session.

pub mod command;
pub mod observer;
pub mod session;

// Public re-exports
pub use command::{CommandRunner, NmCommand, SystemRunner, NMCLI};
pub use observer::{ConnectionRecord, Observer};
pub use session::Session;
