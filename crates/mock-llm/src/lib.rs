//! Mock completion backends for testing.
//!
//! These implementations let service and API tests exercise the full
//! pipeline without a network:
//!
//! - [`ScriptedCompletion`] - returns queued replies in order and records
//!   every request it receives
//! - [`EchoCompletion`] - echoes the last user message back

mod echo;
mod scripted;

pub use echo::EchoCompletion;
pub use scripted::ScriptedCompletion;
