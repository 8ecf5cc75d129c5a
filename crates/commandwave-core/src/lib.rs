//! CommandWave controller core.
//!
//! This crate holds the domain of the CommandWave dashboard controller: the
//! per-tab [`session`] state store, the pure [`substitution`] engine, the
//! [`command`] catalog model, and the [`gateway`] traits behind which every
//! external collaborator (REST backend, terminal lifecycle, notes
//! persistence) sits. It performs no I/O.

pub mod command;
pub mod config;
pub mod error;
pub mod gateway;
pub mod playbook;
pub mod session;
pub mod substitution;
pub mod terminal;
pub mod variable;

// Re-export common types
pub use error::{CommandWaveError, Result};
pub use session::{Session, SessionStore};
pub use terminal::TerminalId;
pub use variable::{VariableSet, VariableSlot};
