//! CommandWave infrastructure.
//!
//! reqwest-backed implementations of the core gateway traits against the
//! CommandWave REST backend, plus configuration loading. Everything here is
//! replaceable in tests by the in-memory mocks the application crate uses.

mod dto;
mod rest;

pub mod commands_api;
pub mod config_service;
pub mod notes_api;
pub mod paths;
pub mod playbook_library_api;
pub mod terminal_api;

pub use commands_api::HttpCommandRepository;
pub use config_service::ConfigService;
pub use notes_api::HttpNotesRepository;
pub use paths::CommandWavePaths;
pub use playbook_library_api::HttpPlaybookLibraryRepository;
pub use terminal_api::HttpTerminalGateway;
