//! CommandWave application services.
//!
//! Use cases that orchestrate the controller core: terminal tab lifecycle
//! and command dispatch, playbook import and block operations, debounced
//! notes autosave, and the command catalog. Each service works against the
//! gateway traits from `commandwave-core`; wiring the reqwest-backed
//! implementations in is the embedder's job.

pub mod active_tab;
pub mod catalog_service;
pub mod notes;
pub mod playbook_service;
pub mod terminal_usecase;

pub use active_tab::ActiveTab;
pub use catalog_service::CommandCatalogService;
pub use notes::{Debouncer, NotesService};
pub use playbook_service::{ImportOutcome, PlaybookService, parse_playbook};
pub use terminal_usecase::TerminalUseCase;
