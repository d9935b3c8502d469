//! Report module - tables, run summaries and JSON export

pub mod run_export;
pub mod summary;
pub mod tables;

pub use run_export::*;
pub use summary::*;
pub use tables::*;
