pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod probe;
pub mod reporter;
pub mod scanner;

pub use catalog::GIT_PATHS;
pub use classifier::classify;
pub use cli::Cli;
pub use error::{Result, ScanError};
pub use probe::{Dispatcher, HttpDispatcher, ProbeOutcome, USER_AGENTS};
pub use reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
pub use scanner::{parse_target, GitScanner, ScanReport};
