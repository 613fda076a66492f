/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("zip", "Adding {} to {}", entry, archive);
/// log_status!("import", "Parsed {} rows", count);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod archive;
pub mod error;
pub mod files;
pub mod import;
pub mod json;
pub mod rest;
pub mod strings;

// Re-export common types for convenience
pub use error::{Error, Result};
