//! Terminal output helpers shared by the commands.

mod diagnostic;
pub mod table;

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};

pub use diagnostic::RuleDiagnostic;

/// Print a non-fatal condition to stderr.
pub fn print_warning(message: impl Display) {
    eprintln!(
        "{} {message}",
        "warning:".if_supports_color(Stream::Stderr, |text| text.yellow())
    );
}

/// Print a failure that has no source location.
pub fn print_error(message: impl Display) {
    eprintln!(
        "{} {message}",
        "error:".if_supports_color(Stream::Stderr, |text| text.red())
    );
}
