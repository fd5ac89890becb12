//! Command handlers for the retail CLI.
//!
//! Each handler runs the full pipeline (load, clean, aggregate) and renders
//! one view of the result. There is no shared state between commands; every
//! invocation recomputes from the source file.

mod preview;
mod report;

pub use preview::preview;
pub use report::{countries, months, products, summary};

use crate::summary::SummaryRecord;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    /// Get the `message`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the structured data stored in `structure`.
    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// Renders summary records as a fixed-width, two-column text table.
pub(crate) fn render_summary(key_header: &str, records: &[SummaryRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.key().chars().count())
        .chain(std::iter::once(key_header.chars().count()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    out.push_str(&format!("{key_header:<width$}  {:>16}\n", "Amount"));
    for record in records {
        out.push_str(&format!(
            "{:<width$}  {:>16}\n",
            record.key(),
            record.amount().to_string()
        ));
    }
    out
}
