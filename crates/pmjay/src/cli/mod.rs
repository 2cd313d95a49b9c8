//! # CLI Behavior
//!
//! One UI client for pmjayapp. The only place that knows about terminal I/O,
//! exit codes and output formatting.
//!
//! ## Commands
//!
//! - `pmjay generate --name .. --days 3 [--save] [--print]`: render one slip
//!   page per day of the stay to the configured output PDF.
//! - `pmjay generate --from ali --days 2`: start from the newest stored record
//!   whose name contains "ali"; any other flag overrides the stored value.
//! - `pmjay save ..`: remember a record without rendering it.
//! - `pmjay search NAME` / `pmjay list`: show stored records.
//!
//! Dates are `dd/mm/yyyy` and default to today for a new record. `--json`
//! prints the structured result instead of a table.

mod commands;
mod render;
mod setup;

pub use commands::run;
