//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod demo;
pub mod forecast;
pub mod simulate;

use crate::report::OutputFormat;
use crate::Result;

/// Writes a report to stdout in the requested format.
pub(crate) fn emit<J, T>(format: OutputFormat, json: J, table: T) -> Result<()>
where
    J: FnOnce() -> Result<String>,
    T: FnOnce() -> String,
{
    match format {
        OutputFormat::Json => println!("{}", json()?),
        OutputFormat::Table => print!("{}", table()),
    }
    Ok(())
}
