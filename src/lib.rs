pub mod archive;
pub mod cleaner;
pub mod cli;
mod error;
pub mod item;
pub mod ledger;
pub mod policy;
pub mod sweep;
pub mod twitter;

pub use cleaner::{Cleaner, RunSummary};
pub use error::{Error, Result};
