//! wim-submit library interface
//!
//! Submits the prepared Women in Mathematics documents to a Storywrangler
//! API instance.

pub mod cli;
pub mod submitter;

pub use submitter::{IngestOutcome, IngestSummary, SubmitError, SubmitMode, SubmitReport, Submitter};
