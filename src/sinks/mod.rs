//! Submission sinks
//!
//! Concrete [`SubmissionSink`](crate::form::SubmissionSink) implementations
//! used by the command-line host.

mod chain;
mod jsonl;
mod simulated;

pub use chain::SinkChain;
pub use jsonl::JsonlSink;
pub use simulated::SimulatedSink;

use crate::config::{Settings, StepformPaths};
use crate::storage::SubmissionStore;

/// Build the sink configured by `settings`: the simulated delay, followed by
/// the JSONL store when submissions are kept
pub fn from_settings(settings: &Settings, paths: &StepformPaths) -> SinkChain {
    let mut chain = SinkChain::new().with(SimulatedSink::from_millis(settings.submission_delay_ms));

    if settings.store_submissions {
        let store =
            SubmissionStore::new(paths.submissions_file()).hash_secrets(settings.hash_secrets);
        chain = chain.with(JsonlSink::new(store));
    }

    chain
}
