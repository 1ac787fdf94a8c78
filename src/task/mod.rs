pub mod executor;
pub mod submitter;

pub use executor::{ExecutionMode, SubmissionExecutor};
pub use submitter::{ImmediateSubmitter, SimulatedSubmitter, Submitter};
