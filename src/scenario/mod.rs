/// Scenario steps and reporting.
pub mod lifecycle;
/// Candidate product sources.
pub mod source;

pub use lifecycle::{
    LifecycleOutcome, ScenarioOptions, ScenarioReport, run, select_by_name,
};
pub use source::InputSource;
