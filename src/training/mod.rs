//! Experience planning and training completion for a trainer's selection.

pub mod planner;
pub mod processor;
pub mod report;


pub use planner::{parse_amount, ExperiencePlan, PlannedShare, TrainingSubmission};
pub use processor::complete_training;
pub use report::{MemberResult, ResultNote, TrainingReport};
