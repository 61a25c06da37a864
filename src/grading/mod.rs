pub mod aggregator;
pub mod lesson_plans;
pub mod lifecycle;
pub mod materials;
pub mod workflow;

pub use workflow::GradingWorkflow;
