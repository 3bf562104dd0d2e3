//! Application services for task commands and read-side projections.

mod command;
mod query;

pub use command::{
    InMemoryTaskCommandService, TaskCommandError, TaskCommandResult, TaskCommandService,
};
pub use query::{DEFAULT_RECENT_EVENT_LIMIT, TaskMetrics, TaskQueryService};
