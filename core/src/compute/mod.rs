//! Structured task scheduling.
//!
//! - [`TaskPool`] - Describes the worker pool (thread count)
//! - [`TaskContext`] - Handle passed to every task, used to submit and join
//!   on batches of child tasks
//! - [`Task`] - A boxed unit of work that receives the child context
//!
//! Work is always structured: [`TaskContext::process_child_tasks`] blocks the
//! caller until every task it was given has finished. There is no
//! fire-and-forget submission and no cancellation.

mod task_pool;

pub use task_pool::{MAX_PARALLEL_DEPTH, Task, TaskContext, TaskPool};
