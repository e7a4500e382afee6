use parking_lot::Mutex;

/// A unit of work submitted through [`TaskContext::process_child_tasks`].
///
/// Tasks may borrow from the caller's stack: the caller cannot return until
/// every task it submitted has run to completion.
pub type Task<'a> = Box<dyn FnOnce(&TaskContext) + Send + 'a>;

/// Nesting depth past which child tasks run inline on the calling thread.
///
/// Each level of nesting would otherwise multiply the number of live worker
/// threads.
pub const MAX_PARALLEL_DEPTH: u32 = 2;

/// A worker pool for structured parallel work.
///
/// On native targets workers are scoped threads, so tasks can borrow
/// local data. On WASM all tasks run sequentially on the calling thread.
///
/// # Example
///
/// ```
/// use frameline_core::compute::{Task, TaskContext, TaskPool};
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// let pool = TaskPool::new(4);
/// let counter = AtomicU32::new(0);
/// let counter = &counter;
/// let tasks: Vec<Task<'_>> = (0..8)
///     .map(|_| {
///         Box::new(move |_ctx: &TaskContext| {
///             counter.fetch_add(1, Ordering::Relaxed);
///         }) as Task<'_>
///     })
///     .collect();
/// pool.context().process_child_tasks(tasks);
/// assert_eq!(counter.load(Ordering::Relaxed), 8);
/// ```
#[derive(Debug, Clone)]
pub struct TaskPool {
    num_threads: usize,
}

impl TaskPool {
    /// Creates a pool with the given number of worker threads.
    ///
    /// On WASM, the thread count is ignored (single-threaded execution).
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads: num_threads.max(1),
        }
    }

    /// Creates a pool sized to the number of available CPU cores.
    pub fn default_threads() -> Self {
        Self::new(std::thread::available_parallelism().map_or(1, |n| n.get()))
    }

    /// Number of worker threads used per batch of child tasks.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Returns the root task context for this pool.
    pub fn context(&self) -> TaskContext {
        TaskContext {
            num_threads: self.num_threads,
            depth: 0,
        }
    }
}

impl Default for TaskPool {
    fn default() -> Self {
        Self::default_threads()
    }
}

/// Structured-concurrency handle given to the frame pipeline and to every
/// task it spawns.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext {
    num_threads: usize,
    depth: u32,
}

impl TaskContext {
    /// A context that runs every child task inline on the caller's thread.
    pub fn sequential() -> Self {
        Self {
            num_threads: 1,
            depth: 0,
        }
    }

    /// Nesting depth of this context (0 for the root).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of worker threads available to child tasks.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    fn child(&self) -> TaskContext {
        TaskContext {
            num_threads: self.num_threads,
            depth: self.depth + 1,
        }
    }

    fn runs_inline(&self, task_count: usize) -> bool {
        task_count <= 1 || self.num_threads <= 1 || self.depth >= MAX_PARALLEL_DEPTH
    }

    /// Runs every task and blocks until all of them have finished.
    ///
    /// The calling thread takes part in draining the queue, so it is never
    /// idle while it waits. Tasks finish in an unspecified order. If a task
    /// panics, the panic is propagated to the caller once all sibling tasks
    /// have been joined.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn process_child_tasks<'a>(&self, tasks: Vec<Task<'a>>) {
        if tasks.is_empty() {
            return;
        }

        let child = self.child();
        if self.runs_inline(tasks.len()) {
            for task in tasks {
                task(&child);
            }
            return;
        }

        let helpers = self.num_threads.min(tasks.len()) - 1;
        log::trace!(
            "Processing {} child tasks on {} threads (depth {})",
            tasks.len(),
            helpers + 1,
            self.depth
        );

        let queue = Mutex::new(tasks.into_iter());
        let drain = || loop {
            // Release the queue lock before running the task.
            let next = queue.lock().next();
            match next {
                Some(task) => task(&child),
                None => break,
            }
        };

        std::thread::scope(|scope| {
            for _ in 0..helpers {
                scope.spawn(|| {
                    crate::set_thread_name!("frameline-worker");
                    drain();
                });
            }
            drain();
        });
    }

    /// Runs every task sequentially on the calling thread (WASM).
    #[cfg(target_arch = "wasm32")]
    pub fn process_child_tasks<'a>(&self, tasks: Vec<Task<'a>>) {
        let child = self.child();
        for task in tasks {
            task(&child);
        }
    }
}
