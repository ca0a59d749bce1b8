// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! Fixed-size task executor
//!
//! A pool of OS threads pulling boxed closures from one FIFO queue.
//! Features:
//! - Bounded worker count chosen at construction
//! - In-flight count (queued + running) for idle polling
//! - Graceful shutdown that drains queued tasks before joining
//!
//! It does not touch the graph itself; tasks that need the graph go through
//! the coordinator's lock like any other caller.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error};

use crate::error::{GraphError, GraphResult};

type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct QueueState {
    tasks: VecDeque<Task>,
    stopping: bool,
}

#[derive(Default)]
struct Shared {
    queue: Mutex<QueueState>,
    available: Condvar,
    in_flight: AtomicUsize,
}

pub struct TaskExecutor {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
}

impl TaskExecutor {
    /// Start `worker_count` worker threads (at least one)
    pub fn new(worker_count: usize) -> GraphResult<Self> {
        let worker_count = worker_count.max(1);
        let shared = Arc::new(Shared::default());
        let mut workers = Vec::with_capacity(worker_count);

        for id in 0..worker_count {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("mstgraph-worker-{id}"))
                .spawn(move || run_worker(id, &shared))
                .map_err(|e| GraphError::TaskFailed(format!("failed to spawn worker {id}: {e}")))?;
            workers.push(handle);
        }

        debug!("Task executor started with {} workers", worker_count);
        Ok(Self {
            shared,
            workers: Mutex::new(workers),
            worker_count,
        })
    }

    /// Queue a task for execution
    pub fn submit<F>(&self, task: F) -> GraphResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.queue.lock();
        if state.stopping {
            return Err(GraphError::ExecutorShutdown);
        }
        self.shared.in_flight.fetch_add(1, Ordering::SeqCst);
        state.tasks.push_back(Box::new(task));
        drop(state);

        self.shared.available.notify_one();
        Ok(())
    }

    /// Tasks queued or currently running
    pub fn in_flight(&self) -> usize {
        self.shared.in_flight.load(Ordering::SeqCst)
    }

    pub fn has_active_tasks(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Stop accepting tasks, let the queue drain, then join the workers
    pub fn shutdown(&self) {
        self.shared.queue.lock().stopping = true;
        self.shared.available.notify_all();

        let current = thread::current().id();
        let workers: Vec<_> = self.workers.lock().drain(..).collect();
        for handle in workers {
            // A task dropping the last executor handle must not join its own thread
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                error!("Executor worker terminated abnormally");
            }
        }
    }
}

impl Drop for TaskExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(id: usize, shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.queue.lock();
            loop {
                if let Some(task) = state.tasks.pop_front() {
                    break task;
                }
                if state.stopping {
                    debug!("Executor worker {} exiting", id);
                    return;
                }
                shared.available.wait(&mut state);
            }
        };

        if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
            error!("Task panicked on executor worker {}", id);
        }
        shared.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
