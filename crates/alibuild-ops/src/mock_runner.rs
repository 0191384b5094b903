use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{CommandRunner, ShellOption, ShellResult};

type CallRecord = Vec<(String, Vec<ShellOption>)>;

/// A [`CommandRunner`] that never spawns anything.
///
/// Every invocation is recorded. Results come from, in order: a response
/// registered for the exact command line, the queue of pushed results, or an
/// empty successful result.
///
/// ```
/// use alibuild_ops::{AliBuild, MockRunner, ShellResult};
///
/// let runner = MockRunner::new();
/// runner.set_response("alibuild version", ShellResult::success("alibuild version", "1.2.3\n"));
///
/// let ab = AliBuild::with_runner("alibuild", "O2", vec![], runner.clone());
/// assert_eq!(ab.version().unwrap(), "1.2.3");
/// assert_eq!(runner.commands(), vec!["alibuild version"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRunner {
    responses: Arc<Mutex<HashMap<String, ShellResult>>>,
    queue: Arc<Mutex<VecDeque<ShellResult>>>,
    calls: Arc<Mutex<CallRecord>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `result` every time `command` is run.
    pub fn set_response(&self, command: &str, result: ShellResult) {
        lock(&self.responses).insert(command.to_string(), result);
    }

    /// Queues `result` for the next command without a registered response.
    pub fn push_result(&self, result: ShellResult) {
        lock(&self.queue).push_back(result);
    }

    pub fn calls(&self) -> CallRecord {
        lock(&self.calls).clone()
    }

    pub fn commands(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }

    pub fn last_call(&self) -> Option<(String, Vec<ShellOption>)> {
        lock(&self.calls).last().cloned()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    pub fn clear(&self) {
        lock(&self.calls).clear();
        lock(&self.queue).clear();
        lock(&self.responses).clear();
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str, options: &[ShellOption]) -> ShellResult {
        lock(&self.calls).push((command.to_string(), options.to_vec()));

        if let Some(result) = lock(&self.responses).get(command) {
            return result.clone();
        }

        lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| ShellResult::success(command, ""))
    }
}
