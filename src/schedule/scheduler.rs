//! Virtual-clock task scheduler.
//!
//! Tasks are queued with a due time (milliseconds on the scheduler's own
//! clock) and fire in `(due time, handle)` order, so tasks due at the same
//! instant fire in the order they were scheduled. Repeating tasks re-arm
//! themselves under the same handle each time they fire, which means a single
//! `cancel` stops them for good.
//!
//! Due times saturate at `u64::MAX`. A repeating task that fires at that
//! ceiling is not re-armed, since its next firing could never come later.
//!
//! The scheduler never calls anything: the owner pulls due tasks with
//! `pop_due` and dispatches them. This keeps every mutation of the game on
//! one logical thread of control.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Handle identifying one scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl TaskHandle {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Entry<T> {
    task: T,
    /// Re-arm interval for repeating tasks.
    interval: Option<u64>,
}

/// Cancellable one-shot and repeating tasks on a virtual clock.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    /// Queue ordered by (due time, handle).
    queue: BTreeMap<(u64, TaskHandle), Entry<T>>,
    /// Due time of every live handle, for cancellation.
    due: FxHashMap<TaskHandle, u64>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
            due: FxHashMap::default(),
        }
    }
}

impl<T: Clone> Scheduler<T> {
    /// Create an empty scheduler at time 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of live tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Is this handle still scheduled?
    #[must_use]
    pub fn is_scheduled(&self, handle: TaskHandle) -> bool {
        self.due.contains_key(&handle)
    }

    /// Run `task` once, `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        self.insert(delay_ms, task, None)
    }

    /// Run `task` every `interval_ms`, first after one interval.
    ///
    /// Panics if `interval_ms` is zero.
    pub fn schedule_repeating(&mut self, interval_ms: u64, task: T) -> TaskHandle {
        assert!(interval_ms > 0, "Repeating interval must be positive");
        self.insert(interval_ms, task, Some(interval_ms))
    }

    fn insert(&mut self, delay_ms: u64, task: T, interval: Option<u64>) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        let at = self.now_ms.saturating_add(delay_ms);
        self.queue.insert((at, handle), Entry { task, interval });
        self.due.insert(handle, at);
        handle
    }

    /// Cancel a task. Returns `false` if it was not scheduled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.due.remove(&handle) {
            Some(at) => {
                self.queue.remove(&(at, handle));
                true
            }
            None => false,
        }
    }

    /// Cancel every task. The clock keeps its value.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.due.clear();
    }

    /// Due time of the earliest task.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.queue.keys().next().map(|&(at, _)| at)
    }

    /// Remove the earliest task due at or before `deadline_ms`.
    ///
    /// The clock moves forward to the task's due time. Repeating tasks are
    /// re-armed before being returned, so the caller can cancel them while
    /// handling this firing.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<(TaskHandle, T)> {
        let (&(at, handle), _) = self.queue.iter().next()?;
        if at > deadline_ms {
            return None;
        }
        let entry = self.queue.remove(&(at, handle))?;
        self.due.remove(&handle);
        self.now_ms = self.now_ms.max(at);

        if let Some(interval) = entry.interval {
            let next = at.saturating_add(interval);
            if next > at {
                self.queue.insert((next, handle), entry.clone());
                self.due.insert(handle, next);
            }
        }

        Some((handle, entry.task))
    }

    /// Move the clock forward without firing anything.
    ///
    /// The clock never goes backwards.
    pub fn set_now(&mut self, now_ms: u64) {
        self.now_ms = self.now_ms.max(now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler<&'static str>, deadline: u64) -> Vec<(u64, &'static str)> {
        let mut fired = Vec::new();
        while let Some((_, task)) = scheduler.pop_due(deadline) {
            fired.push((scheduler.now_ms(), task));
        }
        fired
    }

    #[test]
    fn test_once_fires_at_due_time() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(500, "a");

        assert!(scheduler.pop_due(499).is_none());
        assert_eq!(drain(&mut scheduler, 500), vec![(500, "a")]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_order_by_due_then_creation() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule_once(200, "late");
        scheduler.schedule_once(100, "first");
        scheduler.schedule_once(100, "second");

        let fired = drain(&mut scheduler, 1000);
        assert_eq!(fired, vec![(100, "first"), (100, "second"), (200, "late")]);
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_once(100, "a");

        assert!(scheduler.is_scheduled(handle));
        assert!(scheduler.cancel(handle));
        assert!(!scheduler.is_scheduled(handle));
        assert!(!scheduler.cancel(handle));
        assert!(drain(&mut scheduler, 1000).is_empty());
    }

    #[test]
    fn test_repeating_rearms_under_same_handle() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(1000, "tick");

        let fired = drain(&mut scheduler, 3000);
        assert_eq!(fired, vec![(1000, "tick"), (2000, "tick"), (3000, "tick")]);
        assert!(scheduler.is_scheduled(handle));
        assert_eq!(scheduler.next_due(), Some(4000));
    }

    #[test]
    fn test_cancel_repeating_while_handling() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule_repeating(1000, "tick");

        let (fired, _) = scheduler.pop_due(1000).unwrap();
        assert_eq!(fired, handle);
        assert!(scheduler.cancel(handle));

        assert!(drain(&mut scheduler, 10_000).is_empty());
    }

    #[test]
    fn test_schedule_relative_to_clock() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(5000);
        scheduler.schedule_once(100, "a");

        assert_eq!(scheduler.next_due(), Some(5100));

        // Clock never goes backwards
        scheduler.set_now(10);
        assert_eq!(scheduler.now_ms(), 5000);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new();
        let a = scheduler.schedule_once(100, "a");
        scheduler.schedule_repeating(100, "b");

        scheduler.clear();

        assert!(scheduler.is_empty());
        assert!(!scheduler.is_scheduled(a));
    }

    #[test]
    fn test_due_time_saturates_at_clock_ceiling() {
        let mut scheduler = Scheduler::new();
        scheduler.set_now(u64::MAX - 10);
        scheduler.schedule_once(100, "once");
        let tick = scheduler.schedule_repeating(1000, "tick");

        assert_eq!(scheduler.next_due(), Some(u64::MAX));

        let fired = drain(&mut scheduler, u64::MAX);
        assert_eq!(fired, vec![(u64::MAX, "once"), (u64::MAX, "tick")]);
        // Cannot fire again later than the ceiling
        assert!(!scheduler.is_scheduled(tick));
        assert!(scheduler.is_empty());
    }

    #[test]
    #[should_panic(expected = "interval")]
    fn test_zero_interval_panics() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.schedule_repeating(0, ());
    }
}
