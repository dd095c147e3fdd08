//! Periodic task scheduler
//!
//! Replaces wall-clock interval timers with a deterministic virtual clock.
//! Each task has a period and a next due time; `pop_due` hands back tasks in
//! chronological order, ties broken by [`Task::ALL`] order.

use serde::{Deserialize, Serialize};

/// The three periodic game tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    Spawn,
    Move,
    Collision,
}

impl Task {
    /// Tie-break order for tasks due at the same millisecond
    pub const ALL: [Task; 3] = [Task::Spawn, Task::Move, Task::Collision];

    fn index(self) -> usize {
        match self {
            Task::Spawn => 0,
            Task::Move => 1,
            Task::Collision => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct Timer {
    period_ms: u64,
    /// None when cancelled
    next_due_ms: Option<u64>,
}

/// Virtual clock plus one timer per task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    timers: [Timer; 3],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// (Re)start a task: first fire one period from now
    pub fn arm(&mut self, task: Task, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.timers[task.index()] = Timer {
            period_ms,
            next_due_ms: Some(self.now_ms + period_ms),
        };
    }

    /// Stop every task
    pub fn cancel_all(&mut self) {
        for timer in &mut self.timers {
            timer.next_due_ms = None;
        }
    }

    pub fn is_armed(&self, task: Task) -> bool {
        self.timers[task.index()].next_due_ms.is_some()
    }

    /// Period of a task (0 if never armed)
    pub fn period_ms(&self, task: Task) -> u64 {
        self.timers[task.index()].period_ms
    }

    /// Next task due at or before `until_ms`. Moves the clock to its due
    /// time and schedules its following run.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        let (task, due) = Task::ALL
            .into_iter()
            .filter_map(|task| self.timers[task.index()].next_due_ms.map(|due| (task, due)))
            .filter(|&(_, due)| due <= until_ms)
            .min_by_key(|&(task, due)| (due, task.index()))?;

        self.now_ms = due;
        let timer = &mut self.timers[task.index()];
        timer.next_due_ms = Some(due + timer.period_ms);
        Some(task)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}
