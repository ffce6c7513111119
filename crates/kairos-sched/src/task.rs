//! Task records and schedule output

use std::fmt;

use kairos_core::Timepoint;

/// Task identity
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TaskId(pub u64);

impl TaskId {
    #[inline]
    pub fn new(id: u64) -> Self {
        TaskId(id)
    }
}

impl fmt::Debug for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Agent identity - index into the fixed pool of a scheduling run
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AgentId(pub usize);

impl AgentId {
    #[inline]
    pub fn new(index: usize) -> Self {
        AgentId(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Agent({})", self.0)
    }
}

/// Readiness lifecycle of a task within one scheduling run
///
/// A task becomes Ready exactly when every dependency is Scheduled. There is
/// no per-task failure state: a run that cannot make progress fails whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Unscheduled,
    Ready,
    Scheduled,
}

/// Task as recorded by `add_task`
///
/// The duration stays a raw partial mapping until run time, so a hierarchy
/// reconfiguration between recording and running is picked up naturally.
#[derive(Clone, Debug)]
pub struct Task {
    pub id: TaskId,
    /// Partial level-name mapping; unmentioned levels are 0
    pub duration: Vec<(String, u64)>,
    /// Dependency ids, deduplicated, in recorded order
    pub dependencies: Vec<TaskId>,
}

/// One placed task
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub start: Timepoint,
    pub end: Timepoint,
    pub agent: AgentId,
    pub dependencies: Vec<TaskId>,
}

/// Immutable result of one scheduling run, owned by the caller
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    tasks: Vec<ScheduledTask>,
}

impl Schedule {
    pub(crate) fn new(tasks: Vec<ScheduledTask>) -> Self {
        Schedule { tasks }
    }

    /// Placed tasks in recorded order
    #[inline]
    pub fn tasks(&self) -> &[ScheduledTask] {
        &self.tasks
    }

    /// Look up a placed task by id
    pub fn get(&self, id: TaskId) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks placed on one agent, in recorded order
    pub fn tasks_for_agent(&self, agent: AgentId) -> impl Iterator<Item = &ScheduledTask> {
        self.tasks.iter().filter(move |t| t.agent == agent)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_lookup() {
        let zero = Timepoint::zero(4);
        let schedule = Schedule::new(vec![ScheduledTask {
            id: TaskId::new(7),
            start: zero.clone(),
            end: zero,
            agent: AgentId::new(0),
            dependencies: vec![],
        }]);

        assert_eq!(schedule.len(), 1);
        assert!(schedule.get(TaskId::new(7)).is_some());
        assert!(schedule.get(TaskId::new(8)).is_none());
        assert_eq!(schedule.tasks_for_agent(AgentId::new(0)).count(), 1);
        assert_eq!(schedule.tasks_for_agent(AgentId::new(1)).count(), 0);
    }
}
