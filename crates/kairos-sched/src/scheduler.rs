//! Greedy dependency-aware scheduler
//!
//! Single-threaded, synchronous placement of dependent tasks across a fixed
//! agent pool. The scheduler computes start and end times through the
//! temporal engine and never touches hierarchy internals. The greedy policy
//! is a deliberate simplification: output respects dependency ordering and
//! per-agent exclusivity, but makespan is not claimed optimal.

use std::cmp::Ordering;
use std::collections::HashMap;

use kairos_core::{KairosError, KairosResult, Timepoint};
use kairos_engine::TemporalEngine;

use crate::{AgentId, Schedule, ScheduledTask, Task, TaskId, TaskState};

/// Recorder and runner for one set of dependent tasks
///
/// `run` borrows an engine per invocation, so a hierarchy reconfigured
/// between runs is simply re-read.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<Task>,
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler::default()
    }

    /// Record a task
    ///
    /// No temporal computation happens here: the duration is a raw partial
    /// mapping resolved against the hierarchy current at run time. Ids are
    /// expected unique; dependencies may reference tasks added later.
    pub fn add_task<S: AsRef<str>>(
        &mut self,
        id: TaskId,
        duration: &[(S, u64)],
        dependencies: &[TaskId],
    ) {
        let mut deps: Vec<TaskId> = Vec::with_capacity(dependencies.len());
        for &dep in dependencies {
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self.tasks.push(Task {
            id,
            duration: duration
                .iter()
                .map(|(name, c)| (name.as_ref().to_string(), *c))
                .collect(),
            dependencies: deps,
        });
    }

    /// Recorded tasks, in insertion order
    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Forget all recorded tasks
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Place every recorded task across `agent_count` agents
    ///
    /// Repeats readiness rounds: tasks whose dependencies are all Scheduled
    /// become Ready and are placed in insertion order, each on the agent
    /// with the smallest availability (lowest index on ties), starting at
    /// the later of that availability and the latest dependency end. The
    /// whole run fails with [`KairosError::UnsatisfiableDependency`] when no
    /// task can become Ready while unscheduled tasks remain (cycle or
    /// missing dependency id). Output is deterministic for a given task set
    /// and agent count.
    pub fn run(&self, engine: &TemporalEngine, agent_count: usize) -> KairosResult<Schedule> {
        if self.tasks.is_empty() {
            return Ok(Schedule::default());
        }
        if agent_count == 0 {
            return Err(KairosError::UnsatisfiableDependency {
                remaining: self.tasks.len(),
            });
        }

        // First occurrence wins, matching insertion-order processing
        let mut index_of: HashMap<TaskId, usize> = HashMap::with_capacity(self.tasks.len());
        for (i, task) in self.tasks.iter().enumerate() {
            index_of.entry(task.id).or_insert(i);
        }

        let zero = engine.zero();
        let mut availability: Vec<Timepoint> = vec![zero.clone(); agent_count];
        let mut states = vec![TaskState::Unscheduled; self.tasks.len()];
        let mut placed: Vec<Option<ScheduledTask>> = vec![None; self.tasks.len()];
        let mut remaining = self.tasks.len();

        while remaining > 0 {
            let ready = self.collect_ready(&index_of, &mut states);
            if ready.is_empty() {
                return Err(KairosError::UnsatisfiableDependency { remaining });
            }
            tracing::debug!("readiness round: {} task(s) ready", ready.len());

            for i in ready {
                let task = &self.tasks[i];
                let earliest = self.earliest_start(engine, task, &index_of, &placed, &zero);
                let agent = least_loaded_agent(engine, &availability);

                let start = match engine.compare(&earliest, &availability[agent]) {
                    Ordering::Less => availability[agent].clone(),
                    _ => earliest,
                };
                let duration: Vec<(&str, u64)> = task
                    .duration
                    .iter()
                    .map(|(name, c)| (name.as_str(), *c))
                    .collect();
                let end = engine.add(&start, &duration)?;

                tracing::trace!("task {} on agent {}", task.id, agent);
                availability[agent] = end.clone();
                placed[i] = Some(ScheduledTask {
                    id: task.id,
                    start,
                    end,
                    agent: AgentId::new(agent),
                    dependencies: task.dependencies.clone(),
                });
                states[i] = TaskState::Scheduled;
                remaining -= 1;
            }
        }

        Ok(Schedule::new(placed.into_iter().flatten().collect()))
    }

    /// Mark and return tasks whose dependencies are all Scheduled
    fn collect_ready(
        &self,
        index_of: &HashMap<TaskId, usize>,
        states: &mut [TaskState],
    ) -> Vec<usize> {
        let mut ready = Vec::new();
        for (i, task) in self.tasks.iter().enumerate() {
            if states[i] != TaskState::Unscheduled {
                continue;
            }
            let satisfied = task.dependencies.iter().all(|dep| {
                index_of
                    .get(dep)
                    .is_some_and(|&j| states[j] == TaskState::Scheduled)
            });
            if satisfied {
                states[i] = TaskState::Ready;
                ready.push(i);
            }
        }
        ready
    }

    /// Latest dependency end, or absolute zero for independent tasks
    fn earliest_start(
        &self,
        engine: &TemporalEngine,
        task: &Task,
        index_of: &HashMap<TaskId, usize>,
        placed: &[Option<ScheduledTask>],
        zero: &Timepoint,
    ) -> Timepoint {
        let mut earliest = zero.clone();
        for dep in &task.dependencies {
            // Dependencies of a Ready task are always placed already
            let end = index_of
                .get(dep)
                .and_then(|&j| placed[j].as_ref())
                .map(|p| &p.end);
            if let Some(end) = end {
                if engine.compare(end, &earliest) == Ordering::Greater {
                    earliest = end.clone();
                }
            }
        }
        earliest
    }
}

/// Agent with the numerically smallest availability, lowest index on ties
fn least_loaded_agent(engine: &TemporalEngine, availability: &[Timepoint]) -> usize {
    let mut chosen = 0;
    for (i, avail) in availability.iter().enumerate().skip(1) {
        if engine.compare(avail, &availability[chosen]) == Ordering::Less {
            chosen = i;
        }
    }
    chosen
}
