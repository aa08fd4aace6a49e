use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use chrono_tz::Tz;

use crate::foundation::error::{ReelError, ReelResult};
use crate::scheduler::clock::{Clock, Shutdown};
use crate::scheduler::publish::{discard_staging, publish};
use crate::scheduler::trigger::TriggerPolicy;

/// Where the refresh loop currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CycleState {
    /// Waiting for the next trigger.
    Idle,
    /// Downloading the raw schedule.
    Fetching,
    /// Normalizing, laying out, animating and encoding into the staging path.
    Rendering,
    /// Staging file fully written.
    Staged,
    /// Replacing the published file.
    Swapping,
    /// The cycle was abandoned; the published file is unchanged.
    Error,
}

/// The generation chain run by each cycle.
pub trait Pipeline: Send {
    /// Fetch the raw schedule document.
    fn fetch(&mut self) -> ReelResult<Vec<u8>>;

    /// Turn `body` into a complete video at `staging`, treating `now` as the one current
    /// instant of this cycle.
    fn render(&mut self, body: &[u8], now: DateTime<Utc>, staging: &Path) -> ReelResult<()>;
}

/// Result of one generation cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new file is live at the published path.
    Published,
    /// The cycle aborted at `stage`; the previous publication is intact.
    Failed {
        /// Stage name from [`ReelError::stage`].
        stage: &'static str,
        /// Error text.
        message: String,
    },
}

/// Paths and timing for a [`Scheduler`].
#[derive(Clone, Debug)]
pub struct SchedulerOptions {
    /// When cycles start.
    pub trigger: TriggerPolicy,
    /// Zone the trigger minute is read in.
    pub time_zone: Tz,
    /// File external consumers read.
    pub published_path: PathBuf,
    /// File the in-flight cycle writes.
    pub staging_path: PathBuf,
}

/// Generate-then-publish refresh loop.
///
/// Exactly one cycle runs at a time; the staging path belongs to that cycle and the published
/// path only ever changes through one atomic replace.
pub struct Scheduler<P, C> {
    pipeline: P,
    clock: C,
    opts: SchedulerOptions,
    state: CycleState,
    transitions: Vec<CycleState>,
    last_trigger: Option<DateTime<Utc>>,
}

impl<P: Pipeline, C: Clock> Scheduler<P, C> {
    /// Build a scheduler. Fails when the staging and published paths coincide.
    pub fn new(pipeline: P, clock: C, opts: SchedulerOptions) -> ReelResult<Self> {
        opts.trigger.validate()?;
        if opts.staging_path == opts.published_path {
            return Err(ReelError::validation(
                "staging path must differ from the published path",
            ));
        }
        Ok(Self {
            pipeline,
            clock,
            opts,
            state: CycleState::Idle,
            transitions: vec![CycleState::Idle],
            last_trigger: None,
        })
    }

    /// Current state.
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Every state entered so far, oldest first.
    pub fn transitions(&self) -> &[CycleState] {
        &self.transitions
    }

    /// The pipeline.
    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn enter(&mut self, state: CycleState) {
        tracing::debug!(from = ?self.state, to = ?state, "cycle state change");
        self.state = state;
        self.transitions.push(state);
    }

    /// Run one full cycle now.
    #[tracing::instrument(skip(self), fields(published = %self.opts.published_path.display()))]
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let started = self.clock.now();
        match self.try_cycle(started) {
            Ok(()) => {
                self.enter(CycleState::Idle);
                tracing::info!(
                    elapsed_secs = (self.clock.now() - started).num_seconds(),
                    "published new schedule video"
                );
                CycleOutcome::Published
            }
            Err(e) => {
                self.enter(CycleState::Error);
                tracing::error!(stage = e.stage(), error = %e, "cycle aborted, keeping previous video");
                discard_staging(&self.opts.staging_path);
                self.enter(CycleState::Idle);
                CycleOutcome::Failed {
                    stage: e.stage(),
                    message: e.to_string(),
                }
            }
        }
    }

    fn try_cycle(&mut self, now: DateTime<Utc>) -> ReelResult<()> {
        self.enter(CycleState::Fetching);
        let body = self.pipeline.fetch()?;

        self.enter(CycleState::Rendering);
        discard_staging(&self.opts.staging_path);
        self.pipeline.render(&body, now, &self.opts.staging_path)?;
        self.enter(CycleState::Staged);

        self.enter(CycleState::Swapping);
        publish(&self.opts.staging_path, &self.opts.published_path)
    }

    /// Generate synchronously when nothing has been published yet.
    pub fn ensure_initial(&mut self) -> Option<CycleOutcome> {
        if self.opts.published_path.exists() {
            return None;
        }
        tracing::info!("no published video yet, generating immediately");
        Some(self.run_cycle())
    }

    /// Next trigger instant, strictly after the previous one.
    pub fn next_trigger(&self) -> DateTime<Utc> {
        let now = self.clock.now().with_timezone(&self.opts.time_zone);
        let mut next = self.opts.trigger.next_after(&now);
        if let Some(last) = self.last_trigger
            && next.with_timezone(&Utc) <= last
        {
            let after = (last + TimeDelta::seconds(1)).with_timezone(&self.opts.time_zone);
            next = self.opts.trigger.next_after(&after);
        }
        next.with_timezone(&Utc)
    }

    /// First-run publish, then one cycle per trigger until `shutdown` fires.
    ///
    /// Cycle failures are logged and never end the loop. Returns the number of cycles run.
    pub fn run(&mut self, shutdown: &Shutdown) -> u64 {
        let mut cycles = 0u64;
        if !shutdown.is_triggered() && self.ensure_initial().is_some() {
            cycles += 1;
        }

        while !shutdown.is_triggered() {
            let next = self.next_trigger();
            tracing::info!(
                next = %next.with_timezone(&self.opts.time_zone),
                "waiting for next generation"
            );
            if !self.clock.sleep_until(next, shutdown) {
                break;
            }
            self.last_trigger = Some(next);
            self.run_cycle();
            cycles += 1;
        }

        tracing::info!(cycles, "scheduler stopped");
        cycles
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/cycle.rs"]
mod tests;
