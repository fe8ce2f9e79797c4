//! Shape of the pipeline status consumed by the formatter.

use std::{collections::BTreeMap, fmt};

use super::percent::Percentage;

/// Completed and total work units of a stage or of the whole pipeline.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StageProgress {
    /// Units that finished successfully.
    pub succeeded_units: u64,
    /// Units the stage will run in total.
    pub total_units: u64,
}

impl StageProgress {
    /// Creates a progress record.
    #[must_use]
    pub const fn new(succeeded_units: u64, total_units: u64) -> Self {
        Self {
            succeeded_units,
            total_units,
        }
    }

    /// Returns the completion ratio as a [`Percentage`].
    ///
    /// # Examples
    /// ```
    /// use exdriver_core::StageProgress;
    ///
    /// assert_eq!(StageProgress::new(1, 3).percentage().to_string(), "33.33%");
    /// assert_eq!(StageProgress::new(0, 0).percentage().to_string(), "0%");
    /// ```
    #[must_use]
    pub const fn percentage(&self) -> Percentage {
        Percentage::from_ratio(self.succeeded_units, self.total_units)
    }
}

/// Lifecycle state reported for the pipeline.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PipelineState {
    /// Created but not yet submitted.
    New,
    /// Accepted by the engine and waiting to run.
    Submitted,
    /// Executing.
    Running,
    /// Finished successfully.
    Succeeded,
    /// Finished with a failure.
    Failed,
    /// Stopped on request.
    Killed,
    /// Stopped by an internal engine error.
    Error,
}

impl PipelineState {
    /// Returns the upper-case label used in progress output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Submitted => "SUBMITTED",
            Self::Running => "RUNNING",
            Self::Succeeded => "SUCCEEDED",
            Self::Failed => "FAILED",
            Self::Killed => "KILLED",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to a status snapshot produced by the execution engine.
///
/// The formatter only reads through this trait, so engine clients can expose
/// their own status objects without copying them.
pub trait PipelineStatus {
    /// Current pipeline state.
    fn state(&self) -> PipelineState;

    /// Aggregate progress, or `None` before the engine reports any.
    fn overall_progress(&self) -> Option<StageProgress>;

    /// Progress of the stage with internal identifier `stage_id`, if it
    /// has started.
    fn stage_progress(&self, stage_id: &str) -> Option<StageProgress>;
}

/// Owned status snapshot implementing [`PipelineStatus`].
///
/// # Examples
/// ```
/// use exdriver_core::{PipelineState, PipelineStatus, StageProgress, StatusSnapshot};
///
/// let snapshot = StatusSnapshot::new(PipelineState::Running)
///     .with_overall(StageProgress::new(5, 10))
///     .with_stage("initialmap", StageProgress::new(4, 4));
/// assert_eq!(snapshot.stage_progress("initialmap"), Some(StageProgress::new(4, 4)));
/// assert_eq!(snapshot.stage_progress("finalreduce"), None);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusSnapshot {
    state: PipelineState,
    overall: Option<StageProgress>,
    stages: BTreeMap<String, StageProgress>,
}

impl StatusSnapshot {
    /// Creates a snapshot with no progress information.
    #[must_use]
    pub const fn new(state: PipelineState) -> Self {
        Self {
            state,
            overall: None,
            stages: BTreeMap::new(),
        }
    }

    /// Sets the aggregate progress.
    #[must_use]
    pub fn with_overall(mut self, progress: StageProgress) -> Self {
        self.overall = Some(progress);
        self
    }

    /// Sets the progress of one stage, replacing any previous value.
    #[must_use]
    pub fn with_stage(mut self, stage_id: impl Into<String>, progress: StageProgress) -> Self {
        self.stages.insert(stage_id.into(), progress);
        self
    }
}

impl PipelineStatus for StatusSnapshot {
    fn state(&self) -> PipelineState {
        self.state
    }

    fn overall_progress(&self) -> Option<StageProgress> {
        self.overall
    }

    fn stage_progress(&self, stage_id: &str) -> Option<StageProgress> {
        self.stages.get(stage_id).copied()
    }
}
