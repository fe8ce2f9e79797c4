//! Human-readable progress output for three-stage pipelines.
//!
//! Long-running examples poll their execution engine and hand each snapshot
//! to [`render_status`]. The formatter never retains a snapshot, so it can be
//! called on every poll.

mod percent;
mod stages;
mod status;

use std::io::{self, Write};

use tracing::{Span, field, instrument};

pub use percent::Percentage;
pub use stages::{STAGE_DISPLAY_TABLE, StageDisplay, stage_display_name};
pub use status::{PipelineState, PipelineStatus, StageProgress, StatusSnapshot};

/// Writes the progress report for `status` to `writer`.
///
/// Nothing is written until the engine reports overall progress. Stages
/// without progress are skipped.
///
/// # Errors
/// Returns [`io::Error`] if writing to `writer` fails.
///
/// # Examples
/// ```
/// use exdriver_core::{PipelineState, StageProgress, StatusSnapshot, render_status};
///
/// let snapshot = StatusSnapshot::new(PipelineState::Running)
///     .with_overall(StageProgress::new(5, 10))
///     .with_stage("ivertex1", StageProgress::new(1, 3));
/// let mut buffer = Vec::new();
/// render_status(&snapshot, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer).expect("output is UTF-8"),
///     "\nDAG: State: RUNNING Progress: 50%\n\
///      VertexStatus: VertexName: intermediate-reducer Progress: 33.33%\n",
/// );
/// # Ok::<(), std::io::Error>(())
/// ```
#[instrument(
    level = "debug",
    name = "progress.render",
    err,
    skip(status, writer),
    fields(state = %status.state(), stages = field::Empty),
)]
pub fn render_status<S, W>(status: &S, mut writer: W) -> io::Result<()>
where
    S: PipelineStatus + ?Sized,
    W: Write,
{
    let Some(overall) = status.overall_progress() else {
        return Ok(());
    };

    writeln!(writer)?;
    writeln!(
        writer,
        "DAG: State: {} Progress: {}",
        status.state(),
        overall.percentage()
    )?;

    let mut rendered = 0_usize;
    for stage in &STAGE_DISPLAY_TABLE {
        let Some(progress) = status.stage_progress(stage.id) else {
            continue;
        };
        writeln!(
            writer,
            "VertexStatus: VertexName: {} Progress: {}",
            stage.display_name,
            progress.percentage()
        )?;
        rendered += 1;
    }
    Span::current().record("stages", rendered);
    Ok(())
}
