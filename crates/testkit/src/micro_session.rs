//! Micro-session harness for step-by-step snapshot tests.
//!
//! A micro-session feeds a short, fixed list of inputs to a state and records
//! the output of each step together with a snapshot of the state after it.
//! The report is compared against a golden JSON file on disk (or updated when
//! `ALEMBIC_UPDATE_SNAPSHOTS=1` is set).

use crate::snapshot::verify_golden;
use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

/// Configuration for a micro-session.
#[derive(Debug, Clone)]
pub struct MicroSessionConfig {
    /// Human-readable name (written into the snapshot report).
    pub name: String,
    /// Path to the golden JSON file.
    pub snapshot_path: PathBuf,
}

/// State captured before the first step or after one step.
#[derive(Debug, Clone, Serialize)]
pub struct MicroSessionFrame<I, O, S> {
    /// Number of steps performed so far.
    pub step: u64,
    /// Input of the step; `None` for the initial frame.
    pub input: Option<I>,
    /// Output of the step; `None` for the initial frame.
    pub output: Option<O>,
    /// Snapshot payload.
    pub snapshot: S,
}

#[derive(Debug, Clone, Serialize)]
struct MicroSessionReport<I, O, S> {
    name: String,
    frames: Vec<MicroSessionFrame<I, O, S>>,
}

/// Run a micro-session and assert (or update) the snapshot at `config.snapshot_path`.
///
/// The report holds one frame for the initial state plus one per input.
pub fn run_micro_session<State, Input, Output, Snapshot, StepFn, SnapFn>(
    config: MicroSessionConfig,
    mut state: State,
    inputs: impl IntoIterator<Item = Input>,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Result<()>
where
    Input: Serialize,
    Output: Serialize,
    Snapshot: Serialize,
    StepFn: FnMut(&mut State, &Input) -> Output,
    SnapFn: FnMut(&State) -> Snapshot,
{
    let mut frames = vec![MicroSessionFrame {
        step: 0,
        input: None,
        output: None,
        snapshot: snapshot(&state),
    }];

    for (index, input) in inputs.into_iter().enumerate() {
        let output = step(&mut state, &input);
        frames.push(MicroSessionFrame {
            step: index as u64 + 1,
            input: Some(input),
            output: Some(output),
            snapshot: snapshot(&state),
        });
    }

    let report = MicroSessionReport {
        name: config.name,
        frames,
    };
    verify_golden(config.snapshot_path, &report)
}
