use alembic::{AlembicConfig, Session, Step};
use alembic_testkit::verify_golden;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct TranscriptStep {
    step: usize,
    input: String,
    output: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TranscriptReport {
    name: String,
    exited: bool,
    steps: Vec<TranscriptStep>,
}

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join(path)
}

#[test]
fn sample_session_transcript_snapshot() {
    let script = std::fs::read_to_string(fixture("data/sample_session.txt")).expect("fixture");
    let mut session = Session::new(&AlembicConfig::default());

    let mut report = TranscriptReport {
        name: "sample_session".to_string(),
        exited: false,
        steps: Vec::new(),
    };
    for (step, line) in script.lines().enumerate() {
        match session.handle_line(line) {
            Step::Exit => {
                report.exited = true;
                break;
            }
            Step::Output(out) => report.steps.push(TranscriptStep {
                step,
                input: line.to_string(),
                output: out.lines,
            }),
        }
    }

    verify_golden(fixture("snapshots/sample_session.json"), &report)
        .expect("snapshot verified");
}
