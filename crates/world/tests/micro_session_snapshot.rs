use alembic_core::Requirement;
use alembic_testkit::{run_micro_session, MicroSessionConfig};
use alembic_world::{Action, GameState};
use std::path::PathBuf;

fn snapshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

#[test]
fn micro_swallow_session_snapshot() {
    let steps = vec![
        Action::Loot {
            ingredients: vec![Requirement::new("Rebis", 2)],
        },
        Action::LearnRecipe {
            potion: "Swallow".to_string(),
            requirements: vec![Requirement::new("Rebis", 1)],
        },
        Action::Brew {
            potion: "Swallow".to_string(),
        },
        Action::Encounter {
            monster: "Drowner".to_string(),
        },
    ];

    run_micro_session(
        MicroSessionConfig {
            name: "micro_swallow_session".to_string(),
            snapshot_path: snapshot_path("micro_swallow_session.json"),
        },
        GameState::new(),
        steps,
        |state, action| state.apply(action.clone()),
        GameState::snapshot,
    )
    .expect("snapshot verified");
}
