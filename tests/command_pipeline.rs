//! Raw text lines through parsing, the game rules and rendering.

use alembic::{parse_command, AlembicConfig, Session, Step};
use proptest::prelude::*;

fn say(session: &mut Session, line: &str) -> String {
    match session.handle_line(line) {
        Step::Output(out) => out.lines.join("\n"),
        Step::Exit => "<exit>".to_string(),
    }
}

fn session() -> Session {
    Session::new(&AlembicConfig::default())
}

#[test]
fn looting_twice_accumulates() {
    let mut s = session();
    assert_eq!(say(&mut s, "Geralt loots 3 Vermilion, 2 RedMeat"), "Alchemy ingredients obtained");
    assert_eq!(say(&mut s, "Total ingredient ?"), "2 RedMeat, 3 Vermilion");
    say(&mut s, "Geralt loots 2 Vermilion");
    assert_eq!(say(&mut s, "Total ingredient Vermilion ?"), "5");
}

#[test]
fn brewing_without_stock_changes_nothing() {
    let mut s = session();
    say(&mut s, "Geralt learns Swallow potion consists of 2 Celandine, 1 Vermilion");
    say(&mut s, "Geralt loots 2 Celandine, 1 Vermilion");
    assert_eq!(say(&mut s, "Geralt brews Swallow"), "Alchemy item created: Swallow");
    assert_eq!(say(&mut s, "Total potion Swallow?"), "1");
    assert_eq!(say(&mut s, "Total ingredient Celandine ?"), "0");

    let before = s.state().snapshot();
    assert_eq!(say(&mut s, "Geralt brews Swallow"), "Not enough ingredients");
    assert_eq!(s.state().snapshot(), before);
    assert_eq!(say(&mut s, "Geralt brews Thunderbolt"), "No formula for Thunderbolt");
}

#[test]
fn signs_beat_known_monsters_only() {
    let mut s = session();
    say(&mut s, "Geralt learns Igni sign is effective against Drowner");
    assert_eq!(say(&mut s, "Geralt encounters a Drowner"), "Geralt defeats Drowner");
    assert_eq!(say(&mut s, "Total trophy Drowner ?"), "1");
    assert_eq!(
        say(&mut s, "Geralt encounters a Ghoul"),
        "Geralt is unprepared and barely escapes with his life"
    );
    assert_eq!(say(&mut s, "Total trophy Ghoul ?"), "0");
    assert!(!s.state().trophies.contains("Ghoul"));
}

#[test]
fn formula_lists_larger_amounts_first() {
    let mut s = session();
    say(&mut s, "Geralt learns Swallow potion consists of 1 Vermilion, 3 Celandine");
    assert_eq!(say(&mut s, "What is in Swallow ?"), "3 Celandine, 1 Vermilion");
}

#[test]
fn short_trade_changes_nothing() {
    let mut s = session();
    say(&mut s, "Geralt learns Igni sign is effective against Drowner");
    say(&mut s, "Geralt encounters a Drowner");
    let before = s.state().snapshot();
    assert_eq!(
        say(&mut s, "Geralt trades 1 Drowner, 1 Ghoul trophy for 3 Rebis"),
        "Not enough trophies"
    );
    assert_eq!(s.state().snapshot(), before);
}

#[test]
fn many_distinct_names_survive_growth() {
    let mut s = session();
    let names: Vec<String> = (0..40u8)
        .map(|i| format!("Herb{}{}", (b'a' + i % 26) as char, (b'a' + i / 26) as char))
        .collect();
    for name in &names {
        assert_eq!(say(&mut s, &format!("Geralt loots 1 {name}")), "Alchemy ingredients obtained");
    }
    assert!(s.state().ingredients.capacity() > 13);
    for name in &names {
        assert_eq!(say(&mut s, &format!("Total ingredient {name}?")), "1");
    }
}

fn word() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,10}"
}

proptest! {
    /// Property: well-formed loot lines always parse, whatever comma spacing is used.
    #[test]
    fn loot_lines_parse(
        pairs in prop::collection::vec((1u32..100_000, word()), 1..6),
        sep in prop::sample::select(vec![", ", " , ", " ,", ","]),
    ) {
        let body: Vec<String> = pairs.iter().map(|(n, w)| format!("{n} {w}")).collect();
        let line = format!("Geralt loots {}", body.join(sep));
        prop_assert!(parse_command(&line).is_ok(), "{} should parse", line);
    }

    /// Property: any line with a doubled comma is rejected.
    #[test]
    fn doubled_commas_are_invalid(prefix in "[A-Za-z ]{0,20}", suffix in "[A-Za-z0-9 ]{0,20}") {
        let line = format!("{prefix},,{suffix}");
        prop_assert!(parse_command(&line).is_err());
    }
}
