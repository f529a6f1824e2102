use alembic_core::{validate_name, Countermeasure, NameError, Quantity, Requirement};
use alembic_world::{Action, ActionReport, GameState, Query, QueryAnswer, Stock};
use thiserror::Error;
use tracing::debug;

/// Why a line was rejected. Every rejection is shown to the player as `INVALID`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<NameError> for CommandError {
    fn from(err: NameError) -> Self {
        Self::new(format!("Invalid name: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Action(Action),
    Query(Query),
    Exit,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
}

impl CommandOutput {
    fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }
}

/// Text shown for any line that does not parse.
pub const INVALID: &str = "INVALID";

pub fn execute_command(state: &mut GameState, cmd: GameCommand) -> CommandOutput {
    match cmd {
        GameCommand::Action(action) => match state.apply(action) {
            Ok(report) => CommandOutput::line(render_report(&report)),
            Err(err) => CommandOutput::line(err.to_string()),
        },
        GameCommand::Query(query) => CommandOutput::line(render_answer(&state.answer(&query))),
        GameCommand::Exit => CommandOutput::default(),
    }
}

fn render_report(report: &ActionReport) -> String {
    match report {
        ActionReport::IngredientsLooted => "Alchemy ingredients obtained".to_string(),
        ActionReport::TradeCompleted => "Trade successful".to_string(),
        ActionReport::PotionBrewed { potion } => format!("Alchemy item created: {potion}"),
        ActionReport::FormulaLearned { potion } => {
            format!("New alchemy formula obtained: {potion}")
        }
        ActionReport::BestiaryEntryAdded { monster } => {
            format!("New bestiary entry added: {monster}")
        }
        ActionReport::BestiaryEntryUpdated { monster } => {
            format!("Bestiary entry updated: {monster}")
        }
        ActionReport::MonsterDefeated { monster, .. } => format!("Geralt defeats {monster}"),
    }
}

fn render_pairs(pairs: &[Requirement]) -> String {
    pairs
        .iter()
        .map(|pair| format!("{} {}", pair.count, pair.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_answer(answer: &QueryAnswer) -> String {
    match answer {
        QueryAnswer::Quantity(count) => count.to_string(),
        QueryAnswer::Listing(pairs) | QueryAnswer::Formula(pairs) => render_pairs(pairs),
        QueryAnswer::Empty => "None".to_string(),
        QueryAnswer::Countermeasures(labels) => labels.join(", "),
        QueryAnswer::NoKnowledge { monster } => format!("No knowledge of {monster}"),
        QueryAnswer::NoFormula { potion } => format!("No formula for {potion}"),
    }
}

/// A token plus its byte range in the raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

/// Split on spaces; every comma is a token of its own.
fn tokenize(line: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, ch) in line.char_indices() {
        match ch {
            ' ' | ',' => {
                if let Some(s) = start.take() {
                    tokens.push(Token {
                        text: &line[s..i],
                        start: s,
                        end: i,
                    });
                }
                if ch == ',' {
                    tokens.push(Token {
                        text: &line[i..i + 1],
                        start: i,
                        end: i + 1,
                    });
                }
            }
            _ => {
                if start.is_none() {
                    start = Some(i);
                }
            }
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            text: &line[s..],
            start: s,
            end: line.len(),
        });
    }
    tokens
}

fn invalid(reason: &str) -> CommandError {
    CommandError::new(reason)
}

fn expect_word(tokens: &[Token<'_>], index: usize, word: &str) -> Result<(), CommandError> {
    match tokens.get(index) {
        Some(token) if token.text == word => Ok(()),
        _ => Err(CommandError::new(format!("Expected '{word}'"))),
    }
}

/// Raw text covered by `tokens`, spaces included, validated as a name.
fn span_name<'a>(line: &'a str, tokens: &[Token<'_>]) -> Result<&'a str, CommandError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(invalid("Missing name"));
    };
    let name = &line[first.start..last.end];
    validate_name(name)?;
    Ok(name)
}

/// Like [`span_name`], but the last token must end with a `?` that is dropped.
fn span_name_before_mark<'a>(
    line: &'a str,
    tokens: &[Token<'_>],
) -> Result<&'a str, CommandError> {
    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(invalid("Missing name"));
    };
    let name = line[first.start..last.end]
        .strip_suffix('?')
        .ok_or_else(|| invalid("Missing '?'"))?;
    validate_name(name)?;
    Ok(name)
}

fn single_name<'a>(token: &Token<'a>) -> Result<&'a str, CommandError> {
    validate_name(token.text)?;
    Ok(token.text)
}

fn parse_count(text: &str) -> Result<Quantity, CommandError> {
    let well_formed = !text.is_empty()
        && !text.starts_with('0')
        && text.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(CommandError::new(format!("Invalid count: {text}")));
    }
    text.parse::<Quantity>()
        .map_err(|_| CommandError::new(format!("Count out of range: {text}")))
}

/// `N name (, N name)*` with single-word names and no trailing comma.
fn parse_pairs(tokens: &[Token<'_>]) -> Result<Vec<Requirement>, CommandError> {
    let mut pairs = Vec::new();
    let mut rest = tokens;
    loop {
        let [count, name, tail @ ..] = rest else {
            return Err(invalid("Incomplete pair"));
        };
        pairs.push(Requirement::new(single_name(name)?, parse_count(count.text)?));
        match tail {
            [] => return Ok(pairs),
            [comma, more @ ..] if comma.text == "," => rest = more,
            _ => return Err(invalid("Missing comma between pairs")),
        }
    }
}

pub fn parse_command(line: &str) -> Result<GameCommand, CommandError> {
    if line.contains(",,") {
        return Err(invalid("Consecutive commas"));
    }
    let tokens = tokenize(line);
    if tokens.len() == 1 && tokens[0].text == "Exit" {
        return Ok(GameCommand::Exit);
    }
    if tokens.len() < 2 {
        return Err(invalid("Too few words"));
    }

    let cmd = match (tokens[0].text, tokens[1].text) {
        ("Geralt", _) => parse_action(line, &tokens).map(GameCommand::Action),
        ("Total", _) => parse_total(line, &tokens).map(GameCommand::Query),
        ("What", "is") => parse_what(line, &tokens).map(GameCommand::Query),
        _ => Err(invalid("Unknown sentence")),
    };
    if let Err(err) = &cmd {
        debug!(line, %err, "rejected command");
    }
    cmd
}

fn parse_action(line: &str, tokens: &[Token<'_>]) -> Result<Action, CommandError> {
    let size = tokens.len();
    match tokens[1].text {
        "loots" => {
            if size < 4 {
                return Err(invalid("Usage: Geralt loots <pairs>"));
            }
            Ok(Action::Loot {
                ingredients: parse_pairs(&tokens[2..])?,
            })
        }
        "trades" => {
            if size < 8 {
                return Err(invalid("Usage: Geralt trades <pairs> trophy for <pairs>"));
            }
            let trophy = tokens
                .iter()
                .position(|t| t.text == "trophy")
                .ok_or_else(|| invalid("Missing 'trophy'"))?;
            expect_word(tokens, trophy + 1, "for")?;
            Ok(Action::Trade {
                trophies: parse_pairs(&tokens[2..trophy])?,
                ingredients: parse_pairs(&tokens[trophy + 2..])?,
            })
        }
        "brews" => {
            if size < 3 {
                return Err(invalid("Usage: Geralt brews <potion>"));
            }
            Ok(Action::Brew {
                potion: span_name(line, &tokens[2..])?.to_string(),
            })
        }
        "learns" => parse_learn(line, tokens),
        "encounters" => {
            if size != 4 {
                return Err(invalid("Usage: Geralt encounters a <monster>"));
            }
            expect_word(tokens, 2, "a")?;
            Ok(Action::Encounter {
                monster: single_name(&tokens[3])?.to_string(),
            })
        }
        _ => Err(invalid("Unknown action")),
    }
}

fn parse_learn(line: &str, tokens: &[Token<'_>]) -> Result<Action, CommandError> {
    let size = tokens.len();
    if size < 8 {
        return Err(invalid("Too few words to learn anything"));
    }

    if let Some(consists) = tokens.iter().position(|t| t.text == "consists") {
        if consists < 4 {
            return Err(invalid("Missing potion name"));
        }
        expect_word(tokens, consists - 1, "potion")?;
        expect_word(tokens, consists + 1, "of")?;
        return Ok(Action::LearnRecipe {
            potion: span_name(line, &tokens[2..consists - 1])?.to_string(),
            requirements: parse_pairs(&tokens[consists + 2..])?,
        });
    }

    let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
    if size == 8 && texts[3..7] == ["sign", "is", "effective", "against"] {
        return Ok(Action::LearnCountermeasure {
            monster: single_name(&tokens[7])?.to_string(),
            kind: Countermeasure::Sign,
            label: single_name(&tokens[2])?.to_string(),
        });
    }

    let potion = texts
        .iter()
        .position(|t| *t == "potion")
        .ok_or_else(|| invalid("Missing 'potion' or 'sign'"))?;
    if potion < 3 || potion + 5 != size || texts[potion + 1..potion + 4] != ["is", "effective", "against"]
    {
        return Err(invalid("Usage: Geralt learns <potion> potion is effective against <monster>"));
    }
    Ok(Action::LearnCountermeasure {
        monster: single_name(&tokens[size - 1])?.to_string(),
        kind: Countermeasure::Potion,
        label: span_name(line, &tokens[2..potion])?.to_string(),
    })
}

fn parse_stock(word: &str) -> Option<Stock> {
    match word {
        "ingredient" => Some(Stock::Ingredient),
        "potion" => Some(Stock::Potion),
        "trophy" => Some(Stock::Trophy),
        _ => None,
    }
}

fn parse_total(line: &str, tokens: &[Token<'_>]) -> Result<Query, CommandError> {
    let size = tokens.len();
    if size == 2 {
        let stock = tokens[1]
            .text
            .strip_suffix('?')
            .and_then(parse_stock)
            .ok_or_else(|| invalid("Usage: Total <ingredient|potion|trophy> ?"))?;
        return Ok(Query::TotalAll { stock });
    }

    let stock = parse_stock(tokens[1].text).ok_or_else(|| invalid("Unknown collection"))?;
    let last = tokens[size - 1];
    if size == 3 && last.text == "?" {
        return Ok(Query::TotalAll { stock });
    }

    let name = match stock {
        Stock::Potion if last.text == "?" => span_name(line, &tokens[2..size - 1])?,
        Stock::Potion => span_name_before_mark(line, &tokens[2..])?,
        Stock::Ingredient | Stock::Trophy => match size {
            3 => span_name_before_mark(line, &tokens[2..])?,
            4 if last.text == "?" => single_name(&tokens[2])?,
            _ => return Err(invalid("Names of ingredients and trophies are one word")),
        },
    };
    Ok(Query::Total {
        stock,
        name: name.to_string(),
    })
}

fn parse_what(line: &str, tokens: &[Token<'_>]) -> Result<Query, CommandError> {
    let size = tokens.len();
    if size < 4 {
        return Err(invalid("Too few words"));
    }
    let last = tokens[size - 1];

    if tokens[2].text == "in" {
        let potion = if last.text == "?" {
            span_name(line, &tokens[3..size - 1])?
        } else {
            span_name_before_mark(line, &tokens[3..])?
        };
        return Ok(Query::Formula {
            potion: potion.to_string(),
        });
    }

    if tokens[2].text == "effective" && tokens[3].text == "against" {
        let monster = match size {
            5 if last.text != "?" => span_name_before_mark(line, &tokens[4..])?,
            6 if last.text == "?" => single_name(&tokens[4])?,
            _ => return Err(invalid("Usage: What is effective against <monster> ?")),
        };
        return Ok(Query::EffectiveAgainst {
            monster: monster.to_string(),
        });
    }

    Err(invalid("Unknown question"))
}
