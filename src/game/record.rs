//! Game record and PGN export
//!
//! A [`GameRecord`] is filled in by the runner while a game is played and rendered afterwards
//! with [`GameRecord::to_pgn`]:
//!
//! ```text
//! [Event "xfendgame KRK"]
//! [Site "?"]
//! [Date "2026.10.19"]
//! [Round "1"]
//! [White "xfendgame"]
//! [Black "xfendgame"]
//! [Result "1-0"]
//! [SetUp "1"]
//! [FEN "4k3/8/8/8/8/8/8/R3K3 w - - 0 1"]
//! [Ending "KRK"]
//! [PlyCount "31"]
//!
//! {tablebase: win in 31} 1. Ra7 Kf8 2. Ke2 ...
//! ```
//!
//! Movetext lines are wrapped at 80 columns.

use crate::core::CoreResult;
use chrono::{Local, NaiveDate};
use endgame_engine::api::GameState;
use endgame_engine::{Board, Ending, Ply, Side};
use endgame_oracle::TablebaseEntry;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Player name written to both colour tags
const PLAYER_NAME: &str = "xfendgame";

/// Movetext line width
const PGN_LINE_WIDTH: usize = 80;

/// How a game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate { winner: Side },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    /// Ply cap reached before the game was decided
    MaxPlies,
}

impl GameOutcome {
    /// Outcome of a finished game state; `None` while still playing
    pub fn from_state(state: GameState) -> Option<Self> {
        match state {
            GameState::Playing => None,
            GameState::Checkmate { winner } => Some(GameOutcome::Checkmate { winner }),
            GameState::Stalemate => Some(GameOutcome::Stalemate),
            GameState::InsufficientMaterial => Some(GameOutcome::InsufficientMaterial),
            GameState::FiftyMoveRule => Some(GameOutcome::FiftyMoveRule),
        }
    }

    /// PGN result token
    pub fn result_token(self) -> &'static str {
        match self {
            GameOutcome::Checkmate { winner: Side::White } => "1-0",
            GameOutcome::Checkmate { winner: Side::Black } => "0-1",
            GameOutcome::Stalemate | GameOutcome::InsufficientMaterial | GameOutcome::FiftyMoveRule => "1/2-1/2",
            GameOutcome::MaxPlies => "*",
        }
    }

    pub fn is_decisive(self) -> bool {
        matches!(self, GameOutcome::Checkmate { .. })
    }

    pub fn is_draw(self) -> bool {
        matches!(
            self,
            GameOutcome::Stalemate | GameOutcome::InsufficientMaterial | GameOutcome::FiftyMoveRule
        )
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::InsufficientMaterial => write!(f, "insufficient material"),
            GameOutcome::FiftyMoveRule => write!(f, "fifty-move rule"),
            GameOutcome::MaxPlies => write!(f, "unfinished (ply limit)"),
        }
    }
}

/// Reference engine's opinion on one of our plies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleAnnotation {
    /// Index into [`GameRecord::plies`]
    pub ply_index: usize,
    /// Suggested move in UCI notation
    pub suggested: String,
    pub agreed: bool,
}

/// Everything needed to replay and report one game
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// Zero-based game number within the batch
    pub round: u32,
    pub seed: u64,
    pub ending: Ending,
    pub start_fen: String,
    pub start_side: Side,
    pub start_fullmove: u32,
    pub plies: Vec<Ply>,
    /// SAN of each ply, parallel to `plies`
    pub san: Vec<String>,
    /// `None` until the game is over
    pub outcome: Option<GameOutcome>,
    /// Tablebase verdict on the start position
    pub tablebase: Option<TablebaseEntry>,
    /// Name of the consulted reference engine
    pub reference_engine: Option<String>,
    pub annotations: Vec<OracleAnnotation>,
}

impl GameRecord {
    /// Empty record starting from `board`
    pub fn new(round: u32, seed: u64, ending: Ending, board: &Board) -> Self {
        Self {
            round,
            seed,
            ending,
            start_fen: board.to_fen(),
            start_side: board.side_to_move(),
            start_fullmove: board.fullmove_number(),
            plies: Vec::new(),
            san: Vec::new(),
            outcome: None,
            tablebase: None,
            reference_engine: None,
            annotations: Vec::new(),
        }
    }

    pub fn push(&mut self, ply: Ply, san: String) {
        self.plies.push(ply);
        self.san.push(san);
    }

    pub fn ply_count(&self) -> usize {
        self.plies.len()
    }

    /// Reference-engine consultations made
    pub fn consultations(&self) -> usize {
        self.annotations.len()
    }

    /// Consultations where the engine played the suggested move
    pub fn agreements(&self) -> usize {
        self.annotations.iter().filter(|a| a.agreed).count()
    }

    pub fn result_token(&self) -> &'static str {
        self.outcome.map_or("*", GameOutcome::result_token)
    }

    /// One-line summary for the console
    pub fn summary_line(&self) -> String {
        let outcome = self
            .outcome
            .map_or_else(|| "in progress".to_string(), |outcome| outcome.to_string());
        let mut line = format!(
            "Game {} ({}, seed {}): {} after {} plies [{}]",
            self.round + 1,
            self.ending,
            self.seed,
            outcome,
            self.ply_count(),
            self.result_token()
        );
        if self.consultations() > 0 {
            line.push_str(&format!(
                ", agreed with {} on {}/{}",
                self.reference_engine.as_deref().unwrap_or("reference engine"),
                self.agreements(),
                self.consultations()
            ));
        }
        line
    }

    /// PGN text dated today
    pub fn to_pgn(&self) -> String {
        self.to_pgn_dated(Local::now().date_naive())
    }

    /// PGN text with an explicit `Date` tag
    pub fn to_pgn_dated(&self, date: NaiveDate) -> String {
        let mut pgn = String::new();
        let tags = [
            ("Event", format!("{} {}", PLAYER_NAME, self.ending)),
            ("Site", "?".to_string()),
            ("Date", date.format("%Y.%m.%d").to_string()),
            ("Round", (self.round + 1).to_string()),
            ("White", PLAYER_NAME.to_string()),
            ("Black", PLAYER_NAME.to_string()),
            ("Result", self.result_token().to_string()),
            ("SetUp", "1".to_string()),
            ("FEN", self.start_fen.clone()),
            ("Ending", self.ending.to_string()),
            ("PlyCount", self.ply_count().to_string()),
        ];
        for (name, value) in tags {
            pgn.push_str(&format!("[{} \"{}\"]\n", name, escape_tag(&value)));
        }
        pgn.push('\n');

        let mut tokens = Vec::with_capacity(self.san.len() * 2 + 2);
        if let Some(entry) = &self.tablebase {
            tokens.push(format!("{{tablebase: {entry}}}"));
        }
        tokens.extend(self.movetext_tokens());
        tokens.push(self.result_token().to_string());

        pgn.push_str(&wrap(&tokens, PGN_LINE_WIDTH));
        pgn.push('\n');
        pgn
    }

    fn movetext_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut number = self.start_fullmove;
        let mut side = self.start_side;
        for (index, san) in self.san.iter().enumerate() {
            match side {
                Side::White => tokens.push(format!("{number}.")),
                Side::Black if index == 0 => tokens.push(format!("{number}...")),
                Side::Black => {}
            }
            tokens.push(san.clone());
            if let Some(annotation) = self.annotations.iter().find(|a| a.ply_index == index && !a.agreed) {
                tokens.push(format!("{{reference: {}}}", annotation.suggested));
            }
            if side == Side::Black {
                number += 1;
            }
            side = side.opposite();
        }
        tokens
    }
}

fn escape_tag(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn wrap(tokens: &[String], width: usize) -> String {
    let mut text = String::new();
    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > width {
            text.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            text.push(' ');
            line_len += 1;
        }
        text.push_str(token);
        line_len += token.len();
    }
    text
}

/// Append the PGN of every record to `path`, separated by blank lines
pub fn append_pgn(path: &Path, records: &[GameRecord]) -> CoreResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for record in records {
        writeln!(file, "{}", record.to_pgn())?;
    }
    tracing::info!("[GAME] Wrote {} game(s) to {:?}", records.len(), path);
    Ok(())
}
