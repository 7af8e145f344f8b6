//! Endgame tablebase prober
//!
//! [`CommandTablebase`] runs `<program> <args...> <fen>` once per probe and expects a single JSON
//! object on stdout:
//!
//! ```json
//! {"outcome": "win", "distance": 16, "best_move": "a1a7"}
//! ```
//!
//! `outcome` is seen from the side to move; `distance` (plies to mate) and `best_move` are
//! optional.

use crate::error::{OracleError, OracleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Theoretical result for the side to move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablebaseOutcome {
    Win,
    Draw,
    Loss,
}

impl fmt::Display for TablebaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablebaseOutcome::Win => write!(f, "win"),
            TablebaseOutcome::Draw => write!(f, "draw"),
            TablebaseOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// One probe answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablebaseEntry {
    pub outcome: TablebaseOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_move: Option<String>,
}

impl TablebaseEntry {
    /// Parse a prober's stdout; the answer is the last non-empty line
    pub fn parse(output: &str) -> OracleResult<Self> {
        let line = output
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .ok_or_else(|| OracleError::Protocol("tablebase printed nothing".to_string()))?;
        Ok(serde_json::from_str(line)?)
    }
}

impl fmt::Display for TablebaseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if let Some(distance) = self.distance {
            write!(f, " in {distance}")?;
        }
        if let Some(best) = &self.best_move {
            write!(f, " ({best})")?;
        }
        Ok(())
    }
}

/// An endgame tablebase
pub trait Tablebase {
    fn name(&self) -> &str;

    /// Look up the theoretical result of `fen`
    fn probe(&mut self, fen: &str) -> OracleResult<TablebaseEntry>;
}

/// How to run a tablebase prober
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablebaseConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Default for TablebaseConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("emd-probe"),
            args: Vec::new(),
        }
    }
}

/// Tablebase prober run as a one-shot command per position
pub struct CommandTablebase {
    config: TablebaseConfig,
    name: String,
}

impl CommandTablebase {
    pub fn new(config: TablebaseConfig) -> Self {
        let name = config.program.display().to_string();
        Self { config, name }
    }
}

impl Tablebase for CommandTablebase {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&mut self, fen: &str) -> OracleResult<TablebaseEntry> {
        let output = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(fen)
            .output()
            .map_err(|source| OracleError::Spawn {
                program: self.name.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OracleError::Exited(format!(
                "'{}' failed with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entry = TablebaseEntry::parse(&stdout)?;
        log::debug!("[ORACLE] {} probe of {}: {}", self.name, fen, entry);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_entry() {
        let entry = TablebaseEntry::parse(r#"{"outcome":"win","distance":16,"best_move":"a1a7"}"#).unwrap();
        assert_eq!(entry.outcome, TablebaseOutcome::Win);
        assert_eq!(entry.distance, Some(16));
        assert_eq!(entry.best_move.as_deref(), Some("a1a7"));
        assert_eq!(entry.to_string(), "win in 16 (a1a7)");
    }

    #[test]
    fn test_parse_takes_last_line_and_optional_fields() {
        let entry = TablebaseEntry::parse("loading tables...\n{\"outcome\":\"draw\"}\n\n").unwrap();
        assert_eq!(entry.outcome, TablebaseOutcome::Draw);
        assert_eq!(entry.distance, None);
        assert_eq!(entry.best_move, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(TablebaseEntry::parse("   \n"), Err(OracleError::Protocol(_))));
        assert!(matches!(TablebaseEntry::parse("{\"outcome\":\"maybe\"}"), Err(OracleError::Json(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_tablebase_passes_fen_as_last_argument() {
        let mut tablebase = CommandTablebase::new(TablebaseConfig {
            program: PathBuf::from("sh"),
            args: vec![
                "-c".to_string(),
                r#"echo "{\"outcome\":\"win\",\"distance\":${#1}}""#.to_string(),
                "probe".to_string(),
            ],
        });
        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
        let entry = tablebase.probe(fen).unwrap();
        assert_eq!(entry.outcome, TablebaseOutcome::Win);
        assert_eq!(entry.distance, Some(fen.len() as u32));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_tablebase_reports_failure() {
        let mut tablebase = CommandTablebase::new(TablebaseConfig {
            program: PathBuf::from("sh"),
            args: vec!["-c".to_string(), "exit 3".to_string(), "probe".to_string()],
        });
        assert!(matches!(tablebase.probe("8/8/8/8/8/8/8/8 w - - 0 1"), Err(OracleError::Exited(_))));
    }
}
