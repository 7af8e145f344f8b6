//! Oracle integration boundary
//!
//! [`Oracles`] owns the optional external collaborators of a batch and shields the game loop
//! from them: every [`OracleError`] is logged here and turned into "no answer", so an oracle can
//! only ever add annotations to a game, never end it. A reference engine whose process dies is
//! dropped for the rest of the batch.

use crate::core::EndgameSettings;
use crate::game::record::OracleAnnotation;
use endgame_engine::ply::parse_uci_squares;
use endgame_engine::Ply;
use endgame_oracle::{CommandTablebase, OracleError, ReferenceEngine, Tablebase, TablebaseEntry, UciEngine};
use tracing::{debug, info, warn};

/// Optional reference engine and tablebase
#[derive(Default)]
pub struct Oracles {
    reference: Option<Box<dyn ReferenceEngine>>,
    tablebase: Option<Box<dyn Tablebase>>,
}

impl Oracles {
    /// No oracles: games run on the engine alone
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(reference: Option<Box<dyn ReferenceEngine>>, tablebase: Option<Box<dyn Tablebase>>) -> Self {
        Self { reference, tablebase }
    }

    /// Start the oracles named in `settings`
    ///
    /// A reference engine that fails to start is logged and left out.
    pub fn from_settings(settings: &EndgameSettings) -> Self {
        let reference = settings.reference_engine.as_ref().and_then(|config| {
            match UciEngine::spawn(config) {
                Ok(engine) => {
                    info!("[ORACLE] Reference engine '{}' attached", engine.name());
                    Some(Box::new(engine) as Box<dyn ReferenceEngine>)
                }
                Err(e) => {
                    warn!("[ORACLE] Reference engine unavailable: {}", e);
                    None
                }
            }
        });
        let tablebase = settings.tablebase.clone().map(|config| {
            let tablebase = CommandTablebase::new(config);
            info!("[ORACLE] Tablebase '{}' attached", tablebase.name());
            Box::new(tablebase) as Box<dyn Tablebase>
        });
        Self::new(reference, tablebase)
    }

    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref().map(|engine| engine.name())
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    pub fn has_tablebase(&self) -> bool {
        self.tablebase.is_some()
    }

    /// Tablebase verdict for `fen`, if a tablebase is attached and answers
    pub fn probe(&mut self, fen: &str) -> Option<TablebaseEntry> {
        let tablebase = self.tablebase.as_mut()?;
        match tablebase.probe(fen) {
            Ok(entry) => {
                info!("[ORACLE] Tablebase: {} for {}", entry, fen);
                Some(entry)
            }
            Err(e) => {
                warn!("[ORACLE] Tablebase probe failed for {}: {}", fen, e);
                None
            }
        }
    }

    /// Ask the reference engine about `fen` and compare its move with `played`
    ///
    /// # Arguments
    ///
    /// * `fen` - Position before `played`
    /// * `played` - Our engine's choice
    /// * `ply_index` - Position of `played` in the game record
    pub fn consult(&mut self, fen: &str, played: Ply, ply_index: usize) -> Option<OracleAnnotation> {
        let engine = self.reference.as_mut()?;
        match engine.suggest_move(fen) {
            Ok(suggested) => {
                let agreed = parse_uci_squares(&suggested) == Some((played.from(), played.to()));
                debug!(
                    "[ORACLE] {} suggests {}, engine played {} ({})",
                    engine.name(),
                    suggested,
                    played.uci(),
                    if agreed { "agree" } else { "differ" }
                );
                Some(OracleAnnotation {
                    ply_index,
                    suggested,
                    agreed,
                })
            }
            Err(e) => {
                warn!("[ORACLE] {} gave no move for {}: {}", engine.name(), fen, e);
                if matches!(e, OracleError::Exited(_) | OracleError::Io(_)) {
                    warn!("[ORACLE] Dropping reference engine for the rest of the run");
                    self.reference = None;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use endgame_oracle::{OracleResult, TablebaseOutcome};

    struct FixedEngine(&'static str);

    impl ReferenceEngine for FixedEngine {
        fn name(&self) -> &str {
            "fixed"
        }

        fn suggest_move(&mut self, _fen: &str) -> OracleResult<String> {
            Ok(self.0.to_string())
        }
    }

    struct DeadEngine;

    impl ReferenceEngine for DeadEngine {
        fn name(&self) -> &str {
            "dead"
        }

        fn suggest_move(&mut self, _fen: &str) -> OracleResult<String> {
            Err(OracleError::Exited("gone".to_string()))
        }
    }

    struct BrokenTablebase;

    impl Tablebase for BrokenTablebase {
        fn name(&self) -> &str {
            "broken"
        }

        fn probe(&mut self, _fen: &str) -> OracleResult<TablebaseEntry> {
            Err(OracleError::Protocol("no tables".to_string()))
        }
    }

    struct WinningTablebase;

    impl Tablebase for WinningTablebase {
        fn name(&self) -> &str {
            "winning"
        }

        fn probe(&mut self, _fen: &str) -> OracleResult<TablebaseEntry> {
            Ok(TablebaseEntry {
                outcome: TablebaseOutcome::Win,
                distance: Some(16),
                best_move: None,
            })
        }
    }

    const FEN: &str = "8/8/3k4/2R5/3K4/8/8/8 w - - 0 1";

    #[test]
    fn test_no_oracles_answer_nothing() {
        let mut oracles = Oracles::none();
        assert!(oracles.probe(FEN).is_none());
        assert!(oracles.consult(FEN, Ply::from_id(1111687423), 0).is_none());
        assert_eq!(oracles.reference_name(), None);
    }

    #[test]
    fn test_agreement_compares_squares() {
        let mut oracles = Oracles::new(Some(Box::new(FixedEngine("c5d5"))), None);
        let agreed = oracles.consult(FEN, Ply::from_id(1111687423), 3).unwrap();
        assert!(agreed.agreed);
        assert_eq!(agreed.ply_index, 3);

        let differs = oracles.consult(FEN, Ply::from_id(1112670463), 4).unwrap();
        assert!(!differs.agreed);
        assert_eq!(differs.suggested, "c5d5");
    }

    #[test]
    fn test_dead_engine_is_dropped() {
        let mut oracles = Oracles::new(Some(Box::new(DeadEngine)), None);
        assert!(oracles.consult(FEN, Ply::from_id(1111687423), 0).is_none());
        assert!(!oracles.has_reference());
    }

    #[test]
    fn test_tablebase_errors_become_none() {
        let mut oracles = Oracles::new(None, Some(Box::new(BrokenTablebase)));
        assert!(oracles.probe(FEN).is_none());
        assert!(oracles.has_tablebase());

        let mut oracles = Oracles::new(None, Some(Box::new(WinningTablebase)));
        assert_eq!(oracles.probe(FEN).unwrap().distance, Some(16));
    }
}
