//! # Board State - 0x88 Cells with Reversible Moves
//!
//! ## Overview
//!
//! [`Board`] owns a fixed 128-cell array mapping 0x88 square → [`PieceCode`], `-1` everywhere
//! except occupied squares. Pad cells (`square & 0x88 != 0`) are never written.
//!
//! ## Construction
//!
//! - [`Board::from_placement`] - explicit (square → piece) map, validated up front so a board is
//!   either fully built or not built at all
//! - [`Board::for_ending`] - canonical layout of an [`Ending`]
//! - [`Board::random_for_ending`] - random legal placement of an ending's material
//! - [`Board::from_fen`] - standard FEN text
//!
//! ## Reversible Application
//!
//! Search rolls one board forward and back along its selection/rollout path instead of cloning it
//! per node. Every applied ply pushes an [`UndoInfo`] (the ply itself carries the captured piece,
//! the record adds the clocks it overwrote), and [`Board::undo_move`] pops it:
//!
//! ```rust,ignore
//! let ply = board.apply_move(0x00, 0x07)?;   // Ra1-h1
//! board.undo_move()?;                        // cell-for-cell identical again
//! ```
//!
//! [`Board::apply_move`] is the validated entry point: it rejects a move without mutating anything
//! when the origin is empty, the piece belongs to the side not to move, the destination is not a
//! geometric displacement of that piece, or the destination holds a king.

use crate::constants::*;
use crate::error::{EngineError, EngineResult};
use crate::geometry::{file_of, is_on_board, king_distance, rank_of, square_at};
use crate::move_gen::{is_in_check, is_pseudo_legal_displacement};
use crate::ply::Ply;
use crate::types::*;
use rand::Rng;

const RANDOM_PLACEMENT_ATTEMPTS: usize = 1000;

/// Information needed to undo a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    pub ply: Ply,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Mutable endgame position on a 0x88 board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [PieceCode; BOARD_CELLS],
    side_to_move: Side,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<UndoInfo>,
}

impl Board {
    fn empty() -> Board {
        Board {
            cells: [EMPTY; BOARD_CELLS],
            side_to_move: Side::White,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Build a board from an explicit (square → piece code) placement, white to move
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidSquare`] for pad cells or indices beyond 127
    /// - [`EngineError::InvalidPiece`] for codes outside the piece table
    /// - [`EngineError::SquareOccupied`] / [`EngineError::DuplicatePiece`] for double placements
    /// - [`EngineError::MissingKing`] when a side has no king
    pub fn from_placement<I>(placement: I) -> EngineResult<Board>
    where
        I: IntoIterator<Item = (Square, PieceCode)>,
    {
        let mut board = Board::empty();
        let mut placed = [false; PIECE_CODES];

        for (square, code) in placement {
            if !is_on_board(square as i16) {
                return Err(EngineError::InvalidSquare {
                    square: square as u32,
                });
            }
            if !is_valid_code(code) {
                return Err(EngineError::InvalidPiece { code: code as i32 });
            }
            if board.cells[square as usize] != EMPTY {
                return Err(EngineError::SquareOccupied { square });
            }
            if placed[code as usize] {
                return Err(EngineError::DuplicatePiece { code });
            }
            placed[code as usize] = true;
            board.cells[square as usize] = code;
        }

        for side in [Side::White, Side::Black] {
            if !placed[side.king_code() as usize] {
                return Err(EngineError::MissingKing { side });
            }
        }

        Ok(board)
    }

    /// Canonical starting layout of an ending, white to move
    pub fn for_ending(ending: Ending) -> EngineResult<Board> {
        Board::from_placement(ending.layout().iter().copied())
    }

    /// Random legal placement of an ending's material, white to move
    ///
    /// Kings never touch, black is not in check, and pawns avoid the first and last rank. Falls
    /// back to the canonical layout if no placement is found within a bounded number of draws.
    pub fn random_for_ending<R: Rng + ?Sized>(ending: Ending, rng: &mut R) -> EngineResult<Board> {
        for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
            let mut placement: Vec<(Square, PieceCode)> = Vec::with_capacity(4);
            for code in ending.pieces() {
                let square = loop {
                    let file = rng.random_range(0..8u8);
                    let rank = rng.random_range(0..8u8);
                    if kind_of(code) == PieceKind::Pawn && (rank == 0 || rank == 7) {
                        continue;
                    }
                    let Some(square) = square_at(file, rank) else {
                        continue;
                    };
                    if placement.iter().all(|&(taken, _)| taken != square) {
                        break square;
                    }
                };
                placement.push((square, code));
            }

            let board = Board::from_placement(placement)?;
            if board.is_plausible_start() {
                return Ok(board);
            }
        }

        tracing::warn!("[BOARD] No random {} placement found, using canonical layout", ending);
        Board::for_ending(ending)
    }

    fn is_plausible_start(&self) -> bool {
        match (self.king_square(Side::White), self.king_square(Side::Black)) {
            (Some(white), Some(black)) => {
                king_distance(white, black) > 1 && !is_in_check(self, self.side_to_move.opposite())
            }
            _ => false,
        }
    }

    /// Parse a FEN position
    ///
    /// Piece identities are assigned from the piece table: kings 4/28, queens 3/27, rooks 0,7 /
    /// 24,31, bishops by square colour, knights 1,6 / 25,30, pawns by file with any free pawn code
    /// as fallback. Castling and en-passant fields are ignored.
    pub fn from_fen(fen: &str) -> EngineResult<Board> {
        let invalid = |reason: &str| EngineError::InvalidFen {
            fen: fen.to_string(),
            reason: reason.to_string(),
        };

        let mut fields = fen.split_whitespace();
        let placement_field = fields.next().ok_or_else(|| invalid("empty FEN"))?;
        let ranks: Vec<&str> = placement_field.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("expected 8 ranks"));
        }

        let mut taken = [false; PIECE_CODES];
        let mut placement = Vec::new();
        for (index, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - index as u8;
            let mut file = 0u8;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(invalid(&format!("bad empty-square count '{c}'")));
                    }
                    file = file
                        .checked_add(skip as u8)
                        .filter(|&next| next <= 8)
                        .ok_or_else(|| invalid("rank overflows 8 files"))?;
                    continue;
                }
                let square = square_at(file, rank).ok_or_else(|| invalid("rank overflows 8 files"))?;
                let code = assign_code(c, square, &mut taken)
                    .ok_or_else(|| invalid(&format!("unsupported or surplus piece '{c}'")))?;
                placement.push((square, code));
                file += 1;
            }
            if file != 8 {
                return Err(invalid("rank does not cover 8 files"));
            }
        }

        let mut board = Board::from_placement(placement)?;
        board.side_to_move = match fields.next() {
            None | Some("w") => Side::White,
            Some("b") => Side::Black,
            Some(_) => return Err(invalid("side to move must be 'w' or 'b'")),
        };
        let _castling = fields.next();
        let _en_passant = fields.next();
        if let Some(clock) = fields.next() {
            board.halfmove_clock = clock.parse().map_err(|_| invalid("bad half-move clock"))?;
        }
        if let Some(number) = fields.next() {
            board.fullmove_number = number.parse().map_err(|_| invalid("bad full-move number"))?;
        }
        Ok(board)
    }

    /// Same board with a different side to move
    pub fn with_side_to_move(mut self, side: Side) -> Board {
        self.side_to_move = side;
        self
    }

    /// Raw cell contents; [`EMPTY`] for empty or off-board squares
    #[inline]
    pub fn cell(&self, square: Square) -> PieceCode {
        if is_on_board(square as i16) {
            self.cells[square as usize]
        } else {
            EMPTY
        }
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<PieceCode> {
        let code = self.cell(square);
        (code != EMPTY).then_some(code)
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Plies applied since construction (and not undone)
    pub fn plies_played(&self) -> usize {
        self.history.len()
    }

    pub fn last_ply(&self) -> Option<Ply> {
        self.history.last().map(|undo| undo.ply)
    }

    /// Occupied squares in increasing square order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &code)| code != EMPTY)
            .map(|(square, &code)| (square as Square, code))
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = (Square, PieceCode)> + '_ {
        self.pieces().filter(move |&(_, code)| side_of(code) == side)
    }

    pub fn find_piece(&self, code: PieceCode) -> Option<Square> {
        self.pieces().find(|&(_, c)| c == code).map(|(square, _)| square)
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.find_piece(side.king_code())
    }

    /// Material of one side in centipawns, kings excluded
    pub fn material(&self, side: Side) -> i32 {
        self.pieces_of(side).map(|(_, code)| kind_of(code).value()).sum()
    }

    pub fn has_non_king_material(&self, side: Side) -> bool {
        self.pieces_of(side).any(|(_, code)| kind_of(code) != PieceKind::King)
    }

    /// True when the material is the ending's: the attacker owns exactly the ending's white
    /// pieces and the defender a bare king, whichever colour each side plays
    pub fn matches_ending(&self, ending: Ending) -> bool {
        fn kinds(codes: impl Iterator<Item = PieceCode>) -> Vec<u8> {
            let mut kinds: Vec<u8> = codes.map(|code| kind_of(code) as u8).collect();
            kinds.sort_unstable();
            kinds
        }
        let attacker = self.attacking_side();
        let expected = kinds(ending.pieces().filter(|&code| side_of(code) == Side::White));
        let own = kinds(self.pieces_of(attacker).map(|(_, code)| code));
        let defending = kinds(self.pieces_of(attacker.opposite()).map(|(_, code)| code));
        own == expected && defending == [PieceKind::King as u8]
    }

    /// Side owning the mating material (white when both or neither do)
    pub fn attacking_side(&self) -> Side {
        if self.material(Side::Black) > self.material(Side::White) {
            Side::Black
        } else {
            Side::White
        }
    }

    /// Kings only, or a single minor piece against a bare king
    pub fn is_insufficient_material(&self) -> bool {
        let mut others = self
            .pieces()
            .map(|(_, code)| kind_of(code))
            .filter(|&kind| kind != PieceKind::King);
        match (others.next(), others.next()) {
            (None, _) => true,
            (Some(PieceKind::Knight | PieceKind::Bishop), None) => true,
            _ => false,
        }
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_HALFMOVES
    }

    /// Validated move application
    ///
    /// Removes any piece at `to`, moves the piece at `from` there and flips the side to move.
    /// The board is untouched when an error is returned.
    pub fn apply_move(&mut self, from: Square, to: Square) -> EngineResult<Ply> {
        for square in [from, to] {
            if !is_on_board(square as i16) {
                return Err(EngineError::InvalidSquare {
                    square: square as u32,
                });
            }
        }
        let moved = self
            .piece_at(from)
            .ok_or(EngineError::NoPieceAtSquare { square: from })?;
        if side_of(moved) != self.side_to_move {
            return Err(EngineError::WrongSideToMove {
                square: from,
                side: self.side_to_move,
            });
        }
        let target = self.cell(to);
        if target != EMPTY && kind_of(target) == PieceKind::King {
            return Err(EngineError::KingCapture { from, to });
        }
        if !is_pseudo_legal_displacement(self, from, to) {
            return Err(EngineError::IllegalDisplacement { from, to });
        }

        let ply = Ply::encode(from, to, moved, target);
        self.make_move(ply);
        Ok(ply)
    }

    /// Reverse the last applied move, restoring any captured piece
    pub fn undo_move(&mut self) -> EngineResult<Ply> {
        self.unmake_move().ok_or(EngineError::NothingToUndo)
    }

    /// Apply a generator-produced ply without validation
    pub(crate) fn make_move(&mut self, ply: Ply) {
        debug_assert_eq!(self.cells[ply.from() as usize], ply.moved());
        debug_assert_eq!(self.cells[ply.to() as usize], ply.target());

        self.history.push(UndoInfo {
            ply,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        });

        self.cells[ply.to() as usize] = ply.moved();
        self.cells[ply.from() as usize] = EMPTY;

        if ply.is_capture() || kind_of(ply.moved()) == PieceKind::Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if side_of(ply.moved()) == Side::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.opposite();
    }

    pub(crate) fn unmake_move(&mut self) -> Option<Ply> {
        let undo = self.history.pop()?;
        let ply = undo.ply;
        self.cells[ply.from() as usize] = ply.moved();
        self.cells[ply.to() as usize] = ply.target();
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.side_to_move = self.side_to_move.opposite();
        Some(ply)
    }

    /// Export the position as FEN
    pub fn to_fen(&self) -> String {
        let mut placement = String::with_capacity(64);
        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                let square = (rank << 4) | file;
                match self.cells[square as usize] {
                    EMPTY => empty_run += 1,
                    code => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(fen_letter(code));
                    }
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        format!(
            "{} {} - - {} {}",
            placement,
            self.side_to_move.fen_char(),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn assign_code(letter: char, square: Square, taken: &mut [bool; PIECE_CODES]) -> Option<PieceCode> {
    let dark_square = (file_of(square) + rank_of(square)) % 2 == 0;
    let candidates: Vec<PieceCode> = match letter {
        'K' => vec![WHITE_KING],
        'Q' => vec![WHITE_QUEEN],
        'R' => vec![WHITE_QUEEN_ROOK, WHITE_KING_ROOK],
        'N' => vec![WHITE_QUEEN_KNIGHT, WHITE_KING_KNIGHT],
        'B' if dark_square => vec![WHITE_QUEEN_BISHOP, WHITE_KING_BISHOP],
        'B' => vec![WHITE_KING_BISHOP, WHITE_QUEEN_BISHOP],
        'k' => vec![BLACK_KING],
        'q' => vec![BLACK_QUEEN],
        'r' => vec![BLACK_QUEEN_ROOK, BLACK_KING_ROOK],
        'n' => vec![BLACK_QUEEN_KNIGHT, BLACK_KING_KNIGHT],
        'b' if dark_square => vec![BLACK_KING_BISHOP, BLACK_QUEEN_BISHOP],
        'b' => vec![BLACK_QUEEN_BISHOP, BLACK_KING_BISHOP],
        'P' | 'p' => {
            let base = if letter == 'P' { WHITE_PAWN_A } else { BLACK_PAWN_A };
            let by_file = base + file_of(square) as PieceCode;
            std::iter::once(by_file).chain(base..base + 8).collect()
        }
        _ => return None,
    };

    let code = candidates.into_iter().find(|&code| !taken[code as usize])?;
    taken[code as usize] = true;
    Some(code)
}
