//! Legal move generation on the 0x88 board
//!
//! Enumerates every ply available to a side, and filters out those that leave the mover's own
//! king attacked.
//!
//! ## Algorithm
//!
//! 1. Walk the board in increasing square order and emit pseudo-legal plies per piece
//!    (steppers in [`leaper`], sliders in [`sliding`], pawns in [`pawn`])
//! 2. For each candidate: make it, ask [`attack::is_in_check`] about the mover, unmake it
//! 3. Sort the survivors by identifier, i.e. by origin then destination
//!
//! The 0x88 layout makes the on-board test a single mask, so no precomputed tables are needed:
//! stepping off any edge lands on a pad cell or outside `0..128`.
//!
//! ## Scope
//!
//! Captures of a king are never generated. Castling, en passant and promotion are not part of
//! the endgames played here; a pawn that reaches the last rank simply has no further moves.

mod attack;
mod leaper;
mod pawn;
mod sliding;

pub use attack::{is_in_check, is_square_attacked};

use crate::board::Board;
use crate::constants::*;
use crate::ply::Ply;
use crate::types::*;

/// Emit the pseudo-legal plies of one piece
fn piece_moves(board: &Board, from: Square, code: PieceCode, moves: &mut Vec<Ply>) {
    match kind_of(code) {
        PieceKind::King => leaper::generate(board, from, code, &KING_DIRS, moves),
        PieceKind::Knight => leaper::generate(board, from, code, &KNIGHT_DIRS, moves),
        PieceKind::Rook => sliding::generate(board, from, code, &ROOK_DIRS, moves),
        PieceKind::Bishop => sliding::generate(board, from, code, &BISHOP_DIRS, moves),
        PieceKind::Queen => sliding::generate(board, from, code, &QUEEN_DIRS, moves),
        PieceKind::Pawn => pawn::generate(board, from, code, moves),
    }
}

/// All pseudo-legal plies of `side`, in board order
///
/// Pseudo-legal plies obey each piece's movement rule but may leave the mover's king attacked.
pub fn pseudo_legal_moves(board: &Board, side: Side) -> Vec<Ply> {
    let mut moves = Vec::with_capacity(32);
    for (from, code) in board.pieces_of(side) {
        piece_moves(board, from, code, &mut moves);
    }
    moves
}

/// Check if `to` is a geometric displacement of the piece standing on `from`
///
/// Used to validate externally supplied moves. The king-safety of the result is not considered.
pub fn is_pseudo_legal_displacement(board: &Board, from: Square, to: Square) -> bool {
    let Some(code) = board.piece_at(from) else {
        return false;
    };
    let mut moves = Vec::with_capacity(28);
    piece_moves(board, from, code, &mut moves);
    moves.iter().any(|ply| ply.to() == to)
}

/// All legal plies of `side`, sorted by identifier
///
/// The board is borrowed mutably to try each candidate in place; it is returned unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// let mut board = Board::for_ending(Ending::Krk)?;
/// let moves = legal_moves(&mut board, Side::White);
/// assert!(moves.iter().all(|ply| board.piece_at(ply.from()).is_some()));
/// ```
pub fn legal_moves(board: &mut Board, side: Side) -> Vec<Ply> {
    let mut moves = pseudo_legal_moves(board, side);
    moves.retain(|&ply| {
        board.make_move(ply);
        let safe = !is_in_check(board, side);
        board.unmake_move();
        safe
    });
    moves.sort_unstable();
    moves
}

/// Check if `side` has at least one legal ply
pub fn has_legal_move(board: &mut Board, side: Side) -> bool {
    let candidates = pseudo_legal_moves(board, side);
    candidates.into_iter().any(|ply| {
        board.make_move(ply);
        let safe = !is_in_check(board, side);
        board.unmake_move();
        safe
    })
}

/// Check if playing `ply` attacks the opponent's king
pub fn gives_check(board: &mut Board, ply: Ply) -> bool {
    let opponent = side_of(ply.moved()).opposite();
    board.make_move(ply);
    let check = is_in_check(board, opponent);
    board.unmake_move();
    check
}

/// In check with no legal reply
pub fn is_checkmate(board: &mut Board, side: Side) -> bool {
    is_in_check(board, side) && !has_legal_move(board, side)
}

/// Not in check with no legal reply
pub fn is_stalemate(board: &mut Board, side: Side) -> bool {
    !is_in_check(board, side) && !has_legal_move(board, side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(moves: &[Ply]) -> Vec<u32> {
        moves.iter().map(|ply| ply.id()).collect()
    }

    #[test]
    fn test_canonical_krk_move_count() {
        let mut board = Board::for_ending(Ending::Krk).unwrap();
        let moves = legal_moves(&mut board, Side::White);
        // Rook: a2-a8 (7) + b1-d1 (3); king: d1, d2, e2, f2, f1 (5)
        assert_eq!(moves.len(), 15);
    }

    #[test]
    fn test_legal_moves_are_sorted_and_unique() {
        let mut board = Board::for_ending(Ending::Krrk).unwrap();
        let moves = legal_moves(&mut board, Side::White);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(moves, sorted);
    }

    #[test]
    fn test_legal_moves_leave_board_unchanged() {
        let mut board = Board::for_ending(Ending::Kqk).unwrap();
        let before = board.clone();
        let _ = legal_moves(&mut board, Side::White);
        let _ = legal_moves(&mut board, Side::Black);
        assert_eq!(board, before);
    }

    #[test]
    fn test_king_cannot_step_into_rook_file() {
        // Ra1 covers the whole a-file
        let mut board = Board::from_placement([(0x00, WHITE_QUEEN_ROOK), (0x04, WHITE_KING), (0x71, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        let moves = legal_moves(&mut board, Side::Black);
        assert!(moves.iter().all(|ply| ply.to() & 0x0F != 0), "king walked onto the a-file");
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_black_king_moves_in_opposition_scenario() {
        let mut board = Board::from_placement([(51, WHITE_KING), (66, WHITE_QUEEN_ROOK), (83, BLACK_KING)]).unwrap();
        let moves = legal_moves(&mut board, Side::Black);
        // Rc5 covers the c-file and the fifth rank, Kd4 guards the rook
        let destinations: Vec<_> = moves.iter().map(|ply| ply.to()).collect();
        assert_eq!(destinations, vec![0x54, 0x63, 0x64]);
    }

    #[test]
    fn test_checkmate_and_stalemate_detection() {
        // Back-rank mate: Ra8, Kc6 vs kc8
        let mut mate = Board::from_placement([(0x70, WHITE_QUEEN_ROOK), (0x52, WHITE_KING), (0x72, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        assert!(is_checkmate(&mut mate, Side::Black));
        assert!(!is_stalemate(&mut mate, Side::Black));

        let mut stale = Board::from_placement([(0x51, WHITE_QUEEN), (0x32, WHITE_KING), (0x70, BLACK_KING)])
            .unwrap()
            .with_side_to_move(Side::Black);
        assert!(is_stalemate(&mut stale, Side::Black));
        assert!(!is_checkmate(&mut stale, Side::Black));
    }

    #[test]
    fn test_gives_check() {
        let mut board = Board::from_placement([(51, WHITE_KING), (66, WHITE_QUEEN_ROOK), (83, BLACK_KING)]).unwrap();
        let moves = legal_moves(&mut board, Side::White);
        let checks: Vec<_> = moves
            .iter()
            .copied()
            .filter(|&ply| gives_check(&mut board, ply))
            .collect();
        assert_eq!(ids(&checks), vec![1111687423, 1112670463]);
    }

    #[test]
    fn test_pawn_pushes_and_captures() {
        let board = Board::from_placement([
            (0x04, WHITE_KING),
            (0x14, WHITE_PAWN_A + 4),
            (0x25, BLACK_QUEEN_KNIGHT),
            (0x74, BLACK_KING),
        ])
        .unwrap();
        let moves = pseudo_legal_moves(&board, Side::White);
        let pawn: Vec<_> = moves.iter().filter(|ply| ply.from() == 0x14).map(|ply| ply.to()).collect();
        assert_eq!(pawn, vec![0x24, 0x34, 0x25]);
    }

    #[test]
    fn test_blocked_pawn_has_no_double_step() {
        let board = Board::from_placement([
            (0x04, WHITE_KING),
            (0x14, WHITE_PAWN_A + 4),
            (0x24, BLACK_QUEEN_KNIGHT),
            (0x74, BLACK_KING),
        ])
        .unwrap();
        let moves = pseudo_legal_moves(&board, Side::White);
        assert!(moves.iter().all(|ply| ply.from() != 0x14));
    }

    #[test]
    fn test_king_is_never_a_capture_target() {
        let board = Board::from_placement([(0x00, WHITE_QUEEN_ROOK), (0x22, WHITE_KING), (0x70, BLACK_KING)]).unwrap();
        let moves = pseudo_legal_moves(&board, Side::White);
        assert!(moves.iter().all(|ply| ply.target() != BLACK_KING));
        assert!(!is_pseudo_legal_displacement(&board, 0x00, 0x70));
    }
}
