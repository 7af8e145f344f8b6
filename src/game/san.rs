//! Standard Algebraic Notation for engine plies
//!
//! SAN depends on the position before the move: disambiguation needs the other legal moves of
//! the same piece kind, and the `+`/`#` suffix needs the position after it. [`san`] therefore
//! plays the move on the board, inspects the reply position and takes the move back.
//!
//! Promotion, castling and en passant never occur in the supported endings.

use endgame_engine::geometry::{file_of, rank_of, square_name};
use endgame_engine::move_gen::{has_legal_move, is_in_check, legal_moves};
use endgame_engine::types::kind_of;
use endgame_engine::{Board, EngineResult, PieceKind, Ply};

/// SAN of `ply` in the current position
///
/// # Arguments
///
/// * `board` - Position with `ply` legal for the side to move; returned unchanged
/// * `ply` - Move to render
///
/// # Examples
///
/// ```rust,ignore
/// // 8/8/3k4/2R5/3K4/8/8/8 w
/// assert_eq!(san(&mut board, rook_to_d5)?, "Rd5+");
/// ```
pub fn san(board: &mut Board, ply: Ply) -> EngineResult<String> {
    let side = board.side_to_move();
    let kind = kind_of(ply.moved());

    let mut text = String::with_capacity(8);
    match kind.letter() {
        Some(letter) => {
            text.push(letter);
            if kind != PieceKind::King {
                text.push_str(&disambiguation(board, ply, kind));
            }
        }
        None => {
            if ply.is_capture() {
                text.push(file_char(ply.from()));
            }
        }
    }
    if ply.is_capture() {
        text.push('x');
    }
    text.push_str(&square_name(ply.to()));

    board.apply_move(ply.from(), ply.to())?;
    let opponent = side.opposite();
    if is_in_check(board, opponent) {
        text.push(if has_legal_move(board, opponent) { '+' } else { '#' });
    }
    board.undo_move()?;

    Ok(text)
}

/// Origin file, rank or square needed to tell `ply` apart from same-kind moves to its square
fn disambiguation(board: &mut Board, ply: Ply, kind: PieceKind) -> String {
    let side = board.side_to_move();
    let rivals: Vec<Ply> = legal_moves(board, side)
        .into_iter()
        .filter(|other| other.to() == ply.to() && other.from() != ply.from() && kind_of(other.moved()) == kind)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|other| file_of(other.from()) != file_of(ply.from())) {
        return file_char(ply.from()).to_string();
    }
    if rivals.iter().all(|other| rank_of(other.from()) != rank_of(ply.from())) {
        return rank_char(ply.from()).to_string();
    }
    square_name(ply.from())
}

fn file_char(square: u8) -> char {
    char::from(b'a' + file_of(square))
}

fn rank_char(square: u8) -> char {
    char::from(b'1' + rank_of(square))
}
