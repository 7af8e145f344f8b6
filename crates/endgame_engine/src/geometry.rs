//! Square geometry on the 0x88 board
//!
//! Pure, allocation-free predicates over square indices:
//! - Square validation and (file, rank) indexing
//! - Rank / file / diagonal membership
//! - "Strictly between on a shared line" tests used by opposition detection
//! - Distance metrics used by the king-approach heuristic and the evaluation
//!
//! Every function is total: off-board inputs yield `false` (or `None`) instead of panicking.

use crate::constants::*;

/// Check if a square index lies on the real board
#[inline]
pub fn is_on_board(square: i16) -> bool {
    (0..BOARD_CELLS as i16).contains(&square) && (square as u8) & OFF_BOARD_MASK == 0
}

/// File (0-7) of a square
#[inline]
pub fn file_of(square: Square) -> u8 {
    square & 0x0F
}

/// Rank (0-7) of a square
#[inline]
pub fn rank_of(square: Square) -> u8 {
    square >> 4
}

/// Convert file and rank (0-7 each) to a square index
#[inline]
pub fn square_at(file: u8, rank: u8) -> Option<Square> {
    (file < 8 && rank < 8).then_some((rank << 4) | file)
}

/// Step from a square by a direction delta, staying on the board
#[inline]
pub fn offset(square: Square, delta: i16) -> Option<Square> {
    let target = square as i16 + delta;
    is_on_board(target).then_some(target as Square)
}

/// Algebraic name of a square, e.g. `"e4"`
pub fn square_name(square: Square) -> String {
    if !is_on_board(square as i16) {
        return "??".to_string();
    }
    let mut name = String::with_capacity(2);
    name.push(FILE_NAMES[file_of(square) as usize]);
    name.push(RANK_NAMES[rank_of(square) as usize]);
    name
}

/// Parse an algebraic square name such as `"e4"`
pub fn parse_square(name: &str) -> Option<Square> {
    let mut chars = name.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let file = FILE_NAMES.iter().position(|&c| c == file)? as u8;
    let rank = RANK_NAMES.iter().position(|&c| c == rank)? as u8;
    square_at(file, rank)
}

#[inline]
fn coords(square: Square) -> Option<(i16, i16)> {
    is_on_board(square as i16).then(|| (file_of(square) as i16, rank_of(square) as i16))
}

pub fn same_rank(a: Square, b: Square) -> bool {
    matches!((coords(a), coords(b)), (Some((_, ra)), Some((_, rb))) if ra == rb)
}

pub fn same_file(a: Square, b: Square) -> bool {
    matches!((coords(a), coords(b)), (Some((fa, _)), Some((fb, _))) if fa == fb)
}

/// Check if two squares share either diagonal
pub fn same_diagonal(a: Square, b: Square) -> bool {
    match (coords(a), coords(b)) {
        (Some((fa, ra)), Some((fb, rb))) => (fa - fb).abs() == (ra - rb).abs(),
        _ => false,
    }
}

/// Unit 0x88 step leading from `from` towards `to` along a shared line
///
/// Returns `None` when the squares coincide, are off the board, or share no rank, file or
/// diagonal.
pub fn line_step(from: Square, to: Square) -> Option<i16> {
    let (ff, fr) = coords(from)?;
    let (tf, tr) = coords(to)?;
    let (df, dr) = (tf - ff, tr - fr);
    if (df, dr) == (0, 0) {
        return None;
    }
    if df != 0 && dr != 0 && df.abs() != dr.abs() {
        return None;
    }
    Some(dr.signum() * N + df.signum() * E)
}

/// Check if `p` lies strictly between `a` and `b` on the rank, file or diagonal they share
///
/// Symmetric in `a` and `b`; `false` whenever the three squares are not colinear or any of them
/// is off the board.
///
/// # Examples
///
/// ```rust,ignore
/// // d5 sits between d4 and d6
/// assert!(is_between_on_line(0x43, 0x33, 0x53));
/// ```
pub fn is_between_on_line(p: Square, a: Square, b: Square) -> bool {
    if coords(p).is_none() {
        return false;
    }
    let Some(step) = line_step(a, b) else {
        return false;
    };
    let mut current = a;
    loop {
        match offset(current, step) {
            Some(next) if next == b => return false,
            Some(next) if next == p => return true,
            Some(next) => current = next,
            None => return false,
        }
    }
}

/// Chebyshev (king-move) distance between two squares
pub fn king_distance(a: Square, b: Square) -> u8 {
    let df = (file_of(a) as i16 - file_of(b) as i16).abs();
    let dr = (rank_of(a) as i16 - rank_of(b) as i16).abs();
    df.max(dr) as u8
}

/// Manhattan (rook-path) distance between two squares
pub fn manhattan_distance(a: Square, b: Square) -> u8 {
    let df = (file_of(a) as i16 - file_of(b) as i16).abs();
    let dr = (rank_of(a) as i16 - rank_of(b) as i16).abs();
    (df + dr) as u8
}

/// Manhattan distance from the four centre squares (0 in the centre, 6 in a corner)
pub fn center_distance(square: Square) -> u8 {
    let file = file_of(square) as i16;
    let rank = rank_of(square) as i16;
    let df = if file < 4 { 3 - file } else { file - 4 };
    let dr = if rank < 4 { 3 - rank } else { rank - 4 };
    (df + dr) as u8
}

/// Check if two kings stand in opposition: aligned with exactly one square between them
pub fn are_in_opposition(a: Square, b: Square) -> bool {
    let Some(step) = line_step(a, b) else {
        return false;
    };
    king_distance(a, b) == 2 && offset(a, step).is_some_and(|mid| is_between_on_line(mid, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const D4: Square = 0x33;
    const D5: Square = 0x43;
    const D6: Square = 0x53;
    const E5: Square = 0x44;

    #[test]
    fn test_off_board_detection() {
        assert!(is_on_board(0));
        assert!(is_on_board(0x77));
        assert!(!is_on_board(0x08));
        assert!(!is_on_board(0x78));
        assert!(!is_on_board(128));
        assert!(!is_on_board(-1));
    }

    #[test]
    fn test_square_names_roundtrip_on_real_squares() {
        assert_eq!(square_name(0), "a1");
        assert_eq!(square_name(7), "h1");
        assert_eq!(square_name(0x74), "e8");
        assert_eq!(parse_square("c5"), Some(0x42));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("a1x"), None);
    }

    #[test]
    fn test_between_on_file_rank_and_diagonal() {
        assert!(is_between_on_line(D5, D4, D6));
        assert!(is_between_on_line(0x02, 0x00, 0x07));
        assert!(is_between_on_line(0x22, 0x00, 0x77));
        assert!(!is_between_on_line(D4, D4, D6), "endpoints are not strictly between");
        assert!(!is_between_on_line(0x63, D4, D6), "beyond the endpoint");
    }

    #[test]
    fn test_between_is_symmetric() {
        for &(p, a, b) in &[(D5, D4, D6), (0x22, 0x00, 0x77), (E5, D4, D6), (0x11, 0x00, 0x05)] {
            assert_eq!(
                is_between_on_line(p, a, b),
                is_between_on_line(p, b, a),
                "asymmetric for p={p} a={a} b={b}"
            );
        }
    }

    #[test]
    fn test_between_false_when_not_colinear() {
        assert!(!is_between_on_line(E5, D4, D6));
        assert!(!is_between_on_line(0x12, 0x00, 0x21), "knight-shaped pair shares no line");
        assert!(!is_between_on_line(0x08, 0x00, 0x0F), "off-board input");
    }

    #[test]
    fn test_distances() {
        assert_eq!(king_distance(D4, D6), 2);
        assert_eq!(king_distance(0x00, 0x77), 7);
        assert_eq!(manhattan_distance(0x00, 0x77), 14);
        assert_eq!(center_distance(0x33), 0);
        assert_eq!(center_distance(0x00), 6);
        assert_eq!(center_distance(0x77), 6);
    }

    #[test]
    fn test_opposition() {
        assert!(are_in_opposition(D4, D6));
        assert!(are_in_opposition(0x31, 0x33), "rank opposition");
        assert!(are_in_opposition(0x00, 0x22), "diagonal opposition");
        assert!(!are_in_opposition(D4, D5), "adjacent kings");
        assert!(!are_in_opposition(D4, 0x63), "distant opposition is not direct opposition");
        assert!(!are_in_opposition(D4, 0x54));
    }
}
