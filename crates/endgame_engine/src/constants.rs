//! # Endgame Engine Constants - Piece Table, 0x88 Geometry & Search Parameters
//!
//! ## Overview
//!
//! This module centralizes the fixed tables every other part of the engine agrees on: the piece-code
//! table, the 0x88 board geometry, movement direction vectors, material values used by the cut-off
//! evaluation, and the default tuning of the Monte-Carlo search.
//!
//! ## Piece Codes Are Piece Identities
//!
//! A piece code is not a "type + colour" tag. It is the index of the piece in the standard chess
//! starting array, so the white queen's rook is always `0` and the black king is always `28`:
//!
//! ```text
//!  0  1  2  3  4  5  6  7     R  N  B  Q  K  B  N  R   (white back rank)
//!  8  9 10 11 12 13 14 15     P  P  P  P  P  P  P  P   (white pawns)
//! 16 17 18 19 20 21 22 23     p  p  p  p  p  p  p  p   (black pawns)
//! 24 25 26 27 28 29 30 31     r  n  b  q  k  b  n  r   (black back rank)
//! ```
//!
//! Identity codes keep the packed move identifier meaningful across a whole game: a ply names the
//! exact piece that moved and the exact piece that was captured. Codes below 16 are white. `-1`
//! ([`EMPTY`]) marks an empty square or "no captured piece".
//!
//! ## The 0x88 Layout
//!
//! The board is a 128-cell array laid out as 8 ranks of 16 cells. The low nibble is the file, bits
//! 4-6 are the rank, and the right half of every rank is padding. A square index `sq` is on the
//! real board iff `sq & 0x88 == 0`, so a ray that walks off the edge lands in a pad cell (or beyond
//! 127) and is caught by a single mask test instead of coordinate bounds checks:
//!
//! ```text
//! rank 8: 0x70 .. 0x77 | 0x78 .. 0x7F (pad)
//! ...
//! rank 1: 0x00 .. 0x07 | 0x08 .. 0x0F (pad)
//! ```
//!
//! Direction vectors are therefore `±1` along a rank, `±16` along a file, and `±15`/`±17` along the
//! diagonals.
//!
//! ## Further Reading
//!
//! - **0x88**: https://www.chessprogramming.org/0x88
//! - **UCT**: https://www.chessprogramming.org/UCT
//! - **Mop-up evaluation**: https://www.chessprogramming.org/Mop-up_Evaluation

/// Piece code stored in a board cell.
pub type PieceCode = i8;

/// Square index on the 0x88 board.
pub type Square = u8;

pub const EMPTY: PieceCode = -1;

pub const BOARD_CELLS: usize = 128;
pub const OFF_BOARD_MASK: u8 = 0x88;
pub const PIECE_CODES: usize = 32;
pub const FIRST_BLACK_CODE: PieceCode = 16;

pub const WHITE_QUEEN_ROOK: PieceCode = 0;
pub const WHITE_QUEEN_KNIGHT: PieceCode = 1;
pub const WHITE_QUEEN_BISHOP: PieceCode = 2;
pub const WHITE_QUEEN: PieceCode = 3;
pub const WHITE_KING: PieceCode = 4;
pub const WHITE_KING_BISHOP: PieceCode = 5;
pub const WHITE_KING_KNIGHT: PieceCode = 6;
pub const WHITE_KING_ROOK: PieceCode = 7;
pub const WHITE_PAWN_A: PieceCode = 8;

pub const BLACK_PAWN_A: PieceCode = 16;
pub const BLACK_QUEEN_ROOK: PieceCode = 24;
pub const BLACK_QUEEN_KNIGHT: PieceCode = 25;
pub const BLACK_QUEEN_BISHOP: PieceCode = 26;
pub const BLACK_QUEEN: PieceCode = 27;
pub const BLACK_KING: PieceCode = 28;
pub const BLACK_KING_BISHOP: PieceCode = 29;
pub const BLACK_KING_KNIGHT: PieceCode = 30;
pub const BLACK_KING_ROOK: PieceCode = 31;

pub const N: i16 = 16;
pub const S: i16 = -16;
pub const E: i16 = 1;
pub const W: i16 = -1;
pub const NE: i16 = N + E;
pub const NW: i16 = N + W;
pub const SE: i16 = S + E;
pub const SW: i16 = S + W;

pub const ROOK_DIRS: [i16; 4] = [N, E, S, W];
pub const BISHOP_DIRS: [i16; 4] = [NE, SE, SW, NW];
pub const QUEEN_DIRS: [i16; 8] = [N, E, S, W, NE, SE, SW, NW];
pub const KING_DIRS: [i16; 8] = QUEEN_DIRS;
pub const KNIGHT_DIRS: [i16; 8] = [
    N + N + E, N + N + W, S + S + E, S + S + W,
    E + E + N, E + E + S, W + W + N, W + W + S,
];

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 300;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Half-moves without capture or pawn move after which the game is drawn.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

pub const DEFAULT_ITERATIONS: u32 = 2000;
pub const DEFAULT_ROLLOUT_DEPTH: u32 = 60;
pub const DEFAULT_EXPLORATION: f64 = std::f64::consts::SQRT_2;
pub const DEFAULT_KING_APPROACH_THRESHOLD: u8 = 3;

pub const WIN_REWARD: f64 = 1.0;
pub const DRAW_REWARD: f64 = 0.5;
pub const LOSS_REWARD: f64 = 0.0;
/// Reward lost per rollout ply before a mate, so faster mates score higher.
pub const MATE_DEPTH_PENALTY: f64 = 0.002;
pub const MIN_MATE_REWARD: f64 = 0.75;
/// Centipawn scale of the logistic squash applied to cut-off evaluations.
pub const EVAL_SCALE: f64 = 400.0;

pub const FILE_NAMES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub const RANK_NAMES: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];
