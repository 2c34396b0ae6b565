use serde::{Deserialize, Serialize};

use crate::{PositionError, Square};

/// The two sides of a chess game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "p")]
    Pawn,
    #[serde(rename = "n")]
    Knight,
    #[serde(rename = "b")]
    Bishop,
    #[serde(rename = "r")]
    Rook,
    #[serde(rename = "q")]
    Queen,
    #[serde(rename = "k")]
    King,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// The Unicode chess symbol for this piece.
    pub fn symbol(&self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// A move the rules engine allows in the current position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    /// For castling, this is the king's destination.
    pub to: Square,
    /// Standard algebraic notation, including check and mate suffixes.
    /// This is the identifier sent to the host framework.
    pub san: String,
}

/// A move that has already been played, as recorded in the game history.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayedMove {
    pub from: Square,
    pub to: Square,
}

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Decisive { winner: Side },
    Draw,
}

/// The queries the board components make against a rules engine.
///
/// Implementors own move legality. The board never mutates a position; it
/// only asks questions about it and reloads a new one when the host says the
/// game state changed.
pub trait RulesPosition: Sized {
    /// Builds a position from serialized game notation.
    fn load(notation: &str) -> Result<Self, PositionError>;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// The side whose turn it is according to the position itself.
    fn turn(&self) -> Side;

    /// All legal moves whose source is `square`. Empty for empty squares and
    /// for pieces of the side not to move.
    fn legal_moves_from(&self, square: Square) -> Vec<LegalMove>;

    fn is_check(&self) -> bool;

    fn outcome(&self) -> Option<Outcome>;

    /// The moves that led to this position, oldest first.
    fn history(&self) -> &[PlayedMove];
}

/// The legal moves for the current selection. Empty when nothing is selected.
pub fn legal_moves<P: RulesPosition>(position: &P, selected: Option<Square>) -> Vec<LegalMove> {
    match selected {
        Some(square) => position.legal_moves_from(square),
        None => Vec::new(),
    }
}

/// Whether `side` may select the piece on `square`: it must be one of their
/// own pieces with at least one legal move.
pub fn is_selectable<P: RulesPosition>(position: &P, square: Square, side: Side) -> bool {
    match position.piece_at(square) {
        Some(piece) if piece.side == side => !position.legal_moves_from(square).is_empty(),
        _ => false,
    }
}

/// Follows the move history backwards to find where the piece now standing
/// on `square` started the game.
///
/// Renderers use this as a stable identity for piece tokens, so that a token
/// can be animated from square to square instead of being recreated.
pub fn initial_cell<P: RulesPosition>(position: &P, square: Square) -> Square {
    position
        .history()
        .iter()
        .rev()
        .fold(square, |last_seen, mv| {
            if mv.to == last_seen {
                mv.from
            } else {
                last_seen
            }
        })
}
