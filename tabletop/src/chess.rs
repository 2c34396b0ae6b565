use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, File, Move, Position, Rank, Role};
use tracing::trace;

use crate::{LegalMove, Outcome, Piece, PieceKind, PlayedMove, PositionError, RulesPosition, Side, Square};

/// A chess position backed by `shakmaty`, together with the moves that led to it.
#[derive(Clone, Debug, Default)]
pub struct ChessPosition {
    position: Chess,
    /// Where the game started, if not from the standard initial position.
    setup: Option<Setup>,
    history: Vec<PlayedMove>,
    sans: Vec<String>,
}

/// A custom starting position, written back as PGN `SetUp`/`FEN` tags.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Setup {
    fen: String,
    fullmoves: u32,
    black_first: bool,
}

impl ChessPosition {
    /// Plays a move given in standard algebraic notation.
    pub fn play(&mut self, san: &str) -> Result<(), PositionError> {
        let ply = self.sans.len() + 1;
        let token = clean_token(san).ok_or_else(|| PositionError::UnreadableMove {
            ply,
            token: String::from(san),
        })?;
        let parsed: SanPlus = token.parse().map_err(|_| PositionError::UnreadableMove {
            ply,
            token: String::from(san),
        })?;
        let m = parsed
            .san
            .to_move(&self.position)
            .map_err(|_| PositionError::IllegalMove {
                ply,
                san: String::from(san),
            })?;
        self.push_move(&m);
        Ok(())
    }

    /// Every legal move for the side to move, in standard algebraic notation.
    pub fn legal_sans(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| SanPlus::from_move(self.position.clone(), m).to_string())
            .collect()
    }

    /// The game so far as numbered PGN movetext, e.g. `1. e4 e5 2. Nf3`.
    ///
    /// A game set up from a FEN is prefixed with `SetUp` and `FEN` tag pairs,
    /// so that [`RulesPosition::load()`] reproduces the same position.
    pub fn pgn(&self) -> String {
        let (first_move, offset) = match &self.setup {
            Some(setup) => (setup.fullmoves as usize, usize::from(setup.black_first)),
            None => (1, 0),
        };
        let mut result = match &self.setup {
            Some(setup) => format!("[SetUp \"1\"]\n[FEN \"{}\"]\n\n", setup.fen),
            None => String::new(),
        };
        for (idx, san) in self.sans.iter().enumerate() {
            let ply = idx + offset;
            let number = first_move + ply / 2;
            if ply % 2 == 0 {
                if idx > 0 {
                    result.push(' ');
                }
                result += &format!("{}. ", number);
            } else if idx == 0 {
                result += &format!("{}... ", number);
            } else {
                result.push(' ');
            }
            result += san;
        }
        result
    }

    /// The moves played so far, in standard algebraic notation.
    pub fn sans(&self) -> &[String] {
        &self.sans
    }

    fn from_fen(notation: &str) -> Result<Self, PositionError> {
        let invalid = |reason: String| PositionError::InvalidFen {
            fen: String::from(notation),
            reason,
        };
        let fen: Fen = notation.parse().map_err(|err| invalid(format!("{}", err)))?;
        let setup_fen = fen.to_string();
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|err| invalid(format!("{}", err)))?;
        let setup = Setup {
            fen: setup_fen,
            fullmoves: position.fullmoves().get(),
            black_first: position.turn() == Color::Black,
        };
        Ok(Self {
            position,
            setup: Some(setup),
            history: Vec::new(),
            sans: Vec::new(),
        })
    }

    fn from_pgn(notation: &str) -> Result<Self, PositionError> {
        let mut result = match fen_tag(notation) {
            Some(fen) => Self::from_fen(fen)?,
            None => Self::default(),
        };
        for token in movetext_tokens(notation) {
            result.play(&token)?;
        }
        trace!(plies = result.sans.len(), "Loaded PGN");
        Ok(result)
    }

    fn push_move(&mut self, m: &Move) {
        if let Some(from) = m.from() {
            self.history.push(PlayedMove {
                from: from_shakmaty(from),
                to: destination(m),
            });
        }
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m);
        self.sans.push(san.to_string());
    }
}

impl RulesPosition for ChessPosition {
    fn load(notation: &str) -> Result<Self, PositionError> {
        let notation = notation.trim();
        if is_fen(notation) {
            Self::from_fen(notation)
        } else {
            Self::from_pgn(notation)
        }
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.position
            .board()
            .piece_at(to_shakmaty(square))
            .map(|piece| Piece {
                side: side(piece.color),
                kind: match piece.role {
                    Role::Pawn => PieceKind::Pawn,
                    Role::Knight => PieceKind::Knight,
                    Role::Bishop => PieceKind::Bishop,
                    Role::Rook => PieceKind::Rook,
                    Role::Queen => PieceKind::Queen,
                    Role::King => PieceKind::King,
                },
            })
    }

    fn turn(&self) -> Side {
        side(self.position.turn())
    }

    fn legal_moves_from(&self, square: Square) -> Vec<LegalMove> {
        let from = to_shakmaty(square);
        let mut moves: Vec<Move> = self
            .position
            .legal_moves()
            .into_iter()
            .filter(|m| m.from() == Some(from))
            .collect();
        // A click names a square, not a piece, so of several promotions to the
        // same square the queen must come first.
        moves.sort_by_key(|m| !matches!(m.promotion(), None | Some(Role::Queen)));
        moves
            .iter()
            .map(|m| LegalMove {
                from: square,
                to: destination(m),
                san: SanPlus::from_move(self.position.clone(), m).to_string(),
            })
            .collect()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn outcome(&self) -> Option<Outcome> {
        self.position.outcome().map(|outcome| match outcome {
            shakmaty::Outcome::Decisive { winner } => Outcome::Decisive {
                winner: side(winner),
            },
            shakmaty::Outcome::Draw => Outcome::Draw,
        })
    }

    fn history(&self) -> &[PlayedMove] {
        &self.history
    }
}

fn side(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(
        File::new(u32::from(square.file())),
        Rank::new(u32::from(square.rank())),
    )
}

fn from_shakmaty(square: shakmaty::Square) -> Square {
    let file = square.file().char() as u8 - b'a';
    let rank = square.rank().char() as u8 - b'1';
    Square::new(file, rank).expect("shakmaty squares are always on the board")
}

/// Where the moving piece ends up. For castling that is the king's square on
/// the g or c file, not the rook's.
fn destination(m: &Move) -> Square {
    match *m {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() { File::G } else { File::C };
            from_shakmaty(shakmaty::Square::from_coords(file, king.rank()))
        }
        _ => from_shakmaty(m.to()),
    }
}

/// A FEN starts with the piece placement, eight ranks separated by slashes.
fn is_fen(notation: &str) -> bool {
    notation
        .split_whitespace()
        .next()
        .is_some_and(|board| board.matches('/').count() == 7)
}

/// The value of a `[FEN "..."]` tag pair, if the PGN has one.
fn fen_tag(pgn: &str) -> Option<&str> {
    let start = pgn.find("[FEN \"")? + "[FEN \"".len();
    let len = pgn[start..].find('"')?;
    Some(pgn[start..start + len].trim())
}

fn flush(current: &mut String, tokens: &mut Vec<String>) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

/// Splits PGN into the SAN tokens of its main line.
///
/// Tag pairs, comments, variations, move numbers, NAGs and the result are
/// skipped.
fn movetext_tokens(pgn: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_comment = false;
    let mut in_line_comment = false;
    let mut in_tag = false;
    let mut variation_depth = 0usize;

    for c in pgn.chars() {
        if in_line_comment {
            in_line_comment = c != '\n';
            continue;
        }
        if in_comment {
            in_comment = c != '}';
            continue;
        }
        if in_tag {
            in_tag = c != ']';
            continue;
        }
        match c {
            '{' => {
                flush(&mut current, &mut tokens);
                in_comment = true;
            }
            ';' => {
                flush(&mut current, &mut tokens);
                in_line_comment = true;
            }
            '[' if variation_depth == 0 => {
                flush(&mut current, &mut tokens);
                in_tag = true;
            }
            '(' => {
                flush(&mut current, &mut tokens);
                variation_depth += 1;
            }
            ')' => {
                flush(&mut current, &mut tokens);
                variation_depth = variation_depth.saturating_sub(1);
            }
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            c if variation_depth == 0 => current.push(c),
            _ => {}
        }
    }
    flush(&mut current, &mut tokens);

    tokens.iter().filter_map(|token| clean_token(token)).collect()
}

/// Strips move numbers and annotation glyphs. Returns `None` for tokens that
/// are not moves.
fn clean_token(token: &str) -> Option<String> {
    if matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*") || token.starts_with('$') {
        return None;
    }
    let without_number = token.trim_start_matches(|c: char| c.is_ascii_digit());
    let token = if without_number.starts_with('.') {
        without_number.trim_start_matches('.')
    } else {
        token
    };
    let token = token.trim_end_matches(|c: char| c == '!' || c == '?');
    if token.is_empty() {
        return None;
    }
    // Castling is sometimes written with zeros
    Some(token.replace('0', "O"))
}
