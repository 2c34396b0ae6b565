use tracing::{debug, warn};

use crate::{
    initial_cell, BoardInteraction, BoardProps, ChessPosition, ChessState, ClickOutcome,
    Highlight, MatchContext, MoveDispatch, Piece, PlayerId, PositionError, RulesPosition, Side, Square, Turn,
    Winner,
};

/// One cell of the rendered grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SquareView {
    pub square: Square,
    pub dark: bool,
    pub highlight: Option<Highlight>,
}

/// A piece to draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PieceToken {
    pub square: Square,
    pub piece: Piece,
    /// Where this piece stood at the start of the game. Stable across moves,
    /// so renderers can use it to animate the token instead of redrawing it.
    pub key: Square,
}

/// The line shown under the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Check,
    Won(Side),
    Draw,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Check => write!(f, "CHECK"),
            Status::Won(Side::White) => write!(f, "White won!"),
            Status::Won(Side::Black) => write!(f, "Black won!"),
            Status::Draw => write!(f, "Draw!"),
        }
    }
}

/// The render tree of a chess board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    /// All 64 squares, rank 8 first, each rank from the a file to the h file.
    pub squares: Vec<SquareView>,
    /// Rank 1 first, each rank from the a file to the h file.
    pub pieces: Vec<PieceToken>,
    pub status: Option<Status>,
}

impl BoardView {
    pub fn square(&self, square: Square) -> &SquareView {
        let row = usize::from(7 - square.rank());
        &self.squares[row * 8 + usize::from(square.file())]
    }

    pub fn piece_at(&self, square: Square) -> Option<&PieceToken> {
        self.pieces.iter().find(|token| token.square == square)
    }
}

/// A chess board bound to the host framework.
///
/// Owns the position loaded from the host's game state and the click
/// handler; everything shown is derived from these on [`Self::render()`].
#[derive(Clone, Debug)]
pub struct ChessBoard<P = ChessPosition> {
    position: P,
    interaction: BoardInteraction,
    ctx: MatchContext,
    player_id: Option<PlayerId>,
    is_active: bool,
}

impl<P: RulesPosition> ChessBoard<P> {
    pub fn new(props: BoardProps<ChessState>) -> Result<Self, PositionError> {
        let position = P::load(&props.state.pgn)?;
        Ok(Self {
            position,
            interaction: BoardInteraction::new(),
            ctx: props.ctx,
            player_id: props.player_id,
            is_active: props.is_active,
        })
    }

    /// Takes a new snapshot from the host. The selection is always cleared.
    ///
    /// Game state that cannot be loaded is logged and the previous position
    /// is kept.
    pub fn receive_props(&mut self, props: BoardProps<ChessState>) {
        match P::load(&props.state.pgn) {
            Ok(position) => self.position = position,
            Err(err) => warn!(%err, pgn = %props.state.pgn, "Could not load game state"),
        }
        self.interaction.on_external_state_changed();
        self.ctx = props.ctx;
        self.player_id = props.player_id;
        self.is_active = props.is_active;
        debug!(player = ?self.player_id, active = self.is_active, "Received props");
    }

    pub fn click<D: MoveDispatch + ?Sized>(&mut self, square: Square, moves: &mut D) -> ClickOutcome {
        let turn = Turn {
            side: self.ctx.current_player.chess_side(),
            is_active: self.is_active,
        };
        self.interaction
            .on_square_clicked(&self.position, turn, square, moves)
    }

    pub fn position(&self) -> &P {
        &self.position
    }

    pub fn selected(&self) -> Option<Square> {
        self.interaction.selected()
    }

    pub fn ctx(&self) -> &MatchContext {
        &self.ctx
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn render(&self) -> BoardView {
        let highlights = self.interaction.highlights(&self.position);
        let squares = Square::all_top_down()
            .map(|square| SquareView {
                square,
                dark: square.is_dark(),
                highlight: highlights.get(&square).copied(),
            })
            .collect();

        let mut pieces = Vec::new();
        for rank in 0..8 {
            for file in 0..8 {
                let Some(square) = Square::new(file, rank) else {
                    continue;
                };
                if let Some(piece) = self.position.piece_at(square) {
                    pieces.push(PieceToken {
                        square,
                        piece,
                        key: initial_cell(&self.position, square),
                    });
                }
            }
        }

        BoardView {
            squares,
            pieces,
            status: self.status(),
        }
    }

    fn status(&self) -> Option<Status> {
        match self.ctx.winner {
            Some(Winner::White) => Some(Status::Won(Side::White)),
            Some(Winner::Black) => Some(Status::Won(Side::Black)),
            Some(Winner::Draw) => Some(Status::Draw),
            None => self.position.is_check().then_some(Status::Check),
        }
    }
}
