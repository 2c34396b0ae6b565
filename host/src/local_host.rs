use std::collections::VecDeque;

use tabletop::{
    BoardProps, ChessPosition, ChessState, MatchContext, MoveCommand, MoveDispatch, Outcome,
    PlayerId, PositionError, RulesPosition, Side, Winner,
};
use tracing::{debug, info, warn};

/// A move command waiting to be applied, tagged with the seat that sent it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuedMove {
    pub player: PlayerId,
    pub command: MoveCommand,
}

/// What became of a queued move once the host got to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Applied { player: PlayerId, san: String },
    NotYourTurn { player: PlayerId },
    GameOver { player: PlayerId },
    Illegal { player: PlayerId, err: PositionError },
    UnknownMove { player: PlayerId, name: String },
}

/// An in-process stand-in for the host framework of a two-player chess match.
///
/// Boards hand moves to a [`Seat`]. Nothing changes until [`LocalHost::pump()`]
/// applies the queued moves in the order they were sent.
#[derive(Clone, Debug)]
pub struct LocalHost {
    position: ChessPosition,
    ctx: MatchContext,
    queue: VecDeque<QueuedMove>,
}

/// The move-dispatch interface of one player.
pub struct Seat<'a> {
    host: &'a mut LocalHost,
    player: PlayerId,
}

impl MoveDispatch for Seat<'_> {
    fn make_move(&mut self, san: &str) {
        debug!(player = %self.player, %san, "Queued move");
        self.host.queue.push_back(QueuedMove {
            player: self.player,
            command: MoveCommand::chess_move(san),
        });
    }
}

impl LocalHost {
    /// Starts a match from PGN movetext; an empty string is the initial position.
    pub fn new(start: &str) -> Result<Self, PositionError> {
        let position = ChessPosition::load(start)?;
        let mut host = Self {
            position,
            ctx: MatchContext::default(),
            queue: VecDeque::new(),
        };
        host.update_ctx();
        host.ctx.turn = host.position.sans().len() as u32;
        Ok(host)
    }

    pub fn seat(&mut self, player: PlayerId) -> Seat<'_> {
        Seat { host: self, player }
    }

    pub fn state(&self) -> ChessState {
        ChessState {
            pgn: self.position.pgn(),
        }
    }

    pub fn ctx(&self) -> &MatchContext {
        &self.ctx
    }

    pub fn position(&self) -> &ChessPosition {
        &self.position
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The props a board for `player` sees. A seat is active while the game
    /// is running and it is that seat's turn.
    pub fn props_for(&self, player: PlayerId) -> BoardProps<ChessState> {
        BoardProps {
            state: self.state(),
            ctx: self.ctx.clone(),
            player_id: Some(player),
            is_active: self.ctx.winner.is_none() && self.ctx.current_player == player,
        }
    }

    /// Applies all queued moves, oldest first.
    pub fn pump(&mut self) -> Vec<MoveResult> {
        let mut results = Vec::with_capacity(self.queue.len());
        while let Some(queued) = self.queue.pop_front() {
            let result = self.apply(queued);
            match &result {
                MoveResult::Applied { player, san } => {
                    info!(%player, %san, turn = self.ctx.turn, "Applied move")
                }
                rejected => warn!(?rejected, "Rejected move"),
            }
            results.push(result);
        }
        results
    }

    fn apply(&mut self, queued: QueuedMove) -> MoveResult {
        let QueuedMove { player, command } = queued;
        if self.ctx.winner.is_some() {
            return MoveResult::GameOver { player };
        }
        if player != self.ctx.current_player {
            return MoveResult::NotYourTurn { player };
        }
        let Some(san) = command.san() else {
            return MoveResult::UnknownMove {
                player,
                name: command.name,
            };
        };
        if let Err(err) = self.position.play(san) {
            return MoveResult::Illegal { player, err };
        }
        let san = self.position.sans().last().cloned().unwrap_or_default();
        self.ctx.turn += 1;
        self.update_ctx();
        MoveResult::Applied { player, san }
    }

    fn update_ctx(&mut self) {
        self.ctx.current_player = match self.position.turn() {
            Side::White => PlayerId(0),
            Side::Black => PlayerId(1),
        };
        self.ctx.winner = self.position.outcome().map(|outcome| match outcome {
            Outcome::Decisive {
                winner: Side::White,
            } => Winner::White,
            Outcome::Decisive {
                winner: Side::Black,
            } => Winner::Black,
            Outcome::Draw => Winner::Draw,
        });
    }
}
