/// The error type for [`RulesPosition::load()`](crate::RulesPosition::load), i.e. for
/// turning serialized game notation into a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionError {
    InvalidFen { fen: String, reason: String },
    UnreadableMove { ply: usize, token: String },
    IllegalMove { ply: usize, san: String },
}

impl std::error::Error for PositionError {}

impl std::fmt::Display for PositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionError::InvalidFen { fen, reason } => {
                write!(f, "Could not set up a position from FEN '{}': {}", fen, reason)
            }
            PositionError::UnreadableMove { ply, token } => write!(
                f,
                "The token '{}' at ply {} is not a move in standard algebraic notation",
                token, ply
            ),
            PositionError::IllegalMove { ply, san } => {
                write!(f, "The move {} at ply {} is not legal in that position", san, ply)
            }
        }
    }
}

/// The error type for setting up a game from the lobby.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    GameNotFound { code: String },
    InvalidGameMode { code: String, mode: String },
    MissingMatch,
}

impl std::error::Error for SetupError {}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::GameNotFound { code } => write!(f, "There is no game called '{}'", code),
            SetupError::InvalidGameMode { code, mode } => {
                write!(f, "The game '{}' cannot be played in mode '{}'", code, mode)
            }
            SetupError::MissingMatch => {
                write!(f, "Online games need a match to join, but none was given")
            }
        }
    }
}
