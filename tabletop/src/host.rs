//! The typed boundary to the host framework, which owns turn order,
//! networking and persistence.
//!
//! Boards receive a [`BoardProps`] snapshot whenever the host's state changes
//! and talk back only through [`MoveDispatch`].

use serde::{Deserialize, Serialize};

use crate::Side;

/// A seat at the table, as numbered by the host framework.
///
/// Serialized as a string (`"0"`, `"1"`, ...) because that is how the host
/// refers to players on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// In chess, the first seat plays white.
    pub fn chess_side(self) -> Side {
        if self.0 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerId {
    type Error = std::num::ParseIntError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse().map(PlayerId)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> String {
        id.to_string()
    }
}

/// The winner reported by the host once the game is over.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "w")]
    White,
    #[serde(rename = "b")]
    Black,
    #[serde(rename = "d")]
    Draw,
}

/// Turn bookkeeping owned by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchContext {
    pub current_player: PlayerId,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub turn: u32,
}

impl Default for MatchContext {
    fn default() -> Self {
        Self {
            current_player: PlayerId(0),
            winner: None,
            turn: 0,
        }
    }
}

/// The chess game state as stored by the host: the game so far as PGN. An
/// empty string is the starting position; a game set up from a FEN carries it
/// in a `FEN` tag pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessState {
    #[serde(default)]
    pub pgn: String,
}

/// Everything a board is given on each state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardProps<S> {
    #[serde(rename = "G")]
    pub state: S,
    pub ctx: MatchContext,
    #[serde(default, rename = "playerID")]
    pub player_id: Option<PlayerId>,
    /// Whether this client may act right now.
    pub is_active: bool,
}

/// A move as handed to the host framework.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCommand {
    /// The name of the move function registered with the host.
    pub name: String,
    pub args: Vec<String>,
}

impl MoveCommand {
    pub const CHESS_MOVE: &'static str = "move";

    pub fn chess_move(san: &str) -> Self {
        Self {
            name: String::from(Self::CHESS_MOVE),
            args: vec![String::from(san)],
        }
    }

    /// The SAN argument of a chess move command.
    pub fn san(&self) -> Option<&str> {
        (self.name == Self::CHESS_MOVE)
            .then(|| self.args.first().map(String::as_str))
            .flatten()
    }
}

/// The host's move-dispatch interface.
///
/// Dispatching is fire-and-forget: the host applies the move later and
/// reports the result as new [`BoardProps`].
pub trait MoveDispatch {
    fn make_move(&mut self, san: &str);
}

impl MoveDispatch for Vec<MoveCommand> {
    fn make_move(&mut self, san: &str) {
        self.push(MoveCommand::chess_move(san));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_wire_format() {
        let json = r#"{
            "G": { "pgn": "1. e4 e5" },
            "ctx": { "currentPlayer": "1", "winner": null, "turn": 3 },
            "playerID": "1",
            "isActive": true
        }"#;
        let props: BoardProps<ChessState> = serde_json::from_str(json).unwrap();
        assert_eq!(props.state.pgn, "1. e4 e5");
        assert_eq!(props.ctx.current_player, PlayerId(1));
        assert_eq!(props.ctx.current_player.chess_side(), Side::Black);
        assert_eq!(props.player_id, Some(PlayerId(1)));
        assert!(props.is_active);

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(json["playerID"], "1");
        assert_eq!(json["isActive"], true);
    }

    #[test]
    fn winner_wire_format() {
        let ctx: MatchContext =
            serde_json::from_str(r#"{ "currentPlayer": "0", "winner": "d" }"#).unwrap();
        assert_eq!(ctx.winner, Some(Winner::Draw));
        assert_eq!(ctx.turn, 0);
    }

    #[test]
    fn dispatch_records_commands() {
        let mut commands: Vec<MoveCommand> = Vec::new();
        commands.make_move("Nf3");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].san(), Some("Nf3"));
        let json = serde_json::to_string(&commands[0]).unwrap();
        assert_eq!(json, r#"{"name":"move","args":["Nf3"]}"#);
    }
}
