//! Lobby screens: picking an opponent and setting up a game client for one
//! of the catalogued games.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PlayerId, SetupError};

/// Where the lobby sends the player next.
pub trait History {
    fn push(&mut self, route: &str);
}

impl History for Vec<String> {
    fn push(&mut self, route: &str) {
        Vec::push(self, String::from(route));
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpponentPickerOption {
    EasyAI,
    MediumAI,
    HardAI,
    Friend,
}

impl OpponentPickerOption {
    pub const ALL: [OpponentPickerOption; 4] = [
        OpponentPickerOption::EasyAI,
        OpponentPickerOption::MediumAI,
        OpponentPickerOption::HardAI,
        OpponentPickerOption::Friend,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OpponentPickerOption::EasyAI => "Computer (easy)",
            OpponentPickerOption::MediumAI => "Computer (medium)",
            OpponentPickerOption::HardAI => "Computer (hard)",
            OpponentPickerOption::Friend => "Friend",
        }
    }

    pub fn route(self, game_code: &str) -> String {
        match self {
            OpponentPickerOption::EasyAI => format!("/g/{}/ai/easy", game_code),
            OpponentPickerOption::MediumAI => format!("/g/{}/ai/medium", game_code),
            OpponentPickerOption::HardAI => format!("/g/{}/ai/hard", game_code),
            OpponentPickerOption::Friend => format!("/g/{}/online", game_code),
        }
    }
}

/// A list of opponents to choose from for one game.
#[derive(Clone, Debug)]
pub struct OpponentPicker {
    pub game_code: String,
    pub options: Vec<OpponentPickerOption>,
}

impl OpponentPicker {
    pub fn labels(&self) -> Vec<&'static str> {
        self.options.iter().map(|option| option.label()).collect()
    }

    /// Navigates to the game for the `idx`-th option. Clicks outside the list
    /// do nothing.
    pub fn click<H: History + ?Sized>(&self, idx: usize, history: &mut H) {
        if let Some(option) = self.options.get(idx) {
            let route = option.route(&self.game_code);
            debug!(?option, %route, "Picked opponent");
            history.push(&route);
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    AI,
    LocalFriend,
    OnlineFriend,
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::AI => write!(f, "AI"),
            GameMode::LocalFriend => write!(f, "local"),
            GameMode::OnlineFriend => write!(f, "online"),
        }
    }
}

/// The error type for the [`FromStr`] instance of [`GameMode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGameMode(pub String);

impl std::error::Error for UnknownGameMode {}

impl std::fmt::Display for UnknownGameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown game mode '{}'", self.0)
    }
}

impl FromStr for GameMode {
    type Err = UnknownGameMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ai" => Ok(GameMode::AI),
            "local" | "localfriend" => Ok(GameMode::LocalFriend),
            "online" | "onlinefriend" => Ok(GameMode::OnlineFriend),
            _ => Err(UnknownGameMode(String::from(s))),
        }
    }
}

/// A game in the catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameDef {
    pub code: &'static str,
    pub name: &'static str,
    pub modes: &'static [GameMode],
}

pub static GAMES: [GameDef; 2] = [
    GameDef {
        code: "chess",
        name: "Chess",
        modes: &[GameMode::AI, GameMode::LocalFriend, GameMode::OnlineFriend],
    },
    GameDef {
        code: "bombsAndBunnies",
        name: "Bombs and Bunnies",
        modes: &[GameMode::LocalFriend, GameMode::OnlineFriend],
    },
];

pub fn find_game(code: &str) -> Option<&'static GameDef> {
    GAMES.iter().find(|game| game.code == code)
}

/// A member of an online match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub nickname: String,
}

/// An online match as handed out by the lobby server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMatch {
    pub game_code: String,
    pub server_url: String,
    pub match_id: String,
    pub player_id: PlayerId,
    pub secret: String,
    pub memberships: Vec<Membership>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInRoom {
    pub player_id: PlayerId,
    pub name: String,
}

/// Everything needed to start a game client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSetup {
    pub game: &'static GameDef,
    pub mode: GameMode,
    /// The seat this client plays, if it plays one seat only.
    pub player_id: Option<PlayerId>,
    pub match_code: Option<String>,
    pub credentials: Option<String>,
    pub server_url: Option<String>,
    pub players: Vec<PlayerInRoom>,
}

impl GameSetup {
    /// Sets up an offline game. The computer always plays the first seat.
    pub fn offline(game_code: &str, mode: &str) -> Result<Self, SetupError> {
        let game = find_game(game_code).ok_or_else(|| SetupError::GameNotFound {
            code: String::from(game_code),
        })?;
        let invalid_mode = || SetupError::InvalidGameMode {
            code: String::from(game_code),
            mode: String::from(mode),
        };
        let mode: GameMode = mode.parse().map_err(|_| invalid_mode())?;
        if !game.modes.contains(&mode) {
            return Err(invalid_mode());
        }
        let (player_id, players) = match mode {
            GameMode::AI => (
                Some(PlayerId(1)),
                vec![
                    PlayerInRoom {
                        player_id: PlayerId(0),
                        name: String::from("Computer"),
                    },
                    PlayerInRoom {
                        player_id: PlayerId(1),
                        name: String::from("You"),
                    },
                ],
            ),
            GameMode::LocalFriend => (
                None,
                vec![
                    PlayerInRoom {
                        player_id: PlayerId(0),
                        name: String::from("Player 1"),
                    },
                    PlayerInRoom {
                        player_id: PlayerId(1),
                        name: String::from("Player 2"),
                    },
                ],
            ),
            GameMode::OnlineFriend => return Err(SetupError::MissingMatch),
        };
        Ok(Self {
            game,
            mode,
            player_id,
            match_code: None,
            credentials: None,
            server_url: None,
            players,
        })
    }

    /// Sets up a client for an online match.
    pub fn online(online_match: &OnlineMatch) -> Result<Self, SetupError> {
        let game = find_game(&online_match.game_code).ok_or_else(|| SetupError::GameNotFound {
            code: online_match.game_code.clone(),
        })?;
        if !game.modes.contains(&GameMode::OnlineFriend) {
            return Err(SetupError::InvalidGameMode {
                code: online_match.game_code.clone(),
                mode: GameMode::OnlineFriend.to_string(),
            });
        }
        let players = online_match
            .memberships
            .iter()
            .enumerate()
            .map(|(idx, membership)| PlayerInRoom {
                player_id: PlayerId(idx as u8),
                name: membership.nickname.clone(),
            })
            .collect();
        Ok(Self {
            game,
            mode: GameMode::OnlineFriend,
            player_id: Some(online_match.player_id),
            match_code: Some(online_match.match_id.clone()),
            credentials: Some(online_match.secret.clone()),
            server_url: Some(online_match.server_url.clone()),
            players,
        })
    }
}
