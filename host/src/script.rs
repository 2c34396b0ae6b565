use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tabletop::{PlayerId, Square};

/// A click on a square, made by the board of one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Click {
    pub player: PlayerId,
    pub square: Square,
}

/// A scripted session: where the match starts and who clicks what.
///
/// ```json
/// { "start": "1. e4", "clicks": [{ "player": "1", "square": "e7" }] }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// PGN movetext of the moves already played. Empty for a new game.
    #[serde(default)]
    pub start: String,
    pub clicks: Vec<Click>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use tabletop::square;

    use super::*;

    #[test]
    fn parses_scripts() {
        let script: Script = serde_json::from_str(
            r#"{ "clicks": [{ "player": "0", "square": "e2" }, { "player": "0", "square": "e4" }] }"#,
        )
        .unwrap();
        assert_eq!(script.start, "");
        assert_eq!(
            script.clicks[1],
            Click {
                player: PlayerId(0),
                square: square!("e4")
            }
        );
        assert!(serde_json::from_str::<Script>(r#"{ "clicks": [{ "player": "0", "square": "j2" }] }"#).is_err());
    }
}
