use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabletop::{MoveCommand, PlayerId, Square};

/// Writes every session's clicks and the resulting moves to numbered JSON
/// files in a directory.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    events: Vec<RecordedEvent>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            events: Vec::new(),
        })
    }

    pub fn store_click(&mut self, player: PlayerId, square: Square, outcome: String) {
        self.events.push(RecordedEvent::Click {
            player,
            square,
            outcome,
        });
    }

    pub fn store_command(&mut self, player: PlayerId, command: MoveCommand) {
        self.events
            .push(RecordedEvent::Command { player, command });
    }

    pub fn store_state(&mut self, pgn: String) {
        self.events.push(RecordedEvent::StateChanged { pgn });
    }

    /// Writes the events stored so far and starts the next recording.
    pub fn write_session_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("session_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = SessionRecording {
            events: std::mem::take(&mut self.events),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct SessionRecording {
    pub events: Vec<RecordedEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RecordedEvent {
    Click {
        player: PlayerId,
        square: Square,
        outcome: String,
    },
    Command {
        player: PlayerId,
        command: MoveCommand,
    },
    StateChanged {
        pgn: String,
    },
}
