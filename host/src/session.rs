use tabletop::{describe_square, BoardView, ChessBoard, ClickOutcome, MoveCommand, PlayerId, Winner};
use tracing::{debug, trace};

use crate::local_host::{LocalHost, MoveResult};
use crate::recording::Recorder;
use crate::script::Script;

/// The seats of a chess match.
pub const SEATS: [PlayerId; 2] = [PlayerId(0), PlayerId(1)];

#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub clicks: usize,
    pub moves_issued: usize,
    pub moves_applied: usize,
    pub moves_rejected: usize,
    pub final_pgn: String,
    pub winner: Option<Winner>,
    /// The final board as seen from the seat to move.
    pub view: BoardView,
}

/// Plays a script against a local host, with one board per seat.
///
/// Returns an error only if the script cannot be run at all, not when its
/// clicks are invalid.
pub fn run_session(
    script: &Script,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<SessionSummary> {
    let mut host = LocalHost::new(&script.start)?;
    let mut boards = SEATS
        .iter()
        .map(|&seat| ChessBoard::new(host.props_for(seat)))
        .collect::<Result<Vec<ChessBoard>, _>>()?;

    let mut summary = SessionSummary {
        clicks: 0,
        moves_issued: 0,
        moves_applied: 0,
        moves_rejected: 0,
        final_pgn: String::new(),
        winner: None,
        view: boards[0].render(),
    };

    for click in &script.clicks {
        let Some(board) = boards.get_mut(usize::from(click.player.0)) else {
            anyhow::bail!("The script clicks for player {}, but there are only two", click.player);
        };
        trace!(player = %click.player, square = %describe_square(&board.render(), click.square), "Click");
        let outcome = board.click(click.square, &mut host.seat(click.player));
        debug!(player = %click.player, square = %click.square, ?outcome);
        summary.clicks += 1;

        if let Some(rec) = recorder.as_mut() {
            rec.store_click(click.player, click.square, format!("{:?}", outcome));
            if let ClickOutcome::MoveIssued(mv) = &outcome {
                rec.store_command(click.player, MoveCommand::chess_move(&mv.san));
            }
        }
        if let ClickOutcome::MoveIssued(_) = outcome {
            summary.moves_issued += 1;
        }

        // Every applied move is a state change that all boards hear about,
        // in the order the host applied them.
        for result in host.pump() {
            match result {
                MoveResult::Applied { .. } => {
                    summary.moves_applied += 1;
                    for (board, &seat) in boards.iter_mut().zip(SEATS.iter()) {
                        board.receive_props(host.props_for(seat));
                    }
                    if let Some(rec) = recorder.as_mut() {
                        rec.store_state(host.state().pgn);
                    }
                }
                _ => summary.moves_rejected += 1,
            }
        }
    }

    if let Some(rec) = recorder.as_mut() {
        rec.write_session_recording()?;
    }

    let to_move = usize::from(host.ctx().current_player.0);
    summary.final_pgn = host.state().pgn;
    summary.winner = host.ctx().winner;
    summary.view = boards[to_move].render();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use tabletop::{square, Status};

    use super::*;
    use crate::script::Click;

    fn click(player: u8, square: tabletop::Square) -> Click {
        Click {
            player: PlayerId(player),
            square,
        }
    }

    #[test]
    fn fools_mate() {
        let script = Script {
            start: String::new(),
            clicks: vec![
                click(0, square!("f2")),
                click(0, square!("f3")),
                click(1, square!("e7")),
                click(1, square!("e5")),
                click(0, square!("g2")),
                click(0, square!("g4")),
                click(1, square!("d8")),
                click(1, square!("h4")),
            ],
        };
        let summary = run_session(&script, &mut None).unwrap();
        assert_eq!(summary.clicks, 8);
        assert_eq!(summary.moves_issued, 4);
        assert_eq!(summary.moves_applied, 4);
        assert_eq!(summary.final_pgn, "1. f3 e5 2. g4 Qh4#");
        assert_eq!(summary.winner, Some(Winner::Black));
        assert_eq!(summary.view.status, Some(Status::Won(tabletop::Side::Black)));
    }

    #[test]
    fn out_of_turn_clicks_do_nothing() {
        let script = Script {
            start: String::new(),
            clicks: vec![click(1, square!("e7")), click(1, square!("e5"))],
        };
        let summary = run_session(&script, &mut None).unwrap();
        assert_eq!(summary.moves_issued, 0);
        assert_eq!(summary.final_pgn, "");
    }

    #[test]
    fn unknown_seats_are_an_error() {
        let script = Script {
            start: String::new(),
            clicks: vec![click(2, square!("e2"))],
        };
        assert!(run_session(&script, &mut None).is_err());
    }

    #[test]
    fn sessions_are_recorded() {
        let directory = std::env::temp_dir().join(format!("tabletop-recording-{}", std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let mut recorder = Some(Recorder::new(directory.clone()).unwrap());
        let script = Script {
            start: String::from("1. e4"),
            clicks: vec![click(1, square!("c7")), click(1, square!("c5"))],
        };
        let summary = run_session(&script, &mut recorder).unwrap();
        assert_eq!(summary.final_pgn, "1. e4 c5");

        let text = std::fs::read_to_string(directory.join("session_000001.json")).unwrap();
        let recording: crate::recording::SessionRecording = serde_json::from_str(&text).unwrap();
        assert_eq!(recording.events.len(), 4);
        std::fs::remove_dir_all(&directory).unwrap();
    }
}
