use crate::{BoardView, Highlight, Square};

/// Draws the board as text, rank 8 at the top.
///
/// The selected square is wrapped in `[ ]`, legal destinations in `( )`.
pub fn visualize_board(view: &BoardView) -> String {
    // Draw the top of the box
    let mut result = String::from("    a  b  c  d  e  f  g  h\n  ╭");
    for _ in 0..8 {
        result += "───";
    }
    result += "╮\n";

    for (idx, cell) in view.squares.iter().enumerate() {
        if idx % 8 == 0 {
            result += &format!("{} │", cell.square.rank_char());
        }
        let symbol = match view.piece_at(cell.square) {
            Some(token) => token.piece.symbol(),
            None => '·',
        };
        let (left, right) = match cell.highlight {
            Some(Highlight::Selected) => ('[', ']'),
            Some(Highlight::Movable) => ('(', ')'),
            None => (' ', ' '),
        };
        result.push(left);
        result.push(symbol);
        result.push(right);
        if idx % 8 == 7 {
            result += &format!("│ {}\n", cell.square.rank_char());
        }
    }

    // Draw the bottom of the box
    result += "  ╰";
    for _ in 0..8 {
        result += "───";
    }
    result += "╯\n    a  b  c  d  e  f  g  h";
    if let Some(status) = view.status {
        result += &format!("\n{}", status);
    }
    result
}

/// Describes a square for log output, e.g. `e4 (white pawn)`.
pub fn describe_square(view: &BoardView, square: Square) -> String {
    match view.piece_at(square) {
        Some(token) => format!(
            "{} ({:?} {:?})",
            square, token.piece.side, token.piece.kind
        )
        .to_lowercase(),
        None => square.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{square, BoardProps, ChessBoard, ChessState, MatchContext, MoveCommand};

    #[test]
    fn draws_highlights() {
        let mut board: ChessBoard = ChessBoard::new(BoardProps {
            state: ChessState::default(),
            ctx: MatchContext::default(),
            player_id: None,
            is_active: true,
        })
        .unwrap();
        let mut commands: Vec<MoveCommand> = Vec::new();
        board.click(square!("e2"), &mut commands);

        let text = visualize_board(&board.render());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[2], "8 │ ♜  ♞  ♝  ♛  ♚  ♝  ♞  ♜ │ 8");
        assert_eq!(lines[6], "4 │ ·  ·  ·  · (·) ·  ·  · │ 4");
        assert_eq!(lines[8], "2 │ ♙  ♙  ♙  ♙ [♙] ♙  ♙  ♙ │ 2");
    }

    #[test]
    fn describes_squares() {
        let board: ChessBoard = ChessBoard::new(BoardProps {
            state: ChessState::default(),
            ctx: MatchContext::default(),
            player_id: None,
            is_active: true,
        })
        .unwrap();
        let view = board.render();
        assert_eq!(describe_square(&view, square!("g8")), "g8 (black knight)");
        assert_eq!(describe_square(&view, square!("e4")), "e4");
    }
}
