use std::io::{self, stdout};

use host::LocalHost;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};
use tabletop::{
    square, BoardView, ChessBoard, ClickOutcome, Highlight, RulesPosition, Side, Square,
};

fn main() -> anyhow::Result<()> {
    let mut game = LocalGame::new()?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut should_quit = false;
    while !should_quit {
        terminal.draw(|frame| game.ui(frame))?;
        should_quit = game.handle_events()?;
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Two players sharing one terminal. The board always acts for the side to move.
struct LocalGame {
    host: LocalHost,
    board: ChessBoard,
    cursor: Square,
    last_outcome: Option<ClickOutcome>,
}

impl LocalGame {
    fn new() -> anyhow::Result<Self> {
        let host = LocalHost::new("")?;
        let board = ChessBoard::new(host.props_for(host.ctx().current_player))?;
        Ok(Self {
            host,
            board,
            cursor: square!("e2"),
            last_outcome: None,
        })
    }

    fn click(&mut self) {
        let seat = self.host.ctx().current_player;
        let outcome = self.board.click(self.cursor, &mut self.host.seat(seat));
        if !self.host.pump().is_empty() {
            let to_move = self.host.ctx().current_player;
            self.board.receive_props(self.host.props_for(to_move));
        }
        self.last_outcome = Some(outcome);
    }

    fn move_cursor(&mut self, d_file: i8, d_rank: i8) {
        if let Some(square) = self.cursor.offset(d_file, d_rank) {
            self.cursor = square;
        }
    }

    /// Returns whether the program should quit.
    fn handle_events(&mut self) -> io::Result<bool> {
        if event::poll(std::time::Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    return Ok(false);
                }
                match key.code {
                    KeyCode::Char('q') => return Ok(true),
                    KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Up => self.move_cursor(0, 1),
                    KeyCode::Down => self.move_cursor(0, -1),
                    KeyCode::Enter | KeyCode::Char(' ') => self.click(),
                    _ => {}
                }
            }
        }
        Ok(false)
    }

    fn status_line(&self) -> String {
        let view_status = self.board.render().status;
        let mut line = match view_status {
            Some(status) => status.to_string(),
            None => match self.board.position().turn() {
                Side::White => String::from("White to move"),
                Side::Black => String::from("Black to move"),
            },
        };
        match &self.last_outcome {
            Some(ClickOutcome::MoveIssued(mv)) => line += &format!("  (played {})", mv.san),
            Some(ClickOutcome::Selected(square)) => line += &format!("  (selected {})", square),
            _ => {}
        }
        line
    }

    fn ui(&self, frame: &mut Frame) {
        let main_layout = Layout::new(
            Direction::Vertical,
            [Constraint::Length(BOARD_WIDGET_HEIGHT), Constraint::Length(1), Constraint::Min(0)],
        )
        .split(frame.size());
        frame.render_widget(
            BoardWidget {
                view: self.board.render(),
                cursor: self.cursor,
            },
            main_layout[0],
        );
        frame.render_widget(Paragraph::new(self.status_line()), main_layout[1]);
        frame.render_widget(
            Paragraph::new("arrows: move   enter: click   q: quit").style(Style::new().dim()),
            main_layout[2],
        );
    }
}

const SQUARE_WIDTH: u16 = 3;

const BOARD_WIDGET_WIDTH: u16 = SQUARE_WIDTH * 8 + 4;

const BOARD_WIDGET_HEIGHT: u16 = 8 + 2;

struct BoardWidget {
    view: BoardView,
    cursor: Square,
}

fn square_style(dark: bool, highlight: Option<Highlight>) -> Style {
    let bg = match highlight {
        Some(Highlight::Selected) => Color::Green,
        Some(Highlight::Movable) => Color::LightGreen,
        None if dark => Color::Rgb(181, 136, 99),
        None => Color::Rgb(240, 217, 181),
    };
    Style::new().bg(bg).fg(Color::Black)
}

impl Widget for BoardWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(BOARD_WIDGET_WIDTH),
                Constraint::Min(0),
            ])
            .split(area)[1];
        let block = Block::new()
            .border_type(BorderType::Rounded)
            .borders(Borders::all());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 8 || inner.width < SQUARE_WIDTH * 8 + 2 {
            return;
        }

        for (idx, cell) in self.view.squares.iter().enumerate() {
            let row = (idx / 8) as u16;
            let col = (idx % 8) as u16;
            if col == 0 {
                buf.set_string(
                    inner.x,
                    inner.y + row,
                    cell.square.rank_char().to_string(),
                    Style::new(),
                );
            }
            let symbol = match self.view.piece_at(cell.square) {
                Some(token) => token.piece.symbol(),
                None => ' ',
            };
            let mut style = square_style(cell.dark, cell.highlight);
            if cell.square == self.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            buf.set_string(
                inner.x + 2 + col * SQUARE_WIDTH,
                inner.y + row,
                format!(" {} ", symbol),
                style,
            );
        }
    }
}
