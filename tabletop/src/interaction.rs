use std::collections::BTreeMap;

use tracing::debug;

use crate::{is_selectable, legal_moves, LegalMove, MoveDispatch, RulesPosition, Side, Square};

/// The parts of the host's props that decide whether and for whom a click counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    /// The side whose turn it is.
    pub side: Side,
    /// False when it is not this client's turn. Clicks are then ignored.
    pub is_active: bool,
}

/// What a click did. Invalid clicks are never errors, they just end up as
/// [`ClickOutcome::Unchanged`] or [`ClickOutcome::Deselected`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The board is not active.
    Ignored,
    /// Nothing was selected and the square cannot be selected.
    Unchanged,
    Selected(Square),
    /// The click did not name a legal destination of the selection.
    Deselected,
    /// A move was handed to the host and the selection cleared.
    MoveIssued(LegalMove),
}

/// A marker drawn on top of a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Highlight {
    /// The source of the next move.
    Selected,
    /// A legal destination of the selected piece.
    Movable,
}

impl Highlight {
    /// The CSS color name for this marker.
    pub fn color(self) -> &'static str {
        match self {
            Highlight::Selected => "green",
            Highlight::Movable => "palegreen",
        }
    }
}

/// Tracks which square, if any, the player has picked as the source of their
/// next move, and turns clicks into move commands.
///
/// The selection is the only state. Legal destinations are recomputed from it
/// and the current position on demand.
#[derive(Clone, Debug, Default)]
pub struct BoardInteraction {
    selected: Option<Square>,
}

impl BoardInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn on_square_clicked<P, D>(
        &mut self,
        position: &P,
        turn: Turn,
        square: Square,
        moves: &mut D,
    ) -> ClickOutcome
    where
        P: RulesPosition,
        D: MoveDispatch + ?Sized,
    {
        if !turn.is_active {
            return ClickOutcome::Ignored;
        }

        let Some(from) = self.selected else {
            if is_selectable(position, square, turn.side) {
                debug!(%square, "Selected");
                self.selected = Some(square);
                return ClickOutcome::Selected(square);
            }
            return ClickOutcome::Unchanged;
        };

        self.selected = None;
        match position
            .legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to == square)
        {
            Some(mv) => {
                debug!(%from, to = %square, san = %mv.san, "Issuing move");
                moves.make_move(&mv.san);
                ClickOutcome::MoveIssued(mv)
            }
            None => {
                debug!(%from, %square, "Deselected");
                ClickOutcome::Deselected
            }
        }
    }

    /// The host reported a new game state. A selection made against the old
    /// position means nothing in the new one.
    pub fn on_external_state_changed(&mut self) {
        self.selected = None;
    }

    pub fn legal_moves<P: RulesPosition>(&self, position: &P) -> Vec<LegalMove> {
        legal_moves(position, self.selected)
    }

    pub fn highlights<P: RulesPosition>(&self, position: &P) -> BTreeMap<Square, Highlight> {
        let mut result = BTreeMap::new();
        if let Some(selected) = self.selected {
            result.insert(selected, Highlight::Selected);
        }
        for mv in self.legal_moves(position) {
            result.insert(mv.to, Highlight::Movable);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::{square, ChessPosition, MoveCommand};

    fn own_turn(position: &ChessPosition) -> Turn {
        Turn {
            side: position.turn(),
            is_active: true,
        }
    }

    /// Picks a selectable square of the side to move, if there is one.
    fn pick_selectable(position: &ChessPosition, choice: usize) -> Option<Square> {
        let candidates: Vec<Square> = Square::all_top_down()
            .filter(|&sq| is_selectable(position, sq, position.turn()))
            .collect();
        (!candidates.is_empty()).then(|| candidates[choice % candidates.len()])
    }

    quickcheck! {
        fn unselectable_click_keeps_selection_empty(position: ChessPosition, square: Square) -> TestResult {
            if is_selectable(&position, square, position.turn()) {
                return TestResult::discard();
            }
            let mut handler = BoardInteraction::new();
            let mut commands: Vec<MoveCommand> = Vec::new();
            let outcome = handler.on_square_clicked(&position, own_turn(&position), square, &mut commands);
            TestResult::from_bool(
                outcome == ClickOutcome::Unchanged && handler.selected().is_none() && commands.is_empty(),
            )
        }

        fn click_off_destinations_deselects(position: ChessPosition, choice: usize, target: Square) -> TestResult {
            let Some(from) = pick_selectable(&position, choice) else {
                return TestResult::discard();
            };
            let mut handler = BoardInteraction::new();
            let mut commands: Vec<MoveCommand> = Vec::new();
            handler.on_square_clicked(&position, own_turn(&position), from, &mut commands);
            if handler.legal_moves(&position).iter().any(|mv| mv.to == target) {
                return TestResult::discard();
            }
            let outcome = handler.on_square_clicked(&position, own_turn(&position), target, &mut commands);
            TestResult::from_bool(
                outcome == ClickOutcome::Deselected && handler.selected().is_none() && commands.is_empty(),
            )
        }

        fn click_on_destination_issues_exactly_one_move(position: ChessPosition, choice: usize, dest_choice: usize) -> TestResult {
            let Some(from) = pick_selectable(&position, choice) else {
                return TestResult::discard();
            };
            let mut handler = BoardInteraction::new();
            let mut commands: Vec<MoveCommand> = Vec::new();
            handler.on_square_clicked(&position, own_turn(&position), from, &mut commands);
            let destinations = handler.legal_moves(&position);
            let target = destinations[dest_choice % destinations.len()].to;
            let outcome = handler.on_square_clicked(&position, own_turn(&position), target, &mut commands);
            TestResult::from_bool(
                matches!(outcome, ClickOutcome::MoveIssued(ref mv) if mv.from == from && mv.to == target)
                    && handler.selected().is_none()
                    && commands.len() == 1,
            )
        }

        fn inactive_board_ignores_clicks(position: ChessPosition, clicks: Vec<Square>) -> bool {
            let mut handler = BoardInteraction::new();
            let mut commands: Vec<MoveCommand> = Vec::new();
            let turn = Turn { side: position.turn(), is_active: false };
            let mut all_ignored = true;
            for square in clicks {
                all_ignored &= handler.on_square_clicked(&position, turn, square, &mut commands) == ClickOutcome::Ignored;
            }
            all_ignored && handler.selected().is_none() && commands.is_empty()
        }

        fn external_change_clears_selection(position: ChessPosition, clicks: Vec<Square>) -> bool {
            let mut handler = BoardInteraction::new();
            let mut commands: Vec<MoveCommand> = Vec::new();
            for square in clicks {
                handler.on_square_clicked(&position, own_turn(&position), square, &mut commands);
            }
            handler.on_external_state_changed();
            handler.selected().is_none() && handler.highlights(&position).is_empty()
        }
    }

    #[test]
    fn selecting_a_pawn_highlights_its_advances() {
        let position = ChessPosition::default();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        let outcome =
            handler.on_square_clicked(&position, own_turn(&position), square!("e2"), &mut commands);
        assert_eq!(outcome, ClickOutcome::Selected(square!("e2")));
        assert_eq!(handler.selected(), Some(square!("e2")));

        let highlights = handler.highlights(&position);
        assert_eq!(highlights.len(), 3);
        assert_eq!(highlights[&square!("e2")], Highlight::Selected);
        assert_eq!(highlights[&square!("e3")], Highlight::Movable);
        assert_eq!(highlights[&square!("e4")], Highlight::Movable);
        assert!(commands.is_empty());
    }

    #[test]
    fn blocked_pawn_cannot_be_selected() {
        let position = ChessPosition::load("1. e4 e5").unwrap();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        let outcome =
            handler.on_square_clicked(&position, own_turn(&position), square!("e4"), &mut commands);
        assert_eq!(outcome, ClickOutcome::Unchanged);
        assert_eq!(handler.selected(), None);
    }

    #[test]
    fn clicking_the_single_forward_square_moves_the_pawn() {
        let position = ChessPosition::load("1. a4 h5 2. a5 h4").unwrap();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        let turn = own_turn(&position);

        handler.on_square_clicked(&position, turn, square!("a5"), &mut commands);
        let destinations: Vec<Square> = handler.legal_moves(&position).iter().map(|mv| mv.to).collect();
        assert_eq!(destinations, vec![square!("a6")]);

        let outcome = handler.on_square_clicked(&position, turn, square!("a6"), &mut commands);
        assert!(matches!(outcome, ClickOutcome::MoveIssued(ref mv) if mv.san == "a6"));
        assert_eq!(handler.selected(), None);
        assert_eq!(commands, vec![MoveCommand::chess_move("a6")]);
    }

    #[test]
    fn clicking_another_own_piece_deselects() {
        let position = ChessPosition::default();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        let turn = own_turn(&position);
        handler.on_square_clicked(&position, turn, square!("e2"), &mut commands);
        let outcome = handler.on_square_clicked(&position, turn, square!("d2"), &mut commands);
        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(handler.selected(), None);
    }

    #[test]
    fn inactive_clicks_keep_an_existing_selection() {
        let position = ChessPosition::default();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        handler.on_square_clicked(&position, own_turn(&position), square!("e2"), &mut commands);

        let inactive = Turn {
            side: position.turn(),
            is_active: false,
        };
        for square in [square!("e4"), square!("e3"), square!("d2"), square!("a8")] {
            let outcome = handler.on_square_clicked(&position, inactive, square, &mut commands);
            assert_eq!(outcome, ClickOutcome::Ignored);
        }
        assert_eq!(handler.selected(), Some(square!("e2")));
        assert!(commands.is_empty());
    }

    #[test]
    fn opponent_pieces_are_not_selectable() {
        let position = ChessPosition::default();
        let mut handler = BoardInteraction::new();
        let mut commands: Vec<MoveCommand> = Vec::new();
        let outcome =
            handler.on_square_clicked(&position, own_turn(&position), square!("e7"), &mut commands);
        assert_eq!(outcome, ClickOutcome::Unchanged);
        assert_eq!(handler.selected(), None);
    }
}
