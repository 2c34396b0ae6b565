//! Components for the bluffing card game, where every player holds bunnies
//! and a bomb and bets on how many bunnies can be flipped.

use serde::{Deserialize, Serialize};

/// A card in the bluffing game. Bunnies sort before bombs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Bunny,
    Bomb,
}

/// Where and how one card of a fanned-out hand is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardLayout {
    /// Position of the card in the player's hand as the host knows it.
    pub hand_index: usize,
    pub card: CardType,
    /// Clockwise rotation around the card's bottom center, in degrees.
    pub rotation_deg: f32,
    /// How far the card is pushed down, in pixels.
    pub offset_y: f32,
    pub selectable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HandView {
    Empty { title: &'static str },
    Fanned { width_px: u32, cards: Vec<CardLayout> },
}

pub const EMPTY_HAND_TITLE: &str = "No Cards left...";

/// A player's hand, fanned out like cards held in a hand.
pub struct PlayerHand<'a> {
    pub player_index: usize,
    hand: Vec<CardType>,
    select_card: Option<Box<dyn FnMut(usize) + 'a>>,
}

impl<'a> PlayerHand<'a> {
    /// A hand that can only be looked at.
    pub fn new(player_index: usize, hand: Vec<CardType>) -> Self {
        Self {
            player_index,
            hand,
            select_card: None,
        }
    }

    /// A hand whose cards can be clicked. The callback receives the index of
    /// the card in `hand`.
    pub fn selectable(
        player_index: usize,
        hand: Vec<CardType>,
        select_card: impl FnMut(usize) + 'a,
    ) -> Self {
        Self {
            player_index,
            hand,
            select_card: Some(Box::new(select_card)),
        }
    }

    pub fn is_selectable(&self) -> bool {
        self.select_card.is_some()
    }

    /// Indices into the hand, in the order the cards are drawn.
    fn drawing_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.hand.len()).collect();
        order.sort_by_key(|&idx| self.hand[idx]);
        order
    }

    pub fn render(&self) -> HandView {
        if self.hand.is_empty() {
            return HandView::Empty {
                title: EMPTY_HAND_TITLE,
            };
        }
        let count = self.hand.len();
        let spread = (count * 3) as f32;
        let cards = self
            .drawing_order()
            .into_iter()
            .enumerate()
            .map(|(drawn_idx, hand_index)| {
                // A single card is drawn upright
                let (rotation_deg, offset_y) = if count == 1 {
                    (0.0, 0.0)
                } else {
                    let middle = (count - 1) as f32 / 2.0;
                    (
                        -spread / 2.0 + drawn_idx as f32 * spread / (count - 1) as f32,
                        (drawn_idx as f32 - middle).abs() * spread,
                    )
                };
                CardLayout {
                    hand_index,
                    card: self.hand[hand_index],
                    rotation_deg,
                    offset_y,
                    selectable: self.is_selectable(),
                }
            })
            .collect();
        HandView::Fanned {
            width_px: count as u32 * 40 + 80,
            cards,
        }
    }

    /// Handles a click on the `drawn_idx`-th card from the left.
    ///
    /// Returns whether the click was forwarded to the callback.
    pub fn click(&mut self, drawn_idx: usize) -> bool {
        let Some(&hand_index) = self.drawing_order().get(drawn_idx) else {
            return false;
        };
        match self.select_card.as_mut() {
            Some(select_card) => {
                select_card(hand_index);
                true
            }
            None => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonKind {
    Bet,
    Skip,
}

/// The speech-bubble buttons shown next to a player's hand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionButton {
    pub kind: ButtonKind,
    /// Whether the button currently does anything when clicked.
    pub available: bool,
    pub active: bool,
}

impl ActionButton {
    pub fn bet(available: bool, active: bool) -> Self {
        Self {
            kind: ButtonKind::Bet,
            available,
            active,
        }
    }

    pub fn skip(available: bool) -> Self {
        Self {
            kind: ButtonKind::Skip,
            available,
            active: false,
        }
    }

    pub fn label(&self) -> &'static str {
        match (self.kind, self.active) {
            (ButtonKind::Bet, false) => "Bet!",
            (ButtonKind::Bet, true) => "Cancel",
            (ButtonKind::Skip, _) => "Skip",
        }
    }

    /// The bet bubble points the other way.
    pub fn mirrored(&self) -> bool {
        self.kind == ButtonKind::Bet
    }

    pub fn class_names(&self) -> String {
        let mut classes = vec!["btn"];
        if self.available {
            classes.push("available");
        }
        if self.active {
            classes.push("active");
        }
        classes.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hand() {
        let hand = PlayerHand::new(0, vec![]);
        assert_eq!(
            hand.render(),
            HandView::Empty {
                title: "No Cards left..."
            }
        );
    }

    #[test]
    fn fanned_layout() {
        let hand = PlayerHand::new(1, vec![CardType::Bomb, CardType::Bunny, CardType::Bunny]);
        let HandView::Fanned { width_px, cards } = hand.render() else {
            panic!("expected a fanned hand");
        };
        assert_eq!(width_px, 200);
        assert_eq!(
            cards.iter().map(|c| c.card).collect::<Vec<_>>(),
            [CardType::Bunny, CardType::Bunny, CardType::Bomb]
        );
        assert_eq!(
            cards.iter().map(|c| c.hand_index).collect::<Vec<_>>(),
            [1, 2, 0]
        );
        assert_eq!(
            cards.iter().map(|c| c.rotation_deg).collect::<Vec<_>>(),
            [-4.5, 0.0, 4.5]
        );
        assert_eq!(
            cards.iter().map(|c| c.offset_y).collect::<Vec<_>>(),
            [9.0, 0.0, 9.0]
        );
        assert!(cards.iter().all(|c| !c.selectable));
    }

    #[test]
    fn single_card_is_upright() {
        let hand = PlayerHand::new(0, vec![CardType::Bomb]);
        let HandView::Fanned { width_px, cards } = hand.render() else {
            panic!("expected a fanned hand");
        };
        assert_eq!(width_px, 120);
        assert_eq!(cards[0].rotation_deg, 0.0);
        assert_eq!(cards[0].offset_y, 0.0);
    }

    #[test]
    fn clicks_report_the_hand_index() {
        let mut selected = Vec::new();
        {
            let mut hand = PlayerHand::selectable(
                0,
                vec![CardType::Bomb, CardType::Bunny],
                |idx| selected.push(idx),
            );
            assert!(hand.click(0));
            assert!(hand.click(1));
            assert!(!hand.click(2));
        }
        assert_eq!(selected, [1, 0]);
    }

    #[test]
    fn clicks_on_a_read_only_hand_do_nothing() {
        let mut hand = PlayerHand::new(0, vec![CardType::Bunny]);
        assert!(!hand.click(0));
    }

    #[test]
    fn buttons() {
        let bet = ActionButton::bet(true, false);
        assert_eq!(bet.label(), "Bet!");
        assert_eq!(bet.class_names(), "btn available");
        assert!(bet.mirrored());

        let cancel = ActionButton::bet(true, true);
        assert_eq!(cancel.label(), "Cancel");
        assert_eq!(cancel.class_names(), "btn available active");

        let skip = ActionButton::skip(false);
        assert_eq!(skip.label(), "Skip");
        assert_eq!(skip.class_names(), "btn");
        assert!(!skip.mirrored());
    }
}
