use quickcheck::{Arbitrary, Gen};

use crate::{ChessPosition, Square};

impl Arbitrary for Square {
    fn arbitrary(g: &mut Gen) -> Self {
        Square::new(u8::arbitrary(g) % 8, u8::arbitrary(g) % 8).unwrap()
    }
}

/// A position reached by playing random legal moves from the start.
impl Arbitrary for ChessPosition {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut position = ChessPosition::default();
        let num_plies = usize::arbitrary(g) % 60;
        for _ in 0..num_plies {
            let sans = position.legal_sans();
            // Game over
            let Some(san) = g.choose(&sans) else {
                break;
            };
            let san = san.clone();
            position.play(&san).unwrap();
        }
        position
    }
}
