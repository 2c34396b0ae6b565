use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: u8 = 8;

const FILE_NAMES: &[u8; 8] = b"abcdefgh";

/// A single cell of the board grid, addressed by file and rank.
///
/// Both coordinates are zero-based: file 0 is the `a` file and rank 0 is the
/// first rank. The textual form is algebraic notation, e.g. `e4`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns `None` if either coordinate is off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < BOARD_SIZE && rank < BOARD_SIZE).then_some(Self { file, rank })
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn file_char(&self) -> char {
        char::from(FILE_NAMES[usize::from(self.file)])
    }

    pub fn rank_char(&self) -> char {
        char::from(b'1' + self.rank)
    }

    /// Whether the square is drawn in the dark color. a1 is dark.
    pub fn is_dark(&self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// The neighbouring square in the given direction, if it is on the board.
    pub fn offset(&self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = i16::from(self.file) + i16::from(d_file);
        let rank = i16::from(self.rank) + i16::from(d_rank);
        let file = u8::try_from(file).ok()?;
        let rank = u8::try_from(rank).ok()?;
        Self::new(file, rank)
    }

    /// All 64 squares in the order a board is drawn: rank 8 first, each rank
    /// from the `a` file to the `h` file.
    pub fn all_top_down() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE)
            .rev()
            .flat_map(|rank| (0..BOARD_SIZE).map(move |file| Square { file, rank }))
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// The error type for the [`FromStr`] instance of [`Square`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SquareParseError {
    WrongLength,
    InvalidFile,
    InvalidRank,
}

impl std::error::Error for SquareParseError {}

impl std::fmt::Display for SquareParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SquareParseError::WrongLength => write!(f, "A square must be exactly two characters"),
            SquareParseError::InvalidFile => write!(f, "The file must be a letter from a to h"),
            SquareParseError::InvalidRank => write!(f, "The rank must be a digit from 1 to 8"),
        }
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file_byte, rank_byte] = s.as_bytes() else {
            return Err(SquareParseError::WrongLength);
        };
        let file = FILE_NAMES
            .iter()
            .position(|&b| b == file_byte.to_ascii_lowercase())
            .ok_or(SquareParseError::InvalidFile)?;
        if !(b'1'..=b'8').contains(&rank_byte) {
            return Err(SquareParseError::InvalidRank);
        }
        Ok(Square {
            file: file as u8,
            rank: rank_byte - b'1',
        })
    }
}

impl TryFrom<String> for Square {
    type Error = SquareParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> String {
        square.to_string()
    }
}

/// Shorthand for creating squares from algebraic notation.
///
/// This macro is just calling the [`FromStr`] instance of [`Square`].
/// ```
/// # use tabletop::{square, Square};
/// assert_eq!(square!("e4"), Square::new(4, 3).unwrap());
/// ```
#[macro_export]
macro_rules! square {
    ($s:literal) => {
        <$crate::Square as std::str::FromStr>::from_str($s)
            .expect("Invalid square given to square! macro")
    };
}
// The import is for using the macro in other modules, see https://stackoverflow.com/a/31749071/1726797
#[allow(unused_imports)]
pub(crate) use square;
