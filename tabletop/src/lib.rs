pub use bluff::*;
pub use chess::*;
pub use chess_board::*;
pub use errors::*;
pub use host::*;
pub use interaction::*;
pub use lobby::*;
pub use rules::*;
pub use square::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bluff;
mod chess;
mod chess_board;
mod errors;
mod host;
mod interaction;
mod lobby;
mod rules;
mod square;
mod visualization;
