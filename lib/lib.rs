/// Capabilities a game must provide to be searchable.
pub mod game;
/// A single-pile subtraction game.
pub mod nim;
/// Minimax searching algorithm.
pub mod search;
/// Assorted utilities.
pub mod util;
