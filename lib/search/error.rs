use derive_more::with_trait::{Display, Error, From};
use std::io;

/// Indicates the search was interrupted.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Error)]
#[display("the search was interrupted")]
pub struct Interrupt;

/// The reason an engine could not be configured.
#[derive(Debug, Display, Error, From)]
pub enum ConfigError {
    /// The depth limit is zero.
    #[display("the depth limit must be at least 1")]
    ZeroDepth,

    /// The time limit is zero.
    #[display("the time limit must be positive")]
    ZeroTime,

    /// Neither a depth nor a time limit was given.
    #[display("either a depth or a time limit is required")]
    Unbounded,

    /// A worker pool was requested with no workers.
    #[display("the number of worker threads must be at least 1")]
    ZeroThreads,

    /// A worker thread could not be spawned.
    #[display("failed to spawn worker thread")]
    #[from]
    Spawn(io::Error),
}

/// The reason a search failed to produce a move.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Error)]
pub enum SearchError {
    /// The root position has no legal moves.
    #[display("the root position has no legal moves")]
    NoLegalMoves,

    /// The game or the evaluator panicked during the search.
    #[display("the search panicked: {_0}")]
    Panicked(#[error(not(source))] String),

    /// The background search thread could not be spawned.
    #[display("failed to spawn the search thread: {_0}")]
    Spawn(#[error(not(source))] String),

    /// The background search ended without reporting back.
    #[display("the search ended without reporting back")]
    Disconnected,
}

impl SearchError {
    /// Describes a panic payload.
    pub(crate) fn panicked(payload: &(dyn std::any::Any + Send)) -> Self {
        let msg = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_owned()
        };

        SearchError::Panicked(msg)
    }
}
