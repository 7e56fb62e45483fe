use crate::search::Statistics;
use derive_more::with_trait::Constructor;
use std::time::Duration;

/// Information about a fully-completed iterative deepening pass.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Info<M> {
    depth: u32,
    time: Duration,
    nodes: u64,
    value: f32,
    candidates: Vec<M>,
}

impl<M> Info<M> {
    /// The depth searched.
    #[inline(always)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The time elapsed since the search started.
    #[inline(always)]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// The number of nodes searched so far.
    #[inline(always)]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The best value found at this depth.
    #[inline(always)]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The root moves tied for the best value.
    #[inline(always)]
    pub fn candidates(&self) -> &[M] {
        &self.candidates
    }
}

/// The result of a search.
#[derive(Debug, Clone, PartialEq, Constructor)]
pub struct Outcome<M> {
    best: M,
    value: Option<f32>,
    candidates: Vec<M>,
    depth: u32,
    time: Duration,
    nodes: u64,
    statistics: Statistics,
}

impl<M> Outcome<M> {
    /// The move selected.
    #[inline(always)]
    pub fn best(&self) -> &M {
        &self.best
    }

    /// Consumes the outcome, returning the move selected.
    #[inline(always)]
    pub fn into_best(self) -> M {
        self.best
    }

    /// The value of the best move at the deepest completed depth.
    ///
    /// Returns `None` if not even the first depth completed.
    #[inline(always)]
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// The moves [`Outcome::best`] was selected from.
    ///
    /// These are all the root moves, unscored, if not even the first depth completed.
    #[inline(always)]
    pub fn candidates(&self) -> &[M] {
        &self.candidates
    }

    /// The deepest fully-completed depth.
    #[inline(always)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The duration searched.
    #[inline(always)]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// The number of nodes searched.
    #[inline(always)]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The engine's statistics as of the end of this search, this one included.
    ///
    /// Always empty if statistics are disabled.
    #[inline(always)]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}
