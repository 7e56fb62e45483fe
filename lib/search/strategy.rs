use crate::game::{Evaluator, Position};
use crate::search::{Control, Interrupt, Tally};
use std::sync::Arc;

/// Everything a [`Strategy`] needs to know about the search in progress.
pub struct Context<'a, P: Position, E> {
    root: &'a P,
    moves: &'a [P::Move],
    evaluator: &'a Arc<E>,
    ctrl: &'a Arc<Control>,
}

impl<'a, P: Position, E> Context<'a, P, E> {
    #[inline(always)]
    pub fn new(root: &'a P, moves: &'a [P::Move], evaluator: &'a Arc<E>, ctrl: &'a Arc<Control>) -> Self {
        Context {
            root,
            moves,
            evaluator,
            ctrl,
        }
    }

    /// The position being searched.
    #[inline(always)]
    pub fn root(&self) -> &'a P {
        self.root
    }

    /// The legal moves from the root, enumerated once per search.
    #[inline(always)]
    pub fn moves(&self) -> &'a [P::Move] {
        self.moves
    }

    /// The evaluator scoring positions for the side searching.
    #[inline(always)]
    pub fn evaluator(&self) -> &'a Arc<E> {
        self.evaluator
    }

    /// The search control.
    #[inline(always)]
    pub fn ctrl(&self) -> &'a Arc<Control> {
        self.ctrl
    }
}

/// A way of running one iterative deepening pass.
///
/// The engine calls [`Strategy::begin`] once per search, then
/// [`Strategy::pass`] for every depth in increasing order, stopping at the
/// first [`Interrupt`]. An interrupted pass is discarded as a whole.
pub trait Strategy<P: Position, E: Evaluator<P>>: Send + Sync + 'static {
    /// State carried between passes of the same search.
    type Session;

    /// Prepares a new search.
    fn begin(&self, ctx: &Context<'_, P, E>) -> Self::Session;

    /// Scores every root move at `depth`, collecting those tied for best.
    fn pass(
        &self,
        session: &mut Self::Session,
        ctx: &Context<'_, P, E>,
        depth: u32,
    ) -> Result<Tally<P::Move>, Interrupt>;
}
