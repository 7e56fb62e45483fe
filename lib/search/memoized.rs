use crate::game::{Evaluator, Move, Position};
use crate::search::{Context, Expand, Interrupt, Minimax, Strategy, Tally};
use dashmap::DashMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::hash::Hash;
use std::sync::Arc;
use tracing::trace;

/// Iterative deepening alpha-beta that remembers every expansion and evaluation.
///
/// Caches live as long as the strategy and are never invalidated, which is only
/// sound if the game is deterministic: positions that compare equal must always
/// have the same successors and the same evaluation. Using the same strategy
/// with different evaluators is therefore a logic error.
#[derive(Debug)]
pub struct Memoized<P: Eq + Hash> {
    children: DashMap<P, Arc<[Arc<P>]>, FxBuildHasher>,
    evaluations: DashMap<P, f32, FxBuildHasher>,
}

impl<P: Eq + Hash> Default for Memoized<P> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Eq + Hash> Memoized<P> {
    /// Empty caches.
    #[inline(always)]
    pub fn new() -> Self {
        Memoized {
            children: DashMap::with_hasher(FxBuildHasher),
            evaluations: DashMap::with_hasher(FxBuildHasher),
        }
    }

    /// The number of positions whose successors are cached.
    #[inline(always)]
    pub fn expansions(&self) -> usize {
        self.children.len()
    }

    /// The number of positions whose evaluation is cached.
    #[inline(always)]
    pub fn evaluations(&self) -> usize {
        self.evaluations.len()
    }
}

struct Memo<'a, P: Eq + Hash, E> {
    cache: &'a Memoized<P>,
    evaluator: &'a E,
}

impl<P, E> Expand<P> for Memo<'_, P, E>
where
    P: Position + Eq + Hash + Sync,
    E: Evaluator<P>,
{
    type Child = Arc<P>;

    fn successors(&self, pos: &P) -> impl Iterator<Item = Arc<P>> {
        let children: Arc<[Arc<P>]> = match self.cache.children.get(pos) {
            Some(children) => Arc::clone(&children),
            None => self
                .cache
                .children
                .entry(pos.clone())
                .or_insert_with(|| {
                    let mut seen = FxHashSet::default();
                    pos.moves()
                        .map(|m| m.apply(pos.clone()))
                        .filter(|child| seen.insert(child.clone()))
                        .map(Arc::new)
                        .collect()
                })
                .value()
                .clone(),
        };

        (0..children.len()).map(move |i| children[i].clone())
    }

    fn evaluate(&self, pos: &P) -> f32 {
        if let Some(value) = self.cache.evaluations.get(pos) {
            return *value;
        }

        *self
            .cache
            .evaluations
            .entry(pos.clone())
            .or_insert_with(|| self.evaluator.evaluate(pos))
    }
}

impl<P, E> Strategy<P, E> for Memoized<P>
where
    P: Position + Eq + Hash + Sync,
    E: Evaluator<P>,
{
    type Session = ();

    #[inline(always)]
    fn begin(&self, _: &Context<'_, P, E>) {}

    fn pass(&self, _: &mut (), ctx: &Context<'_, P, E>, depth: u32) -> Result<Tally<P::Move>, Interrupt> {
        let evaluator = &**ctx.evaluator();
        let memo = Memo {
            cache: self,
            evaluator,
        };

        let minimax = Minimax::new(&memo, ctx.ctrl(), evaluator.min_value(), evaluator.max_value());
        let tally = minimax.sweep(ctx.root(), ctx.moves(), depth);
        trace!(depth, expansions = self.expansions(), evaluations = self.evaluations(), "memoized");
        tally
    }
}
