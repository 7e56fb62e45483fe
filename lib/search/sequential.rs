use crate::game::{Evaluator, Position};
use crate::search::{Context, Direct, Interrupt, Minimax, Strategy, Tally};

/// Iterative deepening alpha-beta on the search thread alone.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Sequential;

impl<P: Position, E: Evaluator<P>> Strategy<P, E> for Sequential {
    type Session = ();

    #[inline(always)]
    fn begin(&self, _: &Context<'_, P, E>) {}

    fn pass(&self, _: &mut (), ctx: &Context<'_, P, E>, depth: u32) -> Result<Tally<P::Move>, Interrupt> {
        let evaluator = &**ctx.evaluator();
        let expand = Direct::new(evaluator);
        let minimax = Minimax::new(&expand, ctx.ctrl(), evaluator.min_value(), evaluator.max_value());
        minimax.sweep(ctx.root(), ctx.moves(), depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Control, Limits, fixture::*};
    use std::sync::Arc;
    use test_strategy::proptest;

    #[proptest]
    fn pass_matches_unpruned_minimax(tree: Tree, #[strategy(1u32..8)] depth: u32) {
        let root = tree.root();
        let moves: Vec<_> = root.moves().collect();
        let evaluator = Arc::new(Scores);
        let ctrl = Arc::new(Control::new(&Limits::depth(depth)));
        let ctx = Context::new(&root, &moves, &evaluator, &ctrl);
        let mut session = Sequential.begin(&ctx);
        assert_eq!(Sequential.pass(&mut session, &ctx, depth), Ok(reference(&root, depth)));
    }

    #[proptest]
    fn pass_can_be_aborted(tree: Tree, #[strategy(1u32..8)] depth: u32) {
        let root = tree.root();
        let moves: Vec<_> = root.moves().collect();
        let evaluator = Arc::new(Scores);
        let ctrl = Arc::new(Control::new(&Limits::depth(depth)));
        ctrl.abort();
        let ctx = Context::new(&root, &moves, &evaluator, &ctrl);
        assert_eq!(Sequential.pass(&mut (), &ctx, depth), Err(Interrupt));
    }
}
