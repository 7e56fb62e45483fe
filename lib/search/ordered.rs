use crate::game::{Evaluator, Move, Position};
use crate::search::{Context, Control, Interrupt, Strategy, Tally};
use std::cmp::Ordering;

/// The index of a node in the [`Arena`].
type NodeId = usize;

#[derive(Debug)]
struct Node<P> {
    pos: P,
    value: Option<f32>,
    staged: Option<f32>,
    children: Option<Vec<NodeId>>,
    killer: Option<NodeId>,
}

impl<P> Node<P> {
    #[inline(always)]
    fn new(pos: P) -> Self {
        Node {
            pos,
            value: None,
            staged: None,
            children: None,
            killer: None,
        }
    }
}

/// The search tree retained across the passes of one search.
///
/// Values backed up during a pass are staged and only become visible to move
/// ordering once the pass completes.
#[derive(Debug)]
pub struct Arena<P> {
    nodes: Vec<Node<P>>,
    roots: Vec<NodeId>,
    staged: Vec<NodeId>,
}

impl<P> Arena<P> {
    #[inline(always)]
    fn insert(&mut self, pos: P) -> NodeId {
        self.nodes.push(Node::new(pos));
        self.nodes.len() - 1
    }

    #[inline(always)]
    fn stage(&mut self, id: NodeId, value: f32) {
        if self.nodes[id].staged.replace(value).is_none() {
            self.staged.push(id);
        }
    }

    fn commit(&mut self) {
        for id in self.staged.drain(..) {
            let node = &mut self.nodes[id];
            node.value = node.staged.take().or(node.value);
        }
    }

    fn rollback(&mut self) {
        for id in self.staged.drain(..) {
            self.nodes[id].staged = None;
        }
    }

    /// The number of nodes expanded so far.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no node was expanded yet.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Sorts `children` best first for the side to move, then tries `killer` before anything else.
    fn order(&self, children: &mut [NodeId], ours: bool, killer: Option<NodeId>) {
        children.sort_by(|&a, &b| match (self.nodes[a].value, self.nodes[b].value) {
            (Some(a), Some(b)) if ours => b.total_cmp(&a),
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        if let Some(i) = killer.and_then(|k| children.iter().position(|&c| c == k)) {
            children[..=i].rotate_right(1);
        }
    }
}

/// Iterative deepening alpha-beta over a retained search tree.
///
/// Revisited nodes try their children in the order suggested by the previous
/// pass, with the last child to cause a cutoff tried first. Ordering only
/// changes how fast the window closes, never the value found.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ordered;

struct Searcher<'a, E> {
    evaluator: &'a E,
    ctrl: &'a Control,
    min: f32,
    max: f32,
}

impl<E> Searcher<'_, E> {
    fn ab<P>(
        &self,
        arena: &mut Arena<P>,
        id: NodeId,
        depth: u32,
        alpha: f32,
        beta: f32,
        ours: bool,
    ) -> Result<f32, Interrupt>
    where
        P: Position,
        E: Evaluator<P>,
    {
        let node = &mut arena.nodes[id];
        if depth == 0 || node.pos.is_terminal() {
            let value = self.evaluator.evaluate(&node.pos);
            arena.stage(id, value);
            return Ok(value);
        }

        let killer = node.killer;
        let children = match node.children.take() {
            Some(mut children) => {
                arena.order(&mut children, ours, killer);
                children
            }

            None => {
                let pos = &arena.nodes[id].pos;
                let successors: Vec<P> = pos.moves().map(|m| m.apply(pos.clone())).collect();
                successors.into_iter().map(|p| arena.insert(p)).collect()
            }
        };

        let result = self.visit(arena, &children, depth, alpha, beta, ours);
        arena.nodes[id].children = Some(children);

        let (value, killer) = result?;
        if killer.is_some() {
            arena.nodes[id].killer = killer;
        }

        arena.stage(id, value);
        Ok(value)
    }

    /// Searches `children` in order, returning their backed-up value and the child that caused a cutoff.
    fn visit<P>(
        &self,
        arena: &mut Arena<P>,
        children: &[NodeId],
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        ours: bool,
    ) -> Result<(f32, Option<NodeId>), Interrupt>
    where
        P: Position,
        E: Evaluator<P>,
    {
        let mut best = if ours { self.min } else { self.max };

        for &child in children {
            self.ctrl.check()?;
            let value = self.ab(arena, child, depth - 1, alpha, beta, !ours)?;

            if ours {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if beta <= alpha {
                return Ok((best, Some(child)));
            }
        }

        Ok((best, None))
    }

    fn sweep<P>(&self, arena: &mut Arena<P>, moves: &[P::Move], depth: u32) -> Result<Tally<P::Move>, Interrupt>
    where
        P: Position,
        E: Evaluator<P>,
    {
        let mut order: Vec<usize> = (0..arena.roots.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (arena.roots[a], arena.roots[b]);
            match (arena.nodes[a].value, arena.nodes[b].value) {
                (Some(a), Some(b)) => b.total_cmp(&a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });

        let mut tally = Tally::new();
        for i in order {
            self.ctrl.check()?;
            let id = arena.roots[i];
            let value = self.ab(arena, id, depth.saturating_sub(1), self.min, self.max, false)?;
            tally.record(value, moves[i].clone());
        }

        Ok(tally)
    }
}

impl<P: Position, E: Evaluator<P>> Strategy<P, E> for Ordered {
    type Session = Arena<P>;

    fn begin(&self, ctx: &Context<'_, P, E>) -> Arena<P> {
        let mut arena = Arena {
            nodes: Vec::new(),
            roots: Vec::with_capacity(ctx.moves().len()),
            staged: Vec::new(),
        };

        for m in ctx.moves() {
            let id = arena.insert(m.apply(ctx.root().clone()));
            arena.roots.push(id);
        }

        arena
    }

    fn pass(&self, arena: &mut Arena<P>, ctx: &Context<'_, P, E>, depth: u32) -> Result<Tally<P::Move>, Interrupt> {
        let evaluator = &**ctx.evaluator();
        let searcher = Searcher {
            evaluator,
            ctrl: ctx.ctrl(),
            min: evaluator.min_value(),
            max: evaluator.max_value(),
        };

        match searcher.sweep(arena, ctx.moves(), depth) {
            Ok(tally) => {
                arena.commit();
                Ok(tally)
            }

            Err(interrupt) => {
                arena.rollback();
                Err(interrupt)
            }
        }
    }
}
