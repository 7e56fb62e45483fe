use crate::game::{Evaluator, Move, Position};
use crate::search::Tally;
use proptest::{collection::vec, prelude::*};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An explicit game tree with a score attached to every node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Tree {
    children: Vec<Vec<usize>>,
    scores: Vec<i8>,
}

impl Arbitrary for Tree {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (2usize..=40)
            .prop_flat_map(|n| (vec(0usize..=3, n), vec(-8i8..=8, n)))
            .prop_map(|(branching, scores)| {
                let n = scores.len();
                let mut children = vec![Vec::new(); n];
                let mut next = 1;

                // Breadth-first, so the root always has at least one child.
                for (i, &b) in branching.iter().enumerate() {
                    if i >= next {
                        break;
                    }

                    for _ in 0..b.max(usize::from(i == 0)) {
                        if next < n {
                            children[i].push(next);
                            next += 1;
                        }
                    }
                }

                Tree { children, scores }
            })
            .boxed()
    }
}

impl Tree {
    /// The root node.
    pub fn root(&self) -> Node {
        Node {
            tree: Arc::new(self.clone()),
            idx: 0,
        }
    }

    /// Some node without children.
    pub fn leaf(&self) -> Node {
        let idx = (0..self.children.len())
            .rev()
            .find(|&i| self.children[i].is_empty())
            .unwrap_or_default();

        Node {
            tree: Arc::new(self.clone()),
            idx,
        }
    }
}

/// A node of a [`Tree`].
#[derive(Debug, Clone)]
pub struct Node {
    tree: Arc<Tree>,
    idx: usize,
}

impl Eq for Node {}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
    }
}

/// Moves to the child with the given index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Edge(pub usize);

impl Position for Node {
    type Move = Edge;

    fn moves(&self) -> impl Iterator<Item = Edge> {
        self.tree.children[self.idx].iter().copied().map(Edge)
    }

    fn is_terminal(&self) -> bool {
        self.tree.children[self.idx].is_empty()
    }
}

impl Move<Node> for Edge {
    fn apply(&self, pos: Node) -> Node {
        Node { idx: self.0, ..pos }
    }
}

/// Scores nodes by the score attached to them.
#[derive(Debug, Default, Copy, Clone)]
pub struct Scores;

impl Evaluator<Node> for Scores {
    fn min_value(&self) -> f32 {
        -128.
    }

    fn max_value(&self) -> f32 {
        127.
    }

    fn evaluate(&self, pos: &Node) -> f32 {
        pos.tree.scores[pos.idx].into()
    }
}

/// Panics whenever asked to evaluate a position.
#[derive(Debug, Default, Copy, Clone)]
pub struct Faulty;

impl<P> Evaluator<P> for Faulty {
    fn min_value(&self) -> f32 {
        -1.
    }

    fn max_value(&self) -> f32 {
        1.
    }

    fn evaluate(&self, _: &P) -> f32 {
        panic!("faulty evaluator")
    }
}

/// A game that never ends and branches three ways at every ply.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Endless(u64);

/// Advances an [`Endless`] game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Step(u64);

impl Position for Endless {
    type Move = Step;

    fn moves(&self) -> impl Iterator<Item = Step> {
        (0..3).map(Step)
    }

    fn is_terminal(&self) -> bool {
        false
    }
}

impl Move<Endless> for Step {
    fn apply(&self, pos: Endless) -> Endless {
        Endless(pos.0.wrapping_mul(3).wrapping_add(self.0))
    }
}

/// Scores every position as neutral.
#[derive(Debug, Default, Copy, Clone)]
pub struct Flat;

impl Evaluator<Endless> for Flat {
    fn min_value(&self) -> f32 {
        -1.
    }

    fn max_value(&self) -> f32 {
        1.
    }

    fn evaluate(&self, _: &Endless) -> f32 {
        0.
    }
}

/// Unpruned minimax over a [`Tree`], scored by [`Scores`].
pub fn minimax(node: &Node, depth: u32, ours: bool) -> f32 {
    if depth == 0 || node.is_terminal() {
        return Scores.evaluate(node);
    }

    let values = node.moves().map(|m| minimax(&m.apply(node.clone()), depth - 1, !ours));

    if ours {
        values.fold(Scores.min_value(), f32::max)
    } else {
        values.fold(Scores.max_value(), f32::min)
    }
}

/// The root moves of `node` tied for best at `depth`, by unpruned minimax.
pub fn reference(node: &Node, depth: u32) -> Tally<Edge> {
    node.moves()
        .map(|m| (minimax(&m.apply(node.clone()), depth - 1, false), m))
        .collect()
}
