use crate::game::{Evaluator, Move, Position};
use derive_more::with_trait::{Constructor, Display};

/// The largest number of counters that can be taken in one move.
pub const MAX_TAKE: u32 = 2;

/// One of the two players.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Player {
    #[default]
    First,
    Second,
}

impl Player {
    /// The other player.
    #[inline(always)]
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Who wins once the pile is empty.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Rule {
    /// Whoever takes the last counter wins.
    Normal,
    /// Whoever takes the last counter loses.
    #[default]
    Misere,
}

/// A single pile of counters.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("{counters} counters, {turn} to move")]
pub struct Pile {
    #[cfg_attr(test, strategy(0u32..=12))]
    counters: u32,
    turn: Player,
}

impl Pile {
    /// A pile of `counters` with the [`Player::First`] to move.
    #[inline(always)]
    pub fn new(counters: u32) -> Self {
        Pile {
            counters,
            turn: Player::First,
        }
    }

    /// The number of counters left.
    #[inline(always)]
    pub fn counters(&self) -> u32 {
        self.counters
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// The winner, if the game is over.
    #[inline(always)]
    pub fn winner(&self, rule: Rule) -> Option<Player> {
        match (self.counters, rule) {
            (0, Rule::Normal) => Some(self.turn.opponent()),
            (0, Rule::Misere) => Some(self.turn),
            _ => None,
        }
    }
}

/// Removes some counters from the [`Pile`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("take {_0}")]
pub struct Take(#[cfg_attr(test, strategy(1..=MAX_TAKE))] u32);

impl Take {
    /// The number of counters taken.
    #[inline(always)]
    pub fn count(&self) -> u32 {
        self.0
    }
}

impl Position for Pile {
    type Move = Take;

    #[inline(always)]
    fn moves(&self) -> impl Iterator<Item = Take> {
        (1..=MAX_TAKE.min(self.counters)).map(Take)
    }

    #[inline(always)]
    fn is_terminal(&self) -> bool {
        self.counters == 0
    }
}

impl Move<Pile> for Take {
    #[inline(always)]
    fn apply(&self, mut pos: Pile) -> Pile {
        pos.counters = pos.counters.saturating_sub(self.0);
        pos.turn = pos.turn.opponent();
        pos
    }
}

/// Scores finished games for one [`Player`] under a [`Rule`].
///
/// Unfinished games are scored as neutral.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Constructor)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Referee {
    player: Player,
    rule: Rule,
}

impl Evaluator<Pile> for Referee {
    #[inline(always)]
    fn min_value(&self) -> f32 {
        -1.
    }

    #[inline(always)]
    fn max_value(&self) -> f32 {
        1.
    }

    #[inline(always)]
    fn evaluate(&self, pos: &Pile) -> f32 {
        match pos.winner(self.rule) {
            None => 0.,
            Some(p) if p == self.player => self.max_value(),
            Some(_) => self.min_value(),
        }
    }
}
