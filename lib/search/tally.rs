/// The root moves tied for the best value seen so far.
///
/// Values are compared exactly, so moves whose values differ by any amount
/// are never tied. Recording is commutative: the same set of `(value, move)`
/// pairs yields the same best value and the same set of moves in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tally<M> {
    value: Option<f32>,
    moves: Vec<M>,
}

impl<M> Default for Tally<M> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Tally<M> {
    /// An empty tally.
    #[inline(always)]
    pub fn new() -> Self {
        Tally {
            value: None,
            moves: Vec::new(),
        }
    }

    /// Records the value of a root move.
    #[inline(always)]
    pub fn record(&mut self, value: f32, m: M) {
        match self.value {
            Some(best) if value < best => {}
            Some(best) if value == best => self.moves.push(m),
            _ => {
                self.value = Some(value);
                self.moves.clear();
                self.moves.push(m);
            }
        }
    }

    /// The best value, if any move was recorded.
    #[inline(always)]
    pub fn value(&self) -> Option<f32> {
        self.value
    }

    /// The moves tied for the best value.
    #[inline(always)]
    pub fn moves(&self) -> &[M] {
        &self.moves
    }

    /// Consumes the tally, returning the moves tied for the best value.
    #[inline(always)]
    pub fn into_moves(self) -> Vec<M> {
        self.moves
    }

    /// Whether nothing was recorded.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl<M> Extend<(f32, M)> for Tally<M> {
    #[inline(always)]
    fn extend<I: IntoIterator<Item = (f32, M)>>(&mut self, iter: I) {
        for (value, m) in iter {
            self.record(value, m);
        }
    }
}

impl<M> FromIterator<(f32, M)> for Tally<M> {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = (f32, M)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        tally.extend(iter);
        tally
    }
}
