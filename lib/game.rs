/// A complete snapshot of a game.
///
/// [`Clone`] must produce an independent deep copy: mutating the copy never
/// affects the original. The search relies on this to apply [`Move`]s to
/// clones of positions it still holds.
pub trait Position: Clone + Send + 'static {
    /// The type of transformation between positions.
    type Move: Move<Self>;

    /// The legal [`Move`]s from this position.
    ///
    /// The order need not be stable across calls.
    fn moves(&self) -> impl Iterator<Item = Self::Move>;

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;
}

/// A transformation from one [`Position`] to another.
///
/// Applying the same move to different positions must be safe and must never
/// mutate the move itself.
pub trait Move<P>: Clone + Send + 'static {
    /// Applies this move to `pos`, returning the resulting position.
    ///
    /// The engine always passes a clone it owns, so `pos` may be reused freely.
    fn apply(&self, pos: P) -> P;
}

/// A heuristic scoring function over [`Position`]s.
///
/// Scores are always from the point of view of the side searching, and must
/// lie within `[min_value, max_value]`. A single evaluator may be invoked
/// concurrently by parallel workers, so implementations must either be
/// stateless or synchronize internally.
pub trait Evaluator<P>: Send + Sync + 'static {
    /// The lowest score any position can have.
    fn min_value(&self) -> f32;

    /// The highest score any position can have.
    fn max_value(&self) -> f32;

    /// Scores `pos`, higher is better for the side searching.
    fn evaluate(&self, pos: &P) -> f32;
}
