mod control;
mod engine;
mod error;
mod executor;
mod limits;
mod memoized;
mod minimax;
mod ordered;
mod outcome;
mod parallel;
mod sequential;
mod statistics;
mod strategy;
mod tally;

#[cfg(test)]
mod fixture;

pub use control::*;
pub use engine::*;
pub use error::*;
pub use executor::*;
pub use limits::*;
pub use memoized::*;
pub use minimax::*;
pub use ordered::*;
pub use outcome::*;
pub use parallel::*;
pub use sequential::*;
pub use statistics::*;
pub use strategy::*;
pub use tally::*;
