use crate::search::{Interrupt, Limits};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering::Relaxed};
use std::time::{Duration, Instant};

/// The search control shared by everyone taking part in a search.
///
/// Cancellation is cooperative: searchers call [`Control::check`] before every
/// child expansion and unwind with [`Interrupt`] once the search has been
/// aborted or time is up.
#[derive(Debug)]
pub struct Control {
    abort: AtomicBool,
    visited: AtomicU64,
    timestamp: Instant,
    time: Option<Duration>,
}

impl Control {
    /// Sets up the controller for a new search.
    #[inline(always)]
    pub fn new(limits: &Limits) -> Self {
        Control {
            abort: AtomicBool::new(false),
            visited: AtomicU64::new(0),
            timestamp: Instant::now(),
            time: limits.time,
        }
    }

    /// The time elapsed so far.
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        Instant::now()
            .saturating_duration_since(self.timestamp)
            .max(Duration::from_nanos(1))
    }

    /// The time left, if the search is time limited.
    #[inline(always)]
    pub fn remaining(&self) -> Option<Duration> {
        Some(self.time?.saturating_sub(self.elapsed()))
    }

    /// The nodes visited so far.
    #[inline(always)]
    pub fn visited(&self) -> u64 {
        self.visited.load(Relaxed)
    }

    /// Interrupts an ongoing search.
    ///
    /// Calling this more than once, or after the search is over, has no further effect.
    #[inline(always)]
    pub fn abort(&self) {
        self.abort.store(true, Relaxed);
    }

    /// Whether the search has been interrupted.
    #[inline(always)]
    pub fn is_aborted(&self) -> bool {
        self.abort.load(Relaxed)
    }

    /// Whether the search may expand another node, counting it as visited.
    #[inline(always)]
    pub fn check(&self) -> Result<(), Interrupt> {
        self.visited.fetch_add(1, Relaxed);
        self.checkpoint()
    }

    /// Whether the search may continue, always consulting the clock.
    #[inline(always)]
    pub fn checkpoint(&self) -> Result<(), Interrupt> {
        if self.is_aborted() {
            return Err(Interrupt);
        }

        match self.time {
            Some(time) if self.elapsed() >= time => {
                self.abort();
                Err(Interrupt)
            }

            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use test_strategy::proptest;

    #[proptest]
    fn measures_time_elapsed(l: Limits) {
        let ctrl = Control::new(&l);
        let duration = Duration::from_millis(1);
        thread::sleep(duration);
        assert!(ctrl.elapsed() >= duration);
    }

    #[proptest]
    fn time_elapsed_is_always_positive(l: Limits) {
        assert!(Control::new(&l).elapsed() > Duration::ZERO);
    }

    #[test]
    fn aborts_if_time_is_up() {
        let ctrl = Control::new(&Limits::time(Duration::from_nanos(1)));
        thread::sleep(Duration::from_millis(1));
        assert_eq!(ctrl.checkpoint(), Err(Interrupt));
        assert_eq!(ctrl.check(), Err(Interrupt));
        assert!(ctrl.is_aborted());
    }

    #[proptest]
    fn aborts_upon_request(#[strategy(1u64..1000)] n: u64) {
        let ctrl = Control::new(&Limits::depth(1));
        ctrl.abort();

        for _ in 0..n {
            assert_eq!(ctrl.check(), Err(Interrupt));
        }

        assert_eq!(ctrl.checkpoint(), Err(Interrupt));
    }

    #[proptest]
    fn aborting_is_idempotent(#[strategy(1usize..10)] n: usize) {
        let ctrl = Control::new(&Limits::depth(1));

        for _ in 0..n {
            ctrl.abort();
        }

        assert!(ctrl.is_aborted());
    }

    #[proptest]
    fn counts_nodes_visited(#[strategy(0u64..1000)] n: u64) {
        let ctrl = Control::new(&Limits::depth(1));

        for _ in 0..n {
            assert_eq!(ctrl.check(), Ok(()));
        }

        assert_eq!(ctrl.visited(), n);
    }

    #[test]
    fn every_check_consults_the_clock() {
        let ctrl = Control::new(&Limits::time(Duration::from_millis(100)));
        assert_eq!(ctrl.check(), Ok(()));
        thread::sleep(Duration::from_millis(150));
        assert_eq!(ctrl.check(), Err(Interrupt));
        assert_eq!(ctrl.visited(), 2);
    }

    #[test]
    fn never_times_out_without_time_limit() {
        let ctrl = Control::new(&Limits::depth(1));
        assert_eq!(ctrl.remaining(), None);
        assert_eq!(ctrl.checkpoint(), Ok(()));
    }

    #[test]
    fn remaining_time_shrinks() {
        let ctrl = Control::new(&Limits::time(Duration::from_secs(60)));
        assert!(ctrl.remaining() < Some(Duration::from_secs(60)));
    }
}
