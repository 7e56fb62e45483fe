use crate::game::{Evaluator, Move, Position};
use crate::search::{ConfigError, Context, Direct, Executor, Interrupt, Minimax, Strategy, Tally};
use crossbeam_channel::{RecvTimeoutError, unbounded};
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::{marker::PhantomData, sync::Arc, time::Duration};

/// How long the orchestrator waits on workers between clock readings.
const POLL: Duration = Duration::from_millis(5);

/// Workers share a single evaluator, which must synchronize internally.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Shared;

/// Every root move is searched with a private clone of the evaluator.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Private;

/// Iterative deepening alpha-beta with every root move searched by a worker.
///
/// Workers never share bounds, each root move is searched with the full window
/// from the opponent's point of view. Results are joined once per depth.
#[derive(Debug)]
pub struct Parallel<S = Shared> {
    executor: Executor,
    sharing: PhantomData<S>,
}

impl Parallel {
    /// A pool of `threads` workers sharing a single evaluator.
    pub fn new(threads: usize) -> Result<Self, ConfigError> {
        Ok(Parallel {
            executor: Executor::new(threads)?,
            sharing: PhantomData,
        })
    }
}

impl<S> Parallel<S> {
    /// Switches to a private evaluator per root move.
    ///
    /// Required for evaluators that carry unsynchronized mutable state.
    pub fn private(self) -> Parallel<Private> {
        Parallel {
            executor: self.executor,
            sharing: PhantomData,
        }
    }

    /// The number of worker threads.
    #[inline(always)]
    pub fn threads(&self) -> usize {
        self.executor.threads()
    }

    fn fan_out<P, E>(
        &self,
        ctx: &Context<'_, P, E>,
        depth: u32,
        fork: impl Fn(&Arc<E>) -> Arc<E>,
    ) -> Result<Tally<P::Move>, Interrupt>
    where
        P: Position,
        E: Evaluator<P>,
    {
        let (tx, rx) = unbounded();

        for (idx, m) in ctx.moves().iter().enumerate() {
            let child = m.apply(ctx.root().clone());
            let evaluator = fork(ctx.evaluator());
            let ctrl = ctx.ctrl().clone();
            let tx = tx.clone();

            self.executor.execute(move || {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    let (min, max) = (evaluator.min_value(), evaluator.max_value());
                    let expand = Direct::new(&*evaluator);
                    let minimax = Minimax::new(&expand, &ctrl, min, max);
                    minimax.ab(&child, depth.saturating_sub(1), min, max, false)
                }));

                let _ = tx.send((idx, result));
            });
        }

        drop(tx);

        let ctrl = ctx.ctrl();
        let mut values = vec![None; ctx.moves().len()];
        let mut pending = values.len();
        let mut interrupted = false;
        let mut fault = None;

        // Workers must all report back before the pass is over, even if it is discarded.
        while pending > 0 {
            match rx.recv_timeout(POLL) {
                Ok((idx, Ok(Ok(value)))) => {
                    values[idx] = Some(value);
                    pending -= 1;
                }

                Ok((_, Ok(Err(Interrupt)))) => {
                    interrupted = true;
                    pending -= 1;
                }

                Ok((_, Err(payload))) => {
                    ctrl.abort();
                    fault.get_or_insert(payload);
                    pending -= 1;
                }

                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            if ctrl.checkpoint().is_err() {
                interrupted = true;
            }
        }

        if let Some(payload) = fault {
            resume_unwind(payload);
        }

        if interrupted {
            return Err(Interrupt);
        }

        let mut tally = Tally::new();
        for (value, m) in values.into_iter().zip(ctx.moves()) {
            tally.record(value.ok_or(Interrupt)?, m.clone());
        }

        Ok(tally)
    }
}

impl<P: Position, E: Evaluator<P>> Strategy<P, E> for Parallel<Shared> {
    type Session = ();

    #[inline(always)]
    fn begin(&self, _: &Context<'_, P, E>) {}

    fn pass(&self, _: &mut (), ctx: &Context<'_, P, E>, depth: u32) -> Result<Tally<P::Move>, Interrupt> {
        self.fan_out(ctx, depth, Arc::clone)
    }
}

impl<P: Position, E: Evaluator<P> + Clone> Strategy<P, E> for Parallel<Private> {
    type Session = ();

    #[inline(always)]
    fn begin(&self, _: &Context<'_, P, E>) {}

    fn pass(&self, _: &mut (), ctx: &Context<'_, P, E>, depth: u32) -> Result<Tally<P::Move>, Interrupt> {
        self.fan_out(ctx, depth, |e| Arc::new(E::clone(e)))
    }
}
