use crate::game::{Evaluator, Position};
use crate::search::*;
use crate::util::thread;
use derive_more::with_trait::Debug;
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::channel::oneshot;
use futures::future::{FusedFuture, Future, FutureExt};
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::IndexedRandom};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context as TaskContext, Poll};
use std::{mem, pin::Pin};
use tracing::{debug, info, warn};

/// Configuration for an [`Engine`].
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct Options {
    /// The search limits.
    pub limits: Limits,

    /// Whether to accumulate [`Statistics`].
    pub collect_stats: bool,

    /// Seeds tie-breaking, otherwise seeded from the operating system.
    pub seed: Option<u64>,
}

impl Options {
    /// Options with the given limits, without statistics.
    #[inline(always)]
    pub fn new(limits: Limits) -> Self {
        Options {
            limits,
            ..Default::default()
        }
    }

    /// Enable or disable statistics.
    #[must_use]
    #[inline(always)]
    pub fn with_stats(mut self, collect_stats: bool) -> Self {
        self.collect_stats = collect_stats;
        self
    }

    /// Set the tie-breaking seed.
    #[must_use]
    #[inline(always)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

type Reply<M> = Result<Outcome<M>, SearchError>;

/// A handle to a search running in the background.
///
/// Resolves to the [`Outcome`] once the search is over. Dropping the handle
/// aborts the search.
#[derive(Debug)]
pub struct Search<M> {
    #[debug(skip)]
    reply: oneshot::Receiver<Reply<M>>,
    #[debug(skip)]
    progress: UnboundedReceiver<Info<M>>,
    ctrl: Arc<Control>,
}

impl<M> Search<M> {
    /// The stream of [`Info`], one for every fully-completed depth.
    #[inline(always)]
    pub fn progress(&mut self) -> &mut UnboundedReceiver<Info<M>> {
        &mut self.progress
    }

    /// Interrupts the search, which resolves with the best move found so far.
    #[inline(always)]
    pub fn abort(&self) {
        self.ctrl.abort();
    }
}

impl<M> Drop for Search<M> {
    #[inline(always)]
    fn drop(&mut self) {
        self.ctrl.abort();
    }
}

impl<M> Future for Search<M> {
    type Output = Reply<M>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        self.reply.poll_unpin(cx).map(|reply| match reply {
            Ok(reply) => reply,
            Err(oneshot::Canceled) => Err(SearchError::Disconnected),
        })
    }
}

impl<M> FusedFuture for Search<M> {
    #[inline(always)]
    fn is_terminated(&self) -> bool {
        self.reply.is_terminated()
    }
}

/// Everything the background thread needs to run one search.
struct Job<E, S> {
    strategy: Arc<S>,
    evaluator: Arc<E>,
    limits: Limits,
    ctrl: Arc<Control>,
    log: Option<Arc<Mutex<Statistics>>>,
    rng: SmallRng,
}

impl<E, S> Job<E, S> {
    fn run<P>(mut self, root: P, progress: UnboundedSender<Info<P::Move>>) -> Reply<P::Move>
    where
        P: Position,
        E: Evaluator<P>,
        S: Strategy<P, E>,
    {
        let ctrl = &self.ctrl;

        let mut moves = Vec::new();
        for m in root.moves() {
            moves.push(m);
            if ctrl.checkpoint().is_err() {
                break;
            }
        }

        if moves.is_empty() {
            warn!("the root position has no legal moves");
            return Err(SearchError::NoLegalMoves);
        }

        let ctx = Context::new(&root, &moves, &self.evaluator, ctrl);
        let mut committed = None;

        if !ctrl.is_aborted() {
            let mut session = self.strategy.begin(&ctx);
            for depth in 1..=self.limits.max_depth() {
                if ctrl.checkpoint().is_err() {
                    break;
                }

                match self.strategy.pass(&mut session, &ctx, depth) {
                    Err(Interrupt) => {
                        debug!(depth, nodes = ctrl.visited(), "interrupted");
                        break;
                    }

                    Ok(tally) => {
                        let Some(value) = tally.value() else {
                            break;
                        };

                        let candidates = tally.into_moves();
                        let info = Info::new(depth, ctrl.elapsed(), ctrl.visited(), value, candidates.clone());
                        debug!(depth, value, candidates = candidates.len(), nodes = ctrl.visited(), "completed");
                        let _ = progress.unbounded_send(info);
                        committed = Some((depth, value, candidates));
                    }
                }
            }
        }

        let (depth, value, candidates) = match committed {
            Some((depth, value, candidates)) => (depth, Some(value), candidates),
            None => {
                debug!("not even the first depth completed");
                (0, None, moves)
            }
        };

        let best = match value {
            Some(_) => candidates.choose(&mut self.rng),
            None => candidates.first(),
        };

        let Some(best) = best.cloned() else {
            return Err(SearchError::NoLegalMoves);
        };

        let (time, nodes) = (ctrl.elapsed(), ctrl.visited());
        ctrl.abort();

        let statistics = match &self.log {
            None => Statistics::default(),
            Some(log) => {
                let mut log = log.lock().unwrap_or_else(PoisonError::into_inner);
                log.record(depth, time);
                log.clone()
            }
        };

        info!(depth, ?time, nodes, "search concluded");
        Ok(Outcome::new(best, value, candidates, depth, time, nodes, statistics))
    }
}

/// A game-agnostic adversarial search engine.
///
/// The engine owns the [`Strategy`], the [`Evaluator`] and the configuration,
/// and runs every [`Engine::search`] on a thread of its own.
#[derive(Debug)]
pub struct Engine<E, S> {
    #[debug(skip)]
    strategy: Arc<S>,
    #[debug(skip)]
    evaluator: Arc<E>,
    limits: Limits,
    collect_stats: bool,
    rng: SmallRng,
    log: Arc<Mutex<Statistics>>,
    current: Option<Arc<Control>>,
}

impl<E, S> Engine<E, S> {
    /// Initializes the engine, validating the [`Options`].
    pub fn new(strategy: S, evaluator: E, options: Options) -> Result<Self, ConfigError> {
        options.limits.validate()?;

        Ok(Engine {
            strategy: Arc::new(strategy),
            evaluator: Arc::new(evaluator),
            limits: options.limits,
            collect_stats: options.collect_stats,
            rng: options
                .seed
                .map_or_else(SmallRng::from_os_rng, SmallRng::seed_from_u64),
            log: Arc::default(),
            current: None,
        })
    }

    /// The search limits.
    #[inline(always)]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// The strategy searches are run with.
    #[inline(always)]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Starts searching `root` in the background.
    ///
    /// Any search still running is aborted first.
    pub fn search<P>(&mut self, root: P) -> Search<P::Move>
    where
        P: Position,
        E: Evaluator<P>,
        S: Strategy<P, E>,
    {
        let ctrl = Arc::new(Control::new(&self.limits));
        if let Some(previous) = self.current.replace(ctrl.clone()) {
            previous.abort();
        }

        let job = Job {
            strategy: self.strategy.clone(),
            evaluator: self.evaluator.clone(),
            limits: self.limits.clone(),
            ctrl: ctrl.clone(),
            log: self.collect_stats.then(|| self.log.clone()),
            rng: SmallRng::seed_from_u64(self.rng.random()),
        };

        let (tx, reply) = oneshot::channel();
        let (sender, progress) = unbounded();

        let spawned = thread::spawn("arbor-search", move || {
            let reply = catch_unwind(AssertUnwindSafe(|| job.run(root, sender))).unwrap_or_else(|payload| {
                let e = SearchError::panicked(&*payload);
                warn!(error = %e, "caught a fault in the search");
                Err(e)
            });

            let _ = tx.send(reply);
        });

        if let Err(e) = spawned {
            warn!(error = %e, "failed to spawn the search thread");
            let (tx, reply) = oneshot::channel();
            let _ = tx.send(Err(SearchError::Spawn(e.to_string())));
            return Search { reply, progress, ctrl };
        }

        Search { reply, progress, ctrl }
    }

    /// Requests the current search, if any, to stop as soon as possible.
    ///
    /// This is a no-op if no search was started or the last one is over.
    #[inline(always)]
    pub fn cancel(&self) {
        if let Some(ctrl) = &self.current {
            ctrl.abort();
        }
    }

    /// A snapshot of the statistics accumulated so far.
    ///
    /// Always empty if statistics are disabled.
    pub fn statistics(&self) -> Statistics {
        if self.collect_stats {
            self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
        } else {
            Statistics::default()
        }
    }

    /// Starts accumulating statistics afresh, returning what had been accumulated.
    ///
    /// Returns `None` if statistics are disabled.
    pub fn reset_statistics(&self) -> Option<Statistics> {
        self.collect_stats
            .then(|| mem::take(&mut *self.log.lock().unwrap_or_else(PoisonError::into_inner)))
    }
}
