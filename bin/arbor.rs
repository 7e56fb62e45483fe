use anyhow::Error as Failure;
use arbor::game::{Move, Position};
use arbor::nim::{Pile, Player, Referee, Rule};
use arbor::search::{ConfigError, Engine, Limits, Memoized, Options, Ordered, Parallel, Sequential, Strategy};
use clap::{Parser, ValueEnum};
use futures::{StreamExt, executor::block_on};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Kind {
    /// Alpha-beta on a single thread.
    Sequential,
    /// Every root move searched by a worker thread.
    Parallel,
    /// Successors and evaluations cached across searches.
    Memoized,
    /// A retained tree ordered by previous values and killer moves.
    Ordered,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum Variant {
    /// Whoever takes the last counter wins.
    Normal,
    /// Whoever takes the last counter loses.
    Misere,
}

impl From<Variant> for Rule {
    fn from(v: Variant) -> Self {
        match v {
            Variant::Normal => Rule::Normal,
            Variant::Misere => Rule::Misere,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(name = "Arbor", version)]
#[clap(help_template = "
{name} v{version}

{name} plays single-pile Nim against itself with a generic game-tree search.
Set RUST_LOG=debug to follow every iterative deepening pass.

{usage-heading} {usage}

{all-args}
")]
struct Cli {
    /// The number of counters on the pile.
    #[arg(long, default_value_t = 5)]
    pile: u32,

    /// The maximum number of plies to search, defaults to the pile size.
    #[arg(long)]
    depth: Option<u32>,

    /// The maximum number of milliseconds to spend on every move.
    #[arg(long, value_name = "MILLIS")]
    time: Option<u64>,

    /// The search strategy.
    #[arg(long, value_enum, default_value_t = Kind::Sequential)]
    strategy: Kind,

    /// The number of worker threads of the parallel strategy.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Who wins once the pile is empty.
    #[arg(long, value_enum, default_value_t = Variant::Misere)]
    rule: Variant,

    /// Seeds tie-breaking for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Print search statistics once the game is over.
    #[arg(long)]
    stats: bool,
}

impl Cli {
    fn options(&self) -> Options {
        let limits = match (self.depth, self.time) {
            (None, None) => Limits::depth(self.pile.max(1)),
            (depth, time) => Limits {
                depth,
                time: time.map(Duration::from_millis),
            },
        };

        let options = Options::new(limits).with_stats(self.stats);
        match self.seed {
            Some(seed) => options.with_seed(seed),
            None => options,
        }
    }
}

fn play<S, F>(cli: &Cli, strategy: F) -> Result<(), Failure>
where
    S: Strategy<Pile, Referee>,
    F: Fn() -> Result<S, ConfigError>,
{
    let rule = Rule::from(cli.rule);
    let mut first = Engine::new(strategy()?, Referee::new(Player::First, rule), cli.options())?;
    let mut second = Engine::new(strategy()?, Referee::new(Player::Second, rule), cli.options())?;
    let mut pile = Pile::new(cli.pile);

    while !pile.is_terminal() {
        let engine = match pile.turn() {
            Player::First => &mut first,
            Player::Second => &mut second,
        };

        let mut search = engine.search(pile);
        let outcome = block_on(async move {
            while let Some(info) = search.progress().next().await {
                info!(
                    depth = info.depth(),
                    value = info.value(),
                    candidates = info.candidates().len(),
                    "{}",
                    pile
                );
            }

            search.await
        })?;

        println!("{pile}: {} after {} plies", outcome.best(), outcome.depth());
        pile = outcome.best().apply(pile);
    }

    if let Some(winner) = pile.winner(rule) {
        println!("{winner} wins");
    }

    if cli.stats {
        println!("{}: {}", Player::First, first.statistics());
        println!("{}: {}", Player::Second, second.statistics());
    }

    Ok(())
}

fn main() -> Result<(), Failure> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.strategy {
        Kind::Sequential => play(&cli, || Ok(Sequential)),
        Kind::Parallel => play(&cli, || Parallel::new(cli.threads)),
        Kind::Memoized => play(&cli, || Ok(Memoized::<Pile>::new())),
        Kind::Ordered => play(&cli, || Ok(Ordered)),
    }
}
