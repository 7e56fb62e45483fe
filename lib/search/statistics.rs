use std::fmt::{self, Display, Formatter};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Depth and time metrics accumulated over many searches.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statistics {
    iterations: u64,
    depth: Option<(u32, u32)>,
    total_depth: u64,
    time: Option<(Duration, Duration)>,
    total_time: Duration,
}

impl Statistics {
    /// Records the depth reached and the time spent by one search.
    #[inline(always)]
    pub fn record(&mut self, depth: u32, time: Duration) {
        self.iterations += 1;
        self.total_depth += u64::from(depth);
        self.total_time = self.total_time.saturating_add(time);

        self.depth = Some(match self.depth {
            None => (depth, depth),
            Some((min, max)) => (min.min(depth), max.max(depth)),
        });

        self.time = Some(match self.time {
            None => (time, time),
            Some((min, max)) => (min.min(time), max.max(time)),
        });
    }

    /// The number of searches recorded.
    #[inline(always)]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The shallowest depth reached.
    #[inline(always)]
    pub fn min_depth(&self) -> Option<u32> {
        self.depth.map(|(min, _)| min)
    }

    /// The deepest depth reached.
    #[inline(always)]
    pub fn max_depth(&self) -> Option<u32> {
        self.depth.map(|(_, max)| max)
    }

    /// The average depth reached.
    #[inline(always)]
    pub fn avg_depth(&self) -> Option<f64> {
        match self.iterations {
            0 => None,
            n => Some(self.total_depth as f64 / n as f64),
        }
    }

    /// The shortest time spent.
    #[inline(always)]
    pub fn min_time(&self) -> Option<Duration> {
        self.time.map(|(min, _)| min)
    }

    /// The longest time spent.
    #[inline(always)]
    pub fn max_time(&self) -> Option<Duration> {
        self.time.map(|(_, max)| max)
    }

    /// The average time spent.
    #[inline(always)]
    pub fn avg_time(&self) -> Option<Duration> {
        match self.iterations {
            0 => None,
            n => Some(self.total_time.div_f64(n as f64)),
        }
    }
}

impl Display for Statistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (Some((dmin, dmax)), Some((tmin, tmax)), Some(davg), Some(tavg)) =
            (self.depth, self.time, self.avg_depth(), self.avg_time())
        else {
            return f.write_str("no searches recorded");
        };

        write!(
            f,
            "{} searches, depth {dmin}..={dmax} (avg {davg:.2}), time {tmin:?}..={tmax:?} (avg {tavg:?})",
            self.iterations
        )
    }
}
