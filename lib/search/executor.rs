use crate::search::ConfigError;
use crate::util::thread::{self, Handle};
use crossbeam_channel::{SendError, Sender, unbounded};

type Job = Box<dyn FnOnce() + Send>;

/// A fixed pool of worker threads draining a shared job queue.
///
/// Workers live as long as the executor, dropping it waits for every queued
/// job to run before joining them.
#[derive(Debug)]
pub struct Executor {
    sender: Option<Sender<Job>>,
    workers: Vec<Handle<()>>,
}

impl Drop for Executor {
    fn drop(&mut self) {
        drop(self.sender.take());
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Executor {
    /// Spawns the requested number of worker threads.
    pub fn new(threads: usize) -> Result<Self, ConfigError> {
        if threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }

        let (sender, receiver) = unbounded::<Job>();
        let mut executor = Executor {
            sender: Some(sender),
            workers: Vec::with_capacity(threads),
        };

        for i in 0..threads {
            let receiver = receiver.clone();
            let worker = thread::spawn(&format!("arbor-worker-{i}"), move || {
                for job in receiver {
                    job();
                }
            })?;

            executor.workers.push(worker);
        }

        Ok(executor)
    }

    /// The number of worker threads.
    #[inline(always)]
    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    /// Queues `job` for execution by the next idle worker.
    ///
    /// Jobs must not panic, a panicking job takes its worker down with it.
    pub fn execute<F: FnOnce() + Send + 'static>(&self, job: F) {
        let Some(sender) = &self.sender else {
            return job();
        };

        if let Err(SendError(job)) = sender.send(Box::new(job)) {
            job();
        }
    }
}
