use std::io;
use std::thread::{self as std_thread, Builder, JoinHandle};

/// The stack size for spawned threads.
const STACK_SIZE: usize = 16 << 20;

/// A handle to a spawned thread.
#[derive(Debug)]
pub struct Handle<T>(JoinHandle<T>);

impl<T> Handle<T> {
    /// Waits for the thread to finish.
    #[inline(always)]
    pub fn join(self) -> std_thread::Result<T> {
        self.0.join()
    }

    /// Whether the thread has finished.
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

/// Spawns a named thread with a stack large enough for deep searches.
#[track_caller]
#[inline(always)]
pub fn spawn<F, T>(name: &str, f: F) -> io::Result<Handle<T>>
where
    F: Send + 'static + FnOnce() -> T,
    T: Send + 'static,
{
    let builder = Builder::new().name(name.to_owned()).stack_size(STACK_SIZE);
    Ok(Handle(builder.spawn(f)?))
}
