use std::time::Duration;

/// Stands in for compute-bound work by holding the calling thread.
pub trait WorkloadDelay {
    fn wait(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleepDelay;

impl WorkloadDelay for ThreadSleepDelay {
    fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}
