// profiler.rs
// Feature-gated scoped timer for the simulation phases.

use std::time::{Duration, Instant};

/// Cumulative wall-clock time and hit count per named phase, in first-seen
/// order.
pub struct Profiler {
    phases: Vec<(&'static str, Duration, u64)>,
}

impl Profiler {
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    pub fn finish(&mut self, guard: &ProfilerGuard) {
        let elapsed = guard.start.elapsed();
        match self.phases.iter_mut().find(|(name, _, _)| *name == guard.name) {
            Some(entry) => {
                entry.1 += elapsed;
                entry.2 += 1;
            }
            None => self.phases.push((guard.name, elapsed, 1)),
        }
    }

    pub fn clear(&mut self) {
        self.phases.clear();
    }

    pub fn print_and_clear(&mut self) {
        let total: Duration = self.phases.iter().map(|(_, elapsed, _)| *elapsed).sum();
        for (name, elapsed, hits) in &self.phases {
            let share = if total.is_zero() {
                0.0
            } else {
                100.0 * elapsed.as_secs_f64() / total.as_secs_f64()
            };
            println!("{:<12} {:>12?} {:>8} calls {:>6.1}%", name, elapsed, hits, share);
        }
        self.clear();
    }
}

pub struct ProfilerGuard {
    name: &'static str,
    start: Instant,
}

/// Start a timed section. The global profiler is updated when the guard
/// drops.
pub fn start(name: &'static str) -> ProfilerGuard {
    ProfilerGuard { name, start: Instant::now() }
}

#[cfg(feature = "profiling")]
impl Drop for ProfilerGuard {
    fn drop(&mut self) {
        crate::PROFILER.lock().finish(self);
    }
}

/// Profile a scope only when the `profiling` feature is enabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _guard = $crate::profiler::start($name);
    };
}
