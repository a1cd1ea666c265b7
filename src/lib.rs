pub mod app;
pub mod config;
pub mod grid;
pub mod init;
pub mod particle;
pub mod population;
pub mod profiler;
pub mod rng;
pub mod simulation;
pub mod verify;

#[cfg(feature = "profiling")]
use once_cell::sync::Lazy;
#[cfg(feature = "profiling")]
use parking_lot::Mutex;

#[cfg(feature = "profiling")]
pub static PROFILER: Lazy<Mutex<profiler::Profiler>> =
    Lazy::new(|| Mutex::new(profiler::Profiler::new()));
