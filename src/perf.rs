//! Performance instrumentation for the canvas hot paths.
//!
//! Pointer moves arrive at display rate, and each may dab the mask, run a hit
//! test, or rebuild the scene. `profile_scope!` times those blocks when the
//! `profiling` feature is on and compiles to nothing otherwise.
//!
//! ```ignore
//! fn paint_dab() {
//!     profile_scope!("mask_dab");
//!     // ... work ...
//! }
//! ```

use std::time::Instant;
use tracing::warn;

/// Target frame time for 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::perf::TARGET_FRAME_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// RAII timer that warns on drop when its scope ran longer than the threshold
pub struct ScopedTimer {
    name: &'static str,
    threshold_ms: f64,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            threshold_ms,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        } else {
            tracing::trace!(operation = self.name, elapsed_ms, "Timed scope");
        }
    }
}
