use crate::Float;
use fastrand::Rng;
use fastrand_contrib::RngExt;
use parking_lot::Once;
use std::{
    fmt,
    sync::atomic::{AtomicU8, Ordering},
};

/// Sampling of [`Float`] values from a [`fastrand::Rng`], independent of the `f32` feature.
///
/// Used to draw points inside a region of interest (see
/// [`Bounds::random_point`](crate::core::Bounds::random_point)) and to draw test points around
/// it.
pub trait SampleFloat {
    /// A uniform value in `[lower, upper)`.
    fn range(&mut self, lower: Float, upper: Float) -> Float;
    /// A normally distributed value with mean `mu` and standard deviation `sigma`.
    fn normal(&mut self, mu: Float, sigma: Float) -> Float;
}
impl SampleFloat for Rng {
    fn range(&mut self, lower: Float, upper: Float) -> Float {
        #[cfg(not(feature = "f32"))]
        {
            self.f64_range(lower..upper)
        }
        #[cfg(feature = "f32")]
        {
            self.f32_range(lower..upper)
        }
    }
    fn normal(&mut self, mu: Float, sigma: Float) -> Float {
        #[cfg(not(feature = "f32"))]
        {
            self.f64_normal(mu, sigma)
        }
        #[cfg(feature = "f32")]
        {
            self.f32_normal(mu, sigma)
        }
    }
}

// Warnings setting, in increasing order of precedence: nobody chose, the first caller of
// `enable_warnings`/`disable_warnings` chose, `BENCHWRAP_WARNINGS` chose.
const UNSET: u8 = 0;
const USER_ON: u8 = 1;
const USER_OFF: u8 = 2;
const ENV_ON: u8 = 3;
const ENV_OFF: u8 = 4;

static WARNINGS: AtomicU8 = AtomicU8::new(UNSET);
static ENV_READ: Once = Once::new();

fn read_env() {
    ENV_READ.call_once(|| {
        let state = match std::env::var("BENCHWRAP_WARNINGS").as_deref() {
            Ok("0") => ENV_OFF,
            Ok("1") => ENV_ON,
            _ => return,
        };
        WARNINGS.store(state, Ordering::Relaxed);
    });
}

fn choose(state: u8) {
    read_env();
    // only the first choice sticks, and never over the environment
    let _ = WARNINGS.compare_exchange(UNSET, state, Ordering::Relaxed, Ordering::Relaxed);
}

/// Turns advisory warnings on, unless something already chose.
///
/// The first call to either [`enable_warnings`] or [`disable_warnings`] wins, so a library
/// building problems on top of this crate cannot undo the choice of the binary that called
/// first. `BENCHWRAP_WARNINGS=0` still keeps warnings off.
pub fn enable_warnings() {
    choose(USER_ON);
}

/// Turns advisory warnings off, unless something already chose.
///
/// See [`enable_warnings`]. `BENCHWRAP_WARNINGS=1` still keeps warnings on.
pub fn disable_warnings() {
    choose(USER_OFF);
}

/// Returns `true` if advisory warnings (like the one about a negative penalty factor) are
/// emitted.
///
/// Warnings are on by default. The environment variable `BENCHWRAP_WARNINGS` (`0` or `1`) takes
/// precedence over [`enable_warnings`] and [`disable_warnings`].
pub fn should_warn() -> bool {
    read_env();
    !matches!(WARNINGS.load(Ordering::Relaxed), USER_OFF | ENV_OFF)
}

/// Sends a warning to [`log::warn!`] if [`should_warn`] allows it.
///
/// Takes [`format_args!`] so that nothing is formatted when warnings are off. Warnings only show
/// up once the binary has installed a logger.
pub fn maybe_warn(args: fmt::Arguments<'_>) {
    if should_warn() {
        log::warn!(target: "benchwrap", "{args}");
    }
}
