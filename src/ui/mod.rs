//! Terminal output helpers
//!
//! Spinners and colored status lines on interactive terminals, plain
//! `[OK]`/`[FAIL]` lines in CI or when stderr is redirected.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{step_error_detail, step_ok, step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
