//! Terminal output for step messages.
//!
//! Status lines go to stderr with a coloured symbol. Colour is decided once in
//! [`init`] from `--no-color`, `NO_COLOR`, `FORCE_COLOR` and whether stderr is
//! a terminal; `--quiet` silences everything below warnings.
//!
//! ```no_run
//! use sitepack_cli::ui;
//!
//! ui::init(false, false);
//! ui::info("Building...");
//! ui::success("Done");
//! ```

mod format;
mod messages;

pub use format::format_duration;
pub use messages::{error, info, success, warning};

use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise stderr must be a terminal.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::user_attended_stderr()
}

/// Configure colour and verbosity for all later messages.
pub fn init(no_color: bool, quiet: bool) {
    COLORS.store(!no_color && should_use_color(), Ordering::Relaxed);
    QUIET.store(quiet, Ordering::Relaxed);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub(crate) fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}
