//! # Process-wide POSIX signal polling
//! * a single `static` flag, installed once per process, flipped by
//!   `SIGINT`/`SIGTERM`
//! * **not** re-entrant across concurrent engines in the same process: if
//!   you run two engines side by side, a signal sets the flag for both of
//!   them. That is the documented tradeoff from `spec.md` §9 ("global
//!   mutable POSIX signal flag").
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static TERMINATING: AtomicBool = AtomicBool::new(false);
static INSTALL: Once = Once::new();

/// Install the `SIGINT`/`SIGTERM` handler, if it has not been installed yet
/// in this process. Safe to call from every engine constructor - only the
/// first call does anything.
pub fn install() {
    INSTALL.call_once(|| {
        // ctrlc::set_handler can only fail if a handler is already
        // installed, which `Once` already prevents.
        let _ = ctrlc::set_handler(|| {
            TERMINATING.store(true, Ordering::SeqCst);
        });
    });
}

/// Has a termination signal been observed since the last [`clear`]?
pub fn is_set() -> bool {
    TERMINATING.load(Ordering::SeqCst)
}

/// Clear the flag. Called at the start of every top-level sampling call
/// ("cleared on call entry", `spec.md` §9).
pub fn clear() {
    TERMINATING.store(false, Ordering::SeqCst);
}

/// Test-only escape hatch: flip the flag directly instead of sending a real
/// signal to the test process.
#[cfg(test)]
pub fn force_set() {
    TERMINATING.store(true, Ordering::SeqCst);
}

#[cfg(test)]
mod tests {
    use super::*;

    // `TERMINATING` is process-global static state, so this is the only
    // test in the crate allowed to touch it directly.
    #[test]
    fn clear_then_force_set_round_trips() {
        clear();
        assert!(!is_set());
        force_set();
        assert!(is_set());
        clear();
        assert!(!is_set());
    }
}
