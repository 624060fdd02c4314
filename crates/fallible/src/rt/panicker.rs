use std::sync::{Mutex, PoisonError, RwLock};

use crate::origin::SourceOrigin;

/// Sink for unrecoverable failures. Implementations must not return.
///
/// Install one process-wide with [`set_panicker`]; libraries should leave the choice
/// to the application.
pub trait Panicker: Send + Sync {
    fn panic(&self, origin: &SourceOrigin, message: &str) -> !;
}

/// Logs the failure, prints it to stderr and aborts the process. The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbortPanicker;

static ABORT_OUTPUT: Mutex<()> = Mutex::new(());

impl Panicker for AbortPanicker {
    fn panic(&self, origin: &SourceOrigin, message: &str) -> ! {
        // Keep concurrent reports from interleaving.
        let _guard = ABORT_OUTPUT.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::error!(%origin, "{message}");
        eprintln!("Panicked at {origin}: {message}");
        std::process::abort()
    }
}

/// Raises an ordinary Rust panic instead of aborting.
///
/// Intended for tests (`#[should_panic]`) and for hosts that catch unwinds at a
/// thread boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnwindPanicker;

impl Panicker for UnwindPanicker {
    fn panic(&self, origin: &SourceOrigin, message: &str) -> ! {
        std::panic!("Panicked at {origin}: {message}")
    }
}

static PANICKER: RwLock<&'static dyn Panicker> = RwLock::new(&AbortPanicker);

/// Replaces the process panic sink, returning the previous one.
pub fn set_panicker(panicker: &'static dyn Panicker) -> &'static dyn Panicker {
    let mut slot = PANICKER.write().unwrap_or_else(PoisonError::into_inner);
    std::mem::replace(&mut *slot, panicker)
}

pub fn panicker() -> &'static dyn Panicker {
    *PANICKER.read().unwrap_or_else(PoisonError::into_inner)
}

/// Reports an unrecoverable failure through the installed sink.
pub fn panic(origin: &SourceOrigin, message: &str) -> ! {
    panicker().panic(origin, message)
}
