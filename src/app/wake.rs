//! Best-effort "keep the display awake" while a round is in progress

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WakeError {
    /// The platform offers no way to hold the display on
    Unsupported,
}

impl fmt::Display for WakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WakeError::Unsupported => write!(f, "screen wake not supported"),
        }
    }
}

impl std::error::Error for WakeError {}

/// A platform hook that can hold the display on.
pub trait ScreenWake {
    fn acquire(&mut self) -> Result<(), WakeError>;
    fn release(&mut self);
}

/// Terminals expose no wake API.
#[derive(Debug, Default)]
pub struct Unsupported;

impl ScreenWake for Unsupported {
    fn acquire(&mut self) -> Result<(), WakeError> {
        Err(WakeError::Unsupported)
    }

    fn release(&mut self) {}
}

/// Holds the wake capability for the length of a round.
///
/// Failures are logged and swallowed; nothing else depends on the lock.
pub struct WakeLock {
    backend: Option<Box<dyn ScreenWake>>,
    held: bool,
}

impl WakeLock {
    pub fn new(backend: Box<dyn ScreenWake>) -> Self {
        WakeLock {
            backend: Some(backend),
            held: false,
        }
    }

    /// A lock that never tries to acquire anything.
    pub fn disabled() -> Self {
        WakeLock {
            backend: None,
            held: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn acquire(&mut self) {
        if self.is_held() {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.acquire() {
            Ok(()) => {
                tracing::debug!("screen wake acquired");
                self.held = true;
            }
            Err(e) => tracing::debug!(error = %e, "screen wake unavailable"),
        }
    }

    pub fn release(&mut self) {
        if !self.is_held() {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            backend.release();
        }
        self.held = false;
        tracing::debug!("screen wake released");
    }
}

impl Drop for WakeLock {
    fn drop(&mut self) {
        self.release();
    }
}
