//! Presentation lifecycle
//!
//! The shell moves strictly forward: surface not yet created, surface
//! created and configured, load handed off. Dispatch re-enters on every
//! new presentation of the view; nothing ever moves backwards and there is
//! no teardown state - surface disposal belongs to the webview.

use tracing::info;

/// Observable shell states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Surface not yet created
    Uninitialized,
    /// Surface created, capabilities and user agent applied
    Configuring,
    /// A load request has been handed to the surface
    LoadDispatched,
}

/// Forward-only phase tracker.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    dispatches: u32,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            dispatches: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// How many loads have been dispatched so far.
    pub fn dispatches(&self) -> u32 {
        self.dispatches
    }

    /// The surface exists and its creation-time settings are applied.
    /// Valid only once, out of `Uninitialized`.
    pub fn surface_ready(&mut self) -> Result<(), PhaseError> {
        match self.phase {
            Phase::Uninitialized => {
                self.phase = Phase::Configuring;
                Ok(())
            }
            from => Err(PhaseError::AlreadyConfigured { from }),
        }
    }

    /// A load request was handed to the surface. Re-enterable: every new
    /// presentation dispatches again.
    pub fn load_dispatched(&mut self) -> Result<(), PhaseError> {
        match self.phase {
            Phase::Configuring | Phase::LoadDispatched => {
                self.phase = Phase::LoadDispatched;
                self.dispatches += 1;
                info!(dispatches = self.dispatches, "load dispatched to surface");
                Ok(())
            }
            Phase::Uninitialized => Err(PhaseError::SurfaceNotReady),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Out-of-order lifecycle events.
#[derive(Debug, thiserror::Error)]
pub enum PhaseError {
    #[error("surface already configured (phase {from:?})")]
    AlreadyConfigured { from: Phase },

    #[error("cannot dispatch a load before the surface is configured")]
    SurfaceNotReady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        let mut lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.phase(), Phase::Uninitialized);

        lifecycle.surface_ready().unwrap();
        assert_eq!(lifecycle.phase(), Phase::Configuring);

        lifecycle.load_dispatched().unwrap();
        assert_eq!(lifecycle.phase(), Phase::LoadDispatched);
    }

    #[test]
    fn test_dispatch_reenters() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.surface_ready().unwrap();
        lifecycle.load_dispatched().unwrap();
        lifecycle.load_dispatched().unwrap();
        assert_eq!(lifecycle.phase(), Phase::LoadDispatched);
        assert_eq!(lifecycle.dispatches(), 2);
    }

    #[test]
    fn test_no_dispatch_before_surface() {
        let mut lifecycle = Lifecycle::new();
        assert!(matches!(
            lifecycle.load_dispatched(),
            Err(PhaseError::SurfaceNotReady)
        ));
    }

    #[test]
    fn test_no_double_configure() {
        let mut lifecycle = Lifecycle::new();
        lifecycle.surface_ready().unwrap();
        assert!(matches!(
            lifecycle.surface_ready(),
            Err(PhaseError::AlreadyConfigured { .. })
        ));
    }
}
