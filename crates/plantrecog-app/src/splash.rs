//! Splash surface held up while the bootstrap batch runs

use plantrecog_core::prelude::*;
use plantrecog_core::ReadinessState;

/// Held from process start; released exactly once, right before the first
/// real frame draws.
#[derive(Debug, Default)]
pub struct SplashScreen {
    released: bool,
}

impl SplashScreen {
    pub fn hold() -> Self {
        Self { released: false }
    }

    pub fn is_held(&self) -> bool {
        !self.released
    }

    /// Release the splash if the app just became ready.
    ///
    /// Returns `true` only on the call that actually releases it.
    pub fn release_if_ready(&mut self, readiness: ReadinessState) -> bool {
        if self.released || !readiness.is_ready() {
            return false;
        }
        self.released = true;
        debug!("Splash released");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splash_held_until_ready() {
        let mut splash = SplashScreen::hold();
        assert!(!splash.release_if_ready(ReadinessState::NotReady));
        assert!(splash.is_held());
    }

    #[test]
    fn test_splash_released_exactly_once() {
        let mut splash = SplashScreen::hold();
        assert!(splash.release_if_ready(ReadinessState::Ready));
        assert!(!splash.is_held());
        assert!(!splash.release_if_ready(ReadinessState::Ready));
    }
}
