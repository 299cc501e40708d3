// src/models/portal.rs

//! Intro gate shown before the archive.

use std::time::Duration;

/// Visual state of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortalState {
    #[default]
    Off,
    Ready,
    Active,
}

impl PortalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortalState::Off => "off",
            PortalState::Ready => "ready",
            PortalState::Active => "active",
        }
    }
}

/// State machine for the intro gate.
///
/// A tap moves the portal to `Active` and starts the explosion; once
/// exploding, every further input is ignored.
#[derive(Debug, Clone, Default)]
pub struct IntroPortal {
    state: PortalState,
    exploding: bool,
    explode_delay: Duration,
}

impl IntroPortal {
    pub fn new(explode_delay: Duration) -> Self {
        Self {
            explode_delay,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PortalState {
        self.state
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    /// Touch or hover started.
    pub fn press(&mut self) {
        if !self.exploding {
            self.state = PortalState::Ready;
        }
    }

    /// Trigger the explosion.
    ///
    /// Returns the delay after which the archive should be revealed, or
    /// `None` if the portal is already exploding.
    pub fn tap(&mut self) -> Option<Duration> {
        if self.exploding {
            return None;
        }
        self.state = PortalState::Active;
        self.exploding = true;
        Some(self.explode_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_then_tap() {
        let mut portal = IntroPortal::new(Duration::from_millis(800));
        assert_eq!(portal.state(), PortalState::Off);

        portal.press();
        assert_eq!(portal.state(), PortalState::Ready);

        assert_eq!(portal.tap(), Some(Duration::from_millis(800)));
        assert_eq!(portal.state(), PortalState::Active);
        assert!(portal.is_exploding());
    }

    #[test]
    fn test_tap_only_fires_once() {
        let mut portal = IntroPortal::new(Duration::from_millis(10));
        assert!(portal.tap().is_some());
        assert!(portal.tap().is_none());
    }

    #[test]
    fn test_press_ignored_while_exploding() {
        let mut portal = IntroPortal::new(Duration::ZERO);
        portal.tap();
        portal.press();
        assert_eq!(portal.state(), PortalState::Active);
    }
}
