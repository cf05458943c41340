use std::cell::Cell;

use tracing::debug;

/// Whether the list is still making its first appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppearancePhase {
    FirstAppearance,
    Settled,
}

/// Decides whether a row bind should animate its connector.
///
/// Rows animate only while the list is first being shown. The gate flips to
/// `Settled` once, when the host reports that the first frame is on screen,
/// and stays there; rows bound later (scrolling, recycling) show their
/// connectors immediately.
#[derive(Debug)]
pub struct AppearanceGate {
    phase: Cell<AppearancePhase>,
}

impl AppearanceGate {
    pub fn new(animate_first_appearance: bool) -> Self {
        let phase = if animate_first_appearance {
            AppearancePhase::FirstAppearance
        } else {
            AppearancePhase::Settled
        };
        Self {
            phase: Cell::new(phase),
        }
    }

    pub fn phase(&self) -> AppearancePhase {
        self.phase.get()
    }

    pub fn should_animate(&self) -> bool {
        self.phase() == AppearancePhase::FirstAppearance
    }

    /// Record that the list has appeared. Returns `true` only for the call
    /// that performed the transition.
    pub fn mark_appeared(&self) -> bool {
        if self.phase.replace(AppearancePhase::Settled) == AppearancePhase::FirstAppearance {
            debug!("List appeared, further rows bind without animation");
            true
        } else {
            false
        }
    }
}

impl Default for AppearanceGate {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_transitions_once() {
        let gate = AppearanceGate::default();
        assert!(gate.should_animate());

        assert!(gate.mark_appeared());
        assert!(!gate.should_animate());
        assert_eq!(gate.phase(), AppearancePhase::Settled);

        assert!(!gate.mark_appeared());
        assert!(!gate.should_animate());
    }

    #[test]
    fn test_gate_disabled_starts_settled() {
        let gate = AppearanceGate::new(false);
        assert!(!gate.should_animate());
        assert!(!gate.mark_appeared());
    }
}
