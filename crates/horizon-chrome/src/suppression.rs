//! Notification suppression for layout passes.
//!
//! Applying bounds makes the window raise its own size/position-changed
//! notifications. If a listener answered those by requesting another layout,
//! the coordinator would feed itself:
//!
//! ```text
//! resized notification -> layout request -> bounds applied -> resized notification
//! ```
//!
//! The [`SuppressionGovernor`] breaks that cycle. While any
//! [`BoundsDriver`] is mutating bounds the effective level is
//! [`SuppressionLevel::All`]; when the outermost driver finishes, the level
//! settles according to who asked for the change.

use serde::{Deserialize, Serialize};

use horizon_chrome_core::logging::targets;

/// Which notifications may reach observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionLevel {
    /// Every notification fires.
    #[default]
    None,
    /// Only notifications caused by direct user manipulation fire.
    Manual,
    /// No notification fires.
    All,
}

impl SuppressionLevel {
    /// Check if a notification of the given origin may fire at this level.
    pub fn allows(self, origin: ChangeOrigin) -> bool {
        match (self, origin) {
            (SuppressionLevel::None, _) => true,
            (SuppressionLevel::Manual, ChangeOrigin::User) => true,
            (SuppressionLevel::Manual, ChangeOrigin::Programmatic) => false,
            (SuppressionLevel::All, _) => false,
        }
    }
}

/// Where a bounds change came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    /// Direct pointer manipulation of the chrome.
    User,
    /// Application code or the window system.
    Programmatic,
}

/// Who is currently mutating the window bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundsDriver {
    /// A single-step apply of a pointer-driven request.
    Pointer,
    /// A single-step apply of a programmatic request.
    Programmatic,
    /// One frame of an animated apply.
    Animation,
}

impl BoundsDriver {
    /// The driver for a single-step apply of a request from `origin`.
    pub fn for_origin(origin: ChangeOrigin) -> Self {
        match origin {
            ChangeOrigin::User => BoundsDriver::Pointer,
            ChangeOrigin::Programmatic => BoundsDriver::Programmatic,
        }
    }
}

/// Re-entrancy guard deciding which notifications escape a layout pass.
#[derive(Debug, Clone)]
pub struct SuppressionGovernor {
    /// Level configured by the host; restored after programmatic passes.
    policy: SuppressionLevel,
    /// Level in effect while no driver is active.
    resting: SuppressionLevel,
    /// Drivers currently inside a bounds mutation, innermost last.
    active: Vec<BoundsDriver>,
    /// An animated pass has frames left; `resting` is held at `All`.
    holding: bool,
}

impl Default for SuppressionGovernor {
    fn default() -> Self {
        Self::new(SuppressionLevel::None)
    }
}

impl SuppressionGovernor {
    /// Create a governor with the given host policy.
    pub fn new(policy: SuppressionLevel) -> Self {
        Self {
            policy,
            resting: policy,
            active: Vec::new(),
            holding: false,
        }
    }

    /// The level in effect right now.
    pub fn level(&self) -> SuppressionLevel {
        if self.active.is_empty() {
            self.resting
        } else {
            SuppressionLevel::All
        }
    }

    /// The host-configured policy.
    pub fn policy(&self) -> SuppressionLevel {
        self.policy
    }

    /// Set the host policy.
    ///
    /// Takes effect immediately only outside a pass. While a driver is active
    /// or animation frames remain, the policy is stored and applied when the
    /// pass settles.
    pub fn set_policy(&mut self, policy: SuppressionLevel) {
        self.policy = policy;
        let deferred = self.in_pass();
        if !deferred {
            self.resting = policy;
        }
        tracing::debug!(target: targets::SUPPRESSION, ?policy, deferred, "suppression policy set");
    }

    /// Check if a pass is running: a driver is active or frames remain.
    pub fn in_pass(&self) -> bool {
        self.holding || !self.active.is_empty()
    }

    /// Check if a notification of the given origin should be acted upon now.
    pub fn should_react(&self, origin: ChangeOrigin) -> bool {
        self.level().allows(origin)
    }

    /// Check if `driver` is currently mutating bounds.
    pub fn is_driving(&self, driver: BoundsDriver) -> bool {
        self.active.contains(&driver)
    }

    /// Number of nested drivers currently active.
    pub fn depth(&self) -> usize {
        self.active.len()
    }

    /// Enter a bounds mutation. The level is `All` until the matching `end`.
    pub fn begin(&mut self, driver: BoundsDriver) {
        self.active.push(driver);
        tracing::trace!(target: targets::SUPPRESSION, ?driver, depth = self.active.len(), "bounds mutation started");
    }

    /// Leave a bounds mutation made for a request from `origin`.
    ///
    /// `continuing` means more animation frames of the same pass will follow.
    /// When this was the outermost driver, the level settles per
    /// [`level_after`](Self::level_after).
    pub fn end(&mut self, driver: BoundsDriver, origin: ChangeOrigin, continuing: bool) {
        let Some(index) = self.active.iter().rposition(|d| *d == driver) else {
            tracing::warn!(target: targets::SUPPRESSION, ?driver, "end without matching begin");
            return;
        };
        self.active.remove(index);

        if self.active.is_empty() {
            self.holding = continuing;
            self.resting = self.level_after(origin, continuing);
            tracing::trace!(target: targets::SUPPRESSION, ?driver, resting = ?self.resting, "bounds mutation finished");
        }
    }

    /// The resting level after a pass for a request from `origin`.
    ///
    /// `continuing` means more animation frames of the same pass will follow.
    pub fn level_after(&self, origin: ChangeOrigin, continuing: bool) -> SuppressionLevel {
        if continuing {
            return SuppressionLevel::All;
        }
        match origin {
            ChangeOrigin::User => SuppressionLevel::Manual,
            ChangeOrigin::Programmatic => self.policy,
        }
    }

    /// Settle the resting level outside of a mutation, e.g. when an animation
    /// is abandoned between frames.
    pub fn settle(&mut self, origin: ChangeOrigin) {
        if self.active.is_empty() {
            self.holding = false;
            self.resting = self.level_after(origin, false);
        }
    }

    /// Return from the post-pointer `Manual` level to the host policy.
    ///
    /// Called once the echo of a pointer-driven write has been seen, or when
    /// new input makes it stale. Does nothing during a pass.
    pub fn release(&mut self) {
        if !self.in_pass() && self.resting != self.policy {
            tracing::trace!(target: targets::SUPPRESSION, from = ?self.resting, to = ?self.policy, "resting level released");
            self.resting = self.policy;
        }
    }

    /// Drop all drivers and return to the host policy.
    pub fn reset(&mut self) {
        self.active.clear();
        self.holding = false;
        self.resting = self.policy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_allows() {
        use ChangeOrigin::*;
        assert!(SuppressionLevel::None.allows(User));
        assert!(SuppressionLevel::None.allows(Programmatic));
        assert!(SuppressionLevel::Manual.allows(User));
        assert!(!SuppressionLevel::Manual.allows(Programmatic));
        assert!(!SuppressionLevel::All.allows(User));
        assert!(!SuppressionLevel::All.allows(Programmatic));
    }

    #[test]
    fn test_all_while_driving() {
        let mut governor = SuppressionGovernor::default();
        assert_eq!(governor.level(), SuppressionLevel::None);

        governor.begin(BoundsDriver::Pointer);
        assert_eq!(governor.level(), SuppressionLevel::All);
        assert!(!governor.should_react(ChangeOrigin::User));
        assert!(governor.is_driving(BoundsDriver::Pointer));

        governor.end(BoundsDriver::Pointer, ChangeOrigin::User, false);
        assert_eq!(governor.level(), SuppressionLevel::Manual);
        assert!(governor.should_react(ChangeOrigin::User));
        assert!(!governor.should_react(ChangeOrigin::Programmatic));
    }

    #[test]
    fn test_nested_drivers_stay_suppressed() {
        let mut governor = SuppressionGovernor::default();
        governor.begin(BoundsDriver::Animation);
        governor.begin(BoundsDriver::Programmatic);
        assert_eq!(governor.depth(), 2);

        governor.end(BoundsDriver::Programmatic, ChangeOrigin::Programmatic, false);
        assert_eq!(governor.level(), SuppressionLevel::All);
        assert!(governor.is_driving(BoundsDriver::Animation));
        assert!(!governor.is_driving(BoundsDriver::Programmatic));

        governor.end(BoundsDriver::Animation, ChangeOrigin::User, false);
        assert_eq!(governor.level(), SuppressionLevel::Manual);
    }

    #[test]
    fn test_unmatched_end_is_ignored() {
        let mut governor = SuppressionGovernor::default();
        governor.begin(BoundsDriver::Pointer);
        governor.end(BoundsDriver::Animation, ChangeOrigin::Programmatic, false);
        assert_eq!(governor.level(), SuppressionLevel::All);
    }

    #[test]
    fn test_continuing_pass_rests_at_all() {
        let mut governor = SuppressionGovernor::new(SuppressionLevel::None);
        assert_eq!(
            governor.level_after(ChangeOrigin::User, true),
            SuppressionLevel::All
        );
        assert_eq!(
            governor.level_after(ChangeOrigin::Programmatic, false),
            SuppressionLevel::None
        );

        governor.set_policy(SuppressionLevel::Manual);
        assert_eq!(
            governor.level_after(ChangeOrigin::Programmatic, false),
            SuppressionLevel::Manual
        );
    }

    #[test]
    fn test_settle_and_reset() {
        let mut governor = SuppressionGovernor::new(SuppressionLevel::None);
        governor.begin(BoundsDriver::Animation);
        governor.end(BoundsDriver::Animation, ChangeOrigin::User, true);
        assert_eq!(governor.level(), SuppressionLevel::All);
        assert!(governor.in_pass());

        governor.settle(ChangeOrigin::User);
        assert!(!governor.in_pass());
        assert_eq!(governor.level(), SuppressionLevel::Manual);

        governor.begin(BoundsDriver::Pointer);
        governor.reset();
        assert_eq!(governor.depth(), 0);
        assert_eq!(governor.level(), SuppressionLevel::None);
    }

    #[test]
    fn test_policy_change_between_frames_is_deferred() {
        let mut governor = SuppressionGovernor::new(SuppressionLevel::Manual);
        governor.begin(BoundsDriver::Animation);
        governor.end(BoundsDriver::Animation, ChangeOrigin::Programmatic, true);

        governor.set_policy(SuppressionLevel::None);
        assert_eq!(governor.policy(), SuppressionLevel::None);
        assert_eq!(governor.level(), SuppressionLevel::All);
        assert!(!governor.should_react(ChangeOrigin::Programmatic));

        governor.begin(BoundsDriver::Animation);
        governor.end(BoundsDriver::Animation, ChangeOrigin::Programmatic, false);
        assert_eq!(governor.level(), SuppressionLevel::None);
    }

    #[test]
    fn test_release_returns_to_policy() {
        let mut governor = SuppressionGovernor::default();
        governor.begin(BoundsDriver::Pointer);
        governor.end(BoundsDriver::Pointer, ChangeOrigin::User, false);
        assert_eq!(governor.level(), SuppressionLevel::Manual);

        governor.release();
        assert_eq!(governor.level(), SuppressionLevel::None);
        assert!(governor.should_react(ChangeOrigin::Programmatic));
    }

    #[test]
    fn test_release_ignored_while_frames_remain() {
        let mut governor = SuppressionGovernor::default();
        governor.begin(BoundsDriver::Animation);
        governor.end(BoundsDriver::Animation, ChangeOrigin::User, true);

        governor.release();
        assert_eq!(governor.level(), SuppressionLevel::All);
    }
}
