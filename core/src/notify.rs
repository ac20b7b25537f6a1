//! Transient notifications.
//!
//! Each notification slides in, stays for three seconds from the moment it
//! was shown, slides out, and is then dropped. Time is passed in by the
//! caller so the lifecycle is deterministic.

use std::time::{Duration, Instant};

pub const ENTER_DURATION: Duration = Duration::from_millis(300);
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);
pub const EXIT_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: Level,
    pub message: String,
    pub shown_at: Instant,
}

impl Notification {
    /// `None` once the exit animation has finished.
    pub fn phase(&self, now: Instant) -> Option<Phase> {
        let age = now.saturating_duration_since(self.shown_at);
        if age < ENTER_DURATION {
            Some(Phase::Entering)
        } else if age < DISMISS_AFTER {
            Some(Phase::Visible)
        } else if age < DISMISS_AFTER + EXIT_DURATION {
            Some(Phase::Leaving)
        } else {
            None
        }
    }
}

/// Stack of live notifications, oldest first.
#[derive(Debug, Default)]
pub struct Notifications {
    next_id: u64,
    items: Vec<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: Level, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notification {
            id,
            level,
            message: message.into(),
            shown_at: now,
        });
        id
    }

    /// Drop every notification whose exit animation is over.
    pub fn tick(&mut self, now: Instant) {
        self.items.retain(|n| n.phase(now).is_some());
    }

    pub fn active(&self, now: Instant) -> impl Iterator<Item = (&Notification, Phase)> {
        self.items.iter().filter_map(move |n| n.phase(now).map(|phase| (n, phase)))
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_phases() {
        let start = Instant::now();
        let mut stack = Notifications::new();
        stack.push(Level::Success, "User added successfully!", start);
        let n = stack.latest().unwrap().clone();

        assert_eq!(n.phase(start), Some(Phase::Entering));
        assert_eq!(n.phase(start + Duration::from_millis(299)), Some(Phase::Entering));
        assert_eq!(n.phase(start + Duration::from_millis(300)), Some(Phase::Visible));
        assert_eq!(n.phase(start + Duration::from_millis(2999)), Some(Phase::Visible));
        assert_eq!(n.phase(start + Duration::from_secs(3)), Some(Phase::Leaving));
        assert_eq!(n.phase(start + Duration::from_millis(3300)), None);
    }

    #[test]
    fn notifications_stack_and_expire_independently() {
        let start = Instant::now();
        let mut stack = Notifications::new();
        stack.push(Level::Success, "first", start);
        stack.push(Level::Error, "second", start + Duration::from_secs(2));
        assert_eq!(stack.len(), 2);

        let at = start + Duration::from_millis(3100);
        let phases: Vec<(&str, Phase)> = stack.active(at).map(|(n, p)| (n.message.as_str(), p)).collect();
        assert_eq!(phases, vec![("first", Phase::Leaving), ("second", Phase::Visible)]);

        stack.tick(start + Duration::from_secs(4));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.latest().unwrap().message, "second");

        stack.tick(start + Duration::from_secs(6));
        assert!(stack.is_empty());
    }

    #[test]
    fn ids_are_unique() {
        let now = Instant::now();
        let mut stack = Notifications::new();
        let a = stack.push(Level::Error, "a", now);
        let b = stack.push(Level::Error, "b", now);
        assert_ne!(a, b);
    }
}
