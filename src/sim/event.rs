use std::fmt;

use super::Time;
use crate::error::SimError;

/// Callback run when an event fires.
///
/// Receives the run's state by mutable reference and the current clock, and
/// returns the follow-up events. Their times are relative to the clock.
pub type Action<C> = Box<dyn FnOnce(&mut C, Time) -> Vec<Event<C>>>;

/// A unit of work waiting to be scheduled.
///
/// `delay` is relative: the simulator adds it to its clock when the event is
/// pushed, which fixes the absolute fire time.
pub struct Event<C> {
    delay: Time,
    action: Action<C>,
}

impl<C> Event<C> {
    /// Create an event firing `delay` time units after it is scheduled.
    pub fn new<F>(delay: i64, action: F) -> Result<Self, SimError>
    where
        F: FnOnce(&mut C, Time) -> Vec<Event<C>> + 'static,
    {
        Ok(Self::after(Time::from_units(delay)?, action))
    }

    /// Same as [`Event::new`] for a delay already known to be valid.
    pub fn after<F>(delay: Time, action: F) -> Self
    where
        F: FnOnce(&mut C, Time) -> Vec<Event<C>> + 'static,
    {
        Self {
            delay,
            action: Box::new(action),
        }
    }

    pub fn delay(&self) -> Time {
        self.delay
    }

    pub(super) fn into_action(self) -> Action<C> {
        self.action
    }
}

impl<C> fmt::Debug for Event<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event").field("delay", &self.delay).finish_non_exhaustive()
    }
}
