use tracing::{debug, trace, warn};

use super::{Event, EventQueue, Time};
use crate::error::SimError;

/// Discrete-event simulator.
///
/// Keeps a virtual clock and a queue of pending events. [`Simulator::execute`]
/// drains the queue in time order, running each action against the state the
/// caller passes in. The clock carries over from one `execute` to the next.
pub struct Simulator<C> {
    queue: EventQueue<C>,
    now: Time,
    fired: u64,
}

impl<C> Simulator<C> {
    pub fn new() -> Self {
        Self {
            queue: EventQueue::new(),
            now: Time::ZERO,
            fired: 0,
        }
    }

    /// Time of the most recently fired event, across all runs.
    pub fn now(&self) -> Time {
        self.now
    }

    /// Total number of events fired, across all runs.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Schedule `initial` relative to the current clock, then run every event
    /// until the queue is empty.
    ///
    /// If an event would fire past the end of the clock the run stops with
    /// [`SimError::TimeOverflow`], pending events are discarded and the clock
    /// stays at the last fired event.
    pub fn execute(&mut self, ctx: &mut C, initial: Event<C>) -> Result<(), SimError> {
        let started_at = self.now;
        let fired_before = self.fired;
        self.schedule(initial)?;

        while !self.queue.is_empty() {
            let entry = self.queue.pop().ok_or(SimError::EmptyQueue)?;
            debug_assert!(entry.when >= self.now, "clock went backwards");
            self.now = entry.when;
            self.fired += 1;
            trace!(now = %self.now, pending = self.queue.len(), "firing event");

            for next in (entry.action)(ctx, self.now) {
                if let Err(err) = self.schedule(next) {
                    warn!(
                        now = %self.now,
                        pending = self.queue.len(),
                        error = %err,
                        "discarding pending events"
                    );
                    self.queue.clear();
                    return Err(err);
                }
            }
        }

        debug!(
            started_at = %started_at,
            finished_at = %self.now,
            events = self.fired - fired_before,
            "simulation run drained"
        );
        Ok(())
    }

    fn schedule(&mut self, event: Event<C>) -> Result<(), SimError> {
        let when = self.now.checked_add(event.delay()).ok_or(SimError::TimeOverflow {
            now: self.now.as_units(),
            delay: event.delay().as_units(),
        })?;
        self.queue.push(when, event.into_action());
        Ok(())
    }
}

impl<C> Default for Simulator<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    type Log = Vec<(&'static str, u64)>;

    fn log_action(
        id: &'static str,
        next: Vec<Event<Log>>,
    ) -> impl FnOnce(&mut Log, Time) -> Vec<Event<Log>> {
        move |log: &mut Log, now: Time| {
            log.push((id, now.as_units()));
            next
        }
    }

    #[test]
    fn time_starts_off_at_zero() {
        let sim = Simulator::<()>::new();
        assert_eq!(sim.now(), Time::ZERO);
        assert_eq!(sim.fired(), 0);
    }

    #[test]
    fn executing_one_event() {
        let mut sim = Simulator::new();
        let mut calls = 0u32;
        let event = Event::new(10, |calls: &mut u32, _| {
            *calls += 1;
            Vec::new()
        })
        .unwrap();

        sim.execute(&mut calls, event).unwrap();

        assert_eq!(sim.now(), Time::new(10));
        assert_eq!(calls, 1);
    }

    #[test]
    fn executing_three_events_separately() {
        let mut sim = Simulator::new();
        let mut calls = 0u32;
        for delay in [10, 20, 30] {
            let event = Event::new(delay, |calls: &mut u32, _| {
                *calls += 1;
                Vec::new()
            })
            .unwrap();
            sim.execute(&mut calls, event).unwrap();
        }

        assert_eq!(sim.now(), Time::new(10 + 20 + 30));
        assert_eq!(calls, 3);
        assert_eq!(sim.fired(), 3);
    }

    #[traced_test]
    #[test]
    fn executing_a_tree_of_events() {
        let event8 = Event::new(30, log_action("8", vec![])).unwrap();
        let event7 = Event::new(10, log_action("7", vec![])).unwrap();
        let event6 = Event::new(10, log_action("6", vec![event7])).unwrap();
        let event5 = Event::new(20, log_action("5", vec![])).unwrap();
        let event4 = Event::new(10, log_action("4", vec![event8])).unwrap();
        let event3 = Event::new(20, log_action("3", vec![event6])).unwrap();
        let event2 = Event::new(10, log_action("2", vec![event4, event5])).unwrap();
        let event1 = Event::new(10, log_action("1", vec![event2, event3])).unwrap();

        let mut sim = Simulator::new();
        let mut log = Log::new();
        sim.execute(&mut log, event1).unwrap();

        assert_eq!(sim.now(), Time::new(60));
        assert_eq!(
            log,
            vec![
                ("1", 10),
                ("2", 20),
                ("3", 30),
                ("4", 30),
                ("5", 40),
                ("6", 40),
                ("7", 50),
                ("8", 60),
            ]
        );
        assert!(logs_contain("simulation run drained"));
    }

    #[test]
    fn events_fire_in_non_decreasing_order_and_clock_ends_at_max() {
        // Binary fan-out with uneven delays per level.
        fn spawn(depth: u32) -> Event<Vec<u64>> {
            let delay = Time::new(u64::from(depth) * 3 % 7);
            Event::after(delay, move |fired: &mut Vec<u64>, now| {
                fired.push(now.as_units());
                if depth == 0 {
                    Vec::new()
                } else {
                    vec![spawn(depth - 1), spawn(depth - 1)]
                }
            })
        }

        let mut sim = Simulator::new();
        let mut fired = Vec::new();
        sim.execute(&mut fired, spawn(5)).unwrap();

        assert_eq!(fired.len(), 63);
        assert!(fired.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(Some(&sim.now().as_units()), fired.iter().max());
    }

    fn noop(_: &mut (), _: Time) -> Vec<Event<()>> {
        Vec::new()
    }

    #[test]
    fn clock_overflow_is_an_error() {
        let mut sim = Simulator::new();
        let longest = i64::MAX as u64;

        sim.execute(&mut (), Event::new(i64::MAX, noop).unwrap()).unwrap();
        sim.execute(&mut (), Event::new(i64::MAX, noop).unwrap()).unwrap();
        assert_eq!(sim.now(), Time::new(2 * longest));

        let err = sim.execute(&mut (), Event::new(i64::MAX, noop).unwrap()).unwrap_err();
        assert_eq!(
            err,
            SimError::TimeOverflow {
                now: 2 * longest,
                delay: longest
            }
        );
        assert_eq!(sim.now(), Time::new(2 * longest));
        assert_eq!(sim.fired(), 2);
    }

    #[test]
    fn overflowing_follow_up_discards_the_rest_of_the_run() {
        let mut sim = Simulator::new();
        let mut fired = 0u32;
        let event = Event::new(i64::MAX, |fired: &mut u32, _| {
            *fired += 1;
            let count = |fired: &mut u32, _: Time| -> Vec<Event<u32>> {
                *fired += 1;
                Vec::new()
            };
            vec![
                Event::new(1, count).unwrap(),
                Event::after(Time::new(u64::MAX), count),
            ]
        })
        .unwrap();

        let err = sim.execute(&mut fired, event).unwrap_err();
        assert!(matches!(err, SimError::TimeOverflow { .. }));
        assert_eq!(fired, 1);
        assert_eq!(sim.now(), Time::new(i64::MAX as u64));

        // The queue is empty again, so the simulator is reusable.
        let event = Event::new(1, |fired: &mut u32, _| {
            *fired += 1;
            Vec::new()
        })
        .unwrap();
        sim.execute(&mut fired, event).unwrap();
        assert_eq!(fired, 2);
        assert_eq!(sim.now(), Time::new(i64::MAX as u64 + 1));
    }
}
