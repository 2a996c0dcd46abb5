use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a timer means to the game when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    SessionTick,
    RoundTimeout,
}

/// Scheduling port used by the controllers. Time is measured from the
/// scheduler's own origin, not wall-clock.
pub trait Scheduler {
    fn now(&self) -> Duration;

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    fn schedule_repeating(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle;

    /// Cancelling a handle that already fired or was cancelled is a no-op.
    fn cancel(&mut self, handle: TimerHandle);

    fn is_pending(&self, handle: TimerHandle) -> bool;
}

#[derive(Clone, Debug)]
struct Entry {
    handle: TimerHandle,
    due: Duration,
    interval: Option<Duration>,
    event: TimerEvent,
}

/// Virtual-time timer queue. The host moves time forward and drains due
/// timers one at a time, so a cancellation made while handling one timer
/// takes effect before the next is popped.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, delay: Duration, interval: Option<Duration>, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            handle,
            due: self.now + delay,
            interval,
            event,
        });
        handle
    }

    /// Earliest timer due at or before `until`. Ties fire in scheduling order.
    /// The clock moves to the fired timer's due time; repeating timers are
    /// re-armed before returning.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerEvent)> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[idx];
        self.now = self.now.max(entry.due);
        let fired = (entry.handle, entry.event);
        match entry.interval {
            Some(interval) => entry.due += interval,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(fired)
    }

    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.push(delay, None, event)
    }

    fn schedule_repeating(&mut self, interval: Duration, event: TimerEvent) -> TimerHandle {
        // A zero interval would never let pop_due make progress.
        let interval = interval.max(Duration::from_millis(1));
        self.push(interval, Some(interval), event)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }
}
