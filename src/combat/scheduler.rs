//! Cancellable scheduled actions for a combat session
//!
//! The session owns one scheduler and drives it with elapsed wall-clock
//! time from the host loop. Nothing here touches OS timers: "waiting" is
//! data, so a dropped or reinitialized session cannot leak a live callback.
//!
//! Handles are monotonically increasing and never reused, which lets the
//! session detect fires from a superseded timer (scheduled before a turn
//! change but delivered after) and ignore them.

/// Opaque handle to a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// What to do when an entry comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledAction {
    /// One-second countdown tick of the turn timer
    TimerTick,
    /// Automatic enemy turn resolution
    EnemyAutoPass,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    handle: TimerHandle,
    action: ScheduledAction,
    due_in_ms: u64,
    /// `Some` makes the entry re-arm itself after each fire
    period_ms: Option<u64>,
}

/// Explicit timer abstraction: schedule, cancel, advance
#[derive(Debug, Default)]
pub struct TurnScheduler {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot action `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: u64, action: ScheduledAction) -> TimerHandle {
        self.push(delay_ms, None, action)
    }

    /// Schedule a repeating action; the first fire is one full period away
    ///
    /// `period_ms` must be positive.
    pub fn schedule_repeating(&mut self, period_ms: u64, action: ScheduledAction) -> TimerHandle {
        debug_assert!(period_ms > 0, "repeating period must be positive");
        self.push(period_ms, Some(period_ms.max(1)), action)
    }

    fn push(&mut self, due_in_ms: u64, period_ms: Option<u64>, action: ScheduledAction) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry { handle, action, due_in_ms, period_ms });
        handle
    }

    /// Remove an entry; unknown or already-fired handles are a no-op
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.entries.retain(|e| e.handle != handle);
    }

    /// Remove every entry (combat teardown)
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Advance time and collect every fire, in chronological order
    ///
    /// A repeating entry can fire several times within one call. Entries
    /// scheduled while the caller processes the returned fires only run on
    /// the next `advance`.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<(TimerHandle, ScheduledAction)> {
        let mut fired = Vec::new();
        let mut remaining = elapsed_ms;

        loop {
            let Some(min_due) = self.entries.iter().map(|e| e.due_in_ms).min() else {
                return fired;
            };
            if min_due > remaining {
                break;
            }

            remaining -= min_due;
            for entry in &mut self.entries {
                entry.due_in_ms -= min_due;
            }

            let mut i = 0;
            while i < self.entries.len() {
                if self.entries[i].due_in_ms == 0 {
                    fired.push((self.entries[i].handle, self.entries[i].action));
                    match self.entries[i].period_ms {
                        Some(period) => {
                            self.entries[i].due_in_ms = period;
                            i += 1;
                        }
                        None => {
                            self.entries.remove(i);
                        }
                    }
                } else {
                    i += 1;
                }
            }
        }

        for entry in &mut self.entries {
            entry.due_in_ms -= remaining;
        }
        fired
    }
}
