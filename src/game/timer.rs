//! Single-slot scheduler for the round's timed tasks.
//!
//! At most one task is pending at a time. Starting a task replaces the
//! pending one, so a countdown can never run twice.

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Per-question answer countdown.
    Countdown,
    /// Pause after a question is resolved, before moving on.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduled {
    pub kind: TaskKind,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The task counted down one unit and is still pending.
    Tick { kind: TaskKind, remaining: u32 },
    /// The task reached zero and left the slot.
    Fired(TaskKind),
}

#[derive(Debug, Default)]
pub struct TimerSlot {
    task: Option<Scheduled>,
    epoch: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire after `units` ticks, cancelling any pending task.
    pub fn start(&mut self, kind: TaskKind, units: u32) {
        self.task = Some(Scheduled {
            kind,
            remaining: units,
        });
        self.epoch += 1;
    }

    pub fn cancel(&mut self) {
        if self.task.take().is_some() {
            self.epoch += 1;
        }
    }

    pub fn pending(&self) -> Option<Scheduled> {
        self.task
    }

    /// Changes whenever a task is started or cancelled. The event loop uses
    /// it to realign its tick clock with the new task.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Advance the pending task by one unit.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        let task = self.task.as_mut()?;
        task.remaining = task.remaining.saturating_sub(1);

        if task.remaining == 0 {
            let kind = task.kind;
            self.task = None;
            Some(TimerEvent::Fired(kind))
        } else {
            Some(TimerEvent::Tick {
                kind: task.kind,
                remaining: task.remaining,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_decrements_once_per_tick() {
        let mut slot = TimerSlot::new();
        slot.start(TaskKind::Countdown, 3);

        assert_eq!(
            slot.tick(),
            Some(TimerEvent::Tick {
                kind: TaskKind::Countdown,
                remaining: 2
            })
        );
        assert_eq!(
            slot.tick(),
            Some(TimerEvent::Tick {
                kind: TaskKind::Countdown,
                remaining: 1
            })
        );
        assert_eq!(slot.tick(), Some(TimerEvent::Fired(TaskKind::Countdown)));
        assert_eq!(slot.tick(), None);
        assert!(slot.pending().is_none());
    }

    #[test]
    fn test_restart_replaces_pending_task() {
        let mut slot = TimerSlot::new();
        slot.start(TaskKind::Countdown, 15);
        slot.tick();
        slot.cancel();
        slot.start(TaskKind::Countdown, 15);
        slot.start(TaskKind::Countdown, 15);

        slot.tick();
        assert_eq!(
            slot.pending(),
            Some(Scheduled {
                kind: TaskKind::Countdown,
                remaining: 14
            })
        );
    }

    #[test]
    fn test_cancelled_slot_ignores_ticks() {
        let mut slot = TimerSlot::new();
        slot.start(TaskKind::Advance, 3);
        let epoch = slot.epoch();
        slot.cancel();

        assert_ne!(slot.epoch(), epoch);
        assert_eq!(slot.tick(), None);

        let epoch = slot.epoch();
        slot.cancel();
        assert_eq!(slot.epoch(), epoch);
    }
}
