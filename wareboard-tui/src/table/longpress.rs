//! Long-press detection for entering bulk-selection mode.
//!
//! A press held past 500 ms fires and puts the table into selection mode,
//! seeded with the pressed row. Releasing earlier is a normal click. Clicks
//! landing within 200 ms of a fire are suppressed so entering selection mode
//! never also navigates.
//!
//! Time is injected through `Instant` arguments so the machine is testable
//! without sleeping; the app polls [`LongPress::poll`] from its tick loop.

use std::time::Duration;
use std::time::Instant;

/// Hold duration before a press becomes a long press.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

/// Window after a fire during which clicks are swallowed.
pub const CLICK_SUPPRESSION_WINDOW: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Pressing { row_id: String, started: Instant },
    Fired,
}

/// Outcome of releasing a press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressEnd {
    /// Released before the threshold: a normal click on the row.
    Click(String),
    /// Swallowed: the press fired, or a fire completed moments ago.
    Suppressed,
    /// Nothing was pressed.
    None,
}

/// Long-press state machine: `Idle → Pressing → Fired`.
#[derive(Debug, Clone, Default)]
pub struct LongPress {
    phase: Option<Phase>,
    last_fired: Option<Instant>,
}

impl LongPress {
    /// Creates a new machine in the idle state.
    pub fn new() -> Self {
        Self {
            phase: Some(Phase::Idle),
            last_fired: None,
        }
    }

    fn phase(&self) -> &Phase {
        self.phase.as_ref().unwrap_or(&Phase::Idle)
    }

    /// Returns `true` while a press is armed but has not fired.
    pub fn is_pressing(&self) -> bool {
        matches!(self.phase(), Phase::Pressing { .. })
    }

    /// Arms the timer for a press on the given row.
    ///
    /// A new press re-arms; any previous unfired press is forgotten.
    pub fn press_start(&mut self, row_id: impl Into<String>, now: Instant) {
        self.phase = Some(Phase::Pressing {
            row_id: row_id.into(),
            started: now,
        });
    }

    /// Checks the timer. Fires at most once per press; returns the pressed
    /// row id on the firing poll so the caller can enter selection mode and
    /// seed the selection with exactly that row.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if let Phase::Pressing { row_id, started } = self.phase()
            && now.duration_since(*started) >= LONG_PRESS_THRESHOLD
        {
            let row_id = row_id.clone();
            self.phase = Some(Phase::Fired);
            self.last_fired = Some(now);
            return Some(row_id);
        }
        None
    }

    /// Releases the press.
    ///
    /// Before the threshold this is the normal click path; the timer is
    /// cleared and selection mode never activates. After a fire the release
    /// is suppressed, as is any click inside the suppression window.
    pub fn press_end(&mut self, now: Instant) -> PressEnd {
        let phase = self.phase.take().unwrap_or(Phase::Idle);
        self.phase = Some(Phase::Idle);

        match phase {
            Phase::Pressing { row_id, .. } => {
                if self.is_click_suppressed(now) {
                    PressEnd::Suppressed
                } else {
                    PressEnd::Click(row_id)
                }
            }
            Phase::Fired => PressEnd::Suppressed,
            Phase::Idle => {
                if self.is_click_suppressed(now) {
                    PressEnd::Suppressed
                } else {
                    PressEnd::None
                }
            }
        }
    }

    /// Disarms an in-flight press without firing.
    ///
    /// A fire that already happened stands; only the pending timer is
    /// cleared.
    pub fn cancel(&mut self) {
        self.phase = Some(Phase::Idle);
    }

    /// Returns `true` within the suppression window after a fire.
    pub fn is_click_suppressed(&self, now: Instant) -> bool {
        self.last_fired
            .is_some_and(|fired| now.duration_since(fired) < CLICK_SUPPRESSION_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Instant {
        Instant::now()
    }

    #[test]
    fn test_fires_once_at_threshold() {
        let start = t0();
        let mut lp = LongPress::new();
        lp.press_start("row-1", start);

        assert_eq!(lp.poll(start + Duration::from_millis(499)), None);
        assert_eq!(
            lp.poll(start + Duration::from_millis(500)),
            Some("row-1".to_string())
        );
        // Subsequent polls do not fire again.
        assert_eq!(lp.poll(start + Duration::from_millis(600)), None);
    }

    #[test]
    fn test_release_before_threshold_is_a_click() {
        let start = t0();
        let mut lp = LongPress::new();
        lp.press_start("row-1", start);
        assert_eq!(lp.poll(start + Duration::from_millis(100)), None);
        assert_eq!(
            lp.press_end(start + Duration::from_millis(150)),
            PressEnd::Click("row-1".to_string())
        );
        // The timer is gone; nothing fires later.
        assert_eq!(lp.poll(start + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_release_after_fire_is_suppressed() {
        let start = t0();
        let mut lp = LongPress::new();
        lp.press_start("row-1", start);
        lp.poll(start + Duration::from_millis(500)).unwrap();
        assert_eq!(
            lp.press_end(start + Duration::from_millis(520)),
            PressEnd::Suppressed
        );
    }

    #[test]
    fn test_click_inside_suppression_window() {
        let start = t0();
        let mut lp = LongPress::new();
        lp.press_start("row-1", start);
        let fired_at = start + Duration::from_millis(500);
        lp.poll(fired_at).unwrap();
        lp.press_end(fired_at);

        // A quick second click lands within 200ms of the fire.
        lp.press_start("row-2", fired_at + Duration::from_millis(50));
        assert_eq!(
            lp.press_end(fired_at + Duration::from_millis(150)),
            PressEnd::Suppressed
        );

        // Past the window, clicks behave normally again.
        lp.press_start("row-2", fired_at + Duration::from_millis(300));
        assert_eq!(
            lp.press_end(fired_at + Duration::from_millis(350)),
            PressEnd::Click("row-2".to_string())
        );
    }

    #[test]
    fn test_cancel_disarms() {
        let start = t0();
        let mut lp = LongPress::new();
        lp.press_start("row-1", start);
        lp.cancel();
        assert_eq!(lp.poll(start + Duration::from_secs(1)), None);
        assert_eq!(lp.press_end(start + Duration::from_secs(1)), PressEnd::None);
    }
}
