//! Wheel and touch adapters.
//!
//! Both translate raw deltas into advance/retreat requests against a
//! [`StepTarget`]. Neither knows anything about the DOM: the caller feeds in
//! plain numbers and a monotonic timestamp, and prevents the default scroll
//! when the returned [`Disposition`] is `Consumed`.

use log::trace;

use crate::config::SectionConfig;
use crate::machine::{Disposition, StepSnapshot, StepTarget};

/// Rejects continuous input arriving too soon after the last accepted one.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    interval_ms: u64,
    last_accepted_ms: Option<u64>,
}

impl DebounceGate {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Returns true and records `now_ms` when the interval has elapsed.
    /// The first event ever seen always passes.
    pub fn try_accept(&mut self, now_ms: u64) -> bool {
        let open = match self.last_accepted_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
            None => true,
        };
        if open {
            self.last_accepted_ms = Some(now_ms);
        }
        open
    }
}

#[derive(Debug, Clone)]
pub struct WheelAdapter {
    gate: DebounceGate,
}

impl WheelAdapter {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            gate: DebounceGate::new(debounce_ms),
        }
    }

    pub fn from_config(config: &SectionConfig) -> Self {
        Self::new(config.debounce_ms)
    }

    /// Positive `delta_y` scrolls down and advances; anything else retreats.
    pub fn on_wheel<T: StepTarget>(&mut self, delta_y: f64, now_ms: u64, target: &mut T) -> Disposition {
        if !target.is_locked() {
            return Disposition::PassThrough;
        }
        if !self.gate.try_accept(now_ms) {
            trace!("wheel event debounced at {now_ms}ms");
            return Disposition::Consumed;
        }
        if delta_y > 0.0 {
            target.request_advance()
        } else {
            target.request_retreat()
        }
    }
}

#[derive(Debug, Clone)]
pub struct TouchAdapter {
    min_swipe_px: f64,
    start_y: Option<f64>,
}

impl TouchAdapter {
    pub fn new(min_swipe_px: f64) -> Self {
        Self {
            min_swipe_px,
            start_y: None,
        }
    }

    pub fn from_config(config: &SectionConfig) -> Self {
        Self::new(config.min_swipe_px)
    }

    pub fn on_touch_start(&mut self, client_y: f64) {
        self.start_y = Some(client_y);
    }

    /// Whether native panning must be held back while the finger is at
    /// `client_y`. Only a swipe that the machine will consume is held; one
    /// that runs past either end, or any swipe while released, pans the page.
    pub fn blocks_move(&self, client_y: f64, snapshot: &StepSnapshot) -> bool {
        let Some(start_y) = self.start_y else {
            return false;
        };
        if !snapshot.locked {
            return false;
        }
        let displacement = start_y - client_y;
        if displacement > 0.0 {
            !snapshot.is_last()
        } else if displacement < 0.0 {
            snapshot.current > 0
        } else {
            false
        }
    }

    /// An upward swipe (finger moving towards the top of the screen) advances.
    pub fn on_touch_end<T: StepTarget>(&mut self, client_y: f64, target: &mut T) -> Disposition {
        let Some(start_y) = self.start_y.take() else {
            return Disposition::PassThrough;
        };
        if !target.is_locked() {
            return Disposition::PassThrough;
        }
        let displacement = start_y - client_y;
        if displacement.abs() < self.min_swipe_px {
            trace!("touch displacement {displacement}px treated as tap");
            return Disposition::PassThrough;
        }
        if displacement > 0.0 {
            target.request_advance()
        } else {
            target.request_retreat()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::StepMachine;

    fn captured() -> StepMachine {
        let mut machine = StepMachine::new(4);
        machine.on_visibility_change(true);
        machine
    }

    #[test]
    fn gate_accepts_first_event_at_time_zero() {
        let mut gate = DebounceGate::new(800);
        assert!(gate.try_accept(0));
        assert!(!gate.try_accept(799));
        assert!(gate.try_accept(800));
    }

    #[test]
    fn rejected_events_do_not_reset_clock() {
        let mut gate = DebounceGate::new(800);
        assert!(gate.try_accept(1_000));
        assert!(!gate.try_accept(1_500));
        assert!(gate.try_accept(1_800));
    }

    #[test]
    fn wheel_events_inside_interval_only_step_once() {
        let mut machine = captured();
        let mut wheel = WheelAdapter::new(800);
        assert_eq!(wheel.on_wheel(40.0, 10_000, &mut machine), Disposition::Consumed);
        assert_eq!(wheel.on_wheel(40.0, 10_500, &mut machine), Disposition::Consumed);
        assert_eq!(machine.current(), 1);
    }

    #[test]
    fn wheel_events_spaced_out_both_step() {
        let mut machine = captured();
        let mut wheel = WheelAdapter::new(800);
        wheel.on_wheel(40.0, 10_000, &mut machine);
        wheel.on_wheel(40.0, 10_800, &mut machine);
        assert_eq!(machine.current(), 2);
    }

    #[test]
    fn wheel_up_retreats() {
        let mut machine = captured();
        machine.jump_to(2);
        let mut wheel = WheelAdapter::new(800);
        assert_eq!(wheel.on_wheel(-12.0, 5_000, &mut machine), Disposition::Consumed);
        assert_eq!(machine.current(), 1);
    }

    #[test]
    fn wheel_ignored_when_unlocked() {
        let mut machine = StepMachine::new(4);
        let mut wheel = WheelAdapter::new(800);
        assert_eq!(wheel.on_wheel(40.0, 10_000, &mut machine), Disposition::PassThrough);
        assert_eq!(machine.current(), 0);
        // The ignored event must not have armed the gate.
        machine.on_visibility_change(true);
        assert_eq!(wheel.on_wheel(40.0, 10_100, &mut machine), Disposition::Consumed);
        assert_eq!(machine.current(), 1);
    }

    #[test]
    fn swipe_below_threshold_is_a_tap() {
        let mut machine = captured();
        let mut touch = TouchAdapter::new(50.0);
        touch.on_touch_start(300.0);
        assert_eq!(touch.on_touch_end(251.0, &mut machine), Disposition::PassThrough);
        assert_eq!(machine.current(), 0);
    }

    #[test]
    fn swipe_above_threshold_steps() {
        let mut machine = captured();
        let mut touch = TouchAdapter::new(50.0);
        touch.on_touch_start(300.0);
        assert_eq!(touch.on_touch_end(249.0, &mut machine), Disposition::Consumed);
        assert_eq!(machine.current(), 1);

        touch.on_touch_start(249.0);
        assert_eq!(touch.on_touch_end(300.0, &mut machine), Disposition::Consumed);
        assert_eq!(machine.current(), 0);
    }

    #[test]
    fn swipes_are_not_debounced() {
        let mut machine = captured();
        let mut touch = TouchAdapter::new(50.0);
        for _ in 0..3 {
            touch.on_touch_start(400.0);
            touch.on_touch_end(200.0, &mut machine);
        }
        assert_eq!(machine.current(), 3);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut machine = captured();
        let mut touch = TouchAdapter::new(50.0);
        assert_eq!(touch.on_touch_end(0.0, &mut machine), Disposition::PassThrough);
        assert_eq!(machine.current(), 0);
    }

    #[test]
    fn move_held_only_for_swipes_that_step() {
        let mut machine = captured();
        let mut touch = TouchAdapter::new(50.0);
        touch.on_touch_start(300.0);
        assert!(touch.blocks_move(280.0, &machine.snapshot()));
        // Downward at the first step retreats nowhere, so the page pans.
        assert!(!touch.blocks_move(320.0, &machine.snapshot()));

        machine.jump_to(3);
        assert!(!touch.blocks_move(280.0, &machine.snapshot()));
        assert!(touch.blocks_move(320.0, &machine.snapshot()));
    }

    #[test]
    fn move_never_held_after_release() {
        let mut machine = captured();
        machine.jump_to(3);
        let mut touch = TouchAdapter::new(50.0);
        touch.on_touch_start(400.0);
        assert_eq!(touch.on_touch_end(200.0, &mut machine), Disposition::PassThrough);
        assert!(!machine.is_locked());

        touch.on_touch_start(400.0);
        assert!(!touch.blocks_move(200.0, &machine.snapshot()));
        assert!(!touch.blocks_move(600.0, &machine.snapshot()));
    }

    #[test]
    fn move_without_start_is_never_held() {
        let machine = captured();
        let touch = TouchAdapter::new(50.0);
        assert!(!touch.blocks_move(100.0, &machine.snapshot()));
    }

    #[test]
    fn swipe_ignored_when_unlocked() {
        let mut machine = StepMachine::new(4);
        let mut touch = TouchAdapter::new(50.0);
        touch.on_touch_start(400.0);
        assert_eq!(touch.on_touch_end(100.0, &mut machine), Disposition::PassThrough);
        assert_eq!(machine.current(), 0);
    }
}
