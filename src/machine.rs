//! Step state machine for the scroll-captured section.
//!
//! `StepMachine` is the single owner of both the current step and the lock
//! flag. The lock is only ever written by [`StepMachine::on_visibility_change`]
//! and by the machine itself when a forward request runs past the last step.

use log::{debug, info};

/// Whether an input event was used to drive a transition.
///
/// `Consumed` means the host should suppress the default page scroll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Consumed,
    PassThrough,
}

impl Disposition {
    pub fn is_consumed(self) -> bool {
        matches!(self, Disposition::Consumed)
    }
}

/// Anything input adapters can drive. Wheel and touch adapters only ever see
/// this trait, never the concrete machine.
pub trait StepTarget {
    fn is_locked(&self) -> bool;
    fn request_advance(&mut self) -> Disposition;
    fn request_retreat(&mut self) -> Disposition;
}

/// Immutable view of the machine, handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepSnapshot {
    pub current: usize,
    pub count: usize,
    pub locked: bool,
}

impl StepSnapshot {
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.count
    }
}

#[derive(Debug, Clone)]
pub struct StepMachine {
    current: usize,
    count: usize,
    locked: bool,
}

impl StepMachine {
    /// A machine over `count` steps. A zero count is treated as one step so
    /// the index range is never empty.
    pub fn new(count: usize) -> Self {
        Self {
            current: 0,
            count: count.max(1),
            locked: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn last_index(&self) -> usize {
        self.count - 1
    }

    pub fn snapshot(&self) -> StepSnapshot {
        StepSnapshot {
            current: self.current,
            count: self.count,
            locked: self.locked,
        }
    }

    pub fn advance(&mut self) -> Disposition {
        if !self.locked {
            return Disposition::PassThrough;
        }
        if self.current < self.last_index() {
            self.current += 1;
            debug!("step advanced to {}/{}", self.current + 1, self.count);
            Disposition::Consumed
        } else {
            self.on_step_exhausted();
            Disposition::PassThrough
        }
    }

    pub fn retreat(&mut self) -> Disposition {
        if !self.locked || self.current == 0 {
            return Disposition::PassThrough;
        }
        self.current -= 1;
        debug!("step retreated to {}/{}", self.current + 1, self.count);
        Disposition::Consumed
    }

    /// Direct selection from an indicator. Out-of-range values clamp to the
    /// last step. The lock is left alone.
    pub fn jump_to(&mut self, index: usize) {
        self.current = index.min(self.last_index());
        debug!("step jumped to {}/{}", self.current + 1, self.count);
    }

    /// Entering the viewport always captures. Leaving releases only once the
    /// last step has been reached.
    pub fn on_visibility_change(&mut self, visible: bool) {
        if visible {
            if !self.locked {
                info!("section visible, capturing scroll at step {}", self.current + 1);
            }
            self.locked = true;
        } else if self.current == self.last_index() && self.locked {
            info!("section left after final step, releasing scroll");
            self.locked = false;
        }
    }

    fn on_step_exhausted(&mut self) {
        info!("final step passed, releasing scroll");
        self.locked = false;
    }
}

impl StepTarget for StepMachine {
    fn is_locked(&self) -> bool {
        self.locked
    }

    fn request_advance(&mut self) -> Disposition {
        self.advance()
    }

    fn request_retreat(&mut self) -> Disposition {
        self.retreat()
    }
}
