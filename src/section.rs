use crate::config::SectionConfig;
use crate::input::{TouchAdapter, WheelAdapter};
use crate::machine::{Disposition, StepMachine, StepSnapshot};
use crate::visibility::VisibilityEdge;

/// Everything the section mutates while mounted: the step machine plus the
/// two input adapters that drive it. Browser handlers hold this behind a
/// `RefCell` and call one method per event.
#[derive(Debug, Clone)]
pub struct ScrollSection {
    machine: StepMachine,
    wheel: WheelAdapter,
    touch: TouchAdapter,
}

impl ScrollSection {
    pub fn new(step_count: usize, config: &SectionConfig) -> Self {
        Self {
            machine: StepMachine::new(step_count),
            wheel: WheelAdapter::from_config(config),
            touch: TouchAdapter::from_config(config),
        }
    }

    /// Starts over for a different catalog: first step, released, fresh
    /// debounce clock.
    pub fn reset(&mut self, step_count: usize, config: &SectionConfig) {
        *self = Self::new(step_count, config);
    }

    pub fn snapshot(&self) -> StepSnapshot {
        self.machine.snapshot()
    }

    pub fn on_visibility(&mut self, edge: VisibilityEdge) {
        self.machine.on_visibility_change(edge.is_visible());
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> Disposition {
        self.wheel.on_wheel(delta_y, now_ms, &mut self.machine)
    }

    pub fn on_touch_start(&mut self, client_y: f64) {
        self.touch.on_touch_start(client_y);
    }

    pub fn on_touch_move(&self, client_y: f64) -> Disposition {
        if self.touch.blocks_move(client_y, &self.machine.snapshot()) {
            Disposition::Consumed
        } else {
            Disposition::PassThrough
        }
    }

    pub fn on_touch_end(&mut self, client_y: f64) -> Disposition {
        self.touch.on_touch_end(client_y, &mut self.machine)
    }

    /// Indicator click.
    pub fn select(&mut self, index: usize) {
        self.machine.jump_to(index);
    }
}
