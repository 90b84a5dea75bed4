/// Most fixed steps issued for a single frame. Excess time is dropped.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Turns variable frame times into a whole number of fixed steps.
/// Leftover time carries into the next frame.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Bank `frame_dt` and return how many fixed steps are now due.
    /// Negative frame times count as zero; a long stall yields at most
    /// [`MAX_STEPS_PER_FRAME`] steps.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let budget = self.dt * MAX_STEPS_PER_FRAME as f32;
        self.accumulator = (self.accumulator + frame_dt.max(0.0)).min(budget);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
