//! Fixed-timestep accumulator loop ("Fix Your Timestep").
//!
//! Frame times are supplied by the caller, so the loop runs identically
//! whether driven by a wall clock or by a headless batch run.

use tracing::warn;

/// Fixed-timestep simulation loop state.
pub struct SimLoop {
    fixed_dt: f64,
    max_frame_time: f64,
    accumulator: f64,
    total_sim_time: f64,
    update_count: u64,
}

impl SimLoop {
    /// `max_frame_time` caps how much time one frame may feed in, trading
    /// slowdown for not falling into a spiral of catch-up steps.
    pub fn new(fixed_dt: f64, max_frame_time: f64) -> Self {
        Self {
            fixed_dt,
            max_frame_time,
            accumulator: 0.0,
            total_sim_time: 0.0,
            update_count: 0,
        }
    }

    /// Feed one frame of `frame_time` seconds and run as many fixed steps as
    /// fit. `update_fn(fixed_dt, total_sim_time)` is called once per step.
    /// Returns the number of steps run.
    pub fn tick(&mut self, frame_time: f64, mut update_fn: impl FnMut(f64, f64)) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt {
            update_fn(self.fixed_dt, self.total_sim_time);
            self.total_sim_time += self.fixed_dt;
            self.accumulator -= self.fixed_dt;
            self.update_count += 1;
            steps += 1;
        }
        steps
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}
