/// Fixed timestep accumulator.
///
/// The simulation is tuned in frames, not seconds: every constant (gravity,
/// dash length, projectile lifetime) assumes exactly one `update` per 1/60 s.
/// The accumulator converts variable host frame time into whole ticks.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on ticks per host frame.
    max_steps: u32,
    /// Ticks run since creation.
    ticks: u64,
}

impl FixedTimestep {
    /// Default cap on catch-up ticks per host frame.
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: Self::DEFAULT_MAX_STEPS,
            ticks: 0,
        }
    }

    /// Change the catch-up cap (minimum 1).
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        // Drop time beyond the cap instead of spiralling after a stall.
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        self.ticks += steps as u64;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Total fixed ticks handed out so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
