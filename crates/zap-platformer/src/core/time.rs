/// Default cap on fixed steps run for a single frame.
pub const DEFAULT_MAX_STEPS: u32 = 10;

/// Fixed timestep accumulator.
/// Movement and camera logic run once per step, never with a variable dt.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Limit how many steps one long frame may trigger. Time beyond the cap
    /// is dropped so a stalled frame cannot snowball.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a step left in the accumulator (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn exact_frame_runs_one_step() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(DT), 1);
    }

    #[test]
    fn short_frames_carry_over() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(0.012), 0);
        assert_eq!(ts.accumulate(0.012), 1);
        let a = ts.alpha();
        assert!((0.0..1.0).contains(&a), "alpha was {}", a);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut ts = FixedTimestep::new(DT).with_max_steps(4);
        assert_eq!(ts.accumulate(1.0), 4);
        assert!(ts.alpha() < 1e-3);
    }

    #[test]
    fn bad_frame_times_are_ignored() {
        let mut ts = FixedTimestep::new(DT);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.alpha(), 0.0);
    }
}
