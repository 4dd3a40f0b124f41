use std::f64::consts::TAU;
use std::thread;
use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::{LineRead, LineSource, ScopeError};
const VITALS_EVERY: u64 = 50;
/// Stand-in for the pulse-oximeter board: a noisy 1.2 Hz wave, one line per
/// `interval`, with an occasional vitals status line in between.
pub struct SimulatedSource {
    rng: StdRng,
    interval: Duration,
    emitted: u64,
}
impl SimulatedSource {
    pub fn new(interval: Duration) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            interval,
            emitted: 0,
        }
    }
    #[cfg(test)]
    pub fn seeded(interval: Duration, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            interval,
            emitted: 0,
        }
    }
    fn next_record(&mut self) -> String {
        self.emitted += 1;
        if self.emitted % VITALS_EVERY == 0 {
            let bpm = self.rng.gen_range(60..=90);
            let spo2 = self.rng.gen_range(95..=99);
            return format!("Heart rate: {bpm} bpm / SpO2: {spo2} %\r\n");
        }
        let t = self.emitted as f64 * self.interval.as_secs_f64();
        let noise: f64 = self.rng.gen_range(-0.05..0.05);
        format!("{:.4}\r\n", (TAU * 1.2 * t).sin() + noise)
    }
}
impl LineSource for SimulatedSource {
    fn next_line(&mut self) -> Result<LineRead, ScopeError> {
        thread::sleep(self.interval);
        Ok(LineRead::Line(self.next_record()))
    }
}
