use std::collections::VecDeque;
use crate::drivers::{Sample, ScopeError};
/// Rolling buffer holding the most recent `window_seconds` of samples.
///
/// Samples are kept in arrival order. After every push the span between the
/// newest and the oldest sample is at most `window_seconds`.
#[derive(Clone, Debug)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
    window_seconds: f64,
}
impl SampleWindow {
    pub fn new(window_seconds: f64) -> Result<Self, ScopeError> {
        if !window_seconds.is_finite() || window_seconds <= 0.0 {
            return Err(ScopeError::InvalidConfig(format!(
                "window length must be a positive number of seconds, got {window_seconds}"
            )));
        }
        Ok(Self {
            samples: VecDeque::new(),
            window_seconds,
        })
    }
    /// Appends `sample` and evicts from the front while the span exceeds the
    /// window. Returns how many samples were evicted.
    pub fn append_and_trim(&mut self, sample: Sample) -> usize {
        self.samples.push_back(sample);
        let mut evicted = 0;
        while let (Some(front), Some(back)) = (self.samples.front(), self.samples.back()) {
            if back.timestamp - front.timestamp > self.window_seconds {
                self.samples.pop_front();
                evicted += 1;
            } else {
                break;
            }
        }
        evicted
    }
    /// Seconds between the oldest and newest sample, zero when empty.
    pub fn span(&self) -> f64 {
        match (self.samples.front(), self.samples.back()) {
            (Some(front), Some(back)) => back.timestamp - front.timestamp,
            _ => 0.0,
        }
    }
    pub fn front(&self) -> Option<&Sample> {
        self.samples.front()
    }
    pub fn back(&self) -> Option<&Sample> {
        self.samples.back()
    }
    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn timestamps(window: &SampleWindow) -> Vec<f64> {
        window.iter().map(|s| s.timestamp).collect()
    }
    #[test]
    fn evicts_only_samples_older_than_window() {
        let mut window = SampleWindow::new(10.0).unwrap();
        for t in [0.0, 3.0, 7.0] {
            assert_eq!(window.append_and_trim(Sample::new(t, t)), 0);
        }
        assert_eq!(window.append_and_trim(Sample::new(12.0, 12.0)), 1);
        assert_eq!(timestamps(&window), vec![3.0, 7.0, 12.0]);
    }
    #[test]
    fn span_equal_to_window_is_kept() {
        let mut window = SampleWindow::new(10.0).unwrap();
        window.append_and_trim(Sample::new(0.0, 1.0));
        window.append_and_trim(Sample::new(10.0, 1.0));
        assert_eq!(window.len(), 2);
        assert_eq!(window.span(), 10.0);
    }
    #[test]
    fn large_gap_leaves_single_sample() {
        let mut window = SampleWindow::new(1.0).unwrap();
        for t in [0.0, 0.2, 0.4] {
            window.append_and_trim(Sample::new(t, 0.0));
        }
        assert_eq!(window.append_and_trim(Sample::new(30.0, 5.0)), 3);
        assert_eq!(window.len(), 1);
        assert_eq!(window.front(), window.back());
        assert_eq!(window.span(), 0.0);
    }
    #[test]
    fn invariant_holds_after_every_append() {
        let mut window = SampleWindow::new(2.5).unwrap();
        let mut t = 0.0;
        for step in 0..500 {
            t += 0.05 + (step % 7) as f64 * 0.13;
            let oldest_before = window.front().copied();
            let evicted = window.append_and_trim(Sample::new(t, step as f64));
            assert!(window.span() <= 2.5 || window.len() == 1);
            if evicted > 0 {
                // eviction is FIFO: the old front is gone and the new front is younger
                let old = oldest_before.unwrap();
                assert!(window.front().unwrap().timestamp > old.timestamp);
                assert!(window.iter().all(|s| s.timestamp != old.timestamp));
            }
            assert_eq!(window.back().unwrap().timestamp, t);
        }
    }
    #[test]
    fn rejects_non_positive_window() {
        assert!(matches!(
            SampleWindow::new(0.0),
            Err(ScopeError::InvalidConfig(_))
        ));
        assert!(SampleWindow::new(-1.0).is_err());
        assert!(SampleWindow::new(f64::NAN).is_err());
    }
}
