use std::thread;
use std::time::Duration;
use crate::drivers::{SampleWindow, ScopeError};
/// Headroom added above and below the data on the y axis.
pub const Y_PADDING: f64 = 0.5;
pub const TITLE: &str = "Real-time serial data";
pub const X_LABEL: &str = "Time (s)";
pub const Y_LABEL: &str = "Value";
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
/// Everything a display needs to draw one redraw of the window.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartFrame {
    pub points: Vec<[f64; 2]>, // [elapsed seconds, value]
    pub x_bounds: (f64, f64),
    pub y_bounds: (f64, f64),
    pub stats: WindowStats,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}
impl ChartFrame {
    pub fn from_window(window: &SampleWindow) -> Result<Self, ScopeError> {
        let (Some(front), Some(back)) = (window.front(), window.back()) else {
            return Err(ScopeError::EmptyWindow);
        };
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let points: Vec<[f64; 2]> = window
            .iter()
            .map(|s| {
                min = min.min(s.value);
                max = max.max(s.value);
                sum += s.value;
                [s.timestamp, s.value]
            })
            .collect();
        // A lone sample still needs a non-degenerate x axis.
        let x_bounds = if window.span() > f64::EPSILON {
            (front.timestamp, back.timestamp)
        } else {
            (front.timestamp - 0.5, front.timestamp + 0.5)
        };
        Ok(Self {
            stats: WindowStats {
                count: points.len(),
                min,
                max,
                mean: sum / points.len() as f64,
            },
            points,
            x_bounds,
            y_bounds: (min - Y_PADDING, max + Y_PADDING),
            title: TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
        })
    }
}
/// A display that replaces its previous chart with each new frame.
pub trait ChartSink {
    fn render(&mut self, frame: &ChartFrame) -> Result<(), ScopeError>;
}
impl<K: ChartSink + ?Sized> ChartSink for Box<K> {
    fn render(&mut self, frame: &ChartFrame) -> Result<(), ScopeError> {
        (**self).render(frame)
    }
}
/// Draws `window` on `sink`, then yields for `pause` so the display can refresh.
pub fn render<K: ChartSink + ?Sized>(
    window: &SampleWindow,
    sink: &mut K,
    pause: Duration,
) -> Result<(), ScopeError> {
    let frame = ChartFrame::from_window(window)?;
    sink.render(&frame)?;
    if !pause.is_zero() {
        thread::sleep(pause);
    }
    Ok(())
}
#[cfg(test)]
pub use recording::RecordingSink;
#[cfg(test)]
mod recording {
    use super::{ChartFrame, ChartSink};
    use crate::drivers::ScopeError;
    /// Keeps every frame it is handed; can be told to hang up after N frames.
    #[derive(Default)]
    pub struct RecordingSink {
        pub frames: Vec<ChartFrame>,
        pub close_after: Option<usize>,
    }
    impl ChartSink for RecordingSink {
        fn render(&mut self, frame: &ChartFrame) -> Result<(), ScopeError> {
            if self.close_after == Some(self.frames.len()) {
                return Err(ScopeError::DisplayClosed);
            }
            self.frames.push(frame.clone());
            Ok(())
        }
    }
}
