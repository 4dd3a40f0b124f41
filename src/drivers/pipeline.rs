use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use log::{debug, info, trace, warn};
use crate::drivers::chart::{self, ChartSink};
use crate::drivers::sample::{parse_vitals, try_parse_sample, Sample};
use crate::drivers::source::{LineRead, LineSource};
use crate::drivers::{SampleWindow, ScopeError};
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotterState {
    AwaitingFirstSample,
    Streaming,
}
/// Result of one read attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Acquisition {
    Sample(Sample),
    /// Timed out or the line was not a number; read again.
    Nothing,
    SourceClosed,
}
/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlotSummary {
    pub accepted: u64,
    pub discarded: u64,
    pub timeouts: u64,
    pub evicted: u64,
    pub vitals: u64,
    pub frames: u64,
}
/// Reads samples from a line source into a rolling window and redraws it.
pub struct SamplePipeline<S: LineSource> {
    source: S,
    window: SampleWindow,
    state: PlotterState,
    started_at: Instant,
    summary: PlotSummary,
}
impl<S: LineSource> SamplePipeline<S> {
    pub fn new(source: S, window_seconds: f64) -> Result<Self, ScopeError> {
        Ok(Self {
            source,
            window: SampleWindow::new(window_seconds)?,
            state: PlotterState::AwaitingFirstSample,
            started_at: Instant::now(),
            summary: PlotSummary::default(),
        })
    }
    pub fn state(&self) -> PlotterState {
        self.state
    }
    #[cfg(test)]
    pub(crate) fn window(&self) -> &SampleWindow {
        &self.window
    }
    /// One blocking read. Timeouts and malformed lines both come back as
    /// `Acquisition::Nothing`; only hard I/O failures are errors.
    pub fn read_sample(&mut self) -> Result<Acquisition, ScopeError> {
        let line = match self.source.next_line()? {
            LineRead::Line(line) => line,
            LineRead::TimedOut => {
                self.summary.timeouts += 1;
                trace!("read timed out");
                return Ok(Acquisition::Nothing);
            }
            LineRead::Closed => return Ok(Acquisition::SourceClosed),
        };
        let timestamp = self.started_at.elapsed().as_secs_f64();
        if let Some(sample) = try_parse_sample(&line, timestamp) {
            return Ok(Acquisition::Sample(sample));
        }
        match parse_vitals(&line) {
            Some(vitals) if vitals.is_valid() => {
                self.summary.vitals += 1;
                info!(
                    "device reports {} bpm, SpO2 {} %",
                    vitals.heart_rate_bpm, vitals.spo2_percent
                );
            }
            Some(_) => {
                self.summary.vitals += 1;
                debug!("device has no valid vitals estimate yet");
            }
            None => {
                self.summary.discarded += 1;
                trace!("discarding line {:?}", line.trim_end());
            }
        }
        Ok(Acquisition::Nothing)
    }
    pub fn push(&mut self, sample: Sample) {
        if self.state == PlotterState::AwaitingFirstSample {
            info!("first sample received at {:.3}s", sample.timestamp);
            self.state = PlotterState::Streaming;
        }
        self.summary.accepted += 1;
        self.summary.evicted += self.window.append_and_trim(sample) as u64;
    }
    /// Runs read, trim, render until the source closes, `shutdown` is set or
    /// the sink goes away. The source is dropped on every exit path.
    pub fn run<K: ChartSink + ?Sized>(
        mut self,
        sink: &mut K,
        pause: Duration,
        shutdown: &AtomicBool,
    ) -> Result<PlotSummary, ScopeError> {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                info!("shutdown requested");
                break;
            }
            match self.read_sample()? {
                Acquisition::Sample(sample) => self.push(sample),
                Acquisition::Nothing => continue,
                Acquisition::SourceClosed => {
                    info!("line source closed");
                    break;
                }
            }
            // Only reachable once streaming, so the window is never empty here.
            match chart::render(&self.window, sink, pause) {
                Ok(()) => self.summary.frames += 1,
                Err(ScopeError::DisplayClosed) => {
                    info!("chart display closed; stopping acquisition");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        if self.summary.accepted == 0 {
            warn!("no samples were received");
        }
        debug!("plotter finished in {:?}: {:?}", self.state(), self.summary);
        Ok(self.summary)
    }
}
