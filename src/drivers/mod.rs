// src/drivers/mod.rs
pub mod buffer;
pub mod chart;
pub mod error;
pub mod pipeline;
pub mod plot;
pub mod sample;
pub mod simulate;
pub mod source;
pub use buffer::SampleWindow;
pub use chart::{ChartFrame, ChartSink};
pub use error::ScopeError;
pub use pipeline::{PlotSummary, SamplePipeline};
pub use plot::{PlotStyle, PngChart};
pub use sample::Sample;
pub use simulate::SimulatedSource;
#[cfg(test)]
pub use source::ManualSource;
pub use source::{LineRead, LineSource, SerialLineSource};
