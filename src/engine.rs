// src/engine.rs
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use log::error;
use crate::drivers::{ChartSink, LineSource, PlotSummary, SamplePipeline, ScopeError};
/// Runs the sampling loop on its own thread so the window can keep the main
/// thread. The thread owns `source` and drops it when the loop ends.
pub fn spawn_thread<S, K>(
    pipeline: SamplePipeline<S>,
    mut sink: K,
    pause: Duration,
    shutdown: Arc<AtomicBool>,
) -> std::io::Result<JoinHandle<Result<PlotSummary, ScopeError>>>
where
    S: LineSource + Send + 'static,
    K: ChartSink + Send + 'static,
{
    thread::Builder::new()
        .name("acquisition".into())
        .spawn(move || {
            let result = pipeline.run(&mut sink, pause, &shutdown);
            if let Err(e) = &result {
                error!("acquisition stopped: {e}");
            }
            result
        })
}
