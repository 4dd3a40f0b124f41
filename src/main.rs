// src/main.rs
mod cli;
mod config;
mod drivers;
mod engine;
mod gui;
mod recorder;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use eframe::egui;
use log::info;
use cli::{CaptureArgs, Cli, Command, ConnectionArgs, PlotArgs};
use config::ScopeConfig;
use drivers::{LineSource, PlotStyle, PngChart, SamplePipeline, SerialLineSource, SimulatedSource};
use recorder::{run_capture, DataRecorder};
type BoxedSource = Box<dyn LineSource + Send>;
const SIMULATED_INTERVAL: Duration = Duration::from_millis(20);
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ScopeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScopeConfig::default(),
    };
    match &cli.command {
        Command::Plot(args) => {
            args.apply(&mut config);
            config.validate()?;
            plot(&config, args)
        }
        Command::Capture(args) => {
            args.apply(&mut config);
            config.validate()?;
            capture(&config, args)
        }
    }
}
fn open_source(config: &ScopeConfig, connection: &ConnectionArgs) -> Result<BoxedSource> {
    if connection.simulate {
        info!("using simulated device");
        return Ok(Box::new(SimulatedSource::new(SIMULATED_INTERVAL)));
    }
    let port = SerialLineSource::open(&config.port, config.baud_rate, config.read_timeout())?;
    Ok(Box::new(port))
}
fn source_label(config: &ScopeConfig, connection: &ConnectionArgs) -> String {
    if connection.simulate {
        "simulated device".to_owned()
    } else {
        format!("{} @ {} baud", config.port, config.baud_rate)
    }
}
fn shutdown_on_ctrlc() -> Result<Arc<AtomicBool>> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&shutdown);
    ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;
    Ok(shutdown)
}
fn plot(config: &ScopeConfig, args: &PlotArgs) -> Result<()> {
    let source = open_source(config, &args.connection)?;
    let pipeline = SamplePipeline::new(source, config.window_seconds)?;
    let Some(path) = &args.png else {
        return run_viewer(pipeline, config, source_label(config, &args.connection));
    };
    let shutdown = shutdown_on_ctrlc()?;
    let mut sink = PngChart::new(path, PlotStyle::default());
    info!("rendering chart to {}", sink.path().display());
    let summary = pipeline.run(&mut sink, config.render_pause(), &shutdown)?;
    info!(
        "plotted {} samples in {} frames ({} lines discarded)",
        summary.accepted, summary.frames, summary.discarded
    );
    Ok(())
}
fn run_viewer(
    pipeline: SamplePipeline<BoxedSource>,
    config: &ScopeConfig,
    label: String,
) -> Result<()> {
    // One frame in flight; the window only ever draws the newest.
    let (frame_tx, frame_rx) = mpsc::sync_channel(1);
    let (handle_tx, handle_rx) = mpsc::channel();
    let shutdown = Arc::new(AtomicBool::new(false));
    let thread_shutdown = Arc::clone(&shutdown);
    let pause = config.render_pause();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 540.0])
            .with_title(format!("serialscope - {label}")),
        ..Default::default()
    };
    eframe::run_native(
        "serialscope",
        options,
        Box::new(move |cc| {
            // The sampling loop starts once there is a context to wake on new frames.
            let sink = gui::ChannelChart::new(frame_tx, cc.egui_ctx.clone());
            handle_tx
                .send(engine::spawn_thread(pipeline, sink, pause, thread_shutdown))
                .ok();
            Box::new(gui::ScopeApp::new(frame_rx, label))
        }),
    )
    .map_err(|e| anyhow!("chart window failed: {e}"))?;
    shutdown.store(true, Ordering::Relaxed);
    let Ok(spawned) = handle_rx.try_recv() else {
        return Ok(());
    };
    let handle = spawned.context("failed to start acquisition thread")?;
    match handle.join() {
        Ok(result) => {
            let summary = result?;
            info!(
                "plotted {} samples in {} frames ({} lines discarded)",
                summary.accepted, summary.frames, summary.discarded
            );
            Ok(())
        }
        Err(_) => bail!("acquisition thread panicked"),
    }
}
fn capture(config: &ScopeConfig, args: &CaptureArgs) -> Result<()> {
    let source = open_source(config, &args.connection)?;
    let recorder = DataRecorder::create(&config.output_file_path).with_context(|| {
        format!("failed to create {}", config.output_file_path.display())
    })?;
    let shutdown = shutdown_on_ctrlc()?;
    info!(
        "capturing from {} for {:.1}s",
        source_label(config, &args.connection),
        config.max_capture_seconds
    );
    let stdout = io::stdout();
    let (summary, _file) = run_capture(
        source,
        recorder,
        stdout.lock(),
        config.max_capture(),
        config.read_timeout(),
        &shutdown,
    )?;
    info!(
        "wrote {} lines to {}",
        summary.lines,
        config.output_file_path.display()
    );
    Ok(())
}
