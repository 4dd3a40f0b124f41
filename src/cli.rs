use std::path::PathBuf;
use clap::{Args, Parser, Subcommand};
use crate::config::ScopeConfig;
/// Plot or capture newline-delimited numbers from a serial device.
#[derive(Debug, Parser)]
#[clap(name = "serialscope", version)]
pub struct Cli {
    /// JSON config file; flags given on the command line win over it.
    #[clap(long, global = true, env = "SERIALSCOPE_CONFIG")]
    pub config: Option<PathBuf>,
    #[clap(subcommand)]
    pub command: Command,
}
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Draw a rolling window of the incoming samples.
    Plot(PlotArgs),
    /// Copy raw lines to a file for a fixed time.
    Capture(CaptureArgs),
}
#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Serial device, e.g. /dev/ttyUSB0 or COM4.
    #[clap(long, env = "SERIALSCOPE_PORT")]
    pub port: Option<String>,
    #[clap(long, env = "SERIALSCOPE_BAUD")]
    pub baud: Option<u32>,
    /// Read timeout in seconds.
    #[clap(long)]
    pub timeout: Option<f64>,
    /// Use a built-in signal generator instead of a serial device.
    #[clap(long)]
    pub simulate: bool,
}
#[derive(Debug, Args)]
pub struct PlotArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,
    /// Seconds of history to keep on screen.
    #[clap(long)]
    pub window: Option<f64>,
    /// Seconds to pause after each redraw.
    #[clap(long)]
    pub pause: Option<f64>,
    /// Render to this PNG file instead of opening a window.
    #[clap(long, value_name = "PATH")]
    pub png: Option<PathBuf>,
}
#[derive(Debug, Args)]
pub struct CaptureArgs {
    #[clap(flatten)]
    pub connection: ConnectionArgs,
    /// Seconds to capture for.
    #[clap(long)]
    pub duration: Option<f64>,
    /// File to write; truncated first.
    #[clap(long, short)]
    pub output: Option<PathBuf>,
}
impl ConnectionArgs {
    pub fn apply(&self, config: &mut ScopeConfig) {
        if let Some(port) = &self.port {
            config.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.baud_rate = baud;
        }
        if let Some(timeout) = self.timeout {
            config.read_timeout = timeout;
        }
    }
}
impl PlotArgs {
    pub fn apply(&self, config: &mut ScopeConfig) {
        self.connection.apply(config);
        if let Some(window) = self.window {
            config.window_seconds = window;
        }
        if let Some(pause) = self.pause {
            config.render_pause = pause;
        }
    }
}
impl CaptureArgs {
    pub fn apply(&self, config: &mut ScopeConfig) {
        self.connection.apply(config);
        if let Some(duration) = self.duration {
            config.max_capture_seconds = duration;
        }
        if let Some(output) = &self.output {
            config.output_file_path = output.clone();
        }
    }
}
