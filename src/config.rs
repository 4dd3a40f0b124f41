use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::drivers::ScopeError;
/// Runtime settings shared by the plotter and the capture tool.
///
/// Loaded from an optional JSON file whose keys use camelCase
/// (`baudRate`, `readTimeout`, ...); missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ScopeConfig {
    pub port: String,
    pub baud_rate: u32,
    /// Seconds a single line read may block.
    pub read_timeout: f64,
    pub window_seconds: f64,
    pub max_capture_seconds: f64,
    pub output_file_path: PathBuf,
    /// Seconds to yield after each redraw.
    pub render_pause: f64,
}
impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            port: "/dev/ttyUSB0".to_owned(),
            baud_rate: 115_200,
            read_timeout: 1.0,
            window_seconds: 10.0,
            max_capture_seconds: 60.0,
            output_file_path: PathBuf::from("capture.txt"),
            render_pause: 0.01,
        }
    }
}
impl ScopeConfig {
    pub fn from_json(text: &str) -> Result<Self, ScopeError> {
        Ok(serde_json::from_str(text)?)
    }
    pub fn load(path: &Path) -> Result<Self, ScopeError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
    pub fn validate(&self) -> Result<(), ScopeError> {
        if self.port.trim().is_empty() {
            return Err(ScopeError::InvalidConfig("port must not be empty".into()));
        }
        if self.baud_rate == 0 {
            return Err(ScopeError::InvalidConfig("baudRate must be positive".into()));
        }
        positive("readTimeout", self.read_timeout)?;
        positive("windowSeconds", self.window_seconds)?;
        non_negative("maxCaptureSeconds", self.max_capture_seconds)?;
        non_negative("renderPause", self.render_pause)?;
        if self.output_file_path.as_os_str().is_empty() {
            return Err(ScopeError::InvalidConfig(
                "outputFilePath must not be empty".into(),
            ));
        }
        Ok(())
    }
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.read_timeout)
    }
    pub fn max_capture(&self) -> Duration {
        Duration::from_secs_f64(self.max_capture_seconds)
    }
    pub fn render_pause(&self) -> Duration {
        Duration::from_secs_f64(self.render_pause)
    }
}
fn positive(name: &str, value: f64) -> Result<(), ScopeError> {
    if value.is_finite() && value > 0.0 {
        representable(name, value)
    } else {
        Err(ScopeError::InvalidConfig(format!(
            "{name} must be a positive number of seconds, got {value}"
        )))
    }
}
fn non_negative(name: &str, value: f64) -> Result<(), ScopeError> {
    if value.is_finite() && value >= 0.0 {
        representable(name, value)
    } else {
        Err(ScopeError::InvalidConfig(format!(
            "{name} must be zero or more seconds, got {value}"
        )))
    }
}
// The accessors convert with `Duration::from_secs_f64`, which panics on overflow.
fn representable(name: &str, value: f64) -> Result<(), ScopeError> {
    Duration::try_from_secs_f64(value)
        .map(|_| ())
        .map_err(|e| ScopeError::InvalidConfig(format!("{name} is out of range ({value}): {e}")))
}
