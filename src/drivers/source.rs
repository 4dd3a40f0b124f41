use std::io::{self, BufRead, BufReader, Read};
use std::time::Duration;
use log::{debug, info};
use serialport::SerialPort;
use crate::drivers::ScopeError;
/// Outcome of one attempt to read a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineRead {
    /// A complete line, terminator included when the device sent one.
    Line(String),
    /// Nothing complete arrived before the read timeout.
    TimedOut,
    /// The stream ended; serial devices never report this.
    Closed,
}
/// Something that yields newline-delimited text records on demand.
pub trait LineSource {
    fn next_line(&mut self) -> Result<LineRead, ScopeError>;
    /// Caps how long the next `next_line` may block.
    fn set_read_timeout(&mut self, _timeout: Duration) -> Result<(), ScopeError> {
        Ok(())
    }
    /// Hands over bytes of an unterminated line held back by a timeout.
    fn take_partial(&mut self) -> Option<String> {
        None
    }
}
/// Splits any byte stream into lines, keeping partial lines across timeouts.
pub struct LineReader<R> {
    reader: BufReader<R>,
    pending: Vec<u8>,
}
impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            pending: Vec::new(),
        }
    }
    pub fn get_mut(&mut self) -> &mut R {
        self.reader.get_mut()
    }
    fn take_pending(&mut self) -> String {
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        line
    }
}
impl<R: Read> LineSource for LineReader<R> {
    fn next_line(&mut self) -> Result<LineRead, ScopeError> {
        match self.reader.read_until(b'\n', &mut self.pending) {
            Ok(0) if self.pending.is_empty() => Ok(LineRead::Closed),
            // Either a full line, or the tail of a stream that ended without one.
            Ok(_) => Ok(LineRead::Line(self.take_pending())),
            // Bytes read before the timeout stay in `pending`.
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(LineRead::TimedOut)
            }
            Err(e) => Err(e.into()),
        }
    }
    fn take_partial(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.take_pending())
        }
    }
}
/// Line source backed by a serial device. Dropping it closes the port.
pub struct SerialLineSource {
    port_name: String,
    lines: LineReader<Box<dyn SerialPort>>,
}
impl SerialLineSource {
    pub fn open(port_name: &str, baud_rate: u32, read_timeout: Duration) -> Result<Self, ScopeError> {
        let port = serialport::new(port_name, baud_rate)
            .timeout(read_timeout)
            .open()
            .map_err(|source| ScopeError::DeviceUnavailable {
                port: port_name.to_string(),
                source,
            })?;
        info!("opened {port_name} at {baud_rate} baud (read timeout {read_timeout:?})");
        Ok(Self {
            port_name: port_name.to_string(),
            lines: LineReader::new(port),
        })
    }
}
impl LineSource for SerialLineSource {
    fn next_line(&mut self) -> Result<LineRead, ScopeError> {
        self.lines.next_line()
    }
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), ScopeError> {
        self.lines
            .get_mut()
            .set_timeout(timeout)
            .map_err(|e| ScopeError::Io(e.into()))
    }
    fn take_partial(&mut self) -> Option<String> {
        self.lines.take_partial()
    }
}
impl Drop for SerialLineSource {
    fn drop(&mut self) {
        debug!("releasing serial port {}", self.port_name);
    }
}
impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn next_line(&mut self) -> Result<LineRead, ScopeError> {
        (**self).next_line()
    }
    fn set_read_timeout(&mut self, timeout: Duration) -> Result<(), ScopeError> {
        (**self).set_read_timeout(timeout)
    }
    fn take_partial(&mut self) -> Option<String> {
        (**self).take_partial()
    }
}
#[cfg(test)]
pub use manual::ManualSource;
