use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use log::{debug, info};
use crate::drivers::{LineRead, LineSource, ScopeError};
/// Appends raw serial lines to a writer, byte for byte.
pub struct DataRecorder<W: Write> {
    writer: W,
    lines: u64,
    bytes: u64,
}
impl DataRecorder<BufWriter<File>> {
    /// Truncates `path` and records into it.
    pub fn create(path: &Path) -> Result<Self, ScopeError> {
        let file = File::create(path)?;
        info!("recording to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}
impl<W: Write> DataRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines: 0,
            bytes: 0,
        }
    }
    pub fn write_line(&mut self, line: &str) -> Result<(), ScopeError> {
        self.writer.write_all(line.as_bytes())?;
        self.lines += 1;
        self.bytes += line.len() as u64;
        Ok(())
    }
    /// Flushes and hands back the writer.
    pub fn finish(mut self) -> Result<W, ScopeError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureSummary {
    pub lines: u64,
    pub bytes: u64,
    pub elapsed: Duration,
}
/// Records every line from `source` for at most `max_duration`, echoing each
/// one to `echo`. Reads never block past the deadline.
pub fn run_capture<S, W, E>(
    mut source: S,
    mut recorder: DataRecorder<W>,
    mut echo: E,
    max_duration: Duration,
    read_timeout: Duration,
    shutdown: &AtomicBool,
) -> Result<(CaptureSummary, W), ScopeError>
where
    S: LineSource,
    W: Write,
    E: Write,
{
    let started = Instant::now();
    loop {
        let remaining = max_duration.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        if shutdown.load(Ordering::Relaxed) {
            info!("capture interrupted");
            break;
        }
        source.set_read_timeout(remaining.min(read_timeout))?;
        match source.next_line()? {
            LineRead::Line(line) => {
                recorder.write_line(&line)?;
                echo.write_all(line.as_bytes())?;
                echo.flush()?;
            }
            LineRead::TimedOut => debug!("no data yet, {remaining:?} left"),
            LineRead::Closed => {
                info!("line source closed");
                break;
            }
        }
    }
    // A line cut off by the deadline is still data the device sent.
    if let Some(tail) = source.take_partial() {
        recorder.write_line(&tail)?;
        echo.write_all(tail.as_bytes())?;
        echo.flush()?;
    }
    let summary = CaptureSummary {
        lines: recorder.lines,
        bytes: recorder.bytes,
        elapsed: started.elapsed(),
    };
    let writer = recorder.finish()?;
    info!(
        "captured {} lines ({} bytes) in {:.2}s",
        summary.lines,
        summary.bytes,
        summary.elapsed.as_secs_f64()
    );
    Ok((summary, writer))
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::fs;
    use std::io::{self, Read};
    use std::thread;
    use crate::drivers::source::LineReader;
    use crate::drivers::ManualSource;
    /// Device that sends a few chunks, then goes quiet and times out forever.
    struct StallingDevice {
        chunks: VecDeque<&'static [u8]>,
    }
    impl Read for StallingDevice {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.chunks.pop_front() {
                Some(chunk) => {
                    buf[..chunk.len()].copy_from_slice(chunk);
                    Ok(chunk.len())
                }
                None => {
                    thread::sleep(Duration::from_millis(20));
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
                }
            }
        }
    }
    fn capture(source: ManualSource, max: Duration) -> (CaptureSummary, Vec<u8>, Vec<u8>) {
        let mut echo = Vec::new();
        let (summary, file) = run_capture(
            source,
            DataRecorder::new(Vec::new()),
            &mut echo,
            max,
            Duration::from_secs(1),
            &AtomicBool::new(false),
        )
        .unwrap();
        (summary, file, echo)
    }
    #[test]
    fn writes_lines_verbatim_and_echoes_them() {
        let source = ManualSource::lines(["1.0\r\n", "not a number\n", "", "-4\n", "tail"]);
        let (summary, file, echo) = capture(source, Duration::from_secs(5));
        assert_eq!(file, b"1.0\r\nnot a number\n-4\ntail");
        assert_eq!(echo, file);
        assert_eq!(summary.lines, 5);
        assert_eq!(summary.bytes, file.len() as u64);
    }
    #[test]
    fn timed_capture_collects_one_line_per_tick() {
        let lines: Vec<String> = (0..20).map(|i| format!("{}.5\n", i)).collect();
        let source =
            ManualSource::lines(lines.iter().map(String::as_str)).with_delay(Duration::from_millis(100));
        let (summary, file, _) = capture(source, Duration::from_millis(500));
        let written = String::from_utf8(file).unwrap();
        let got: Vec<&str> = written.split_inclusive('\n').collect();
        assert!((4..=6).contains(&got.len()), "captured {} lines", got.len());
        assert_eq!(got, lines[..got.len()].iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(summary.lines, got.len() as u64);
        assert!(summary.elapsed >= Duration::from_millis(500));
    }
    #[test]
    fn unterminated_line_is_kept_at_deadline() {
        let device = StallingDevice {
            chunks: VecDeque::from(vec![&b"1.0\n"[..], &b"2.5"[..]]),
        };
        let mut echo = Vec::new();
        let (summary, file) = run_capture(
            LineReader::new(device),
            DataRecorder::new(Vec::new()),
            &mut echo,
            Duration::from_millis(200),
            Duration::from_secs(1),
            &AtomicBool::new(false),
        )
        .unwrap();
        assert_eq!(file, b"1.0\n2.5");
        assert_eq!(echo, file);
        assert_eq!(summary.lines, 2);
    }
    #[test]
    fn zero_duration_reads_nothing() {
        let source = ManualSource::lines(["1\n"]);
        let (summary, file, _) = capture(source, Duration::ZERO);
        assert_eq!(summary.lines, 0);
        assert!(file.is_empty());
    }
    #[test]
    fn read_error_propagates_and_releases_source() {
        let source = ManualSource::lines(["1\n"]).then_fail(io::ErrorKind::BrokenPipe);
        let released = source.release_flag();
        let result = run_capture(
            source,
            DataRecorder::new(Vec::new()),
            io::sink(),
            Duration::from_secs(5),
            Duration::from_secs(1),
            &AtomicBool::new(false),
        );
        assert!(matches!(result, Err(ScopeError::Io(_))));
        assert!(released.load(Ordering::SeqCst));
    }
    #[test]
    fn recorder_truncates_existing_file() {
        let path = std::env::temp_dir().join(format!("serialscope-capture-{}.txt", std::process::id()));
        fs::write(&path, "stale contents\n").unwrap();
        let mut recorder = DataRecorder::create(&path).unwrap();
        recorder.write_line("42\n").unwrap();
        drop(recorder.finish().unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "42\n");
        fs::remove_file(&path).unwrap();
    }
}
