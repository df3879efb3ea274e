//! Run statistics for compress/decompress calls.
//!
//! The codec itself stays silent; callers feed sizes into [`Metrics`] and
//! decide how to present them. `Display` renders a human-readable summary and
//! [`Metrics::export_text`] a `key=value` form for scripts and tests.
//!
//! `Metrics` is plain data and not synchronized. Keep one per thread and
//! combine with [`Metrics::merge`] if needed.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    pub start_time: Instant,
    pub end_time: Option<Instant>,

    // === Compression ===
    /// Calls to `compress`
    pub compress_calls: u64,
    /// Uncompressed bytes fed to `compress`
    pub raw_bytes_in: u64,
    /// Bytes returned by `compress`
    pub compressed_bytes_out: u64,

    // === Decompression ===
    /// Calls to `decompress` that succeeded
    pub decompress_calls: u64,
    /// Compressed bytes fed to `decompress`
    pub compressed_bytes_in: u64,
    /// Bytes returned by `decompress`
    pub raw_bytes_out: u64,
    /// Calls to `decompress` that returned an error
    pub decompress_failures: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            compress_calls: 0,
            raw_bytes_in: 0,
            compressed_bytes_out: 0,
            decompress_calls: 0,
            compressed_bytes_in: 0,
            raw_bytes_out: 0,
            decompress_failures: 0,
        }
    }

    pub fn record_compress(&mut self, raw_len: usize, compressed_len: usize) {
        self.compress_calls += 1;
        self.raw_bytes_in += raw_len as u64;
        self.compressed_bytes_out += compressed_len as u64;
    }

    pub fn record_decompress(&mut self, compressed_len: usize, raw_len: usize) {
        self.decompress_calls += 1;
        self.compressed_bytes_in += compressed_len as u64;
        self.raw_bytes_out += raw_len as u64;
    }

    pub fn record_failure(&mut self) {
        self.decompress_failures += 1;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compressed size over raw size for everything compressed so far.
    ///
    /// Returns 0.0 if nothing was compressed.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes_in == 0 {
            0.0
        } else {
            self.compressed_bytes_out as f64 / self.raw_bytes_in as f64
        }
    }

    /// Raw bytes handled per second, both directions combined.
    pub fn throughput_bps(&self) -> f64 {
        let secs = self.duration().as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            (self.raw_bytes_in + self.raw_bytes_out) as f64 / secs
        }
    }

    /// Fold another set of counters into this one, keeping the earliest start.
    pub fn merge(&mut self, other: &Metrics) {
        self.start_time = self.start_time.min(other.start_time);
        self.end_time = match (self.end_time, other.end_time) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.compress_calls += other.compress_calls;
        self.raw_bytes_in += other.raw_bytes_in;
        self.compressed_bytes_out += other.compressed_bytes_out;
        self.decompress_calls += other.decompress_calls;
        self.compressed_bytes_in += other.compressed_bytes_in;
        self.raw_bytes_out += other.raw_bytes_out;
        self.decompress_failures += other.decompress_failures;
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             compress_calls={}\n\
             raw_bytes_in={}\n\
             compressed_bytes_out={}\n\
             compression_ratio={:.4}\n\
             decompress_calls={}\n\
             compressed_bytes_in={}\n\
             raw_bytes_out={}\n\
             decompress_failures={}\n",
            self.duration().as_millis(),
            self.compress_calls,
            self.raw_bytes_in,
            self.compressed_bytes_out,
            self.compression_ratio(),
            self.decompress_calls,
            self.compressed_bytes_in,
            self.raw_bytes_out,
            self.decompress_failures,
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Summary ===")?;
        writeln!(f, "Duration: {} ms", self.duration().as_millis())?;
        writeln!(f)?;

        if self.compress_calls > 0 {
            writeln!(f, "=== Compression ===")?;
            writeln!(f, "Inputs: {}", self.compress_calls)?;
            writeln!(f, "Raw: {} bytes ({:.2} MiB)", self.raw_bytes_in, mib(self.raw_bytes_in))?;
            writeln!(
                f,
                "Compressed: {} bytes ({:.2} MiB)",
                self.compressed_bytes_out,
                mib(self.compressed_bytes_out)
            )?;
            writeln!(f, "Ratio: {:.1}%", self.compression_ratio() * 100.0)?;
            writeln!(f)?;
        }

        if self.decompress_calls > 0 || self.decompress_failures > 0 {
            writeln!(f, "=== Decompression ===")?;
            writeln!(f, "Inputs: {}", self.decompress_calls)?;
            writeln!(f, "Compressed: {} bytes", self.compressed_bytes_in)?;
            writeln!(f, "Restored: {} bytes ({:.2} MiB)", self.raw_bytes_out, mib(self.raw_bytes_out))?;
            writeln!(f, "Failures: {}", self.decompress_failures)?;
            writeln!(f)?;
        }

        writeln!(f, "=== Performance ===")?;
        write!(f, "Throughput: {:.2} MB/s", self.throughput_bps() / 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert!(metrics.end_time.is_none());
        assert!(metrics.duration().as_millis() < 100);
        assert_eq!(metrics.compression_ratio(), 0.0);
    }

    #[test]
    fn test_compression_ratio() {
        let mut metrics = Metrics::new();
        metrics.record_compress(1000, 750);

        assert_eq!(metrics.compress_calls, 1);
        assert_eq!(metrics.compression_ratio(), 0.75);
    }

    #[test]
    fn test_merge() {
        let mut a = Metrics::new();
        a.record_compress(100, 50);
        let mut b = Metrics::new();
        b.record_decompress(50, 100);
        b.record_failure();

        a.merge(&b);
        assert_eq!(a.compress_calls, 1);
        assert_eq!(a.decompress_calls, 1);
        assert_eq!(a.raw_bytes_out, 100);
        assert_eq!(a.decompress_failures, 1);
    }

    #[test]
    fn test_throughput() {
        let mut metrics = Metrics::new();
        metrics.record_compress(1_000_000, 400_000);

        std::thread::sleep(Duration::from_millis(10));
        metrics.complete();

        assert!(metrics.throughput_bps() > 0.0);
    }

    #[test]
    fn test_export_text() {
        let mut metrics = Metrics::new();
        metrics.record_compress(1000, 600);
        metrics.record_decompress(600, 1000);

        let text = metrics.export_text();
        assert!(text.contains("raw_bytes_in=1000"));
        assert!(text.contains("compressed_bytes_out=600"));
        assert!(text.contains("raw_bytes_out=1000"));
        assert!(text.contains("compression_ratio=0.6000"));
    }

    #[test]
    fn test_display_sections() {
        let mut metrics = Metrics::new();
        metrics.record_compress(10, 1030);

        let summary = metrics.to_string();
        assert!(summary.contains("=== Compression ==="));
        assert!(!summary.contains("=== Decompression ==="));
    }
}
