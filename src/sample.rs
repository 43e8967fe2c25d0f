//! Pairing of thread-count announcements with elapsed-time reports.
//!
//! A benchmark log interleaves `-> Threads = N` lines with
//! `STENCIL_TIME: T` lines. Each time report is attributed to the most
//! recent unconsumed thread count; everything else is noise.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

pub const THREADS_PATTERN: &str = r"-> Threads = ([0-9]+)";
pub const ELAPSED_PATTERN: &str = r"STENCIL_TIME: ([0-9]+\.[0-9]+)";

static THREADS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(THREADS_PATTERN).expect("thread-count pattern compiles"));
static ELAPSED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ELAPSED_PATTERN).expect("elapsed-time pattern compiles"));

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub threads: u32,
    pub elapsed_seconds: f64,
}

impl Sample {
    pub fn new(threads: u32, elapsed_seconds: f64) -> Self {
        Self {
            threads,
            elapsed_seconds,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    AwaitingThreads,
    ThreadsPending(u32),
}

impl ScanState {
    /// A thread-count line always leaves a pending value behind. Any value
    /// already pending is dropped.
    pub fn on_thread_count(self, threads: u32) -> ScanState {
        if let ScanState::ThreadsPending(previous) = self {
            debug!(previous, threads, "pending thread count overwritten");
        }
        ScanState::ThreadsPending(threads)
    }

    /// A thread marker whose value is not a positive `u32` still ends any
    /// pending count, so the next time report is not misattributed.
    pub fn on_invalid_thread_count(self) -> ScanState {
        if let ScanState::ThreadsPending(previous) = self {
            debug!(previous, "pending thread count cleared by invalid marker");
        }
        ScanState::AwaitingThreads
    }

    pub fn on_elapsed(self, elapsed_seconds: f64) -> (ScanState, Option<Sample>) {
        match self {
            ScanState::ThreadsPending(threads) => (
                ScanState::AwaitingThreads,
                Some(Sample::new(threads, elapsed_seconds)),
            ),
            ScanState::AwaitingThreads => (ScanState::AwaitingThreads, None),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThreadMarker {
    Count(u32),
    /// Marker present, value zero or out of `u32` range.
    Invalid,
}

pub fn parse_thread_marker(line: &str) -> Option<ThreadMarker> {
    let caps = THREADS_LINE.captures(line)?;
    let marker = match caps[1].parse::<u32>() {
        Ok(threads) if threads > 0 => ThreadMarker::Count(threads),
        _ => ThreadMarker::Invalid,
    };
    Some(marker)
}

/// Thread count announced on `line`, if any. Zero is not a thread count.
pub fn parse_thread_count(line: &str) -> Option<u32> {
    match parse_thread_marker(line)? {
        ThreadMarker::Count(threads) => Some(threads),
        ThreadMarker::Invalid => None,
    }
}

pub fn parse_elapsed(line: &str) -> Option<f64> {
    let caps = ELAPSED_LINE.captures(line)?;
    caps[1].parse::<f64>().ok()
}

#[derive(Debug, Default)]
pub struct LineScanner {
    state: ScanState,
    samples: Vec<Sample>,
    unpaired_times: usize,
}

impl LineScanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn unpaired_times(&self) -> usize {
        self.unpaired_times
    }

    /// Feeds one line. The thread marker is checked before the time marker,
    /// so a line carrying both pairs with itself.
    pub fn feed(&mut self, line: &str) -> Option<Sample> {
        match parse_thread_marker(line) {
            Some(ThreadMarker::Count(threads)) => {
                self.state = self.state.on_thread_count(threads);
            }
            Some(ThreadMarker::Invalid) => {
                warn!(line, "thread count is not a positive integer");
                self.state = self.state.on_invalid_thread_count();
            }
            None => {}
        }
        let elapsed = parse_elapsed(line)?;
        let (next, sample) = self.state.on_elapsed(elapsed);
        self.state = next;
        match sample {
            Some(sample) => {
                debug!(
                    threads = sample.threads,
                    elapsed = sample.elapsed_seconds,
                    "sample"
                );
                self.samples.push(sample);
            }
            None => {
                self.unpaired_times += 1;
                debug!(elapsed, "time report without thread count ignored");
            }
        }
        sample
    }

    pub fn finish(self) -> Vec<Sample> {
        if let ScanState::ThreadsPending(threads) = self.state {
            warn!(threads, "log ended with an unpaired thread count");
        }
        if self.unpaired_times > 0 {
            warn!(count = self.unpaired_times, "unpaired time reports ignored");
        }
        self.samples
    }
}

pub fn scan_reader<R: BufRead>(reader: R) -> std::io::Result<Vec<Sample>> {
    let mut scanner = LineScanner::new();
    for line in reader.lines() {
        scanner.feed(&line?);
    }
    Ok(scanner.finish())
}

pub fn scan_str(content: &str) -> Vec<Sample> {
    let mut scanner = LineScanner::new();
    for line in content.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_thread_count_with_following_time() {
        let samples = scan_str("-> Threads = 1\nSTENCIL_TIME: 2.000000\n-> Threads = 4\nSTENCIL_TIME: 1.000000\n");
        assert_eq!(samples, vec![Sample::new(1, 2.0), Sample::new(4, 1.0)]);
    }

    #[test]
    fn test_time_before_any_thread_count_is_ignored() {
        let mut scanner = LineScanner::new();
        assert_eq!(scanner.feed("STENCIL_TIME: 9.500000"), None);
        assert_eq!(scanner.state(), ScanState::AwaitingThreads);
        assert_eq!(scanner.unpaired_times(), 1);
        scanner.feed("-> Threads = 2");
        scanner.feed("STENCIL_TIME: 1.250000");
        assert_eq!(scanner.finish(), vec![Sample::new(2, 1.25)]);
    }

    #[test]
    fn test_second_thread_count_overwrites_first() {
        let samples = scan_str("-> Threads = 8\n-> Threads = 16\nSTENCIL_TIME: 0.500000\n");
        assert_eq!(samples, vec![Sample::new(16, 0.5)]);
    }

    #[test]
    fn test_trailing_thread_count_is_discarded() {
        let mut scanner = LineScanner::new();
        scanner.feed("-> Threads = 1");
        scanner.feed("STENCIL_TIME: 3.000000");
        scanner.feed("-> Threads = 2");
        assert_eq!(scanner.state(), ScanState::ThreadsPending(2));
        assert_eq!(scanner.finish(), vec![Sample::new(1, 3.0)]);
    }

    #[test]
    fn test_time_consumes_pending_value_once() {
        let samples = scan_str("-> Threads = 4\nSTENCIL_TIME: 1.000000\nSTENCIL_TIME: 2.000000\n");
        assert_eq!(samples, vec![Sample::new(4, 1.0)]);
    }

    #[test]
    fn test_state_transitions() {
        let state = ScanState::AwaitingThreads.on_thread_count(3);
        assert_eq!(state, ScanState::ThreadsPending(3));
        assert_eq!(state.on_thread_count(5), ScanState::ThreadsPending(5));
        assert_eq!(state.on_invalid_thread_count(), ScanState::AwaitingThreads);
        let (next, sample) = ScanState::ThreadsPending(5).on_elapsed(0.25);
        assert_eq!(next, ScanState::AwaitingThreads);
        assert_eq!(sample, Some(Sample::new(5, 0.25)));
        assert_eq!(
            ScanState::AwaitingThreads.on_elapsed(0.25),
            (ScanState::AwaitingThreads, None)
        );
    }

    #[test]
    fn test_marker_parsing() {
        assert_eq!(parse_thread_count("  -> Threads = 32 (OMP)"), Some(32));
        assert_eq!(parse_thread_count("Threads = 32"), None);
        assert_eq!(parse_thread_count("-> Threads = 0"), None);
        assert_eq!(parse_elapsed("[rank 0] STENCIL_TIME: 12.345678 s"), Some(12.345678));
        assert_eq!(parse_elapsed("STENCIL_TIME: 12"), None);
    }

    #[test]
    fn test_zero_thread_count_clears_pending_value() {
        let mut scanner = LineScanner::new();
        scanner.feed("-> Threads = 4");
        scanner.feed("-> Threads = 0");
        assert_eq!(scanner.state(), ScanState::AwaitingThreads);
        assert_eq!(scanner.feed("STENCIL_TIME: 1.000000"), None);
        assert!(scanner.finish().is_empty());
    }

    #[test]
    fn test_out_of_range_thread_count_clears_pending_value() {
        let samples = scan_str(
            "-> Threads = 1\nSTENCIL_TIME: 2.000000\n\
             -> Threads = 4\n-> Threads = 4294967296\nSTENCIL_TIME: 1.000000\n",
        );
        assert_eq!(samples, vec![Sample::new(1, 2.0)]);
    }

    #[test]
    fn test_markers_accept_ascii_digits_only() {
        assert_eq!(parse_thread_marker("-> Threads = \u{0661}"), None);
        assert_eq!(parse_elapsed("STENCIL_TIME: \u{0661}.\u{0665}"), None);
        assert_eq!(
            parse_thread_marker("-> Threads = 99999999999"),
            Some(ThreadMarker::Invalid)
        );
        assert_eq!(parse_thread_marker("-> Threads = 8"), Some(ThreadMarker::Count(8)));
    }

    #[test]
    fn test_line_with_both_markers_pairs_with_itself() {
        let samples = scan_str("-> Threads = 2 STENCIL_TIME: 0.750000\n");
        assert_eq!(samples, vec![Sample::new(2, 0.75)]);
    }

    #[test]
    fn test_scan_reader_matches_scan_str() {
        let content = "noise\n-> Threads = 1\nSTENCIL_TIME: 2.000000\n";
        let from_reader = scan_reader(content.as_bytes()).unwrap();
        assert_eq!(from_reader, scan_str(content));
    }
}
