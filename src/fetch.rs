//! Verified fetcher: streaming HTTP download with in-place progress.
//!
//! Downloads are synchronous and blocking, one transfer at a time. When the
//! server reports a content length the body is streamed in chunks of
//! `max(total / 1000, 1 MiB)` and a progress line is redrawn after each
//! chunk; without a content length the body is fetched as a single unit
//! with no incremental progress.
//!
//! On any failure the partially written destination file is removed, so a
//! destination file exists after `fetch` returns only when it is complete.
//! Integrity checking is a separate step (see [`crate::verify`]); the
//! fetcher itself never sees the expected digest.

use crate::error::SetupError;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::io::{Read, Write};
use std::path::Path;
use std::time::{Duration, Instant};

/// Smallest streaming chunk (1 MiB).
const MIN_CHUNK: u64 = 1024 * 1024;

/// Request timeout for establishing the connection and reading headers.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Some download servers reject requests with default client identifiers,
/// so send a conventional browser User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.97 Safari/537.36";

/// Byte-count bookkeeping for one in-progress download.
#[derive(Debug)]
pub struct Transfer {
    total: Option<u64>,
    received: u64,
    started: Instant,
}

impl Transfer {
    pub fn new(total: Option<u64>) -> Self {
        Self {
            total,
            received: 0,
            started: Instant::now(),
        }
    }

    pub fn record(&mut self, bytes: u64) {
        self.received += bytes;
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    /// Fraction complete in `[0.0, 1.0]`; `0.0` when the total is unknown
    /// or zero.
    pub fn fraction(&self) -> f64 {
        match self.total {
            Some(total) if total > 0 => (self.received as f64 / total as f64).min(1.0),
            _ => 0.0,
        }
    }

    /// Average throughput in bytes per second since the transfer started.
    pub fn average_speed(&self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.received as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Human-readable average speed, e.g. `"512.00 KB/s"` or `"2.41 MB/s"`.
    pub fn speed_label(&self) -> String {
        format_speed(self.average_speed())
    }
}

/// Streaming chunk size for a known content length: roughly a thousandth
/// of the total, floored at 1 MiB.
pub fn chunk_len(total: u64) -> usize {
    (total / 1000).max(MIN_CHUNK) as usize
}

/// Render a throughput as KB/s, switching to MB/s above 1024 KB/s.
pub fn format_speed(bytes_per_sec: f64) -> String {
    let kb_per_sec = bytes_per_sec / 1024.0;
    if kb_per_sec > 1024.0 {
        format!("{:.2} MB/s", kb_per_sec / 1024.0)
    } else {
        format!("{:.2} KB/s", kb_per_sec)
    }
}

/// Progress line: `> [<bars><dots>] <percent>% (<speed>)`, redrawn in place
/// on stdout. The speed slot is fed through the bar message.
fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::with_template("> [{bar:50}] {percent_exact}% ({msg})")
            .expect("static progress template")
            .progress_chars("█.")
            .with_key(
                "percent_exact",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.2}", state.fraction() * 100.0);
                },
            ),
    );
    pb.set_message(format_speed(0.0));
    pb
}

/// Download `url` to `dest`, creating missing parent directories.
///
/// Returns the number of bytes written. On any failure the partial
/// destination file is deleted before the error is returned.
pub fn fetch(url: &str, dest: &Path) -> Result<u64, SetupError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(status, _) => SetupError::Protocol {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(t) => SetupError::Network(t.to_string()),
        })?;

    let total: Option<u64> = response
        .header("content-length")
        .and_then(|s| s.parse().ok());

    match stream_to_file(response, total, dest) {
        Ok(written) => Ok(written),
        Err(e) => {
            // Atomicity: either a complete file exists, or none does.
            let _ = std::fs::remove_file(dest);
            Err(e)
        }
    }
}

fn stream_to_file(
    response: ureq::Response,
    total: Option<u64>,
    dest: &Path,
) -> Result<u64, SetupError> {
    let mut reader = response.into_reader();
    let mut file = std::fs::File::create(dest)?;

    let Some(total) = total else {
        // No content length: single-unit fetch, no incremental progress.
        let mut body = Vec::new();
        reader
            .read_to_end(&mut body)
            .map_err(|e| SetupError::Network(format!("read error: {e}")))?;
        file.write_all(&body)?;
        return Ok(body.len() as u64);
    };

    let pb = progress_bar(total);
    let mut transfer = Transfer::new(Some(total));
    let mut chunk = vec![0u8; chunk_len(total)];

    while transfer.received() < total {
        let filled = fill_chunk(&mut reader, &mut chunk)
            .map_err(|e| SetupError::Network(format!("read error: {e}")))?;
        if filled == 0 {
            pb.abandon();
            return Err(SetupError::Network(format!(
                "connection closed after {} of {} bytes",
                transfer.received(),
                total
            )));
        }

        file.write_all(&chunk[..filled])?;
        transfer.record(filled as u64);

        pb.set_message(transfer.speed_label());
        pb.set_position(transfer.received());
    }

    file.flush()?;
    pb.finish();
    Ok(transfer.received())
}

/// Read until the buffer is full or the stream ends. A short return below
/// the buffer length means end of stream.
fn fill_chunk(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
