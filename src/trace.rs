//! Env-gated event trace.
//!
//! Events always land in a small in-memory ring so a front-end can dump
//! recent history; `SOLIMOTS_TRACE=1` also echoes them to stderr.

use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

const RING_CAPACITY: usize = 256;

static START: OnceLock<Instant> = OnceLock::new();
static STDERR_ENABLED: OnceLock<bool> = OnceLock::new();
static RING: OnceLock<Mutex<VecDeque<TraceLine>>> = OnceLock::new();
static SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
struct TraceLine {
    elapsed_ms: u128,
    seq: u64,
    label: &'static str,
    detail: String,
}

fn stderr_enabled() -> bool {
    *STDERR_ENABLED.get_or_init(|| {
        std::env::var("SOLIMOTS_TRACE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}

pub fn init() {
    let _ = START.get_or_init(Instant::now);
    let _ = RING.get_or_init(|| Mutex::new(VecDeque::with_capacity(RING_CAPACITY)));
}

pub fn event(label: &'static str, detail: impl Display) {
    let start = START.get_or_init(Instant::now);
    let line = TraceLine {
        elapsed_ms: start.elapsed().as_millis(),
        seq: SEQ.fetch_add(1, Ordering::Relaxed),
        label,
        detail: detail.to_string(),
    };
    if stderr_enabled() {
        eprintln!("{}", render(&line));
    }
    let ring = RING.get_or_init(|| Mutex::new(VecDeque::with_capacity(RING_CAPACITY)));
    if let Ok(mut ring) = ring.lock() {
        if ring.len() == RING_CAPACITY {
            ring.pop_front();
        }
        ring.push_back(line);
    }
}

fn render(line: &TraceLine) -> String {
    if line.detail.is_empty() {
        format!("[solimots] t={}ms #{} {}", line.elapsed_ms, line.seq, line.label)
    } else {
        format!(
            "[solimots] t={}ms #{} {} {}",
            line.elapsed_ms, line.seq, line.label, line.detail
        )
    }
}

pub fn history_lines() -> Vec<String> {
    let Some(ring) = RING.get() else {
        return Vec::new();
    };
    let Ok(ring) = ring.lock() else {
        return Vec::new();
    };
    ring.iter().map(render).collect()
}
