//! Recording doubles for the connectivity supervisor's hooks.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{ConnectivityProbe, LiveConsumer, SideRefresh, StatusLevel, StatusSink};

/// Probe that returns scripted results, then `fallback` forever.
pub struct ScriptedProbe {
    results: Mutex<VecDeque<bool>>,
    fallback: bool,
    calls: AtomicUsize,
}

impl ScriptedProbe {
    pub fn new(results: Vec<bool>, fallback: bool) -> Self {
        Self {
            results: Mutex::new(results.into()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for ScriptedProbe {
    async fn check(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results.lock().pop_front().unwrap_or(self.fallback)
    }
}

/// Counts pause/resume calls.
#[derive(Default)]
pub struct RecordingConsumer {
    pauses: AtomicUsize,
    resumes: AtomicUsize,
}

impl RecordingConsumer {
    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }

    pub fn resumes(&self) -> usize {
        self.resumes.load(Ordering::SeqCst)
    }
}

impl LiveConsumer for RecordingConsumer {
    fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.resumes.fetch_add(1, Ordering::SeqCst);
    }
}

/// Records status messages; `clear` is recorded as `None`.
#[derive(Default)]
pub struct RecordingStatus {
    entries: Mutex<Vec<Option<(StatusLevel, String)>>>,
}

impl RecordingStatus {
    pub fn entries(&self) -> Vec<Option<(StatusLevel, String)>> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries
            .lock()
            .iter()
            .flatten()
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl StatusSink for RecordingStatus {
    fn status(&self, level: StatusLevel, message: &str) {
        self.entries.lock().push(Some((level, message.to_string())));
    }

    fn clear(&self) {
        self.entries.lock().push(None);
    }
}

/// Side refresh that counts calls and optionally fails.
#[derive(Default)]
pub struct CountingRefresh {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingRefresh {
    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SideRefresh for CountingRefresh {
    async fn refresh(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Io(std::io::Error::other("alias file unreadable")));
        }
        Ok(())
    }
}
