use std::io::IsTerminal;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

/// Per-stage counters for one generation run, optionally mirrored to a
/// terminal progress bar. Clones share the same counters.
#[derive(Clone)]
pub struct GenerationProgress {
    inner: Arc<Inner>,
}

struct Inner {
    stage: Mutex<String>,
    modules_done: AtomicUsize,
    declarations: AtomicUsize,
    failures: AtomicUsize,
    started_at: Mutex<Option<Instant>>,
    bar: Option<ProgressBar>,
}

/// Totals of a finished stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage: String,
    /// Modules handled, failures included
    pub modules: usize,
    pub failures: usize,
    pub declarations: usize,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl GenerationProgress {
    /// Counters only, no terminal output
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Counters plus a progress bar on stderr when it is a terminal
    pub fn with_bar() -> Self {
        if !std::io::stderr().is_terminal() {
            return Self::new();
        }
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self::build(Some(bar))
    }

    fn build(bar: Option<ProgressBar>) -> Self {
        Self {
            inner: Arc::new(Inner {
                stage: Mutex::new(String::new()),
                modules_done: AtomicUsize::new(0),
                declarations: AtomicUsize::new(0),
                failures: AtomicUsize::new(0),
                started_at: Mutex::new(None),
                bar,
            }),
        }
    }

    /// Resets the counters for a new stage of `total` modules
    pub fn start(&self, stage: &str, total: usize) {
        self.inner.modules_done.store(0, Ordering::Release);
        self.inner.declarations.store(0, Ordering::Release);
        self.inner.failures.store(0, Ordering::Release);
        if let Ok(mut current) = self.inner.stage.lock() {
            *current = stage.to_string();
        }
        if let Ok(mut started_at) = self.inner.started_at.lock() {
            *started_at = Some(Instant::now());
        }
        if let Some(bar) = &self.inner.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_message(stage.to_string());
        }
    }

    pub fn inc(&self, module: &str, declarations: usize) {
        self.inner.modules_done.fetch_add(1, Ordering::Relaxed);
        self.inner.declarations.fetch_add(declarations, Ordering::Relaxed);
        self.tick(module);
    }

    pub fn inc_error(&self, module: &str) {
        self.inner.modules_done.fetch_add(1, Ordering::Relaxed);
        self.inner.failures.fetch_add(1, Ordering::Relaxed);
        self.tick(module);
    }

    fn tick(&self, module: &str) {
        if let Some(bar) = &self.inner.bar {
            bar.set_message(module.to_string());
            bar.inc(1);
        }
    }

    /// Closes the current stage, clears the bar and logs the stage totals.
    pub fn finish(&self) -> StageSummary {
        if let Some(bar) = &self.inner.bar {
            bar.finish_and_clear();
        }

        let summary = StageSummary {
            stage: self.inner.stage.lock().map(|s| s.clone()).unwrap_or_default(),
            modules: self.inner.modules_done.load(Ordering::Acquire),
            failures: self.inner.failures.load(Ordering::Acquire),
            declarations: self.inner.declarations.load(Ordering::Acquire),
            elapsed: self
                .inner
                .started_at
                .lock()
                .ok()
                .and_then(|started_at| *started_at)
                .map(|t| t.elapsed())
                .unwrap_or_default(),
        };

        tracing::info!(
            stage = summary.stage.as_str(),
            modules = summary.modules,
            failures = summary.failures,
            declarations = summary.declarations,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "stage finished"
        );
        summary
    }
}

impl Default for GenerationProgress {
    fn default() -> Self {
        Self::new()
    }
}
