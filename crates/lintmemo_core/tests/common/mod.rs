#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use lintmemo_core::{
    AnalysisEngine, CacheError, CacheStore, Diagnostic, EngineOutcome, Globals, MemoryStore,
    Options,
};
use serde_json::json;
use tokio::sync::Notify;

/// Reports a syntax error for an assignment without a right-hand side and
/// counts how often it was invoked.
#[derive(Default)]
pub struct SyntaxEngine {
    calls: AtomicUsize,
}

impl SyntaxEngine {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AnalysisEngine for SyntaxEngine {
    fn analyze(&self, source: &str, _: &Options, _: &Globals) -> EngineOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let diagnostics: Vec<Diagnostic> = source
            .lines()
            .enumerate()
            .filter_map(|(i, line)| {
                line.find("= ;").map(|col| {
                    Diagnostic::new(
                        "Expected an identifier and instead saw ';'.",
                        i as u32 + 1,
                        col as u32 + 3,
                    )
                    .with_code("E030")
                    .with_evidence(line)
                })
            })
            .collect();

        if diagnostics.is_empty() {
            EngineOutcome::Pass
        } else {
            EngineOutcome::fail(diagnostics, json!({ "lines": source.lines().count() }))
        }
    }
}

/// Store whose lookups succeed but whose inserts always fail.
#[derive(Default)]
pub struct ReadOnlyStore;

impl CacheStore for ReadOnlyStore {
    async fn contains(&self, _: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    async fn insert(&self, _: &str) -> Result<(), CacheError> {
        Err(CacheError::write("store is read-only"))
    }
}

/// In-memory store whose inserts wait until released.
#[derive(Default)]
pub struct GatedStore {
    inner: MemoryStore,
    release: Notify,
}

impl GatedStore {
    pub fn release(&self) {
        self.release.notify_waiters();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl CacheStore for GatedStore {
    async fn contains(&self, key: &str) -> Result<bool, CacheError> {
        self.inner.contains(key).await
    }

    async fn insert(&self, key: &str) -> Result<(), CacheError> {
        self.release.notified().await;
        self.inner.insert(key).await
    }
}

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

pub fn options(value: serde_json::Value) -> Options {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
