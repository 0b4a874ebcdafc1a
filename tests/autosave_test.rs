use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;

use bayes_sift::analysis::analyzer::PipelineAnalyzer;
use bayes_sift::classifier::engine::segmenter_from_config;
use bayes_sift::classifier::{AutosavePolicy, AutosaveTask, Classifier};
use bayes_sift::config::{AnalysisConfig, ClassifierConfig, EngineSettings};
use bayes_sift::error::{ClassifierError, Result};
use bayes_sift::model::Model;
use bayes_sift::storage::snapshot::ModelStore;

/// A store whose saves always fail.
#[derive(Debug, Default)]
struct FailingStore {
    attempts: AtomicUsize,
}

impl ModelStore for FailingStore {
    fn save(&self, _model: &Model) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ClassifierError::storage("disk full"))
    }

    fn load(&self) -> Result<Model> {
        Err(ClassifierError::storage("nothing saved"))
    }

    fn exists(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "failing://".to_string()
    }
}

fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    condition()
}

#[test]
fn autosave_writes_snapshots_periodically() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    let classifier = Arc::new(Classifier::from_config(&config)?);
    classifier.train("buy cheap pills", "spam")?;

    let mut task = AutosaveTask::start(
        Arc::clone(&classifier),
        AutosavePolicy::every(Duration::from_millis(20)),
    )?;
    assert!(task.is_running());

    assert!(wait_until(Duration::from_secs(10), || {
        task.stats().saves_completed >= 2
    }));
    task.stop()?;

    let stats = task.stats();
    assert!(!stats.running);
    assert_eq!(stats.saves_failed, 0);
    assert!(stats.last_saved_at.is_some());

    let reopened = Classifier::open(&config)?;
    assert_eq!(reopened.categories().count("spam"), 1.0);
    Ok(())
}

#[test]
fn autosave_stops_after_consecutive_failures() -> Result<()> {
    let store = Arc::new(FailingStore::default());
    let analysis = AnalysisConfig::default();
    let classifier = Arc::new(Classifier::new(
        EngineSettings::default(),
        Arc::new(segmenter_from_config(&analysis)?),
        Arc::new(PipelineAnalyzer::delimited(analysis.delimiter)),
        store.clone(),
    )?);

    let task = AutosaveTask::start(
        classifier,
        AutosavePolicy::every(Duration::from_millis(5)).with_max_consecutive_failures(2),
    )?;

    assert!(wait_until(Duration::from_secs(10), || !task.is_running()));

    let stats = task.stats();
    assert_eq!(stats.saves_completed, 0);
    assert_eq!(stats.saves_failed, 2);
    assert_eq!(stats.consecutive_failures, 2);
    assert!(stats.last_error.as_deref().unwrap_or_default().contains("disk full"));
    assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
    Ok(())
}

#[test]
fn stop_does_not_wait_for_the_interval() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    let classifier = Arc::new(Classifier::from_config(&config)?);

    let mut task = AutosaveTask::start(
        classifier,
        AutosavePolicy::every(Duration::from_secs(3600)),
    )?;

    let started = Instant::now();
    task.stop()?;
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(!task.is_running());
    assert_eq!(task.stats().saves_completed, 0);

    // A second stop is a no-op.
    task.stop()?;
    Ok(())
}

#[test]
fn dropping_the_task_stops_it() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    let classifier = Arc::new(Classifier::from_config(&config)?);

    let task = AutosaveTask::start(
        Arc::clone(&classifier),
        AutosavePolicy::every(Duration::from_secs(3600)),
    )?;
    drop(task);

    // Only the caller's handle remains once the thread has exited.
    assert_eq!(Arc::strong_count(&classifier), 1);
    Ok(())
}

#[test]
fn zero_interval_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    let classifier = Arc::new(Classifier::from_config(&config)?);

    let result = AutosaveTask::start(classifier, AutosavePolicy::every(Duration::ZERO));
    assert!(matches!(result, Err(ClassifierError::Autosave(_))));
    Ok(())
}
