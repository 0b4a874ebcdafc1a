use std::sync::Arc;
use std::thread;

use tempfile::TempDir;

use bayes_sift::classifier::Classifier;
use bayes_sift::config::ClassifierConfig;
use bayes_sift::error::Result;

const THREADS: usize = 8;
const DOCUMENTS_PER_THREAD: usize = 200;

fn classifier(dir: &TempDir) -> Result<Arc<Classifier>> {
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    Ok(Arc::new(Classifier::from_config(&config)?))
}

#[test]
fn parallel_training_loses_no_counts() -> Result<()> {
    let dir = TempDir::new()?;
    let classifier = classifier(&dir)?;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || -> Result<()> {
                let category = if t % 2 == 0 { "even" } else { "odd" };
                for i in 0..DOCUMENTS_PER_THREAD {
                    classifier.train(&format!("shared thread{t} doc{i}"), category)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("training thread panicked")?;
    }

    let per_category = (THREADS / 2 * DOCUMENTS_PER_THREAD) as f64;
    let model = classifier.snapshot();
    assert_eq!(model.categories.count("even"), per_category);
    assert_eq!(model.categories.count("odd"), per_category);
    assert_eq!(model.terms.lookup("shared", "even"), Some(per_category));
    assert_eq!(model.terms.lookup("shared", "odd"), Some(per_category));
    assert_eq!(model.terms.lookup("thread0", "even"), Some(DOCUMENTS_PER_THREAD as f64));
    Ok(())
}

#[test]
fn readers_see_consistent_tables_while_training() -> Result<()> {
    let dir = TempDir::new()?;
    let classifier = classifier(&dir)?;
    classifier.train("seed document", "base")?;

    let writer = {
        let classifier = Arc::clone(&classifier);
        thread::spawn(move || -> Result<()> {
            for i in 0..500 {
                classifier.train(&format!("marker word{i}"), "stream")?;
            }
            Ok(())
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || -> Result<()> {
                for _ in 0..200 {
                    // Every trained "marker" document adds one "stream" document,
                    // so the two counts move together.
                    let model = classifier.snapshot();
                    let documents = model.categories.count("stream");
                    let marker = model.terms.lookup("marker", "stream").unwrap_or(0.0);
                    assert_eq!(documents, marker);

                    for item in classifier.categorize("marker document")? {
                        assert!(item.probability.is_finite());
                        assert!(item.probability >= 0.0);
                    }
                }
                Ok(())
            })
        })
        .collect();

    writer.join().expect("writer panicked")?;
    for reader in readers {
        reader.join().expect("reader panicked")?;
    }

    assert_eq!(classifier.categories().count("stream"), 500.0);
    Ok(())
}

#[test]
fn export_runs_alongside_training() -> Result<()> {
    let dir = TempDir::new()?;
    let classifier = classifier(&dir)?;

    let trainer = {
        let classifier = Arc::clone(&classifier);
        thread::spawn(move || -> Result<()> {
            for i in 0..300 {
                classifier.train(&format!("steady stream{i}"), "load")?;
            }
            Ok(())
        })
    };

    let exporters: Vec<_> = (0..2)
        .map(|_| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || -> Result<()> {
                for _ in 0..20 {
                    classifier.export()?;
                }
                Ok(())
            })
        })
        .collect();

    trainer.join().expect("trainer panicked")?;
    for exporter in exporters {
        exporter.join().expect("exporter panicked")?;
    }

    classifier.export()?;
    classifier.reset();
    classifier.import()?;
    assert_eq!(classifier.categories().count("load"), 300.0);
    Ok(())
}
