use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use bayes_sift::classifier::Classifier;
use bayes_sift::config::ClassifierConfig;
use bayes_sift::error::{ClassifierError, Result};
use bayes_sift::storage::Storage;
use bayes_sift::storage::file::FileStorage;
use bayes_sift::storage::snapshot::{ModelStore, SnapshotFormat, SnapshotStore};

fn train_sample(classifier: &Classifier) -> Result<()> {
    classifier.train("buy cheap pills", "spam")?;
    classifier.train("cheap watches online", "spam")?;
    classifier.train("meeting agenda attached", "ham")?;
    classifier.train_delimited("rust/go/c", "languages")?;
    Ok(())
}

#[test]
fn json_snapshot_survives_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;

    let first = Classifier::from_config(&config)?;
    train_sample(&first)?;
    first.export()?;
    let expected = first.categorize("cheap agenda")?;

    let second = Classifier::open(&config)?;
    assert_eq!(second.snapshot(), first.snapshot());
    assert_eq!(second.categorize("cheap agenda")?, expected);
    assert_eq!(
        second.score_word("cheap", None),
        first.score_word("cheap", None)
    );
    Ok(())
}

#[test]
fn json_snapshot_uses_category_and_words_fields() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    let config = ClassifierConfig::builder(&path).build()?;

    let classifier = Classifier::from_config(&config)?;
    classifier.train("buy cheap pills", "spam")?;
    classifier.export()?;

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    assert_eq!(value["category"]["spam"], serde_json::json!(1.0));
    assert_eq!(value["words"]["cheap"]["spam"], serde_json::json!(1.0));
    Ok(())
}

#[test]
fn hand_written_snapshot_is_imported() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(
        &path,
        r#"{"category": {"spam": 2, "ham": 1}, "words": {"cheap": {"spam": 2}, "agenda": {"ham": 1}}}"#,
    )?;

    let config = ClassifierConfig::builder(&path).build()?;
    let classifier = Classifier::open(&config)?;

    assert_eq!(classifier.categories().count("spam"), 2.0);
    assert_eq!(classifier.categorize("cheap")?[0].label, "spam");
    Ok(())
}

#[test]
fn bincode_snapshot_survives_restart() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.bin"))
        .format(SnapshotFormat::Bincode)
        .build()?;

    let first = Classifier::from_config(&config)?;
    train_sample(&first)?;
    first.export()?;

    let second = Classifier::open(&config)?;
    assert_eq!(second.snapshot(), first.snapshot());
    Ok(())
}

#[test]
fn missing_snapshot_starts_empty() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("nested").join("model.json")).build()?;

    let classifier = Classifier::open(&config)?;
    assert!(classifier.snapshot().is_empty());
    assert!(!classifier.store().exists());
    Ok(())
}

#[test]
fn corrupt_snapshot_is_lenient_on_startup_but_strict_on_open() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(&path, "{ this is not json")?;
    let config = ClassifierConfig::builder(&path).build()?;

    let lenient = Classifier::from_config(&config)?;
    assert!(lenient.snapshot().is_empty());
    assert!(lenient.has_unreadable_snapshot());

    let strict = Classifier::open(&config);
    assert!(matches!(strict, Err(ClassifierError::Json(_))));
    Ok(())
}

#[test]
fn unreadable_snapshot_is_never_overwritten_by_export() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(&path, "{ this is not json")?;
    let config = ClassifierConfig::builder(&path).build()?;

    let classifier = Classifier::from_config(&config)?;
    classifier.train("buy cheap pills", "spam")?;

    let result = classifier.export();
    assert!(matches!(result, Err(ClassifierError::InvalidOperation(_))));
    assert_eq!(fs::read_to_string(&path)?, "{ this is not json");
    assert!(!path.with_extension("json.tmp").exists());
    Ok(())
}

#[test]
fn reset_allows_replacing_an_unreadable_snapshot() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(&path, "{ this is not json")?;
    let config = ClassifierConfig::builder(&path).build()?;

    let classifier = Classifier::from_config(&config)?;
    classifier.reset();
    assert!(!classifier.has_unreadable_snapshot());
    classifier.train("buy cheap pills", "spam")?;
    classifier.export()?;

    let reopened = Classifier::open(&config)?;
    assert_eq!(reopened.categories().count("spam"), 1.0);
    Ok(())
}

#[test]
fn repaired_snapshot_import_clears_the_export_guard() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.json");
    fs::write(&path, "{ this is not json")?;
    let config = ClassifierConfig::builder(&path).build()?;

    let classifier = Classifier::from_config(&config)?;
    assert!(classifier.import().is_err());
    assert!(classifier.has_unreadable_snapshot());

    fs::write(&path, r#"{"category": {"ham": 1}, "words": {"agenda": {"ham": 1}}}"#)?;
    classifier.import()?;
    assert!(!classifier.has_unreadable_snapshot());

    classifier.train("buy cheap pills", "spam")?;
    classifier.export()?;
    assert_eq!(Classifier::open(&config)?.categories().len(), 2);
    Ok(())
}

#[test]
fn json_snapshot_read_as_bincode_fails_cleanly() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.bin");
    let json = ClassifierConfig::builder(&path).build()?;
    let first = Classifier::from_config(&json)?;
    train_sample(&first)?;
    first.export()?;
    let written = fs::read(&path)?;

    let bincode = ClassifierConfig::builder(&path)
        .format(SnapshotFormat::Bincode)
        .build()?;
    assert!(matches!(
        Classifier::open(&bincode),
        Err(ClassifierError::Bincode(_))
    ));

    let lenient = Classifier::from_config(&bincode)?;
    assert!(lenient.snapshot().is_empty());
    assert!(lenient.export().is_err());
    assert_eq!(fs::read(&path)?, written);
    Ok(())
}

#[test]
fn export_leaves_no_temporary_file() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = Arc::new(FileStorage::new(dir.path())?);
    let store = SnapshotStore::new(storage.clone(), "model.json", SnapshotFormat::Json);

    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;
    let classifier = Classifier::from_config(&config)?;
    train_sample(&classifier)?;
    classifier.export()?;
    classifier.export()?;

    assert!(storage.file_exists("model.json"));
    assert!(!storage.file_exists("model.json.tmp"));
    assert_eq!(store.load()?, classifier.snapshot());
    Ok(())
}

#[test]
fn import_replaces_newer_training() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;

    let classifier = Classifier::from_config(&config)?;
    classifier.train("buy cheap pills", "spam")?;
    classifier.export()?;

    classifier.train("meeting agenda attached", "ham")?;
    assert_eq!(classifier.categories().len(), 2);

    classifier.import()?;
    assert_eq!(classifier.categories().names(), vec!["spam"]);
    Ok(())
}

#[test]
fn reset_then_export_persists_an_empty_model() -> Result<()> {
    let dir = TempDir::new()?;
    let config = ClassifierConfig::builder(dir.path().join("model.json")).build()?;

    let classifier = Classifier::from_config(&config)?;
    train_sample(&classifier)?;
    classifier.export()?;
    classifier.reset();
    classifier.export()?;

    let reopened = Classifier::open(&config)?;
    assert!(reopened.snapshot().is_empty());
    Ok(())
}
