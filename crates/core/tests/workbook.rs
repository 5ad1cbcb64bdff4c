use fichas_core::{
    load_dataset, DatasetCache, FichasError, SkipReason, SourceLocator, DEFAULT_MARKER,
};
use fichas_sheet::{Book, CellValue, Sheet};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

fn plan_book(extra_task: Option<&str>) -> Book {
    let mut cinta = Sheet::new();
    cinta.push_row(vec!["RECICLAJE - FICHA DE MANTENIMIENTO"]);
    cinta.push_row(Vec::<CellValue>::new());
    cinta.push_row(vec![
        "Modos de\nFallo",
        "Medidas preventivas",
        "Criticidad",
        "E pecialista",
        "F",
        "F o r m",
    ]);
    cinta.push_row(vec![
        CellValue::from("Atasco"),
        CellValue::from("Limpiar rodillos"),
        CellValue::from("A"),
        CellValue::from("MEC"),
        CellValue::Int(7),
        CellValue::from("S"),
    ]);
    cinta.push_row(vec![
        CellValue::Null,
        CellValue::from("Tensar banda"),
        CellValue::Null,
        CellValue::Null,
        CellValue::Null,
        CellValue::from("N"),
    ]);
    if let Some(task) = extra_task {
        cinta.push_row(vec![CellValue::Null, CellValue::from(task)]);
    }

    let mut book = Book::new();
    book.add_sheet("Portada", Sheet::from_data(vec![vec!["Plan de mantenimiento 2024"]]))
        .unwrap();
    book.add_sheet("Cinta transportadora", cinta).unwrap();
    book
}

fn write_plan(path: &Path, extra_task: Option<&str>) {
    plan_book(extra_task).save_as_xlsx(path).unwrap();
}

fn bump_mtime(path: &Path) {
    let file = File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() + Duration::from_secs(120))
        .unwrap();
}

#[test]
fn test_load_dataset_from_xlsx() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("FichasMantenimiento.xlsx");
    write_plan(&path, None);

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.len(), 2);

    let second = &dataset.records()[1];
    assert_eq!(second.equipment, "CINTA TRANSPORTADORA");
    assert_eq!(second.failure_mode, "Atasco");
    assert_eq!(second.task, "Tensar banda");
    assert_eq!(second.criticality, "A");
    assert_eq!(second.specialist, "MEC");
    assert_eq!(second.periodicity, "7");
    assert_eq!(second.requires_training, "N");

    assert_eq!(dataset.skipped().len(), 1);
    assert_eq!(dataset.skipped()[0].reason, SkipReason::HeaderNotFound);
}

#[test]
fn test_corrupt_workbook_is_load_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fichasmantenimiento.xlsx");
    std::fs::write(&path, b"PK not really a workbook").unwrap();

    let err = load_dataset(&path).unwrap_err();
    assert!(matches!(err, FichasError::Load { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn test_cache_reuses_until_file_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("FichasMantenimiento_v2.xlsx");
    write_plan(&path, None);

    let mut cache = DatasetCache::new(SourceLocator::new(dir.path()));
    assert!(cache.cached().is_none());

    let first = cache.get().unwrap();
    let again = cache.get().unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert_eq!(cache.load_count(), 1);
    assert_eq!(cache.cached_path(), Some(path.as_path()));

    write_plan(&path, Some("Revisar motor"));
    bump_mtime(&path);

    let reloaded = cache.get().unwrap();
    assert_eq!(cache.load_count(), 2);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_cache_manual_refresh() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.xlsx");
    write_plan(&path, None);

    let mut cache = DatasetCache::for_path(&path);
    let first = cache.get().unwrap();
    cache.refresh();
    assert!(cache.cached().is_none());

    let second = cache.get().unwrap();
    assert_eq!(cache.load_count(), 2);
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
}

#[test]
fn test_cache_reports_missing_source() {
    let dir = tempdir().unwrap();
    let mut cache = DatasetCache::new(SourceLocator::new(dir.path()));

    match cache.get() {
        Err(FichasError::SourceNotFound { marker, .. }) => assert_eq!(marker, DEFAULT_MARKER),
        other => panic!("expected SourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_failed_reload_drops_previous_dataset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fichasmantenimiento.xlsx");
    write_plan(&path, None);

    let mut cache = DatasetCache::for_path(&path);
    cache.get().unwrap();

    std::fs::write(&path, b"garbage").unwrap();
    bump_mtime(&path);

    assert!(matches!(cache.get(), Err(FichasError::Load { .. })));
    assert!(cache.cached().is_none());
}
