#[path = "../src/backup.rs"]
mod backup;

use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

#[test]
fn zip_export_and_import_roundtrip() {
    let workspace = temp_dir("seatd-backup-src");
    let workspace2 = temp_dir("seatd-backup-dst");
    let out_dir = temp_dir("seatd-backup-out");

    let db_src = workspace.join("seatd.sqlite3");
    let bytes = b"sqlite-test-payload";
    std::fs::write(&db_src, bytes).expect("write source db");

    let bundle_path = out_dir.join("workspace.seatdbackup.zip");
    let export = backup::export_workspace_bundle(&workspace, &bundle_path).expect("export bundle");
    assert_eq!(export.bundle_format, backup::BUNDLE_FORMAT_V1);
    assert_eq!(export.entry_count, 2);

    let f = File::open(&bundle_path).expect("open bundle");
    let mut archive = zip::ZipArchive::new(f).expect("open zip archive");
    let mut manifest = String::new();
    archive
        .by_name("manifest.json")
        .expect("manifest entry")
        .read_to_string(&mut manifest)
        .expect("read manifest");
    assert!(manifest.contains(backup::BUNDLE_FORMAT_V1));
    archive
        .by_name("db/seatd.sqlite3")
        .expect("database entry in bundle");

    let import = backup::import_workspace_bundle(&bundle_path, &workspace2).expect("import bundle");
    assert_eq!(import.bundle_format_detected, backup::BUNDLE_FORMAT_V1);

    let restored = std::fs::read(workspace2.join("seatd.sqlite3")).expect("read restored db");
    assert_eq!(restored, bytes);

    let _ = std::fs::remove_dir_all(workspace);
    let _ = std::fs::remove_dir_all(workspace2);
    let _ = std::fs::remove_dir_all(out_dir);
}

#[test]
fn bare_sqlite_files_import_as_legacy_backups() {
    let workspace = temp_dir("seatd-backup-bare");
    let src = temp_dir("seatd-backup-bare-src").join("old-backup.sqlite3");
    std::fs::write(&src, b"not-a-zip").expect("write bare backup");

    let import = backup::import_workspace_bundle(&src, &workspace).expect("import bare file");
    assert_eq!(import.bundle_format_detected, "bare-sqlite3");
    assert_eq!(
        std::fs::read(workspace.join("seatd.sqlite3")).expect("restored"),
        b"not-a-zip"
    );

    let _ = std::fs::remove_dir_all(workspace);
}
