//! End-to-end tests for the anonymization stage
//!
//! Builds a small data tree plus hand-crafted maps, runs the engine, and
//! checks the output tree against the documented behavior: filename
//! rewriting, per-subject date shifting with precision preservation, row
//! dropping, file skipping, and the metadata passthrough.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use veil::core::anonymize::{Anonymizer, WarningSink};
use veil::domain::{DateOffsetMap, SiteMap, SubjectMap};

struct Fixture {
    _dir: TempDir,
    data_root: PathBuf,
    output_root: PathBuf,
    site_map: SiteMap,
    subject_map: SubjectMap,
    date_offsets: DateOffsetMap,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let data_root = dir.path().join("data");
    let output_root = dir.path().join("output");
    std::fs::create_dir_all(&data_root).unwrap();

    let mut site_map = SiteMap::new();
    site_map.insert("PR", "AB");
    site_map.insert("LA", "CD");

    let mut subject_map = SubjectMap::new();
    subject_map.insert("PR00001", "AB12345");
    subject_map.insert("PR00002", "AB54321");
    subject_map.insert("LA00001", "CD11111");
    subject_map.absorb_sites(&site_map);

    let mut date_offsets = DateOffsetMap::new();
    date_offsets.insert("PR00001", 7);
    date_offsets.insert("PR00002", -7);
    date_offsets.insert("LA00001", 14);

    Fixture {
        _dir: dir,
        data_root,
        output_root,
        site_map,
        subject_map,
        date_offsets,
    }
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn read_output(fx: &Fixture, relative: &str) -> String {
    std::fs::read_to_string(fx.output_root.join(relative)).unwrap()
}

#[test]
fn test_full_file_anonymization() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "visits/PR-PR00001-visit.csv",
        "subject_id,site,visit_date,score\n\
         PR00001,PR,2023-01-01,1.10\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.files_written, 1);
    assert!(summary.is_successful());
    assert!(warnings.is_empty());

    let out = read_output(&fx, "visits/AB-AB12345-visit.csv");
    assert_eq!(out, "subject_id,site,visit_date,score\nAB12345,AB,2023-01-08,1.10\n");
}

#[test]
fn test_timestamp_precision_preserved() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "PR-PR00001-samples.csv",
        "subject_id,collected_at,collected_on,collection_time\n\
         PR00001,2023-01-01 13:45:00,2023-01-01,13:45:00\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    let out = read_output(&fx, "AB-AB12345-samples.csv");
    // Timestamp keeps its time, bare date stays bare, time-of-day untouched
    assert!(out.contains("2023-01-08 13:45:00"));
    assert!(out.contains(",2023-01-08,"));
    assert!(out.contains("13:45:00\n"));
}

#[test]
fn test_per_subject_offsets_differ_within_pooled_file() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "combined-combined-enrollment.csv",
        "subject_id,enrolled_on\n\
         PR00001,2023-06-01\n\
         PR00002,2023-06-01\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    let out = read_output(&fx, "combined-combined-enrollment.csv");
    // +7 for PR00001, -7 for PR00002: same input date, different outputs
    assert!(out.contains("AB12345,2023-06-08"));
    assert!(out.contains("AB54321,2023-05-25"));
}

#[test]
fn test_unmapped_subject_rows_are_dropped_quietly() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "PR-PR00001-labs.csv",
        "subject_id,result\n\
         PR00001,4.2\n\
         XX99999,9.9\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    let out = read_output(&fx, "AB-AB12345-labs.csv");
    assert!(out.contains("AB12345,4.2"));
    assert!(!out.contains("9.9"));
    assert_eq!(summary.rows_dropped, 1);
    // Row drops are silent; the only warning is the missing date offset
    // for the unmapped subject
    assert_eq!(summary.files_written, 1);
}

#[test]
fn test_unmappable_filename_skips_file_with_warning() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "ZZ-ZZ00001-visit.csv",
        "subject_id\nZZ00001\n",
    );
    write_file(
        &fx.data_root,
        "PR-PR00001-visit.csv",
        "subject_id\nPR00001\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    assert_eq!(summary.files_found, 2);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.files_skipped, 1);
    assert!(!summary.is_successful());
    assert!(!warnings.is_empty());

    // The skipped file produced no output under any name
    assert!(fx.output_root.join("AB-AB12345-visit.csv").exists());
    assert!(!fx.output_root.join("ZZ-ZZ00001-visit.csv").exists());
}

#[test]
fn test_metadata_file_passes_through_by_name() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "study-metadata.csv",
        "field,value\nprotocol,v2\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    assert_eq!(summary.files_written, 1);
    let out = read_output(&fx, "study-metadata.csv");
    assert_eq!(out, "field,value\nprotocol,v2\n");
}

#[test]
fn test_non_csv_files_are_ignored_not_copied() {
    let fx = fixture();
    write_file(&fx.data_root, "README.txt", "not data");
    write_file(
        &fx.data_root,
        "PR-PR00001-visit.csv",
        "subject_id\nPR00001\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    assert_eq!(summary.files_found, 1);
    assert!(!fx.output_root.join("README.txt").exists());
}

#[test]
fn test_missing_offset_warns_once_across_files() {
    let fx = fixture();
    // PR00009 is mapped for identity but has no date offset
    let mut subject_map = fx.subject_map.clone();
    subject_map.insert("PR00009", "AB99999");

    write_file(
        &fx.data_root,
        "PR-PR00009-visit1.csv",
        "subject_id,visit_date\nPR00009,2023-01-01\n",
    );
    write_file(
        &fx.data_root,
        "PR-PR00009-visit2.csv",
        "subject_id,visit_date\nPR00009,2023-02-01\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    // Dates pass through unshifted, and the warning is deduplicated across
    // the whole run, not per file
    assert_eq!(summary.files_written, 2);
    assert_eq!(summary.cells_shifted, 0);
    assert_eq!(warnings.distinct_count(), 1);

    let out = read_output(&fx, "AB-AB99999-visit1.csv");
    assert!(out.contains("2023-01-01"));
}

#[test]
fn test_filename_subject_resolves_offsets_without_identity_column() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "PR-PR00001-device.csv",
        "reading,recorded_on\n42,2023-01-01\n",
    );

    let engine = Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets);
    let mut warnings = WarningSink::new();
    engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    let out = read_output(&fx, "AB-AB12345-device.csv");
    assert!(out.contains("42,2023-01-08"));
}

#[test]
fn test_dry_run_reports_counts_but_writes_nothing() {
    let fx = fixture();
    write_file(
        &fx.data_root,
        "PR-PR00001-visit.csv",
        "subject_id,visit_date\nPR00001,2023-01-01\n",
    );

    let engine =
        Anonymizer::new(&fx.site_map, &fx.subject_map, &fx.date_offsets).with_dry_run(true);
    let mut warnings = WarningSink::new();
    let summary = engine
        .run(&fx.data_root, &fx.output_root, &mut warnings)
        .unwrap();

    assert_eq!(summary.files_found, 1);
    assert_eq!(summary.files_written, 1);
    assert_eq!(summary.cells_shifted, 1);
    assert!(!fx.output_root.exists());
}
