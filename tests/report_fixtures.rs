mod common;

use std::fs;

use chkit::{ReportOutcome, parse_search_response, write_report};
use common::read_fixture;

fn codes(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn writes_address_blocks() {
    let dir = tempfile::tempdir().unwrap();
    let response = parse_search_response(&read_fixture("search/advanced-search.json")).unwrap();

    let summary = write_report(Some(&response), "Leeds", &codes(&["62020"]), dir.path()).unwrap();

    assert_eq!(summary.path, dir.path().join("Leeds_62020.txt"));
    assert_eq!(summary.stats.outcome, ReportOutcome::Written);
    assert_eq!(summary.stats.processed, 2);
    assert_eq!(summary.stats.skipped, 2);
    assert_eq!(summary.stats.total_items, 4);
    assert_eq!(summary.stats.hits, Some(1000));
    assert!(summary.stats.partial);

    let written = fs::read_to_string(&summary.path).unwrap();
    assert_eq!(
        written,
        "NORTHERN CODE WORKS LTD\n12 Wellington Street\nSuite 3\nLeeds\nLS1 4DL\n----\n\
         AIRE DATA SERVICES LIMITED\n4 Park Row\nLeeds\nLS1 5HD\n----"
    );
}

#[test]
fn writes_no_data_message() {
    let dir = tempfile::tempdir().unwrap();
    let response = parse_search_response(&read_fixture("search/empty.json")).unwrap();

    let summary = write_report(
        Some(&response),
        "New York!",
        &codes(&["62020", "99"]),
        dir.path(),
    )
    .unwrap();

    assert_eq!(summary.path, dir.path().join("New_York__62020.txt"));
    assert_eq!(summary.stats.outcome, ReportOutcome::NoData);
    assert_eq!(
        fs::read_to_string(&summary.path).unwrap(),
        "No company data found for location 'New York!' and SIC code(s) '62020, 99'.\n"
    );
}

#[test]
fn writes_all_skipped_message() {
    let dir = tempfile::tempdir().unwrap();
    let response = parse_search_response(&read_fixture("search/all-skipped.json")).unwrap();

    let summary = write_report(Some(&response), "Leeds", &codes(&["62020"]), dir.path()).unwrap();

    assert_eq!(summary.stats.outcome, ReportOutcome::AllSkipped);
    assert_eq!(summary.stats.processed, 0);
    assert_eq!(summary.stats.skipped, 2);
    assert_eq!(
        fs::read_to_string(&summary.path).unwrap(),
        "No companies with complete address data found for location 'Leeds' and SIC code(s) '62020'.\n\
         Total records received: 2, Total skipped: 2\n"
    );
}

#[test]
fn absent_response_still_writes_file() {
    let dir = tempfile::tempdir().unwrap();

    let summary = write_report(None, "Leeds", &codes(&["62020"]), dir.path()).unwrap();

    assert_eq!(summary.stats.outcome, ReportOutcome::NoData);
    assert!(summary.path.exists());
}

#[test]
fn overwrites_previous_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Leeds_62020.txt");
    fs::write(&path, "stale contents that are much longer than the new report\n").unwrap();

    write_report(None, "Leeds", &codes(&["62020"]), dir.path()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("No company data found"));
    assert!(!written.contains("stale"));
}

#[test]
fn missing_directory_is_a_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let err = write_report(None, "Leeds", &codes(&["62020"]), &missing).unwrap_err();

    match err {
        chkit::ChError::FileWrite { path, .. } => {
            assert_eq!(path, missing.join("Leeds_62020.txt"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn writes_blocks_despite_odd_unused_fields() {
    let dir = tempfile::tempdir().unwrap();
    let response = parse_search_response(&read_fixture("search/odd-types.json")).unwrap();

    let summary = write_report(Some(&response), "Leeds", &codes(&["62020"]), dir.path()).unwrap();

    assert_eq!(summary.stats.outcome, ReportOutcome::Written);
    assert_eq!(summary.stats.processed, 2);
    assert_eq!(summary.stats.skipped, 0);
    assert_eq!(
        fs::read_to_string(&summary.path).unwrap(),
        "STRING SIC LTD\n7 Boar Lane\nLeeds\nLS1 6EN\n----\nPO BOX LTD\n\n\n\n----"
    );
}
