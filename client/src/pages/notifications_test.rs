use super::*;

#[test]
fn records_heading_counts_records() {
    assert_eq!(records_heading(0, 0, false), "0 records");
    assert_eq!(records_heading(1, 1, false), "1 record");
    assert_eq!(records_heading(12, 12, false), "12 records");
}

#[test]
fn records_heading_shows_filtered_share() {
    assert_eq!(records_heading(12, 3, true), "3 of 12 records");
    assert_eq!(records_heading(12, 12, true), "12 records");
}

#[test]
fn restored_page_size_rejects_unsupported_values() {
    assert_eq!(restored_page_size(Some(20)), PageSize::Twenty);
    assert_eq!(restored_page_size(Some(7)), PageSize::Ten);
    assert_eq!(restored_page_size(None), PageSize::Ten);
}
