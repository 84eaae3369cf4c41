use super::*;

use crate::error::Error;

fn sample_snapshot() -> ZoneSnapshot {
    let mut snapshot = ZoneSnapshot::default();
    snapshot.push("@", RecordKind::A, 300, "203.0.113.1".to_string());
    snapshot.push("@", RecordKind::NS, 3600, "ns1.example.com.".to_string());
    snapshot.push("www", RecordKind::A, 300, "1.2.3.4".to_string());
    snapshot.push("www", RecordKind::A, 300, "1.2.3.5".to_string());
    snapshot.push("mail", RecordKind::MX, 600, "10 mx.example.com.".to_string());
    snapshot
}

#[test]
fn test_filter_parse_keeps_order_and_dedups() {
    let filter = RecordTypeFilter::parse(["TXT", "a", "AAAA", "A"]).unwrap();
    assert_eq!(
        filter.kinds(),
        &[RecordKind::TXT, RecordKind::A, RecordKind::AAAA]
    );
    assert_eq!(filter.len(), 3);
}

#[test]
fn test_filter_parse_rejects_unsupported_type() {
    let err = RecordTypeFilter::parse(["A", "SOA"]).unwrap_err();
    match err {
        Error::UnsupportedRecordType(t) => assert_eq!(t, "SOA"),
        other => panic!("expected UnsupportedRecordType, got {:?}", other),
    }
}

#[test]
fn test_qualify_trailing_dot_convention() {
    assert_eq!(qualify("host", "example.com"), "host.example.com.");
    assert_eq!(qualify("host", "example.com."), "host.example.com.");
}

#[test]
fn test_snapshot_push_suppresses_duplicates() {
    let mut snapshot = ZoneSnapshot::default();
    snapshot.push("www", RecordKind::A, 300, "1.2.3.4".to_string());
    snapshot.push("www", RecordKind::A, 300, "1.2.3.4".to_string());
    let set = snapshot.get("www", RecordKind::A).unwrap();
    assert_eq!(set.values, vec!["1.2.3.4".to_string()]);
}

#[test]
fn test_snapshot_push_last_ttl_wins() {
    let mut snapshot = ZoneSnapshot::default();
    snapshot.push("www", RecordKind::A, 300, "1.2.3.4".to_string());
    snapshot.push("www", RecordKind::A, 600, "1.2.3.5".to_string());
    let set = snapshot.get("www", RecordKind::A).unwrap();
    assert_eq!(set.ttl, 600);
    assert_eq!(set.values.len(), 2);
}

#[test]
fn test_aggregate_skips_apex() {
    let snapshot = sample_snapshot();
    let filter = RecordTypeFilter::parse(["A"]).unwrap();

    let aggregated = aggregate(&snapshot, "example.com", &filter).unwrap();
    assert_eq!(aggregated.len(), 1);
    let set = aggregated.get("www.example.com.", RecordKind::A).unwrap();
    assert_eq!(set.ttl, 300);
    assert_eq!(set.values, vec!["1.2.3.4".to_string(), "1.2.3.5".to_string()]);
    assert!(aggregated.get("@.example.com.", RecordKind::A).is_none());
}

#[test]
fn test_aggregate_one_key_per_name_and_type() {
    let snapshot = sample_snapshot();
    let filter = RecordTypeFilter::parse(["A", "MX", "NS"]).unwrap();

    let aggregated = aggregate(&snapshot, "example.com", &filter).unwrap();
    // www/A and mail/MX; the NS rdataset lives at the apex and is skipped.
    assert_eq!(aggregated.len(), 2);
    assert!(aggregated.get("mail.example.com.", RecordKind::MX).is_some());
}

#[test]
fn test_aggregate_empty_snapshot() {
    let snapshot = ZoneSnapshot::default();
    let filter = RecordTypeFilter::parse(["A"]).unwrap();

    let err = aggregate(&snapshot, "example.com", &filter).unwrap_err();
    assert!(matches!(err, Error::EmptyZone(domain) if domain == "example.com"));
}

#[test]
fn test_aggregate_no_matching_records() {
    let mut snapshot = ZoneSnapshot::default();
    snapshot.push("sub", RecordKind::NS, 3600, "ns1.example.com.".to_string());
    let filter = RecordTypeFilter::parse(["A"]).unwrap();

    let err = aggregate(&snapshot, "example.com", &filter).unwrap_err();
    assert!(matches!(err, Error::NoMatchingRecords(domain) if domain == "example.com"));
}

#[test]
fn test_aggregate_touched_owner_is_not_empty_zone() {
    // A zone whose only rdatasets are of unsupported types still counts as
    // non-empty: the fetcher touched the owner names.
    let mut snapshot = ZoneSnapshot::default();
    snapshot.touch("@");
    let filter = RecordTypeFilter::parse(["A"]).unwrap();

    let err = aggregate(&snapshot, "example.com", &filter).unwrap_err();
    assert!(matches!(err, Error::NoMatchingRecords(_)));
}
