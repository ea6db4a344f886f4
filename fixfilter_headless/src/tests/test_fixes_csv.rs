use crate::fixes_csv::{read_fixes, read_fixes_from_file};
use common::test_helper::fixes::{GPS, NETWORK, fix_at_position};
use std::io::ErrorKind;
use std::path::PathBuf;

#[test]
fn read_sample_drive() {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../assets/fixes/sample_drive.csv");
    let fixes = read_fixes_from_file(&path)
        .unwrap_or_else(|e| panic!("Failed to read sample drive. Error: {e}"));
    assert_eq!(fixes.len(), 7);
    assert_eq!(
        fixes[0],
        fix_at_position(0, 35.0, NETWORK, 52.026649, 11.282535)
    );
    assert_eq!(
        fixes[6],
        fix_at_position(160_000, 900.0, NETWORK, 52.027044, 11.280543)
    );
}

#[test]
fn read_single_record() {
    let csv = "timestamp_ms,latitude,longitude,accuracy,provider\n1500,1.5,2.5,4.0,gps\n";
    let fixes = read_fixes(csv.as_bytes()).unwrap();
    assert_eq!(fixes, vec![fix_at_position(1_500, 4.0, GPS, 1.5, 2.5)]);
}

#[test]
fn negative_accuracy_is_rejected() {
    let csv = "timestamp_ms,latitude,longitude,accuracy,provider\n0,1.0,2.0,-4.0,gps\n";
    let err = read_fixes(csv.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(err.to_string().starts_with("Row 1:"));
}

#[test]
fn malformed_record_is_rejected() {
    let csv = "timestamp_ms,latitude,longitude,accuracy,provider\n0,1.0,2.0,4.0,gps\nnow,1.0,2.0,4.0,gps\n";
    let err = read_fixes(csv.as_bytes()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert!(err.to_string().starts_with("Row 2:"));
}
