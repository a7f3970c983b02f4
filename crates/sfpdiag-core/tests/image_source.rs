use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use sfpdiag_core::{
    A0_DEVICE, A2_DEVICE, ImageFileSource, InspectError, SourceError, inspect_image_file,
    read_block,
};

fn temp_path(name: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("sfpdiag_{name}_{unique}.bin"))
}

#[test]
fn image_source_serves_both_devices() {
    let path = temp_path("full");
    let mut bytes = vec![0x11u8; 256];
    bytes.extend(vec![0x22u8; 256]);
    fs::write(&path, &bytes).unwrap();

    let mut source = ImageFileSource::open(&path).unwrap();
    let _ = fs::remove_file(&path);

    assert_eq!(read_block(&mut source, A0_DEVICE, 0, 128).unwrap(), vec![0x11; 128]);
    assert_eq!(read_block(&mut source, A2_DEVICE, 128, 128).unwrap(), vec![0x22; 128]);
}

#[test]
fn missing_image_is_io_error() {
    let path = temp_path("missing");
    let err = ImageFileSource::open(&path).unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn truncated_image_is_rejected() {
    let path = temp_path("truncated");
    fs::write(&path, [0x03, 0x04, 0x07]).unwrap();
    let err = match ImageFileSource::open(&path) {
        Ok(_) => panic!("expected truncated image to be rejected"),
        Err(err) => err,
    };
    let _ = fs::remove_file(&path);

    assert!(matches!(err, SourceError::InvalidImage { len: 3 }));
}

#[test]
fn identity_only_image_has_no_a2_device() {
    let path = temp_path("identity");
    fs::write(&path, vec![0u8; 256]).unwrap();
    let mut source = ImageFileSource::open(&path).unwrap();
    let _ = fs::remove_file(&path);

    let err = read_block(&mut source, A2_DEVICE, 0, 1).unwrap_err();
    assert!(matches!(err, SourceError::UnknownDevice(A2_DEVICE)));
}

#[test]
fn inspect_image_file_propagates_source_errors() {
    let path = temp_path("inspect_truncated");
    fs::write(&path, vec![0u8; 100]).unwrap();
    let err = inspect_image_file(&path).unwrap_err();
    let _ = fs::remove_file(&path);

    assert!(matches!(
        err,
        InspectError::Source(SourceError::InvalidImage { len: 100 })
    ));
}
