//! Building, saving and querying a phonetic index end to end

use taphone_core::persistence::{load_from_disk, save_to_disk};
use taphone_core::{KeyLevel, PhoneError, PhoneticIndex, TaPhone};

fn sample_index(phone: &TaPhone) -> PhoneticIndex {
    let mut index = PhoneticIndex::new();
    for word in ["காலம்", "கலம்", "நிலம்", "நீலம்", "பச்சை", "பச்சை", "english"] {
        index.insert(phone, word);
    }
    index
}

#[test]
fn test_dedup_and_lookup() {
    let phone = TaPhone::new();
    let index = sample_index(&phone);
    assert_eq!(index.len(), 5);
    assert_eq!(index.lookup(&phone, "காலம்", KeyLevel::Key2), vec!["காலம்"]);
    assert_eq!(index.lookup(&phone, "காலம்", KeyLevel::Key0), vec!["காலம்", "கலம்"]);
    assert_eq!(index.lookup_key("PCH", KeyLevel::Key1), vec!["பச்சை"]);
    assert!(index.lookup_key("", KeyLevel::Key0).is_empty());
}

#[test]
fn test_reloaded_index_matches_saved() {
    let phone = TaPhone::new();
    let index = sample_index(&phone);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tamil.idx");

    save_to_disk(&index, &path).unwrap();
    // Saving again replaces the file in place.
    save_to_disk(&index, &path).unwrap();
    let loaded = load_from_disk(&path).unwrap();

    assert_eq!(loaded.words().collect::<Vec<_>>(), index.words().collect::<Vec<_>>());
    for level in KeyLevel::ALL {
        assert_eq!(loaded.groups(level, 2), index.groups(level, 2));
    }
}

#[test]
fn test_garbage_file_is_codec_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.idx");
    std::fs::write(&path, b"\x01").unwrap();
    assert!(matches!(load_from_disk(&path), Err(PhoneError::Codec(_))));
}
