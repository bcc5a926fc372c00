use shared::domain::{FeedbackRecord, Rating, ReferralSource};
use storage::{backup_key, JsonFileStore, KeyValueStore, RecordStore, STORAGE_KEY};

fn sample(first_name: &str, rating: u8) -> FeedbackRecord {
    FeedbackRecord {
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_ascii_lowercase()),
        phone: "555-0100".to_string(),
        source: ReferralSource::Friend,
        feedback: format!("feedback from {first_name}"),
        registration_rating: Rating::new(rating),
        navigation_rating: None,
        ..FeedbackRecord::default()
    }
}

#[test]
fn records_written_through_survive_a_process_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("local_storage.json");

    let appended = vec![sample("Ann", 1), sample("Bob", 3), sample("Cleo", 5)];
    {
        let backend = JsonFileStore::open(&path).expect("open");
        let mut store = RecordStore::open(backend);
        for record in &appended {
            store.append(record.clone()).expect("append");
        }
        store.replace_at(1, sample("Bea", 4)).expect("replace");
        store.remove_at(0).expect("remove");
    }

    let backend = JsonFileStore::open(&path).expect("reopen");
    let store = RecordStore::open(backend);
    assert_eq!(store.records(), &[sample("Bea", 4), sample("Cleo", 5)]);
}

#[test]
fn loads_the_array_a_browser_session_left_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("local_storage.json");

    let browser_value = r#"[{"firstName":"Ann","lastName":"","email":"","phone":"","source":"internet","feedback":"ok","registrationRating":4,"navigationRating":""}]"#;
    {
        let mut backend = JsonFileStore::open(&path).expect("open");
        backend
            .set_string(STORAGE_KEY, browser_value)
            .expect("seed browser value");
    }

    let store = RecordStore::open(JsonFileStore::open(&path).expect("reopen"));
    assert_eq!(store.len(), 1);
    let record = &store.records()[0];
    assert_eq!(record.first_name, "Ann");
    assert_eq!(record.source, ReferralSource::Internet);
    assert_eq!(record.registration_rating, Rating::new(4));
    assert_eq!(record.navigation_rating, None);

    let persisted = store
        .backend()
        .get_string(STORAGE_KEY)
        .expect("read")
        .expect("value present");
    let value: serde_json::Value = serde_json::from_str(&persisted).expect("json");
    assert!(value.is_array());
}

#[test]
fn browser_array_with_empty_slots_keeps_its_records_across_a_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("local_storage.json");

    // A browser edit that outlived its row leaves `null` holes behind.
    let browser_value =
        r#"[{"firstName":"Ann"},null,{"firstName":"Cleo","registrationRating":3}]"#;
    {
        let mut backend = JsonFileStore::open(&path).expect("open");
        backend
            .set_string(STORAGE_KEY, browser_value)
            .expect("seed browser value");
    }

    {
        let mut store = RecordStore::open(JsonFileStore::open(&path).expect("reopen"));
        assert_eq!(store.len(), 2);
        store.append(sample("New", 5)).expect("append");
    }

    let store = RecordStore::open(JsonFileStore::open(&path).expect("reopen after write"));
    let names: Vec<_> = store
        .records()
        .iter()
        .map(|record| record.first_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ann", "Cleo", "New"]);
    assert_eq!(store.records()[1].registration_rating, Rating::new(3));
}

#[test]
fn unreadable_browser_value_survives_the_first_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("local_storage.json");
    {
        let mut backend = JsonFileStore::open(&path).expect("open");
        backend
            .set_string(STORAGE_KEY, "[{\"firstName\":\"Ann\"")
            .expect("seed truncated value");
    }

    {
        let mut store = RecordStore::open(JsonFileStore::open(&path).expect("reopen"));
        assert!(store.is_empty());
        store.append(sample("New", 2)).expect("append");
    }

    let backend = JsonFileStore::open(&path).expect("reopen after write");
    assert_eq!(
        backend
            .get_string(&backup_key(STORAGE_KEY))
            .expect("read backup")
            .as_deref(),
        Some("[{\"firstName\":\"Ann\"")
    );
}
