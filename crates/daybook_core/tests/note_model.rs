use daybook_core::{day_key, Note};

#[test]
fn day_key_is_deterministic_for_storage_format_input() {
    for _ in 0..3 {
        assert_eq!(day_key("02-01-2024 10:00:00"), "02-01-2024");
    }
    assert_eq!(day_key("29-02-2024 00:00:00"), "29-02-2024");
}

#[test]
fn day_key_rejects_invalid_calendar_dates() {
    // Right shape, impossible date.
    assert_eq!(day_key("32-01-2024 10:00:00"), "");
    assert_eq!(day_key("29-02-2023 10:00:00"), "");
}

#[test]
fn note_serializes_with_stable_field_names() {
    let mut note = Note::placeholder();
    note.id = 3;
    note.title = "Trip".to_string();
    note.image_uri = Some("content://media/7".to_string());
    note.date_updated = "02-01-2024 10:00:00".to_string();

    let value = serde_json::to_value(&note).unwrap();
    assert_eq!(value["id"], 3);
    assert_eq!(value["title"], "Trip");
    assert_eq!(value["image_uri"], "content://media/7");
    assert_eq!(value["date_updated"], "02-01-2024 10:00:00");

    let back: Note = serde_json::from_value(value).unwrap();
    assert_eq!(back, note);
}

#[test]
fn note_without_image_round_trips_through_json() {
    let mut note = Note::placeholder();
    note.id = 1;
    note.note = "body".to_string();

    let text = serde_json::to_string(&note).unwrap();
    let back: Note = serde_json::from_str(&text).unwrap();
    assert_eq!(back.image_uri, None);
    assert_eq!(back, note);
}
