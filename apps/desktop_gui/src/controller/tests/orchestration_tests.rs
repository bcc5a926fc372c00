use super::*;
use crate::controller::events::UiErrorCategory;
use shared::domain::{Rating, RatingField, TextField};
use storage::MemoryStore;

#[test]
fn queued_messages_apply_in_order_and_report_status() {
    let mut form = FormController::new();
    let mut store = RecordStore::open(MemoryStore::new());
    let mut status = String::new();
    let mut queue = vec![
        FormMessage::SetText {
            field: TextField::FirstName,
            value: "Ann".to_string(),
        },
        FormMessage::SetRating {
            field: RatingField::Registration,
            rating: Rating::new(2).expect("rating"),
        },
        FormMessage::Submit,
    ];

    dispatch_queued(&mut form, &mut store, &mut queue, &mut status).expect("dispatch");

    assert!(queue.is_empty());
    assert_eq!(store.len(), 1);
    assert_eq!(status, "Feedback submitted as record 1");
}

#[test]
fn stale_index_is_classified_and_stops_the_queue() {
    let mut form = FormController::new();
    let mut store = RecordStore::open(MemoryStore::new());
    let mut status = "idle".to_string();
    let mut queue = vec![
        FormMessage::Delete(0),
        FormMessage::SetText {
            field: TextField::Email,
            value: "late@example.com".to_string(),
        },
    ];

    let err = dispatch_queued(&mut form, &mut store, &mut queue, &mut status)
        .expect_err("nothing to delete");

    assert_eq!(err.category(), UiErrorCategory::StaleSelection);
    assert!(queue.is_empty());
    assert_eq!(form.draft().email, "");
    assert_eq!(status, "idle");
}

#[test]
fn delete_status_names_the_record() {
    let mut form = FormController::new();
    let mut store = RecordStore::open(MemoryStore::new());
    let mut status = String::new();
    form.set_field("firstName", "Bob").expect("set");
    form.set_field("lastName", "Ray").expect("set");
    form.submit(&mut store).expect("submit");

    dispatch_form_message(&mut form, &mut store, FormMessage::Delete(0), &mut status)
        .expect("delete");
    assert_eq!(status, "Deleted record 1 (Bob Ray)");
}
