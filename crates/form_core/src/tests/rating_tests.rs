use super::*;

#[test]
fn hovered_icon_lights_alone() {
    for index in 0..RATING_FACES.len() {
        let expected = if index == 2 {
            IconHighlight::Hovered
        } else {
            IconHighlight::Idle
        };
        assert_eq!(icon_highlight(index, Some(2), None), expected);
    }
}

#[test]
fn selected_icon_stays_lit_while_another_is_hovered() {
    let selected = Rating::new(4);
    assert_eq!(icon_highlight(3, Some(0), selected), IconHighlight::Selected);
    assert_eq!(icon_highlight(0, Some(0), selected), IconHighlight::Hovered);
    assert_eq!(icon_highlight(1, Some(0), selected), IconHighlight::Idle);
    assert_eq!(icon_highlight(2, Some(0), selected), IconHighlight::Idle);
}

#[test]
fn hover_wins_over_selection_on_the_same_icon() {
    assert_eq!(
        icon_highlight(1, Some(1), Rating::new(2)),
        IconHighlight::Hovered
    );
}

#[test]
fn picker_colours_only_lit_icons() {
    let mut picker = RatingPickerState::default();
    picker.set_hovered(Some(4));

    assert_eq!(picker.color(4, None), Some([0x0e, 0xc1, 0x2f]));
    assert_eq!(picker.color(0, Rating::new(1)), Some([0xef, 0x46, 0x23]));
    assert_eq!(picker.color(2, Rating::new(1)), None);
    assert_eq!(picker.color(9, None), None);
}

#[test]
fn hover_outside_the_row_is_ignored() {
    let mut picker = RatingPickerState::default();
    picker.set_hovered(Some(7));
    assert_eq!(picker.hovered(), None);
}

#[test]
fn clicking_an_icon_emits_its_one_based_rating() {
    let picker = RatingPickerState::default();
    assert_eq!(
        picker.click(RatingField::Registration, 0),
        Some(FormMessage::SetRating {
            field: RatingField::Registration,
            rating: Rating::new(1).expect("rating"),
        })
    );
    assert_eq!(
        picker.click(RatingField::Navigation, 4),
        Some(FormMessage::SetRating {
            field: RatingField::Navigation,
            rating: Rating::new(5).expect("rating"),
        })
    );
    assert_eq!(picker.click(RatingField::Navigation, 5), None);
}
