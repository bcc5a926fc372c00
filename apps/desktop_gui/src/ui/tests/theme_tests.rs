use super::*;

#[test]
fn partial_settings_fill_in_defaults() {
    let settings = PersistedGuiSettings::from_json(r#"{"theme_preset":"dark"}"#)
        .expect("settings");
    assert_eq!(settings.theme_preset, ThemePreset::Dark);
    assert_eq!(settings.text_scale, 1.0);
}

#[test]
fn text_scale_is_clamped_on_load_and_step() {
    let settings =
        PersistedGuiSettings::from_json(r#"{"text_scale":3.5}"#).expect("settings");
    assert_eq!(settings.text_scale, MAX_TEXT_SCALE);

    let smaller = PersistedGuiSettings::default().scaled_by(-10.0);
    assert_eq!(smaller.text_scale, MIN_TEXT_SCALE);
}

#[test]
fn garbage_settings_are_ignored() {
    assert_eq!(PersistedGuiSettings::from_json("not json"), None);
}
