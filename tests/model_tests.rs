//! Tests for the model layer: keys, chords, geometry and the shortcut configuration.

use wincenter::error::{ChordParseError, ChordValidationError};
use wincenter::model::*;

fn chord(s: &str) -> KeyChord {
    s.parse().unwrap()
}

// === Key Tests ===

#[test]
fn key_names_parse_case_insensitively() {
    assert_eq!("f11".parse::<Key>(), Ok(Key::F11));
    assert_eq!("NUMPAD5".parse::<Key>(), Ok(Key::Numpad5));
    assert_eq!(" Home ".parse::<Key>(), Ok(Key::Home));
}

#[test]
fn key_aliases() {
    assert_eq!("Esc".parse::<Key>(), Ok(Key::Escape));
    assert_eq!("return".parse::<Key>(), Ok(Key::Enter));
    assert_eq!("PgDn".parse::<Key>(), Ok(Key::PageDown));
    assert_eq!("D7".parse::<Key>(), Ok(Key::Digit7));
}

#[test]
fn unknown_key_reports_token() {
    assert_eq!(
        "Hyper".parse::<Key>(),
        Err(ChordParseError::UnknownKey("Hyper".to_string()))
    );
}

#[test]
fn every_key_maps_back_from_its_vk() {
    for key in Key::ALL {
        assert_eq!(Key::from_vk(key.vk()), Some(*key), "{key}");
    }
}

#[test]
fn modifier_vks_are_not_keys() {
    for vk in [0x10, 0x11, 0x12, 0x5B, 0x5C, 0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5] {
        assert_eq!(Key::from_vk(vk), None);
        assert!(modifier_from_vk(vk).is_some());
    }
}

#[test]
fn sided_modifier_codes() {
    assert_eq!(modifier_from_vk(0xA3), Some((ModifierKey::Ctrl, Side::Right)));
    assert_eq!(modifier_from_vk(0x5B), Some((ModifierKey::Meta, Side::Left)));
    assert_eq!(modifier_from_vk(0x43), None);
}

// === Chord Tests ===

#[test]
fn default_chords_display() {
    assert_eq!(DEFAULT_CENTER_KEY1.to_string(), "Ctrl+Alt+C");
    assert_eq!(DEFAULT_CENTER_KEY2.to_string(), "Ctrl+Shift+F11");
    assert_eq!(DEFAULT_CENTER_KEY3.to_string(), "Alt+F10");
}

#[test]
fn chord_display_is_canonical_regardless_of_input_order() {
    assert_eq!(chord("shift+win+alt+ctrl+end").to_string(), "Ctrl+Alt+Shift+Win+End");
    assert_eq!(chord("F11 + Shift + Control"), DEFAULT_CENTER_KEY2);
}

#[test]
fn meta_aliases_agree() {
    assert_eq!(chord("Win+M"), chord("Meta+M"));
    assert_eq!(chord("Super+M"), chord("windows+m"));
    assert!(chord("Win+M").modifiers().meta);
}

#[test]
fn chord_parse_errors() {
    assert_eq!("   ".parse::<KeyChord>(), Err(ChordParseError::Empty));
    assert_eq!("Ctrl+".parse::<KeyChord>(), Err(ChordParseError::EmptySegment));
    assert_eq!("Shift".parse::<KeyChord>(), Err(ChordParseError::MissingKey));
    assert_eq!(
        "Ctrl+Blorp".parse::<KeyChord>(),
        Err(ChordParseError::UnknownKey("Blorp".to_string()))
    );
    assert_eq!(
        "Alt+A+B".parse::<KeyChord>(),
        Err(ChordParseError::MultipleKeys("B".to_string()))
    );
}

#[test]
fn chords_differing_only_by_modifier_are_distinct() {
    assert_ne!(chord("Ctrl+Alt+C"), chord("Ctrl+Alt+Shift+C"));
    assert_ne!(chord("Ctrl+C"), chord("Alt+C"));
}

#[test]
fn validation_requires_a_modifier() {
    let bare = chord("C");
    assert_eq!(bare.validate(), Err(ChordValidationError::NoModifier(bare)));
    assert!(chord("Shift+C").validate().is_ok());
}

// === Configuration Tests ===

#[test]
fn configuration_defaults_in_priority_order() {
    let config = ShortcutConfiguration::default();
    assert_eq!(
        config.chords(),
        [DEFAULT_CENTER_KEY1, DEFAULT_CENTER_KEY2, DEFAULT_CENTER_KEY3]
    );
}

#[test]
fn configuration_json_uses_display_strings() {
    let json = serde_json::to_value(ShortcutConfiguration::default()).unwrap();
    assert_eq!(json["center_window_key1"], "Ctrl+Alt+C");
    assert_eq!(json["center_window_key2"], "Ctrl+Shift+F11");
    assert_eq!(json["center_window_key3"], "Alt+F10");
}

#[test]
fn configuration_accepts_loose_spelling() {
    let config: ShortcutConfiguration = serde_json::from_str(
        r#"{
            "center_window_key1": "alt + ctrl + numpad5",
            "center_window_key2": "Win+Home",
            "center_window_key3": "Shift+Ctrl+F11"
        }"#,
    )
    .unwrap();
    assert_eq!(config.center_window_key1, chord("Ctrl+Alt+Numpad5"));
    assert_eq!(config.center_window_key2, chord("Win+Home"));
    assert_eq!(config.center_window_key3, DEFAULT_CENTER_KEY2);
}

#[test]
fn configuration_rejects_unparseable_chord() {
    let parsed = serde_json::from_str::<ShortcutConfiguration>(
        r#"{ "center_window_key1": "Ctrl+Alt+Nope" }"#,
    );
    assert!(parsed.is_err());
}

#[test]
fn empty_object_is_all_defaults() {
    let config: ShortcutConfiguration = serde_json::from_str("{}").unwrap();
    assert_eq!(config, ShortcutConfiguration::default());
}

#[test]
fn validate_only_touches_invalid_slots() {
    let mut config = ShortcutConfiguration {
        center_window_key1: chord("Ctrl+Shift+Home"),
        center_window_key2: chord("F2"),
        center_window_key3: chord("Escape"),
    };
    assert!(config.validate());
    assert_eq!(config.center_window_key1, chord("Ctrl+Shift+Home"));
    assert_eq!(config.center_window_key2, DEFAULT_CENTER_KEY2);
    assert_eq!(config.center_window_key3, DEFAULT_CENTER_KEY3);
    assert!(!config.validate());
}

// === Geometry Tests ===

#[test]
fn centering_examples() {
    let work = WorkArea::new(0, 0, 1920, 1040);
    assert_eq!(centered_origin(&work, 800, 600), (560, 220));
    assert_eq!(centered_origin(&work, 1920, 1040), (0, 0));
    assert_eq!(centered_origin(&work, 1926, 1046), (-3, -3));
}

#[test]
fn centered_window_keeps_its_size() {
    let work = WorkArea::new(1920, 0, 3840, 1160);
    let before = Rect::new(2000, 900, 333, 201);
    let after = centered_in(&work, &before);
    assert_eq!((after.width, after.height), (333, 201));
    assert_eq!((after.left, after.top), (1920 + 793, 479));
    assert!(work.contains(&after));
}

#[test]
fn containment_includes_edges() {
    let work = WorkArea::new(0, 0, 100, 100);
    assert!(work.contains(&Rect::new(0, 0, 100, 100)));
    assert!(!work.contains(&Rect::new(1, 0, 100, 100)));
    assert!(!work.contains(&Rect::new(-1, 0, 10, 10)));
}
