use std::fs;

use hotel_booking::{
    booking::{Room, RoomClass},
    config::{Config, ConfigManager, SeedReservation},
    errors::BookingError,
};
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let config = manager.load().expect("load defaults");

    assert_eq!(config, Config::default());
    assert_eq!(config.currency, "HUF");
    assert!(config.enforce_future_dates);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut config = Config::default();
    config.currency = "EUR".into();
    config.hotel.name = "Lakeside".into();
    config.hotel.rooms = vec![Room::double(120, 12)];
    config.seed_reservations = vec![SeedReservation {
        class: RoomClass::Double,
        date: chrono::NaiveDate::from_ymd_opt(2030, 1, 2).unwrap(),
    }];

    manager.save(&config).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, config);
    assert!(manager.path().ends_with("config/config.json"));
}

#[test]
fn partial_file_falls_back_to_field_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.path(), r#"{ "locale": "en-US", "currency": "USD" }"#).expect("write");

    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.hotel, Config::default().hotel);
    assert_eq!(loaded.seed_reservations.len(), 5);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.path(), "{ not json").expect("write");

    let err = manager.load().unwrap_err();
    assert!(matches!(err, BookingError::Config(_)));
}

#[test]
fn room_class_is_stored_lowercase() {
    let json = serde_json::to_string(&Room::single(5000, 101)).expect("serialize");
    assert_eq!(json, r#"{"class":"single","number":101,"price":5000}"#);
}
