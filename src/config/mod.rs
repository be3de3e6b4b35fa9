//! Persistent settings: hotel catalog, seed bookings, and display preferences.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    booking::{BookingLedger, Hotel, Room, RoomClass},
    currency::CurrencyCode,
    errors::{BookingError, Result},
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    /// Reject bookings for today or earlier before they reach the ledger.
    #[serde(default = "Config::default_enforce_future_dates")]
    pub enforce_future_dates: bool,
    #[serde(default)]
    pub hotel: HotelConfig,
    #[serde(default = "Config::default_seed_reservations")]
    pub seed_reservations: Vec<SeedReservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HotelConfig {
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            name: "GDE Hotel".into(),
            rooms: vec![
                Room::single(5000, 101),
                Room::single(5000, 102),
                Room::double(8000, 201),
            ],
        }
    }
}

/// A booking replayed into the ledger at startup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedReservation {
    pub class: RoomClass,
    pub date: NaiveDate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "hu-HU".into(),
            currency: "HUF".into(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            enforce_future_dates: Self::default_enforce_future_dates(),
            hotel: HotelConfig::default(),
            seed_reservations: Self::default_seed_reservations(),
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_enforce_future_dates() -> bool {
        true
    }

    pub fn default_seed_reservations() -> Vec<SeedReservation> {
        [
            (RoomClass::Single, 1),
            (RoomClass::Single, 2),
            (RoomClass::Single, 1),
            (RoomClass::Double, 3),
            (RoomClass::Double, 4),
        ]
        .into_iter()
        .filter_map(|(class, day)| {
            NaiveDate::from_ymd_opt(2024, 6, day).map(|date| SeedReservation { class, date })
        })
        .collect()
    }

    pub fn currency_code(&self) -> CurrencyCode {
        CurrencyCode::new(self.currency.as_str())
    }

    /// Checks the catalog before it is handed to a ledger.
    pub fn validate(&self) -> Result<()> {
        if self.hotel.name.trim().is_empty() {
            return Err(BookingError::Config("hotel name must not be empty".into()));
        }
        if let Some(room) = self.hotel.rooms.iter().find(|room| room.price == 0) {
            return Err(BookingError::Config(format!(
                "room {} must have a positive price",
                room.number
            )));
        }
        Ok(())
    }

    pub fn build_hotel(&self) -> Hotel {
        let mut hotel = Hotel::new(self.hotel.name.trim());
        for room in &self.hotel.rooms {
            hotel.add_room(*room);
        }
        hotel
    }

    /// Books every seed reservation, returning the ones no room was free for.
    pub fn apply_seed_reservations(&self, ledger: &mut BookingLedger) -> Vec<SeedReservation> {
        self.seed_reservations
            .iter()
            .filter(|seed| ledger.book_room(seed.class, seed.date).is_none())
            .copied()
            .collect()
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(paths::config_dir_in(&base))?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: Config = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
