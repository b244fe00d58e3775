//! Core library for the `hamwx` weather and HF propagation display.
//!
//! This crate defines:
//! - Settings persistence
//! - Clients for OpenWeather (geocoding, one call, icons) and HamQSL (solar data)
//! - Offline US state lookup
//! - Normalization of raw payloads into display records, and their text form
//! - The refresh pipeline and the last-known-good dashboard state
//!
//! It is used by `hamwx-cli`, but any front end can consume [`pipeline::refresh`].

pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod normalize;
pub mod payload;
pub mod pipeline;
pub mod provider;
pub mod state;

pub use config::{ConfigStore, Settings, UnitSystem};
pub use error::{DataSource, WxError};
pub use model::{
    Alert, BandCondition, BandQuality, CurrentConditions, ForecastDay, Location, SolarReport,
    TimeOfDay, WeatherReport,
};
pub use pipeline::{Dashboard, Refresh, Warning, refresh};
pub use provider::{SolarProvider, WeatherProvider};
pub use state::{GeoNamesStates, StateResolver, UsState};
