//! Demo module: four fixed operations under `/some-data`.
//!
//! - `GET  /some-data/get-name?index=<int>`: name lookup by index
//! - `GET  /some-data/get-country?prefix=<text>`: prefix + `"landia"`
//! - `GET  /some-data/get-planet`: placeholder planet
//! - `POST /some-data/get-planet-r`: radius (diameter / 2) of the posted planet
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod domain;
pub mod module;

pub use domain::model::{Planet, Satellite};
pub use domain::service::SomeDataService;
pub use module::SomeDataModule;

/// Config section name under `modules.<name>.config`
pub const MODULE_NAME: &str = "some_data";
