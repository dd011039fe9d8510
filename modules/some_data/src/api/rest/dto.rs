use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::model::{Planet, Satellite};

/// REST DTO for a planet
///
/// Every field is optional on input; capitalized names (`Name`, `Diameter`, ...) are accepted too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
#[schema(as = Planet)]
pub struct PlanetDto {
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Mass")]
    pub mass: f64,
    #[serde(alias = "Diameter")]
    pub diameter: f64,
    #[serde(alias = "Satellites")]
    pub satellites: Vec<SatelliteDto>,
}

/// REST DTO for a natural satellite
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
#[schema(as = Satellite)]
pub struct SatelliteDto {
    #[serde(alias = "Name")]
    pub name: String,
}

/// Query of `get-name`; a missing index is treated as `0`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct NameQuery {
    pub index: i32,
}

/// Query of `get-country`; `prefix` is required
#[derive(Debug, Clone, Deserialize)]
pub struct CountryQuery {
    pub prefix: String,
}

// Conversion implementations between REST DTOs and domain models
impl From<Planet> for PlanetDto {
    fn from(planet: Planet) -> Self {
        Self {
            name: planet.name,
            mass: planet.mass,
            diameter: planet.diameter,
            satellites: planet.satellites.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<PlanetDto> for Planet {
    fn from(dto: PlanetDto) -> Self {
        Self {
            name: dto.name,
            mass: dto.mass,
            diameter: dto.diameter,
            satellites: dto.satellites.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Satellite> for SatelliteDto {
    fn from(satellite: Satellite) -> Self {
        Self {
            name: satellite.name,
        }
    }
}

impl From<SatelliteDto> for Satellite {
    fn from(dto: SatelliteDto) -> Self {
        Self { name: dto.name }
    }
}
