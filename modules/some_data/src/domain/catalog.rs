//! Immutable lookup data behind the service operations.

use super::model::{Planet, Satellite};

/// Name table: each entry maps a set of indices to a name, first match wins.
pub const NAME_TABLE: &[(&[i32], &str)] = &[
    (&[0], "Qwerty"),
    (&[1], "Asdf"),
    (&[2, 3], "Zxcvbnm"),
];

/// Returned for every index not present in [`NAME_TABLE`]
pub const FALLBACK_NAME: &str = "Zero";

pub const COUNTRY_SUFFIX: &str = "landia";

pub const PLACEHOLDER_PLANET_NAME: &str = "Jupiter";
pub const PLACEHOLDER_PLANET_MASS: f64 = 3511.12;
pub const PLACEHOLDER_PLANET_DIAMETER: f64 = 19000.0;
pub const PLACEHOLDER_SATELLITES: &[&str] = &["Io", "Europa"];

/// Planet served by `get-planet`.
///
/// TODO: replace with a lookup against a real planet data source.
#[must_use]
pub fn placeholder_planet() -> Planet {
    Planet {
        name: PLACEHOLDER_PLANET_NAME.to_owned(),
        mass: PLACEHOLDER_PLANET_MASS,
        diameter: PLACEHOLDER_PLANET_DIAMETER,
        satellites: PLACEHOLDER_SATELLITES
            .iter()
            .copied()
            .map(Satellite::new)
            .collect(),
    }
}
