use super::catalog;
use super::model::Planet;

/// Stateless operations behind the REST endpoints, backed by the [`catalog`] data
#[derive(Debug, Clone)]
pub struct SomeDataService {
    names: &'static [(&'static [i32], &'static str)],
    fallback_name: &'static str,
    country_suffix: &'static str,
    placeholder: Planet,
}

impl Default for SomeDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl SomeDataService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            names: catalog::NAME_TABLE,
            fallback_name: catalog::FALLBACK_NAME,
            country_suffix: catalog::COUNTRY_SUFFIX,
            placeholder: catalog::placeholder_planet(),
        }
    }

    /// Name for `index`, or the fallback when the index is not in the table.
    #[must_use]
    pub fn name_by_index(&self, index: i32) -> &'static str {
        self.names
            .iter()
            .find(|(indices, _)| indices.contains(&index))
            .map_or(self.fallback_name, |(_, name)| name)
    }

    #[must_use]
    pub fn country_by_prefix(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.country_suffix)
    }

    #[must_use]
    pub fn planet(&self) -> Planet {
        self.placeholder.clone()
    }

    /// Half the diameter; no validation of the input.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn planet_radius(&self, planet: &Planet) -> f64 {
        planet.diameter / 2.0
    }
}
