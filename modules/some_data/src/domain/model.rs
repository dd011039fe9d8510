/// A planet with its natural satellites
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Planet {
    pub name: String,
    pub mass: f64,
    pub diameter: f64,
    pub satellites: Vec<Satellite>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Satellite {
    pub name: String,
}

impl Satellite {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
