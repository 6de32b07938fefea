//! Body registry resource and its `config/bodies.toml` loader.
use std::{borrow::Borrow, collections::HashMap, fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::{
    descriptor::{
        color_from_hex, BodyDescriptor, BodyFeatures, BodyId, MoonDescriptor, RingDescriptor,
    },
    errors::RegistryError,
};

const CONFIG_PATH: &str = "config/bodies.toml";

impl Borrow<str> for BodyId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawBodiesConfig {
    #[serde(default)]
    bodies: Vec<RawBody>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawBody {
    id: String,
    radius: f32,
    color: u32,
    #[serde(default)]
    orbit_distance: f32,
    #[serde(default)]
    self_spin_rate: f32,
    #[serde(default)]
    orbit_spin_rate: f32,
    ring: Option<RawRing>,
    moon: Option<RawMoon>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawRing {
    inner_radius: f32,
    outer_radius: f32,
    /// Falls back to the planet colour.
    color: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawMoon {
    radius: f32,
    #[serde(default = "default_moon_color")]
    color: u32,
    distance: f32,
}

fn default_moon_color() -> u32 {
    0xcccccc
}

impl From<RawBody> for BodyDescriptor {
    fn from(value: RawBody) -> Self {
        let ring = value.ring.map(|ring| RingDescriptor {
            inner_radius: ring.inner_radius,
            outer_radius: ring.outer_radius,
            color: color_from_hex(ring.color.unwrap_or(value.color)),
        });
        let moon = value.moon.map(|moon| MoonDescriptor {
            radius: moon.radius,
            color: color_from_hex(moon.color),
            distance: moon.distance,
        });

        Self {
            id: BodyId::new(value.id.trim()),
            radius: value.radius,
            color: color_from_hex(value.color),
            orbit_distance: value.orbit_distance,
            features: BodyFeatures::from_parts(ring, moon),
            self_spin_rate: value.self_spin_rate,
            orbit_spin_rate: value.orbit_spin_rate,
        }
    }
}

/// Ordered, validated set of body descriptors. Read-only after construction.
#[derive(Resource, Debug, Clone)]
pub struct BodyRegistry {
    descriptors: Vec<BodyDescriptor>,
    index: HashMap<BodyId, usize>,
}

impl BodyRegistry {
    /// Validates the descriptors and builds the id index.
    pub fn new(descriptors: Vec<BodyDescriptor>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(descriptors.len());
        for (position, descriptor) in descriptors.iter().enumerate() {
            descriptor.validate()?;
            if index.insert(descriptor.id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateId {
                    id: descriptor.id.clone(),
                });
            }
        }

        let suns: Vec<BodyId> = descriptors
            .iter()
            .filter(|descriptor| descriptor.is_sun())
            .map(|descriptor| descriptor.id.clone())
            .collect();
        match suns.len() {
            0 => return Err(RegistryError::MissingSun),
            1 => {}
            _ => return Err(RegistryError::MultipleSuns { ids: suns }),
        }

        Ok(Self { descriptors, index })
    }

    /// Loads `config/bodies.toml`, falling back to the built-in table when the
    /// file is missing or unreadable. Invalid geometry is always an error.
    pub fn load_or_default() -> Result<Self, RegistryError> {
        let path = Path::new(CONFIG_PATH);
        let raw = match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawBodiesConfig>(&data) {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawBodiesConfig::default()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawBodiesConfig::default()
            }
        };

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawBodiesConfig) -> Result<Self, RegistryError> {
        if raw.bodies.is_empty() {
            return Self::default_solar_system();
        }
        Self::new(raw.bodies.into_iter().map(BodyDescriptor::from).collect())
    }

    /// The sun and the nine classical planets.
    pub fn default_solar_system() -> Result<Self, RegistryError> {
        let ringed = |inner_radius, outer_radius, color| {
            BodyFeatures::Ringed(RingDescriptor {
                inner_radius,
                outer_radius,
                color: color_from_hex(color),
            })
        };
        let earth_moon = BodyFeatures::Mooned(MoonDescriptor {
            radius: 1.6,
            color: color_from_hex(default_moon_color()),
            distance: 10.0,
        });

        let table = [
            ("sun", 16.0, 0xffffe0, 0.0, BodyFeatures::Plain, 0.004, 0.0),
            ("mercury", 3.2, 0xff4fe0, 28.0, BodyFeatures::Plain, 0.004, 0.04),
            ("venus", 5.8, 0x5f32ff, 44.0, BodyFeatures::Plain, 0.002, 0.015),
            ("earth", 6.0, 0x0000ff, 62.0, earth_moon, 0.02, 0.01),
            ("mars", 4.0, 0xff0000, 78.0, BodyFeatures::Plain, 0.018, 0.008),
            ("jupiter", 12.0, 0x00ffff, 100.0, BodyFeatures::Plain, 0.04, 0.002),
            ("saturn", 10.0, 0x004f89, 138.0, ringed(10.0, 20.0, 0x004f89), 0.038, 0.0009),
            ("uranus", 7.0, 0x004f89, 176.0, ringed(7.0, 12.0, 0x004f89), 0.03, 0.0004),
            ("neptune", 7.0, 0x000fff, 200.0, BodyFeatures::Plain, 0.032, 0.0001),
            ("pluto", 2.8, 0xffffff, 216.0, BodyFeatures::Plain, 0.008, 0.00007),
        ];

        Self::new(
            table
                .into_iter()
                .map(
                    |(id, radius, color, orbit_distance, features, self_spin, orbit_spin)| {
                        BodyDescriptor {
                            id: BodyId::new(id),
                            radius,
                            color: color_from_hex(color),
                            orbit_distance,
                            features,
                            self_spin_rate: self_spin,
                            orbit_spin_rate: orbit_spin,
                        }
                    },
                )
                .collect(),
        )
    }

    /// All descriptors in declaration order.
    pub fn descriptors(&self) -> &[BodyDescriptor] {
        &self.descriptors
    }

    pub fn sun(&self) -> &BodyDescriptor {
        // `new` guarantees exactly one sun.
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.is_sun())
            .unwrap_or(&self.descriptors[0])
    }

    pub fn planets(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| !descriptor.is_sun())
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn get(&self, id: &BodyId) -> Option<&BodyDescriptor> {
        self.index
            .get(id)
            .map(|position| &self.descriptors[*position])
    }

    /// Maps an external identifier onto a known body id.
    pub fn resolve(&self, raw_id: &str) -> Option<&BodyId> {
        self.index
            .get(raw_id.trim())
            .map(|position| &self.descriptors[*position].id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &BodyId> {
        self.descriptors.iter().map(|descriptor| &descriptor.id)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}
