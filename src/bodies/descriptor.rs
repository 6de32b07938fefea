//! Static descriptions of the sun and its planets.
use std::fmt;

use bevy::prelude::*;

use super::errors::RegistryError;

/// Stable string identifier of a body, also used as its external address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Flat annulus drawn around a planet in its orbit plane.
#[derive(Debug, Clone, PartialEq)]
pub struct RingDescriptor {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub color: Color,
}

/// Single satellite parented under a planet mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MoonDescriptor {
    pub radius: f32,
    pub color: Color,
    /// Offset from the planet centre along the planet's local X axis.
    pub distance: f32,
}

/// Optional decorations attached to a body.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BodyFeatures {
    #[default]
    Plain,
    Ringed(RingDescriptor),
    Mooned(MoonDescriptor),
    RingedAndMooned(RingDescriptor, MoonDescriptor),
}

impl BodyFeatures {
    pub fn from_parts(ring: Option<RingDescriptor>, moon: Option<MoonDescriptor>) -> Self {
        match (ring, moon) {
            (None, None) => Self::Plain,
            (Some(ring), None) => Self::Ringed(ring),
            (None, Some(moon)) => Self::Mooned(moon),
            (Some(ring), Some(moon)) => Self::RingedAndMooned(ring, moon),
        }
    }

    pub fn ring(&self) -> Option<&RingDescriptor> {
        match self {
            Self::Ringed(ring) | Self::RingedAndMooned(ring, _) => Some(ring),
            Self::Plain | Self::Mooned(_) => None,
        }
    }

    pub fn moon(&self) -> Option<&MoonDescriptor> {
        match self {
            Self::Mooned(moon) | Self::RingedAndMooned(_, moon) => Some(moon),
            Self::Plain | Self::Ringed(_) => None,
        }
    }
}

/// Everything the scene builder needs to know about one body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDescriptor {
    pub id: BodyId,
    pub radius: f32,
    pub color: Color,
    /// Distance from the sun; zero marks the sun itself.
    pub orbit_distance: f32,
    pub features: BodyFeatures,
    /// Radians added to the body's own rotation every frame.
    pub self_spin_rate: f32,
    /// Radians added to the body's orbit pivot every frame.
    pub orbit_spin_rate: f32,
}

impl BodyDescriptor {
    pub fn is_sun(&self) -> bool {
        self.orbit_distance == 0.0
    }

    pub fn ring(&self) -> Option<&RingDescriptor> {
        self.features.ring()
    }

    pub fn moon(&self) -> Option<&MoonDescriptor> {
        self.features.moon()
    }

    /// Checks the geometry of a single descriptor.
    pub fn validate(&self) -> Result<(), RegistryError> {
        let id = &self.id;
        require_positive(id, "radius", self.radius)?;
        if !self.orbit_distance.is_finite() || self.orbit_distance < 0.0 {
            return Err(RegistryError::non_positive(
                id,
                "orbit distance",
                self.orbit_distance,
            ));
        }
        if !self.self_spin_rate.is_finite() {
            return Err(RegistryError::NonFiniteRate {
                id: id.clone(),
                field: "self spin rate",
            });
        }
        if !self.orbit_spin_rate.is_finite() {
            return Err(RegistryError::NonFiniteRate {
                id: id.clone(),
                field: "orbit spin rate",
            });
        }

        if let Some(ring) = self.ring() {
            require_positive(id, "ring inner radius", ring.inner_radius)?;
            require_positive(id, "ring outer radius", ring.outer_radius)?;
            if ring.outer_radius <= ring.inner_radius {
                return Err(RegistryError::InvertedRing {
                    id: id.clone(),
                    inner: ring.inner_radius,
                    outer: ring.outer_radius,
                });
            }
        }

        if let Some(moon) = self.moon() {
            require_positive(id, "moon radius", moon.radius)?;
            require_positive(id, "moon distance", moon.distance)?;
        }

        Ok(())
    }
}

fn require_positive(id: &BodyId, field: &'static str, value: f32) -> Result<(), RegistryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RegistryError::non_positive(id, field, value))
    }
}

/// Converts a `0xRRGGBB` literal into an sRGB colour.
pub fn color_from_hex(hex: u32) -> Color {
    let [_, r, g, b] = hex.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet(id: &str) -> BodyDescriptor {
        BodyDescriptor {
            id: BodyId::new(id),
            radius: 6.0,
            color: color_from_hex(0x0000ff),
            orbit_distance: 62.0,
            features: BodyFeatures::Plain,
            self_spin_rate: 0.02,
            orbit_spin_rate: 0.01,
        }
    }

    #[test]
    fn features_expose_ring_and_moon() {
        let ring = RingDescriptor {
            inner_radius: 10.0,
            outer_radius: 20.0,
            color: Color::WHITE,
        };
        let moon = MoonDescriptor {
            radius: 1.5,
            color: Color::WHITE,
            distance: 10.0,
        };

        let both = BodyFeatures::from_parts(Some(ring.clone()), Some(moon.clone()));
        assert_eq!(both.ring(), Some(&ring));
        assert_eq!(both.moon(), Some(&moon));
        assert_eq!(BodyFeatures::from_parts(None, None), BodyFeatures::Plain);
        assert!(BodyFeatures::from_parts(None, Some(moon)).ring().is_none());
    }

    #[test]
    fn rejects_inverted_ring() {
        let mut body = planet("saturn");
        body.features = BodyFeatures::Ringed(RingDescriptor {
            inner_radius: 20.0,
            outer_radius: 20.0,
            color: Color::WHITE,
        });

        assert!(matches!(
            body.validate(),
            Err(RegistryError::InvertedRing { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let mut body = planet("earth");
        body.radius = 0.0;
        assert!(matches!(
            body.validate(),
            Err(RegistryError::NonPositive { field: "radius", .. })
        ));

        let mut body = planet("earth");
        body.features = BodyFeatures::Mooned(MoonDescriptor {
            radius: 1.0,
            color: Color::WHITE,
            distance: -4.0,
        });
        assert!(matches!(
            body.validate(),
            Err(RegistryError::NonPositive {
                field: "moon distance",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_finite_rates() {
        let mut body = planet("mars");
        body.orbit_spin_rate = f32::NAN;
        assert!(matches!(
            body.validate(),
            Err(RegistryError::NonFiniteRate { .. })
        ));
    }

    #[test]
    fn hex_colors_map_to_srgb_bytes() {
        assert_eq!(color_from_hex(0xff0000), Color::srgb_u8(255, 0, 0));
        assert_eq!(color_from_hex(0x004f89), Color::srgb_u8(0x00, 0x4f, 0x89));
    }
}
