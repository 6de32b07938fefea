//! Presentation settings loaded from `config/scene.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::bodies::descriptor::color_from_hex;

const CONFIG_PATH: &str = "config/scene.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawSceneConfig {
    #[serde(default)]
    camera: RawCameraSection,
    #[serde(default)]
    lighting: RawLightingSection,
    #[serde(default)]
    highlight: RawHighlightSection,
    #[serde(default)]
    meshes: RawMeshSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawCameraSection {
    position: [f32; 3],
    fov_degrees: f32,
    near: f32,
    far: f32,
    rotate_sensitivity: f32,
    zoom_sensitivity: f32,
    min_radius: f32,
    max_radius: f32,
}

impl Default for RawCameraSection {
    fn default() -> Self {
        Self {
            position: [-90.0, 140.0, 140.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            min_radius: 20.0,
            max_radius: 600.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawLightingSection {
    ambient_color: u32,
    ambient_brightness: f32,
    point_intensity: f32,
    point_range: f32,
    directional_illuminance: f32,
    directional_position: [f32; 3],
    sun_glow: f32,
    shadows_enabled: bool,
}

impl Default for RawLightingSection {
    fn default() -> Self {
        Self {
            ambient_color: 0x333333,
            ambient_brightness: 150.0,
            point_intensity: 50_000_000.0,
            point_range: 300.0,
            directional_illuminance: 1_500.0,
            directional_position: [-30.0, 50.0, 0.0],
            sun_glow: 4.0,
            shadows_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHighlightSection {
    color: u32,
    intensity: f32,
}

impl Default for RawHighlightSection {
    fn default() -> Self {
        Self {
            color: 0xff0000,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMeshSection {
    sphere_sectors: u32,
    sphere_stacks: u32,
    ring_resolution: u32,
    wireframe: bool,
}

impl Default for RawMeshSection {
    fn default() -> Self {
        Self {
            sphere_sectors: 40,
            sphere_stacks: 40,
            ring_resolution: 32,
            wireframe: true,
        }
    }
}

/// Camera placement and orbit-control tuning.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub position: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

#[derive(Debug, Clone)]
pub struct LightingSettings {
    pub ambient_color: Color,
    pub ambient_brightness: f32,
    pub point_intensity: f32,
    pub point_range: f32,
    pub directional_illuminance: f32,
    pub directional_position: Vec3,
    /// Multiplier applied to the sun colour for its emissive term.
    pub sun_glow: f32,
    pub shadows_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct MeshSettings {
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
    pub ring_resolution: u32,
    /// Draws body, ring and moon meshes with a wireframe overlay.
    pub wireframe: bool,
}

/// Runtime presentation settings derived from `config/scene.toml`.
#[derive(Resource, Debug, Clone)]
pub struct SceneSettings {
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    /// Emissive colour applied to the hovered object.
    pub highlight: LinearRgba,
    pub meshes: MeshSettings,
}

impl SceneSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawSceneConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawSceneConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawSceneConfig::default().into()
            }
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        RawSceneConfig::default().into()
    }
}

impl From<RawSceneConfig> for SceneSettings {
    fn from(value: RawSceneConfig) -> Self {
        let camera = value.camera;
        let lighting = value.lighting;
        let highlight = value.highlight;
        let meshes = value.meshes;

        let near = camera.near.max(0.001);
        let min_radius = camera.min_radius.max(near);

        Self {
            camera: CameraSettings {
                position: Vec3::from_array(camera.position),
                fov: camera.fov_degrees.clamp(1.0, 179.0).to_radians(),
                near,
                far: camera.far.max(near + 1.0),
                rotate_sensitivity: camera.rotate_sensitivity.max(0.0),
                zoom_sensitivity: camera.zoom_sensitivity.clamp(0.0, 0.9),
                min_radius,
                max_radius: camera.max_radius.max(min_radius),
            },
            lighting: LightingSettings {
                ambient_color: color_from_hex(lighting.ambient_color),
                ambient_brightness: lighting.ambient_brightness.max(0.0),
                point_intensity: lighting.point_intensity.max(0.0),
                point_range: lighting.point_range.max(0.0),
                directional_illuminance: lighting.directional_illuminance.max(0.0),
                directional_position: Vec3::from_array(lighting.directional_position),
                sun_glow: lighting.sun_glow.max(0.0),
                shadows_enabled: lighting.shadows_enabled,
            },
            highlight: LinearRgba::from(color_from_hex(highlight.color))
                * highlight.intensity.max(0.0),
            meshes: MeshSettings {
                sphere_sectors: meshes.sphere_sectors.max(3),
                sphere_stacks: meshes.sphere_stacks.max(2),
                ring_resolution: meshes.ring_resolution.max(3),
                wireframe: meshes.wireframe,
            },
        }
    }
}
