//! Interaction state shared by the hover, selection and camera systems.
use bevy::prelude::*;

use crate::bodies::BodyId;

/// Request to focus the camera on a body, addressed by its external id.
///
/// The id is validated against the registry when applied; unknown ids are
/// ignored.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct SelectBody {
    pub element_id: String,
}

impl SelectBody {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

/// Request to stop following the current target.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseTarget;

/// Pointer position in normalized device coordinates, `None` when outside the window.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub ndc: Option<Vec2>,
}

/// An object whose emissive colour is currently overridden by the hover highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverHighlight {
    pub entity: Entity,
    material: AssetId<StandardMaterial>,
    previous_emissive: LinearRgba,
}

impl HoverHighlight {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn previous_emissive(&self) -> LinearRgba {
        self.previous_emissive
    }
}

/// Hover, target and playback state for the whole scene.
#[derive(Resource, Debug)]
pub struct InteractionState {
    hovered: Option<HoverHighlight>,
    target: Option<BodyId>,
    /// When false the animation stepper leaves every transform alone.
    pub playing: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hovered: None,
            target: None,
            playing: true,
        }
    }
}

impl InteractionState {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn hovered(&self) -> Option<&HoverHighlight> {
        self.hovered.as_ref()
    }

    pub fn hovered_entity(&self) -> Option<Entity> {
        self.hovered.map(|highlight| highlight.entity)
    }

    pub fn target(&self) -> Option<&BodyId> {
        self.target.as_ref()
    }

    /// Sets the camera target. Returns false when it was already selected.
    pub fn select(&mut self, id: BodyId) -> bool {
        if self.target.as_ref() == Some(&id) {
            return false;
        }
        self.target = Some(id);
        true
    }

    pub fn release_target(&mut self) -> Option<BodyId> {
        self.target.take()
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    /// Moves the hover highlight to `next`.
    ///
    /// The previously hovered object gets its stored emissive back before the
    /// new one is highlighted, so at most one highlight is ever active.
    pub fn hover(
        &mut self,
        next: Option<(Entity, AssetId<StandardMaterial>)>,
        materials: &mut Assets<StandardMaterial>,
        attention: LinearRgba,
    ) {
        if self.hovered_entity() == next.map(|(entity, _)| entity) {
            return;
        }

        if let Some(previous) = self.hovered.take() {
            if let Some(material) = materials.get_mut(previous.material) {
                material.emissive = previous.previous_emissive;
            }
        }

        let Some((entity, material_id)) = next else {
            return;
        };
        if let Some(material) = materials.get_mut(material_id) {
            self.hovered = Some(HoverHighlight {
                entity,
                material: material_id,
                previous_emissive: material.emissive,
            });
            material.emissive = attention;
        }
    }
}
