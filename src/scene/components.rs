//! Components and resources produced by the scene builder.
use std::collections::HashMap;

use bevy::prelude::*;

use crate::bodies::BodyId;

/// Marks a body's own mesh (sun or planet).
#[derive(Component, Debug, Default)]
pub struct Body;

/// Marks the sun mesh.
#[derive(Component, Debug, Default)]
pub struct Sun;

/// Invisible transform node whose rotation carries a planet around the sun.
#[derive(Component, Debug, Default)]
pub struct OrbitPivot;

/// Ring annulus attached to a planet's pivot.
#[derive(Component, Debug, Default)]
pub struct PlanetRing;

/// Moon mesh attached under a planet mesh.
#[derive(Component, Debug, Default)]
pub struct Moon;

/// Any pickable mesh, tagged with the body it belongs to.
#[derive(Component, Debug, Clone)]
pub struct Selectable {
    pub owner: BodyId,
}

/// Entities built for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyHandle {
    pub mesh: Entity,
    /// `None` for the sun, which does not orbit.
    pub pivot: Option<Entity>,
    pub ring: Option<Entity>,
    pub moon: Option<Entity>,
}

/// Mapping from body id to its entities, fixed once the scene is built.
#[derive(Resource, Debug, Clone, Default)]
pub struct BodyHandles {
    handles: HashMap<BodyId, BodyHandle>,
    order: Vec<BodyId>,
}

impl BodyHandles {
    pub(crate) fn insert(&mut self, id: BodyId, handle: BodyHandle) {
        if self.handles.insert(id.clone(), handle).is_none() {
            self.order.push(id);
        }
    }

    pub fn get(&self, id: &BodyId) -> Option<&BodyHandle> {
        self.handles.get(id)
    }

    /// Handles in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&BodyId, &BodyHandle)> {
        self.order
            .iter()
            .filter_map(|id| self.handles.get(id).map(|handle| (id, handle)))
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Top-level nodes: every pivot plus any body without one.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn roots(&self) -> Vec<Entity> {
        self.iter()
            .map(|(_, handle)| handle.pivot.unwrap_or(handle.mesh))
            .collect()
    }

    /// Finds the body owning a mesh, ring, moon or pivot entity.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn owner_of(&self, entity: Entity) -> Option<&BodyId> {
        self.iter().find_map(|(id, handle)| {
            let owns = handle.mesh == entity
                || handle.pivot == Some(entity)
                || handle.ring == Some(entity)
                || handle.moon == Some(entity);
            owns.then_some(id)
        })
    }
}
