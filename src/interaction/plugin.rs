//! InteractionPlugin wires pointer tracking, selection and hover highlighting.
use bevy::prelude::*;

use crate::{
    core::FrameStage,
    interaction::{
        components::{InteractionState, PointerPosition, ReleaseTarget, SelectBody},
        systems::{
            apply_body_selection, emit_click_selection, emit_keyboard_selection, resolve_hover,
            toggle_playback, track_pointer,
        },
    },
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InteractionState>()
            .init_resource::<PointerPosition>()
            .add_message::<SelectBody>()
            .add_message::<ReleaseTarget>()
            .add_systems(
                Update,
                (
                    track_pointer,
                    emit_click_selection,
                    emit_keyboard_selection,
                    toggle_playback,
                )
                    .in_set(FrameStage::Input),
            )
            .add_systems(
                Update,
                (apply_body_selection, resolve_hover)
                    .chain()
                    .in_set(FrameStage::Interact),
            );
    }
}
