pub mod components;
pub mod resources;
mod systems;

use crate::globe::resources::*;
use crate::globe::systems::*;
use bevy::prelude::*;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RegionSelection>()
            .init_resource::<RenderedContext>()
            .add_systems(Startup, spawn_globe)
            .add_systems(
                Update,
                (
                    playback_tick,
                    keyboard_controls,
                    rebuild_frame,
                    highlight_selection,
                )
                    .chain(),
            );
    }
}
