mod systems;
mod widgets;

use crate::ui::systems::render_control_panel;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// Width of the right-hand control panel, in logical pixels
pub const PANEL_WIDTH: f32 = 340.0;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, render_control_panel);
    }
}
