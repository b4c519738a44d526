mod core;
mod globe;
mod helpers;
mod ui;

pub use crate::globe::resources::{ClimateData, GlobeScene, ViewState};

use crate::core::camera::CameraPlugin;
use crate::globe::GlobePlugin;
use crate::ui::UIPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

/// Expects [`ClimateData`], [`GlobeScene`] and [`ViewState`] to be inserted
/// before the app runs.
pub struct EcoVigiaPlugin;

impl Plugin for EcoVigiaPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default())
            .add_plugins((CameraPlugin, GlobePlugin, UIPlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
