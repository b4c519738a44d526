// disable console on windows for release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use bevy::DefaultPlugins;
use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use climategen::record::ClimateRecord;
use climategen::scene::FrameComposer;
use ecovigia::{ClimateData, EcoVigiaPlugin, GlobeScene, ViewState};
use std::fmt::Display;

const CLIMATE_DATA_PATH: &str = "assets/climate-data.json";

fn main() {
    // Nothing can be drawn without a valid record and config, so fail before opening a window
    let record = ClimateRecord::load_from_file(CLIMATE_DATA_PATH)
        .unwrap_or_else(|err| exit_with("Failed to load climate data", err));
    climategen::reload_config()
        .unwrap_or_else(|err| exit_with("Failed to read climategen_config.toml", err));
    let config = climategen::get_config();
    let composer = FrameComposer::from_config(&config)
        .unwrap_or_else(|err| exit_with("Invalid climate configuration", err));

    App::new()
        .insert_resource(ClearColor(Color::srgb(0.02, 0.03, 0.07)))
        .insert_resource(ClimateData::new(record))
        .insert_resource(GlobeScene::new(composer))
        .insert_resource(ViewState::new(&config.extrapolation))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "EcoVig-IA".into(),
                resolution: WindowResolution::new(1500, 900),
                present_mode: PresentMode::AutoVsync,
                resize_constraints: WindowResizeConstraints {
                    min_width: 800.0,
                    min_height: 600.0,
                    ..default()
                },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EcoVigiaPlugin)
        .run();
}

fn exit_with(context: &str, err: impl Display) -> ! {
    eprintln!("{context}: {err}");
    std::process::exit(1);
}
