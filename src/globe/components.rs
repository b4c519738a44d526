use bevy::prelude::*;

#[derive(Component)]
pub struct GlobeBody;

#[derive(Component)]
pub struct Atmosphere;

/// Anything built from the current frame; despawned on rebuild
#[derive(Component)]
pub struct FrameEntity;

#[derive(Component)]
pub struct RegionPoint {
    pub region: String,
}

#[derive(Component)]
pub struct HeatSurfaceView;
