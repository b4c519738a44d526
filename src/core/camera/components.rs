use crate::core::camera::logic::OrbitState;
use bevy::prelude::*;

#[derive(Component, Reflect)]
pub struct MainCamera;

#[derive(Component, Default)]
pub struct OrbitController {
    pub state: OrbitState,
}
