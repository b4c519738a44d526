use crate::core::camera::components::{MainCamera, OrbitController};
use crate::core::camera::logic::{OrbitInput, calculate_orbit, orbit_translation};
use crate::ui::PANEL_WIDTH;
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

pub fn spawn_camera(mut commands: Commands) {
    let controller = OrbitController::default();
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(orbit_translation(&controller.state))
            .looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        controller,
    ));

    info!("Camera spawned");
}

pub fn camera_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    time: Res<Time>,
    windows: Query<&Window>,
    mut camera_q: Query<(&mut Transform, &mut OrbitController), With<MainCamera>>,
) {
    let Ok((mut transform, mut controller)) = camera_q.single_mut() else {
        return;
    };

    // Pointer over the side panel belongs to egui
    let over_ui = windows
        .single()
        .ok()
        .and_then(|window| {
            window
                .cursor_position()
                .map(|cursor| cursor.x > window.width() - PANEL_WIDTH)
        })
        .unwrap_or(false);

    let drag_delta: Vec2 = mouse_motion.read().map(|ev| ev.delta).sum();
    let wheel_delta: f32 = mouse_wheel.read().map(|ev| ev.y).sum();

    let input = OrbitInput {
        dragging: mouse_input.pressed(MouseButton::Left) && !over_ui,
        drag_delta,
        wheel_delta: if over_ui { 0.0 } else { wheel_delta },
    };

    controller.state = calculate_orbit(controller.state, &input, time.delta_secs());
    *transform = Transform::from_translation(orbit_translation(&controller.state))
        .looking_at(Vec3::ZERO, Vec3::Y);
}
