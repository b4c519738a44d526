use crate::globe::components::*;
use crate::globe::resources::*;
use crate::helpers::mesh::mesh_from_data;
use bevy::prelude::*;
use climategen::scene::{PointRecord, SurfaceRecord};

const POINT_RADIUS: f32 = 0.03;
const SELECTED_SCALE: f32 = 1.8;
const ATMOSPHERE_SCALE: f32 = 1.04;
const EARTH_COLOR: Color = Color::srgb(0.169, 0.341, 0.592);

pub fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scene: Res<GlobeScene>,
) {
    let radius = scene.composer().globe().radius;

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(radius).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: EARTH_COLOR,
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::default(),
        GlobeBody,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(radius * ATMOSPHERE_SCALE).mesh().uv(64, 32))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(0.4, 0.65, 1.0, 0.12),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        Atmosphere,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 1_500.0,
            ..default()
        },
        Transform::from_xyz(-5.0, -2.0, -3.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.insert_resource(PointMesh(
        meshes.add(Sphere::new(POINT_RADIUS).mesh().uv(12, 8)),
    ));

    info!("Globe spawned with radius {radius}");
}

pub fn playback_tick(time: Res<Time>, mut view: ResMut<ViewState>) {
    if !view.playing {
        return;
    }
    // Only a year change counts as a change; the elapsed accumulator does not
    if view.bypass_change_detection().tick(time.delta_secs()) {
        view.set_changed();
    }
}

pub fn keyboard_controls(keyboard_input: Res<ButtonInput<KeyCode>>, mut view: ResMut<ViewState>) {
    if keyboard_input.any_just_pressed([KeyCode::ArrowRight, KeyCode::ArrowUp]) {
        view.step(true);
    }
    if keyboard_input.any_just_pressed([KeyCode::ArrowLeft, KeyCode::ArrowDown]) {
        view.step(false);
    }
    if keyboard_input.just_pressed(KeyCode::Space) {
        view.toggle_playback();
    }
}

/// Replace all frame entities when the year, layer or variable changed
pub fn rebuild_frame(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    data: Res<ClimateData>,
    scene: Res<GlobeScene>,
    view: Res<ViewState>,
    selection: Res<RegionSelection>,
    point_mesh: Option<Res<PointMesh>>,
    mut rendered: ResMut<RenderedContext>,
    frame_entities: Query<Entity, With<FrameEntity>>,
) {
    let context = view.context();
    if rendered.0.as_ref() == Some(&context) {
        return;
    }
    let Some(point_mesh) = point_mesh else {
        return;
    };

    for entity in frame_entities.iter() {
        commands.entity(entity).despawn();
    }

    let frame = scene.composer().compose(data.record(), &context);

    for point in &frame.points {
        let selected = selection.0.as_deref() == Some(point.region.as_str());
        commands.spawn((
            Mesh3d(point_mesh.0.clone()),
            MeshMaterial3d(materials.add(point_material(point))),
            Transform::from_translation(point.position).with_scale(Vec3::splat(point_scale(selected))),
            RegionPoint {
                region: point.region.clone(),
            },
            FrameEntity,
        ));
    }

    if !frame.surfaces.is_empty() {
        let surface_material = materials.add(StandardMaterial {
            base_color: Color::WHITE,
            alpha_mode: AlphaMode::Blend,
            double_sided: true,
            cull_mode: None,
            perceptual_roughness: 0.6,
            ..default()
        });
        for surface in &frame.surfaces {
            commands.spawn((
                Mesh3d(meshes.add(mesh_from_data(&surface.surface.mesh))),
                MeshMaterial3d(surface_material.clone()),
                surface_transform(surface),
                HeatSurfaceView,
                FrameEntity,
            ));
        }
    }

    debug!(
        "Rebuilt frame for {} ({}): {} points, {} surfaces",
        context.year,
        context.layer,
        frame.points.len(),
        frame.surfaces.len()
    );
    rendered.0 = Some(context);
}

/// Enlarge the selected region's markers
pub fn highlight_selection(
    selection: Res<RegionSelection>,
    mut points: Query<(&RegionPoint, &mut Transform)>,
) {
    if !selection.is_changed() {
        return;
    }
    for (point, mut transform) in points.iter_mut() {
        let selected = selection.0.as_deref() == Some(point.region.as_str());
        transform.scale = Vec3::splat(point_scale(selected));
    }
}

fn point_scale(selected: bool) -> f32 {
    if selected { SELECTED_SCALE } else { 1.0 }
}

fn point_material(point: &PointRecord) -> StandardMaterial {
    let [r, g, b] = point.color.to_f32();
    StandardMaterial {
        base_color: Color::srgba(r, g, b, point.opacity),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    }
}

fn surface_transform(surface: &SurfaceRecord) -> Transform {
    Transform {
        translation: surface.surface.transform.translation,
        rotation: surface.surface.transform.rotation,
        scale: Vec3::ONE,
    }
}
