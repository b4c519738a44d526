use bevy::asset::RenderAssetUsages;
use bevy::color::{Color, ColorToComponents};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::Mesh;
use climategen::mesh_data::MeshData;

/// Convert core mesh data into a Bevy mesh (thin presentation layer).
/// Vertex colors arrive sRGB-encoded; Bevy expects linear ones.
pub fn mesh_from_data(mesh_data: &MeshData) -> Mesh {
    let colors: Vec<[f32; 4]> = mesh_data
        .colors
        .iter()
        .map(|[r, g, b, a]| Color::srgba(*r, *g, *b, *a).to_linear().to_f32_array())
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, mesh_data.positions.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, mesh_data.normals.clone());
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(mesh_data.indices.clone()));
    mesh
}
