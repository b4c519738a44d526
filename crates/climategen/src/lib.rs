pub mod anchor;
pub mod color_scale;
pub mod config;
pub mod constants;
pub mod error;
pub mod extrapolation;
pub mod heat_surface;
pub mod insight;
pub mod layer;
pub mod mesh_data;
pub mod projection;
pub mod record;
pub mod scene;
pub mod timeline;
pub mod tools;

pub use config::{get_config, reload_config};
