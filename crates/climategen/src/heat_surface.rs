// Procedural "heat blister": a displaced, vertex-colored disc patch that sits
// tangent to the globe and encodes a region's temperature and anomaly.

use crate::anchor::GeoAnchor;
use crate::color_scale::{ColorScale, Rgb};
use crate::config::HeatSurfaceConfig;
use crate::constants::MAX_SURFACE_RESOLUTION;
use crate::error::ConfigError;
use crate::mesh_data::{MeshData, grid_indices};
use crate::projection::{surface_normal, tangent_rotation, to_cartesian};
use glam::{Mat4, Quat, Vec3};

/// Shape and color parameters of a heat surface
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSurfaceParams {
    /// Disc radius in world units; the grid spans `2 * radius` per side
    pub radius: f32,
    /// Quads per grid side
    pub resolution: u32,
    /// Falloff exponent; above 1 gives a peaked dome instead of a cone
    pub exponent: f32,
    pub min_height: f32,
    /// Temperature (°C) above which the dome grows past `min_height`
    pub reference_temperature: f32,
    pub height_per_degree: f32,
    /// Anomaly (°C) at which the tip color is fully `hot_color`
    pub anomaly_range: f32,
    pub alpha_gain: f32,
    pub hot_color: Rgb,
    pub temperature_scale: ColorScale,
}

impl HeatSurfaceParams {
    pub fn from_config(config: &HeatSurfaceConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            radius: config.radius,
            resolution: config.resolution,
            exponent: config.exponent,
            min_height: config.min_height,
            reference_temperature: config.reference_temperature,
            height_per_degree: config.height_per_degree,
            anomaly_range: config.anomaly_range,
            alpha_gain: config.alpha_gain,
            hot_color: Rgb::from_hex(&config.hot_color)?,
            temperature_scale: ColorScale::from_specs(&config.temperature_scale)?,
        })
    }

    /// Peak height of the dome for `temperature`
    pub fn max_height(&self, temperature: f32) -> f32 {
        if temperature > self.reference_temperature {
            let grown =
                self.min_height + (temperature - self.reference_temperature) * self.height_per_degree;
            grown.max(self.min_height)
        } else {
            self.min_height
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if self.resolution < 1 {
            return Err(ConfigError::ZeroResolution);
        }
        if self.resolution > MAX_SURFACE_RESOLUTION {
            return Err(ConfigError::ResolutionTooLarge {
                resolution: self.resolution,
                max: MAX_SURFACE_RESOLUTION,
            });
        }
        let positive = [
            ("exponent", self.exponent),
            ("min_height", self.min_height),
            ("anomaly_range", self.anomaly_range),
            ("alpha_gain", self.alpha_gain),
        ];
        for (name, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositiveParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Placement of a patch: rotate local +Z onto the surface normal, then translate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl PatchTransform {
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.rotation * local + self.translation
    }

    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

/// A generated patch: local-space mesh plus its placement on the globe
#[derive(Debug, Clone, PartialEq)]
pub struct HeatSurface {
    pub mesh: MeshData,
    pub transform: PatchTransform,
    pub max_height: f32,
}

impl HeatSurface {
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.mesh
            .positions
            .iter()
            .map(|p| self.transform.apply(Vec3::from(*p)))
            .collect()
    }
}

/// Builds heat surfaces from validated parameters
#[derive(Debug, Clone)]
pub struct HeatSurfaceGenerator {
    params: HeatSurfaceParams,
}

impl HeatSurfaceGenerator {
    pub fn new(params: HeatSurfaceParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn from_config(config: &HeatSurfaceConfig) -> Result<Self, ConfigError> {
        Self::new(HeatSurfaceParams::from_config(config)?)
    }

    pub fn params(&self) -> &HeatSurfaceParams {
        &self.params
    }

    /// Build the patch for one region.
    ///
    /// `surface_radius` is the distance from the globe's center at which the
    /// patch is anchored. The output depends only on the arguments and the
    /// generator's parameters.
    pub fn generate(
        &self,
        temperature: f32,
        anomaly: f32,
        anchor: GeoAnchor,
        surface_radius: f32,
    ) -> HeatSurface {
        let p = &self.params;
        let n = p.resolution;
        let radius_sq = p.radius * p.radius;
        let max_height = p.max_height(temperature);

        let base_color = p.temperature_scale.color_for(temperature).to_f32();
        let anomaly_factor = (anomaly / p.anomaly_range).clamp(0.0, 1.0);
        let tip_color = mix(base_color, p.hot_color.to_f32(), anomaly_factor);

        let vertex_count = (n as usize + 1).pow(2);
        let mut positions = Vec::with_capacity(vertex_count);
        let mut colors = Vec::with_capacity(vertex_count);

        for iy in 0..=n {
            let vy = grid_coordinate(iy, n, p.radius);
            for ix in 0..=n {
                let vx = grid_coordinate(ix, n, p.radius);
                let d2 = vx * vx + vy * vy;

                if d2 <= radius_sq {
                    let falloff = 1.0 - d2 / radius_sq;
                    let z = max_height * falloff.powf(p.exponent);
                    let t = z / max_height;
                    let [r, g, b] = mix(base_color, tip_color, t);
                    let alpha = (falloff * p.alpha_gain).clamp(0.0, 1.0);

                    positions.push([vx, vy, z]);
                    colors.push([r, g, b, alpha]);
                } else {
                    // Transparent filler keeps the grid rectangular
                    let [r, g, b] = base_color;
                    positions.push([vx, vy, 0.0]);
                    colors.push([r, g, b, 0.0]);
                }
            }
        }

        let mut mesh = MeshData {
            positions,
            normals: Vec::new(),
            colors,
            indices: grid_indices(n),
        };
        mesh.recompute_normals(Vec3::Z);

        let anchor_point = to_cartesian(anchor.lat, anchor.lon, surface_radius);
        let transform = PatchTransform {
            translation: anchor_point,
            rotation: tangent_rotation(surface_normal(anchor_point)),
        };

        log::debug!(
            "Generated heat surface at ({}, {}): {} vertices, peak {:.3}",
            anchor.lat,
            anchor.lon,
            mesh.vertex_count(),
            max_height
        );

        HeatSurface {
            mesh,
            transform,
            max_height,
        }
    }
}

fn grid_coordinate(index: u32, n: u32, radius: f32) -> f32 {
    -radius + 2.0 * radius * (index as f32 / n as f32)
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}
