// Immutable frame descriptors handed to whatever draws the globe.
//
// The composer is stateless: a frame is a pure function of the record, the
// configuration and the view context. Hosts decide when to rebuild.

use crate::anchor::GeoAnchor;
use crate::color_scale::Rgb;
use crate::config::{ClimateGenConfig, GlobeConfig};
use crate::error::ConfigError;
use crate::extrapolation::{RegionAnomaly, regions_with_anomalies};
use crate::heat_surface::{HeatSurface, HeatSurfaceGenerator};
use crate::layer::{LayerCatalog, LayerConfig};
use crate::projection::to_cartesian;
use crate::record::ClimateRecord;
use crate::timeline::ViewContext;
use crate::tools::region_seed;
use glam::Vec3;
use noise::{NoiseFn, Perlin};
use std::f32::consts::TAU;

/// One colored marker on the globe
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub region: String,
    pub anchor: GeoAnchor,
    pub value: f32,
    pub position: Vec3,
    pub color: Rgb,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub region: String,
    pub surface: HeatSurface,
}

/// Everything to draw for one view context
#[derive(Debug, Clone, PartialEq)]
pub struct LayerFrame {
    pub context: ViewContext,
    pub points: Vec<PointRecord>,
    pub surfaces: Vec<SurfaceRecord>,
}

/// Frequencies that keep ring samples off the Perlin lattice, where noise is zero
const JITTER_FREQ_DEG: f64 = 0.13;
const JITTER_FREQ_YEAR: f64 = 0.37;

pub struct FrameComposer {
    globe: GlobeConfig,
    catalog: LayerCatalog,
    generator: HeatSurfaceGenerator,
}

impl FrameComposer {
    pub fn new(globe: GlobeConfig, catalog: LayerCatalog, generator: HeatSurfaceGenerator) -> Self {
        Self {
            globe,
            catalog,
            generator,
        }
    }

    pub fn from_config(config: &ClimateGenConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.globe.clone(),
            LayerCatalog::from_config(&config.layers)?,
            HeatSurfaceGenerator::from_config(&config.heat_surface)?,
        ))
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    pub fn globe(&self) -> &GlobeConfig {
        &self.globe
    }

    /// Build markers and heat surfaces for every anchored region carrying
    /// the context's variable. Regions without an anchor are not drawn.
    pub fn compose(&self, record: &ClimateRecord, context: &ViewContext) -> LayerFrame {
        let layer_config = self.catalog.get(context.layer);
        let mut points = Vec::new();
        let mut surfaces = Vec::new();

        for region in regions_with_anomalies(record, context.year, &context.variable_id) {
            let Some(anchor) = region.anchor else {
                continue;
            };

            self.push_region_points(&mut points, &region, anchor, layer_config, context.year);

            if self.globe.show_heat_surfaces {
                let surface = self.generator.generate(
                    region.temperature,
                    region.anomaly,
                    anchor,
                    self.globe.radius + self.globe.surface_altitude,
                );
                surfaces.push(SurfaceRecord {
                    region: region.name.clone(),
                    surface,
                });
            }
        }

        log::debug!(
            "Composed {} frame for {}: {} points, {} surfaces",
            context.layer,
            context.year,
            points.len(),
            surfaces.len()
        );

        LayerFrame {
            context: context.clone(),
            points,
            surfaces,
        }
    }

    /// Center marker plus a ring of jittered markers around it
    fn push_region_points(
        &self,
        points: &mut Vec<PointRecord>,
        region: &RegionAnomaly,
        anchor: GeoAnchor,
        layer_config: &LayerConfig,
        year: i32,
    ) {
        let value = layer_config.layer.value_for_anomaly(region.anomaly);
        points.push(self.point(&region.name, anchor, value, layer_config));

        let count = self.globe.satellite_count;
        if count == 0 {
            return;
        }
        let noise = Perlin::new(region_seed(self.globe.jitter_seed, &region.name));
        let spread = self.globe.satellite_spread_deg;

        for i in 0..count {
            let angle = i as f32 / count as f32 * TAU;
            let ring_anchor = anchor.offset(angle.cos() * spread, angle.sin() * spread);
            let sample = noise.get([
                ring_anchor.lat as f64 * JITTER_FREQ_DEG,
                ring_anchor.lon as f64 * JITTER_FREQ_DEG,
                year as f64 * JITTER_FREQ_YEAR,
            ]) as f32;
            let jitter = sample.clamp(-1.0, 1.0) * self.globe.satellite_jitter * 0.5;

            points.push(self.point(&region.name, ring_anchor, value + jitter, layer_config));
        }
    }

    fn point(&self, region: &str, anchor: GeoAnchor, value: f32, layer_config: &LayerConfig) -> PointRecord {
        PointRecord {
            region: region.to_string(),
            anchor,
            value,
            position: to_cartesian(
                anchor.lat,
                anchor.lon,
                self.globe.radius + self.globe.point_altitude,
            ),
            color: layer_config.scale.color_for(value),
            opacity: layer_config.scale.opacity_for(value),
        }
    }
}
