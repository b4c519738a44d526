use bevy::prelude::*;
use climategen::config::ExtrapolationConfig;
use climategen::record::ClimateRecord;
use climategen::scene::FrameComposer;
use climategen::timeline::{Timeline, ViewContext};

/// The loaded climate record, read-only for the app's lifetime
#[derive(Resource)]
pub struct ClimateData {
    record: ClimateRecord,
}

impl ClimateData {
    pub fn new(record: ClimateRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &ClimateRecord {
        &self.record
    }
}

#[derive(Resource)]
pub struct GlobeScene {
    composer: FrameComposer,
}

impl GlobeScene {
    pub fn new(composer: FrameComposer) -> Self {
        Self { composer }
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct ViewState {
    pub timeline: Timeline,
}

impl ViewState {
    pub fn new(config: &ExtrapolationConfig) -> Self {
        Self {
            timeline: Timeline::new(config),
        }
    }
}

/// Region picked in the side panel
#[derive(Resource, Default)]
pub struct RegionSelection(pub Option<String>);

/// Context of the frame currently on screen, `None` before the first build
#[derive(Resource, Default)]
pub struct RenderedContext(pub Option<ViewContext>);

/// Shared sphere mesh for every region marker
#[derive(Resource)]
pub struct PointMesh(pub Handle<Mesh>);

#[cfg(test)]
mod tests {
    use super::*;
    use climategen::anchor::region_anchor;

    const BUNDLED_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/climate-data.json");

    #[test]
    fn test_bundled_record_is_fully_anchored() {
        let data = ClimateData::new(ClimateRecord::load_from_file(BUNDLED_DATA).unwrap());
        let regions = data.record().regions();

        assert_eq!(regions.len(), 3);
        for region in regions {
            assert!(region_anchor(&region.name).is_some(), "{} has no anchor", region.name);
            assert!(region.variable("t2m").is_some());
        }
    }

    #[test]
    fn test_view_state_starts_at_default_year() {
        let view = ViewState::new(&ExtrapolationConfig::default());
        assert_eq!(view.year(), 2000);
        assert!(!view.playing);
    }
}
