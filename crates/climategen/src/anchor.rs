/// Fixed geographic placement of a region on the globe, in degrees.
/// This is presentation data, kept apart from the scientific record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoAnchor {
    pub lat: f32,
    pub lon: f32,
}

impl GeoAnchor {
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Offset by `(d_lat, d_lon)` degrees, without wrapping
    pub fn offset(self, d_lat: f32, d_lon: f32) -> Self {
        Self::new(self.lat + d_lat, self.lon + d_lon)
    }
}

const REGION_ANCHORS: &[(&str, GeoAnchor)] = &[
    ("Sudamérica", GeoAnchor::new(-15.0, -60.0)),
    ("Centroamérica", GeoAnchor::new(15.0, -85.0)),
    ("Europa", GeoAnchor::new(50.0, 15.0)),
];

/// Look up a region's anchor by name. Regions without one are not drawn.
pub fn region_anchor(region_name: &str) -> Option<GeoAnchor> {
    REGION_ANCHORS
        .iter()
        .find(|(name, _)| *name == region_name)
        .map(|(_, anchor)| *anchor)
}
