use serde::{Deserialize, Serialize};
use thiserror::Error;

const EMBED_BASE: &str = "https://www.openstreetmap.org/export/embed.html";

/// Half-width of the map window around a marker, in degrees.
const LON_SPAN: f64 = 0.01;
const LAT_SPAN: f64 = 0.005;

/// QUT Gardens Point campus, Brisbane.
pub const CAMPUS_MAP_URL: &str = "https://www.openstreetmap.org/export/embed.html?bbox=153.02%2C-27.48%2C153.03%2C-27.47&layer=mapnik&marker=-27.4778%2C153.0281";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Longitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Short label shown under the map, e.g. `Lat: -27.478, Lon: 153.028`.
    pub fn label(&self) -> String {
        format!("Lat: {:.3}, Lon: {:.3}", self.latitude, self.longitude)
    }
}

/// OpenStreetMap embed URL centred on `position`, or the whole world.
pub fn embed_url(position: Option<Coordinates>) -> String {
    match position {
        Some(c) => {
            let (lat, lon) = (c.latitude, c.longitude);
            format!(
                "{}?bbox={},{},{},{}&layer=mapnik&marker={},{}",
                EMBED_BASE,
                lon - LON_SPAN,
                lat - LAT_SPAN,
                lon + LON_SPAN,
                lat + LAT_SPAN,
                lat,
                lon
            )
        }
        None => format!("{}?bbox=-180,-85,180,85&layer=mapnik", EMBED_BASE),
    }
}
