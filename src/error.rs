use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenmapError {
    #[error("invalid polygon area: {0} (must be finite and non-negative)")]
    InvalidArea(f64),

    #[error("invalid planting zone feature '{id}': {reason}")]
    InvalidZone { id: String, reason: String },

    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GreenmapError>;
