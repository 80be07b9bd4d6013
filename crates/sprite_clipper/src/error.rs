use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    /// A region produced too few points for a polygon. `region` is the
    /// 1-based discovery index, or 0 outside a pipeline.
    #[error("Region {region}: at least 3 points are required to form a polygon, got {points}")]
    InvalidInput { region: usize, points: usize },

    /// Every hull input point coincides, so there is no outline to wrap.
    #[error("Region {region}: convex hull has only {vertices} vertices")]
    DegenerateHull { region: usize, vertices: usize },

    #[error("Geometric computation error: {0}")]
    GeometricComputation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClipError {
    /// True for failures caused by a region too small to outline.
    pub fn is_degenerate_region(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::DegenerateHull { .. })
    }

    /// Attach the pipeline's region index to a degenerate-region error.
    pub(crate) fn in_region(self, index: usize) -> Self {
        match self {
            Self::InvalidInput { points, .. } => Self::InvalidInput { region: index, points },
            Self::DegenerateHull { vertices, .. } => Self::DegenerateHull { region: index, vertices },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClipError>;
