use crate::{error::Result, types::{Point, Region}};

/// Read-only view of which pixels of an image belong to a sprite
pub trait PixelMask {
    /// Width and height of the pixel grid
    fn dimensions(&self) -> (u32, u32);

    /// Whether the pixel at `(x, y)` is opaque. Callers keep
    /// `x < width` and `y < height`.
    fn is_opaque(&self, x: u32, y: u32) -> bool;
}

/// Trait for connected-region discovery algorithms
pub trait RegionFinder: Send + Sync {
    /// Partition the opaque pixels of `mask` into regions, in a stable order
    fn find_regions(&self, mask: &dyn PixelMask) -> Result<Vec<Region>>;
}

/// Trait for convex hull algorithms
pub trait HullBuilder: Send + Sync {
    /// Build the ordered hull polygon of an unordered point set
    fn build_hull(&self, points: &[Point]) -> Result<Vec<Point>>;
}
