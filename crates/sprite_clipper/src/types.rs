use geo_types::{Coord, LineString, Polygon};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// A polygon vertex in image space (x to the right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Coord<f32> {
    fn from(point: Point) -> Self {
        Coord { x: point.x, y: point.y }
    }
}

/// How a region pixel at `(x, y)` is turned into hull input points
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PixelSampling {
    /// One point at the pixel's top-left corner
    #[default]
    Origin,
    /// Top-left and bottom-right corners, as the legacy clipper emitted them
    Diagonal,
    /// All four corners; the hull covers each pixel's full footprint
    Corners,
}

impl PixelSampling {
    /// Number of points emitted per pixel
    pub fn points_per_pixel(self) -> usize {
        match self {
            Self::Origin => 1,
            Self::Diagonal => 2,
            Self::Corners => 4,
        }
    }

    pub(crate) fn extend_points(self, [px, py]: [u32; 2], out: &mut Vec<Point>) {
        let (x, y) = (px as f32, py as f32);
        match self {
            Self::Origin => out.push(Point::new(x, y)),
            Self::Diagonal => out.extend([Point::new(x, y), Point::new(x + 1.0, y + 1.0)]),
            Self::Corners => out.extend([
                Point::new(x, y),
                Point::new(x, y + 1.0),
                Point::new(x + 1.0, y),
                Point::new(x + 1.0, y + 1.0),
            ]),
        }
    }
}

/// What the pipeline does with a region that cannot form a polygon
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DegeneratePolicy {
    /// Fail the whole run
    #[default]
    Abort,
    /// Log the region and leave it out of the result
    Skip,
}

/// One 4-connected component of opaque pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    seed: [u32; 2],
    pixels: Vec<[u32; 2]>,
    boundary: Vec<[u32; 2]>,
}

impl Region {
    /// `boundary` must be the subset of `pixels` touching a transparent or
    /// out-of-image 4-neighbour.
    pub fn new(seed: [u32; 2], pixels: Vec<[u32; 2]>, boundary: Vec<[u32; 2]>) -> Self {
        Self { seed, pixels, boundary }
    }

    /// First pixel of the region in scan order
    pub fn seed(&self) -> [u32; 2] {
        self.seed
    }

    pub fn pixels(&self) -> &[[u32; 2]] {
        &self.pixels
    }

    pub fn boundary(&self) -> &[[u32; 2]] {
        &self.boundary
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Hull input built from every pixel of the region
    pub fn points(&self, sampling: PixelSampling) -> Vec<Point> {
        Self::sample(&self.pixels, sampling)
    }

    /// Hull input built from boundary pixels only
    pub fn boundary_points(&self, sampling: PixelSampling) -> Vec<Point> {
        Self::sample(&self.boundary, sampling)
    }

    fn sample(pixels: &[[u32; 2]], sampling: PixelSampling) -> Vec<Point> {
        let mut points = Vec::with_capacity(pixels.len() * sampling.points_per_pixel());
        for &pixel in pixels {
            sampling.extend_points(pixel, &mut points);
        }
        points
    }
}

/// A named convex polygon around one sprite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipPath {
    pub name: String,
    /// Hull vertices; the last vertex connects back to the first
    #[serde(rename = "clipPath")]
    pub clip_path: Vec<Point>,
}

impl ClipPath {
    /// Convert to geo-types Polygon for geometric operations
    pub fn to_geo_polygon(&self) -> Polygon<f32> {
        let exterior: Vec<Coord<f32>> = self.clip_path.iter().copied().map(Coord::from).collect();
        Polygon::new(LineString::new(exterior), vec![])
    }

    /// Area enclosed by the polygon in square pixels
    pub fn area(&self) -> f32 {
        use geo::Area;
        self.to_geo_polygon().unsigned_area()
    }

    /// Get the bounding box of the polygon
    pub fn bounding_box(&self) -> ([f32; 2], [f32; 2]) {
        let mut min = [f32::INFINITY; 2];
        let mut max = [f32::NEG_INFINITY; 2];

        for point in &self.clip_path {
            min = [min[0].min(point.x), min[1].min(point.y)];
            max = [max[0].max(point.x), max[1].max(point.y)];
        }

        (min, max)
    }

    /// Get the centroid of the polygon
    pub fn centroid(&self) -> Point {
        use geo::Centroid;
        match self.to_geo_polygon().centroid() {
            Some(centroid) => Point::new(centroid.x(), centroid.y()),
            None => {
                let (min, max) = self.bounding_box();
                Point::new((min[0] + max[0]) / 2.0, (min[1] + max[1]) / 2.0)
            }
        }
    }

    /// Length of the closed outline
    pub fn perimeter(&self) -> f32 {
        let n = self.clip_path.len();
        (0..n)
            .map(|i| {
                let a = self.clip_path[i];
                let b = self.clip_path[(i + 1) % n];
                (b.x - a.x).hypot(b.y - a.y)
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedClipPaths {
    /// Clip paths in region discovery order
    pub clip_paths: Vec<ClipPath>,
    /// Original image dimensions
    pub image_width: u32,
    pub image_height: u32,
}

/// The document written for a sprite sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClipPathGroup {
    pub group: String,
    /// Path of the source image
    pub path: String,
    #[serde(rename = "clipPaths")]
    pub clip_paths: Vec<ClipPath>,
}

impl ComputedClipPaths {
    pub fn len(&self) -> usize {
        self.clip_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clip_paths.is_empty()
    }

    /// Wrap the clip paths into a named group for serialization
    pub fn to_group(&self, group: impl Into<String>, path: impl Into<String>) -> ClipPathGroup {
        ClipPathGroup {
            group: group.into(),
            path: path.into(),
            clip_paths: self.clip_paths.clone(),
        }
    }
}
