pub mod builder;

use image::RgbaImage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use crate::{
    algorithms::AlphaMask,
    error::Result,
    traits::{HullBuilder, PixelMask, RegionFinder},
    types::{ClipPath, ComputedClipPaths, DegeneratePolicy, PixelSampling},
};

/// Default prefix of generated clip path names
pub const DEFAULT_NAME_PREFIX: &str = "sprite-";

/// Tunables shared by every pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PipelineOptions {
    /// Pixels with alpha above this value are opaque
    pub alpha_threshold: u8,
    /// How region pixels become hull input points
    pub sampling: PixelSampling,
    /// Feed only boundary pixels to the hull builder. The hull is the same,
    /// interior pixels can never be strict hull vertices.
    pub boundary_only: bool,
    /// Abort the run or skip regions that cannot form a polygon
    pub on_degenerate: DegeneratePolicy,
    /// Clip paths are named `{name_prefix}{index}` with a 1-based index
    pub name_prefix: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            alpha_threshold: 0,
            sampling: PixelSampling::default(),
            boundary_only: true,
            on_degenerate: DegeneratePolicy::default(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

/// Region discovery followed by one convex hull per region
pub struct Pipeline {
    region_finder: Box<dyn RegionFinder>,
    hull_builder: Box<dyn HullBuilder>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        region_finder: Box<dyn RegionFinder>,
        hull_builder: Box<dyn HullBuilder>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            region_finder,
            hull_builder,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Compute clip paths for an RGBA sprite sheet using its alpha channel
    pub fn process_image(&self, image: &RgbaImage) -> Result<ComputedClipPaths> {
        let mask = AlphaMask::with_threshold(image, self.options.alpha_threshold);
        self.process(&mask)
    }

    /// Compute one named clip path per opaque region of `mask`, in region
    /// discovery order.
    pub fn process(&self, mask: &dyn PixelMask) -> Result<ComputedClipPaths> {
        let (image_width, image_height) = mask.dimensions();

        // Step 1: Discover regions
        let regions = self.region_finder.find_regions(mask)?;
        debug!(
            regions = regions.len(),
            width = image_width,
            height = image_height,
            "discovered regions"
        );

        // Step 2: Wrap each region in a hull
        let mut clip_paths = Vec::with_capacity(regions.len());
        for (i, region) in regions.iter().enumerate() {
            let index = i + 1;
            let points = if self.options.boundary_only {
                region.boundary_points(self.options.sampling)
            } else {
                region.points(self.options.sampling)
            };

            match self.hull_builder.build_hull(&points) {
                Ok(polygon) => {
                    let name = format!("{}{}", self.options.name_prefix, clip_paths.len() + 1);
                    trace!(region = index, %name, vertices = polygon.len(), "built clip path");
                    clip_paths.push(ClipPath { name, clip_path: polygon });
                }
                Err(err)
                    if err.is_degenerate_region()
                        && self.options.on_degenerate == DegeneratePolicy::Skip =>
                {
                    let err = err.in_region(index);
                    warn!(region = index, seed = ?region.seed(), "skipping region: {err}");
                }
                Err(err) => return Err(err.in_region(index)),
            }
        }

        Ok(ComputedClipPaths {
            clip_paths,
            image_width,
            image_height,
        })
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!(
            "Pipeline: {} sampling, {} pixels, alpha > {}, {} on degenerate regions",
            self.options.sampling,
            if self.options.boundary_only { "boundary" } else { "all" },
            self.options.alpha_threshold,
            self.options.on_degenerate,
        )
    }
}
