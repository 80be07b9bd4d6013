use crate::{
    algorithms::{FloodFillRegionFinder, GiftWrapHull},
    pipeline::{Pipeline, PipelineOptions},
    traits::{HullBuilder, RegionFinder},
    types::{DegeneratePolicy, PixelSampling},
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    region_finder: Option<Box<dyn RegionFinder>>,
    hull_builder: Option<Box<dyn HullBuilder>>,
    options: PipelineOptions,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            region_finder: None,
            hull_builder: None,
            options: PipelineOptions::default(),
        }
    }

    /// Set the region finder (replaces any existing one)
    pub fn set_region_finder<F>(mut self, finder: F) -> Self
    where
        F: RegionFinder + 'static,
    {
        self.region_finder = Some(Box::new(finder));
        self
    }

    /// Set the hull builder (replaces any existing one)
    pub fn set_hull_builder<H>(mut self, builder: H) -> Self
    where
        H: HullBuilder + 'static,
    {
        self.hull_builder = Some(Box::new(builder));
        self
    }

    /// Replace all options at once, e.g. from a config file
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_alpha_threshold(mut self, threshold: u8) -> Self {
        self.options.alpha_threshold = threshold;
        self
    }

    pub fn with_sampling(mut self, sampling: PixelSampling) -> Self {
        self.options.sampling = sampling;
        self
    }

    /// Feed every region pixel to the hull builder instead of the boundary only
    pub fn with_all_pixels(mut self) -> Self {
        self.options.boundary_only = false;
        self
    }

    pub fn on_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.options.on_degenerate = policy;
        self
    }

    /// Skip regions that cannot form a polygon instead of failing
    pub fn skip_degenerate(self) -> Self {
        self.on_degenerate(DegeneratePolicy::Skip)
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.name_prefix = prefix.into();
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let region_finder = self.region_finder
            .unwrap_or_else(|| Box::new(FloodFillRegionFinder));

        let hull_builder = self.hull_builder
            .unwrap_or_else(|| Box::new(GiftWrapHull));

        Pipeline::new(region_finder, hull_builder, self.options)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let pipeline = PipelineBuilder::default().build();
        assert_eq!(pipeline.options(), &PipelineOptions::default());
        assert_eq!(pipeline.options().name_prefix, "sprite-");
        assert!(pipeline.options().boundary_only);
    }

    #[test]
    fn test_builder_overrides() {
        let pipeline = Pipeline::builder()
            .with_alpha_threshold(16)
            .with_sampling(PixelSampling::Corners)
            .with_all_pixels()
            .skip_degenerate()
            .with_name_prefix("icon-")
            .build();

        let options = pipeline.options();
        assert_eq!(options.alpha_threshold, 16);
        assert_eq!(options.sampling, PixelSampling::Corners);
        assert!(!options.boundary_only);
        assert_eq!(options.on_degenerate, DegeneratePolicy::Skip);
        assert_eq!(options.name_prefix, "icon-");
        assert!(pipeline.info().contains("corners sampling"));
    }
}
