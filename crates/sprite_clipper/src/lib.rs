//! # Sprite Clip Path Library
//!
//! Computes one convex clip path per sprite of a packed sprite sheet, so a
//! renderer or hit tester can clip each sprite without scanning pixels.
//!
//! ## Core Features
//!
//! - **Region discovery**: explicit-stack flood fill over 4-connected opaque pixels
//! - **Convex hulls**: gift wrapping with strict handling of collinear points
//! - **Stable naming**: `sprite-1`, `sprite-2`, ... in column-major scan order
//! - **Output**: clip path group JSON, GeoJSON and a debug overlay image
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_clipper::Pipeline;
//!
//! let pipeline = Pipeline::builder().build();
//!
//! let sheet = sprite_clipper::load_sheet("sheet.png")?;
//! let result = pipeline.process_image(&sheet)?;
//!
//! result.to_group("ui", "sheet.png").save_json("sheet.json")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use sprite_clipper::{Pipeline, PixelSampling};
//!
//! let pipeline = Pipeline::builder()
//!     .with_alpha_threshold(8)
//!     .with_sampling(PixelSampling::Corners)
//!     .skip_degenerate()
//!     .build();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod io;
pub mod overlay;

// Re-exports for convenience
pub use error::{ClipError, Result};
pub use types::{ClipPath, ClipPathGroup, ComputedClipPaths, DegeneratePolicy, PixelSampling, Point, Region};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, PipelineOptions, builder::PipelineBuilder};
pub use overlay::{OverlayStyle, draw_overlay};
pub use io::sheet::load_sheet;
