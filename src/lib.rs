//! Relaxed Voronoi tessellation of a rectangle
//!
//! Partitions `[0, width] x [0, height]` into roughly equal-area convex cells
//! (a centroidal Voronoi tessellation via Lloyd's relaxation) and exposes per-cell
//! descriptors for generative rendering: boundary polygon, centroid, an
//! inscribed-circle estimate, neighbor adjacency, and point location.
//!
//! # Quick Start
//!
//! ```rust
//! use voronoi_tessellation::*;
//!
//! let config = TessellationConfigBuilder::new()
//!     .seed(42)
//!     .size(1.0, 1.0)
//!     .unwrap()
//!     .point_count(256)
//!     .relax_iterations(6)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let diagram = Diagram::generate(&config);
//! for cell in diagram.cells() {
//!     // clip marks to cell.points, size them by cell.inner_circle_radius
//!     let _ = (cell.centroid, cell.inner_circle_radius);
//! }
//! let under_pointer = diagram.locate(0.3, 0.7);
//! assert!(under_pointer.is_some());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): O(log n) point location using a KD-tree
//! - `serde`: Serialization support for configuration and cells

// Modules
pub mod error;
pub mod geometry;
pub mod config;
pub mod cell;
pub mod generation;
pub mod spatial;
pub mod diagram;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use geometry::{Bounds, Point, Polygon};
pub use config::{TessellationConfig, TessellationConfigBuilder};
pub use cell::{CellShape, CellSnapshot, VoronoiCell};
pub use diagram::Diagram;
pub use generation::{LloydOptions, RelaxationStats};
pub use spatial::SpatialIndex;
