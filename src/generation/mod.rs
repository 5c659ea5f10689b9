//! Core tessellation pipeline
//!
//! Samples generator points, relaxes them with Lloyd's algorithm over a
//! Delaunay dual graph, then analyzes the final cells and resolves adjacency.

mod adjacency;
mod delaunay;
mod lloyd;
mod points;
mod voronoi;

pub use adjacency::resolve_cells;
pub use delaunay::DualGraph;
pub use lloyd::{
    lloyd_relaxation, lloyd_relaxation_with_options, LloydOptions, RelaxationStats,
    DEFAULT_LLOYD_ITERATIONS,
};
pub use points::generate_random_points;
pub use voronoi::build_polygons;

use crate::cell::{CellShape, VoronoiCell};
use crate::config::TessellationConfig;
use crate::geometry::{Bounds, Point};

/// Output of one full pipeline run
#[derive(Debug, Clone)]
pub struct GeneratedCells {
    /// Resolved cells, ids dense from 0
    pub cells: Vec<VoronoiCell>,
    /// Every generator after relaxation, including those whose cell was dropped
    pub points: Vec<Point>,
    pub stats: RelaxationStats,
}

/// Generate cells from configuration (random generators)
pub fn generate_raw_cells(config: &TessellationConfig) -> GeneratedCells {
    let bounds = config.bounds();

    // Step 1: Sample generators
    let points = generate_random_points(config.point_count, &bounds, config.seed);

    // Step 2-4: Relax, analyze, resolve adjacency
    generate_cells(points, bounds, config.lloyd_options())
}

/// Generate cells from explicit generator points
pub fn generate_cells(points: Vec<Point>, bounds: Bounds, options: LloydOptions) -> GeneratedCells {
    let mut graph = DualGraph::new(points, bounds);

    let stats = if options.max_iterations > 0 {
        lloyd_relaxation_with_options(&mut graph, options)
    } else {
        RelaxationStats::default()
    };

    // Final builder pass on the relaxed generators
    let shapes: Vec<Option<CellShape>> = build_polygons(&graph)
        .into_iter()
        .map(|polygon| polygon.and_then(CellShape::analyze))
        .collect();

    let cells = resolve_cells(&graph, shapes);

    GeneratedCells {
        cells,
        points: graph.into_points(),
        stats,
    }
}
