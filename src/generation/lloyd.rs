//! Lloyd's Relaxation for uniform cell areas
//!
//! Lloyd's Relaxation repeatedly moves each generator to the area centroid of
//! its own clipped Voronoi cell, driving the tessellation toward cells of
//! similar size and shape.

use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::polygon_centroid;

use super::delaunay::DualGraph;
use super::voronoi::build_polygons;

/// Default number of relaxation rounds
pub const DEFAULT_LLOYD_ITERATIONS: usize = 6;

/// Options for Lloyd's relaxation algorithm
///
/// Relaxation is a fixed number of rounds with no early exit.
/// `convergence_threshold` is an opt-in extension on top of that contract:
/// it stays at 0.0 unless set explicitly, and then only ever shortens a run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LloydOptions {
    /// Number of rounds to run
    pub max_iterations: usize,
    /// Early-exit threshold as a fraction of the bounds diagonal
    ///
    /// 0.0 disables early termination, so exactly `max_iterations` rounds run.
    pub convergence_threshold: f64,
}

impl Default for LloydOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_LLOYD_ITERATIONS,
            convergence_threshold: 0.0,
        }
    }
}

impl LloydOptions {
    /// Fixed-count relaxation with no early exit
    pub fn fixed(iterations: usize) -> Self {
        Self {
            max_iterations: iterations,
            convergence_threshold: 0.0,
        }
    }
}

/// Summary of one relaxation run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RelaxationStats {
    pub iterations_run: usize,
    /// Largest generator displacement in the last round
    pub max_displacement: f64,
    /// Whether the run stopped early on the convergence threshold
    pub converged: bool,
}

/// Apply a fixed number of Lloyd rounds to the graph's generators
pub fn lloyd_relaxation(graph: &mut DualGraph, iterations: usize) -> RelaxationStats {
    lloyd_relaxation_with_options(graph, LloydOptions::fixed(iterations))
}

/// Apply Lloyd's Relaxation with custom options
///
/// Each round builds every cell from the current triangulation, then replaces
/// each generator whose cell resolved with that cell's centroid (relaxation
/// factor 1.0). Generators whose cell did not resolve keep their position for
/// the round. The graph is re-triangulated at the end of every round, so on
/// return it is ready for the final polygon pass.
pub fn lloyd_relaxation_with_options(graph: &mut DualGraph, options: LloydOptions) -> RelaxationStats {
    let convergence_threshold = options.convergence_threshold * graph.bounds().diagonal();
    let total_start = Instant::now();

    tracing::debug!(
        points = graph.len(),
        max_iterations = options.max_iterations,
        threshold = options.convergence_threshold,
        absolute_threshold = convergence_threshold,
        "lloyd relaxation starting"
    );

    let mut stats = RelaxationStats::default();

    for iteration in 0..options.max_iterations {
        let iter_start = Instant::now();

        let polygons = build_polygons(graph);
        let build_time = iter_start.elapsed();

        let mut max_displacement: f64 = 0.0;
        let mut moved = 0usize;
        for (point, polygon) in graph.points_mut().iter_mut().zip(&polygons) {
            let Some(centroid) = polygon.as_deref().and_then(polygon_centroid) else {
                continue;
            };
            max_displacement = max_displacement.max(point.distance(centroid));
            *point = centroid;
            moved += 1;
        }

        let update_start = Instant::now();
        graph.update();
        let update_time = update_start.elapsed();

        stats.iterations_run = iteration + 1;
        stats.max_displacement = max_displacement;

        tracing::debug!(
            iteration = iteration + 1,
            moved,
            ?build_time,
            ?update_time,
            total = ?iter_start.elapsed(),
            max_displacement,
            "lloyd iteration"
        );

        if convergence_threshold > 0.0 && max_displacement < convergence_threshold {
            stats.converged = true;
            tracing::debug!(
                iteration = iteration + 1,
                max_displacement,
                convergence_threshold,
                "lloyd relaxation converged"
            );
            break;
        }
    }

    tracing::debug!(
        iterations_run = stats.iterations_run,
        max_iterations = options.max_iterations,
        converged = stats.converged,
        total = ?total_start.elapsed(),
        "lloyd relaxation finished"
    );

    stats
}
