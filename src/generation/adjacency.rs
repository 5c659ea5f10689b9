//! Neighbor resolution for final cells
//!
//! Cells are stored in an arena indexed by position. Each cell gets the arena
//! indices of its neighbors plus a one-level value snapshot of each neighbor's
//! geometry; snapshots never carry neighbor lists of their own.

use crate::cell::{CellShape, CellSnapshot, VoronoiCell};
use crate::geometry::Point;

use super::delaunay::DualGraph;

/// Assemble cells from per-point shapes and attach neighbors
///
/// `shapes` is index-aligned with the graph's points. Points without a shape
/// get no cell, and are skipped in every neighbor list, so cell ids are dense
/// and may be fewer than the number of points.
pub fn resolve_cells(graph: &DualGraph, shapes: Vec<Option<CellShape>>) -> Vec<VoronoiCell> {
    let mut cell_of_point: Vec<Option<usize>> = vec![None; shapes.len()];
    let resolved: Vec<(usize, CellShape)> = shapes
        .into_iter()
        .enumerate()
        .filter_map(|(point_index, shape)| shape.map(|shape| (point_index, shape)))
        .collect();
    for (id, (point_index, _)) in resolved.iter().enumerate() {
        cell_of_point[*point_index] = Some(id);
    }

    resolved
        .iter()
        .enumerate()
        .map(|(id, (point_index, shape))| {
            let site: Point = graph.points()[*point_index];
            let mut cell = VoronoiCell::new(id, site, shape.clone());
            cell.neighbor_ids = find_cell_neighbors(graph, *point_index, &cell_of_point);
            cell.neighbors = cell
                .neighbor_ids
                .iter()
                .map(|&neighbor_id| CellSnapshot::new(neighbor_id, &resolved[neighbor_id].1))
                .collect();
            cell
        })
        .collect()
}

/// Map a point's edge-sharing neighbors to cell ids, ascending
fn find_cell_neighbors(
    graph: &DualGraph,
    point_index: usize,
    cell_of_point: &[Option<usize>],
) -> Vec<usize> {
    let mut neighbor_list: Vec<usize> = graph
        .neighbors(point_index)
        .iter()
        .filter_map(|&neighbor| cell_of_point.get(neighbor).copied().flatten())
        .collect();
    neighbor_list.sort_unstable();
    neighbor_list.dedup();
    neighbor_list
}
