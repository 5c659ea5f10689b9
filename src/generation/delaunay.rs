//! Delaunay dual graph over a planar point set
//!
//! A thin adapter around `delaunator`. The triangulation supplies the Delaunay
//! neighbors of every point; a point's Voronoi cell is then the bounding
//! rectangle cut by the bisector half-plane of each of those neighbors, which
//! handles hull cells without any infinite-ray bookkeeping.
//!
//! Delaunay adjacency is wider than cell adjacency: the dual edge of a long
//! hull edge can lie entirely outside the rectangle. Cell neighbors are
//! therefore read back from the clipped polygons, keeping only pairs whose
//! shared bisector leaves an edge of positive length on both cells.

use std::collections::HashSet;

use delaunator::triangulate;

use crate::geometry::{clip_half_plane, merge_close_vertices, signed_area, Bounds, Point, Polygon};

/// Cells with area at or below this fraction of the bounds area are dropped
const AREA_EPSILON: f64 = 1e-12;

/// Clip vertices closer than this fraction of the bounds diagonal are merged
const VERTEX_MERGE_EPSILON: f64 = 1e-12;

/// Bisector edges must be longer than this fraction of the bounds diagonal,
/// and their endpoints this close to the bisector, to count as shared
const SHARED_EDGE_EPSILON: f64 = 1e-9;

/// Delaunay dual graph with per-point cell polygons and neighbor lists
///
/// Mirrors the handle a triangulation service hands out: build it once, query
/// `cell_polygon` and `neighbors` per point, mutate points in place and call
/// `update` to recompute.
#[derive(Debug, Clone)]
pub struct DualGraph {
    points: Vec<Point>,
    bounds: Bounds,
    /// Delaunay (or line-order) neighbors per point, ascending
    delaunay: Vec<Vec<usize>>,
    /// Neighbors whose clipped cell shares an edge with this one, ascending
    neighbors: Vec<Vec<usize>>,
    polygons: Vec<Option<Polygon>>,
    triangle_count: usize,
}

impl DualGraph {
    /// Triangulate `points` and clip cells to `bounds`
    pub fn new(points: Vec<Point>, bounds: Bounds) -> Self {
        let mut graph = Self {
            points,
            bounds,
            delaunay: Vec::new(),
            neighbors: Vec::new(),
            polygons: Vec::new(),
            triangle_count: 0,
        };
        graph.update();
        graph
    }

    /// Recompute the triangulation after the points were mutated in place
    ///
    /// Rebuilds the Delaunay adjacency, every clipped cell polygon and the
    /// edge-sharing neighbor lists in one pass.
    pub fn update(&mut self) {
        let adjacency = build_adjacency(&self.points);
        self.delaunay = adjacency.neighbors;
        self.triangle_count = adjacency.triangle_count;

        self.polygons = (0..self.points.len())
            .map(|i| {
                if adjacency.live[i] {
                    self.clip_cell(i)
                } else {
                    None
                }
            })
            .collect();
        self.neighbors = self.edge_sharing_neighbors();
    }

    /// Current generators, index-aligned with every per-point query
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Mutable access to the generators; call [`DualGraph::update`] afterwards
    #[inline]
    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Consume the graph, keeping only the (relaxed) generators
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Rectangle every cell is clipped to
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of Delaunay triangles (zero for collinear or tiny inputs)
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Points whose clipped cell shares a boundary edge with the cell of
    /// `index`, ascending
    ///
    /// Empty for unknown indices and for points without a cell. The relation
    /// is symmetric.
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.neighbors
            .get(index)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Raw Delaunay (or line-order) neighbors of `index`, ascending
    ///
    /// A superset of [`DualGraph::neighbors`]: it also holds hull pairs whose
    /// cells only meet outside the bounds.
    pub fn delaunay_neighbors(&self, index: usize) -> &[usize] {
        self.delaunay
            .get(index)
            .map(|n| n.as_slice())
            .unwrap_or(&[])
    }

    /// Voronoi cell of `index`, clipped to the bounds, counter-clockwise
    ///
    /// Returns `None` when the cell cannot be resolved: the point is a
    /// duplicate, has a non-finite coordinate, or its clipped region is empty
    /// or has (numerically) zero area.
    pub fn cell_polygon(&self, index: usize) -> Option<Polygon> {
        self.polygons.get(index).cloned().flatten()
    }

    fn clip_cell(&self, index: usize) -> Option<Polygon> {
        let site = self.points[index];
        let mut polygon = self.bounds.corners();
        for &other_index in &self.delaunay[index] {
            let other = self.points[other_index];
            let midpoint = (site + other) * 0.5;
            polygon = clip_half_plane(&polygon, midpoint, other - site);
            if polygon.is_empty() {
                return None;
            }
        }

        let polygon = merge_close_vertices(polygon, VERTEX_MERGE_EPSILON * self.bounds.diagonal());
        if polygon.len() < 3 || signed_area(&polygon) <= AREA_EPSILON * self.bounds.area() {
            return None;
        }
        Some(polygon)
    }

    /// Whether some edge of the cell of `index` lies on its bisector with
    /// `other`
    fn has_bisector_edge(&self, index: usize, other: usize) -> bool {
        let Some(polygon) = &self.polygons[index] else {
            return false;
        };
        let site = self.points[index];
        let normal = (self.points[other] - site).normalize_or_zero();
        if normal == Point::ZERO {
            return false;
        }
        let midpoint = (site + self.points[other]) * 0.5;
        let tolerance = SHARED_EDGE_EPSILON * self.bounds.diagonal();
        let on_bisector = |p: Point| (p - midpoint).dot(normal).abs() <= tolerance;

        (0..polygon.len()).any(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            a.distance(b) > tolerance && on_bisector(a) && on_bisector(b)
        })
    }

    /// Delaunay pairs whose bisector survives as an edge of both cells
    fn edge_sharing_neighbors(&self) -> Vec<Vec<usize>> {
        let mut neighbors = vec![Vec::new(); self.points.len()];
        for (i, candidates) in self.delaunay.iter().enumerate() {
            for &j in candidates.iter().filter(|&&j| j > i) {
                if self.has_bisector_edge(i, j) && self.has_bisector_edge(j, i) {
                    neighbors[i].push(j);
                    neighbors[j].push(i);
                }
            }
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }
        neighbors
    }
}

struct Adjacency {
    neighbors: Vec<Vec<usize>>,
    live: Vec<bool>,
    triangle_count: usize,
}

#[inline]
fn next_halfedge(edge: usize) -> usize {
    if edge % 3 == 2 {
        edge - 2
    } else {
        edge + 1
    }
}

/// Key for exact-coordinate deduplication (`-0.0` folds onto `0.0`)
fn coordinate_key(p: Point) -> (u64, u64) {
    ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits())
}

/// Indices of finite points, keeping only the first of any exact duplicates
fn distinct_finite_points(points: &[Point]) -> Vec<usize> {
    let mut seen = HashSet::with_capacity(points.len());
    (0..points.len())
        .filter(|&i| points[i].is_finite() && seen.insert(coordinate_key(points[i])))
        .collect()
}

/// Delaunay adjacency, falling back to line order when nothing triangulates
fn build_adjacency(points: &[Point]) -> Adjacency {
    let n = points.len();
    let distinct = distinct_finite_points(points);

    if distinct.len() >= 3 {
        let input: Vec<delaunator::Point> = distinct
            .iter()
            .map(|&i| delaunator::Point {
                x: points[i].x,
                y: points[i].y,
            })
            .collect();
        let triangulation = triangulate(&input);

        if !triangulation.triangles.is_empty() {
            let mut neighbors = vec![Vec::new(); n];
            // Every edge, hull edges included, has at least one half-edge.
            for edge in 0..triangulation.triangles.len() {
                let a = distinct[triangulation.triangles[edge]];
                let b = distinct[triangulation.triangles[next_halfedge(edge)]];
                neighbors[a].push(b);
                neighbors[b].push(a);
            }
            for list in &mut neighbors {
                list.sort_unstable();
                list.dedup();
            }
            let live = neighbors.iter().map(|list| !list.is_empty()).collect();
            return Adjacency {
                neighbors,
                live,
                triangle_count: triangulation.triangles.len() / 3,
            };
        }

        tracing::debug!(points = distinct.len(), "point set is collinear, linking along the line");
    }

    link_along_line(points, &distinct)
}

/// Adjacency for point sets without triangles: consecutive points along their
/// common line are neighbors
fn link_along_line(points: &[Point], distinct: &[usize]) -> Adjacency {
    let n = points.len();
    let mut neighbors = vec![Vec::new(); n];
    let mut live = vec![false; n];

    let Some(&first) = distinct.first() else {
        return Adjacency {
            neighbors,
            live,
            triangle_count: 0,
        };
    };

    let origin = points[first];
    let far = distinct
        .iter()
        .map(|&i| points[i])
        .max_by(|a, b| a.distance_squared(origin).total_cmp(&b.distance_squared(origin)))
        .unwrap_or(origin);
    let direction = far - origin;

    let mut order = distinct.to_vec();
    order.sort_by(|&a, &b| {
        let pa = (points[a] - origin).dot(direction);
        let pb = (points[b] - origin).dot(direction);
        pa.total_cmp(&pb).then(a.cmp(&b))
    });

    for window in order.windows(2) {
        neighbors[window[0]].push(window[1]);
        neighbors[window[1]].push(window[0]);
    }
    for &index in &order {
        live[index] = true;
        neighbors[index].sort_unstable();
    }

    Adjacency {
        neighbors,
        live,
        triangle_count: 0,
    }
}
