//! Diagram: the immutable tessellation handed to renderers

use crate::cell::VoronoiCell;
use crate::config::TessellationConfig;
use crate::error::{Result, VoronoiError};
use crate::generation::{generate_cells, generate_raw_cells, GeneratedCells, LloydOptions, RelaxationStats};
use crate::geometry::{Bounds, Point};
use crate::spatial::SpatialIndex;

/// A complete relaxed Voronoi tessellation of a rectangle
///
/// A diagram is built once and never mutated. Resizing or regenerating builds
/// a new diagram; callers swap their reference to it wholesale, so a renderer
/// never observes a partially built diagram.
///
/// # Examples
///
/// ```
/// use voronoi_tessellation::*;
///
/// let config = TessellationConfigBuilder::new()
///     .seed(42)
///     .size(1.0, 1.0)
///     .unwrap()
///     .point_count(64)
///     .build()
///     .unwrap();
///
/// let diagram = Diagram::generate(&config);
/// println!("Generated {} cells", diagram.cell_count());
///
/// // Which cell is under the pointer?
/// if let Some(id) = diagram.locate(0.5, 0.5) {
///     let cell = &diagram.cells()[id];
///     println!("cell {} has {} neighbors", id, cell.neighbor_count());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    bounds: Bounds,

    /// Resolved cells (indexed by cell ID)
    cells: Vec<VoronoiCell>,

    /// All generators after relaxation, one per requested point
    points: Vec<Point>,

    stats: RelaxationStats,

    /// Nearest-site lookup over `cells[i].site`
    spatial_index: SpatialIndex,
}

impl Diagram {
    /// Generate a diagram from random generators
    ///
    /// Never fails: degenerate cells are dropped, so `cell_count()` may be
    /// smaller than `config.point_count`.
    pub fn generate(config: &TessellationConfig) -> Self {
        let generated = generate_raw_cells(config);
        Self::from_generated(config.bounds(), generated)
    }

    /// Generate a diagram from explicit generator points
    ///
    /// # Errors
    ///
    /// Returns `NonFinitePoint` if any coordinate is NaN or infinite.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_tessellation::*;
    ///
    /// let points = vec![Point::new(0.25, 0.5), Point::new(0.75, 0.5)];
    /// let bounds = Bounds::new(1.0, 1.0).unwrap();
    /// let diagram = Diagram::from_points(points, bounds, LloydOptions::fixed(0)).unwrap();
    ///
    /// assert_eq!(diagram.cell_count(), 2);
    /// assert_eq!(diagram.get_neighbors(0), &[1]);
    /// ```
    pub fn from_points(points: Vec<Point>, bounds: Bounds, options: LloydOptions) -> Result<Self> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(VoronoiError::NonFinitePoint(index));
        }
        let generated = generate_cells(points, bounds, options);
        Ok(Self::from_generated(bounds, generated))
    }

    fn from_generated(bounds: Bounds, generated: GeneratedCells) -> Self {
        let GeneratedCells { cells, points, stats } = generated;

        let sites: Vec<Point> = cells.iter().map(|c| c.site).collect();
        let spatial_index = SpatialIndex::new(&sites);

        tracing::info!(
            cells = cells.len(),
            points = points.len(),
            iterations = stats.iterations_run,
            width = bounds.width,
            height = bounds.height,
            "tessellation built"
        );

        Self {
            bounds,
            cells,
            points,
            stats,
            spatial_index,
        }
    }

    /// Rectangle the diagram tiles
    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// All resolved cells, indexed by cell ID
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell] {
        &self.cells
    }

    /// Relaxed generators, one per requested point, including dropped ones
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of resolved cells (at most `points().len()`)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Relaxation summary for this build
    #[inline]
    pub fn stats(&self) -> &RelaxationStats {
        &self.stats
    }

    /// Get a cell by ID; `None` if out of bounds
    #[inline]
    pub fn get_cell(&self, id: usize) -> Option<&VoronoiCell> {
        self.cells.get(id)
    }

    /// IDs of the cells sharing an edge with `cell_id`, ascending; empty for
    /// an invalid ID
    pub fn get_neighbors(&self, cell_id: usize) -> &[usize] {
        self.cells
            .get(cell_id)
            .map(|c| c.neighbor_ids.as_slice())
            .unwrap_or(&[])
    }

    /// Sum of all cell areas
    ///
    /// Equals the bounds area up to floating-point error unless cells were
    /// dropped.
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|c| c.area()).sum()
    }

    /// ID of the cell containing `(x, y)`
    ///
    /// Coordinates outside the bounds resolve to the nearest cell. Returns
    /// `None` only when the diagram has no cells.
    pub fn locate(&self, x: f64, y: f64) -> Option<usize> {
        self.locate_point(Point::new(x, y))
    }

    /// [`Diagram::locate`] for a [`Point`]
    pub fn locate_point(&self, position: Point) -> Option<usize> {
        self.spatial_index.find_nearest(position)
    }

    /// Cells reachable from `center_id` in at most `hops` steps across
    /// shared edges, ascending
    ///
    /// Includes the center cell. Returns an empty vec if `center_id` is
    /// invalid.
    ///
    /// # Arguments
    ///
    /// * `center_id` - Cell the search starts from
    /// * `hops` - Maximum number of shared-edge crossings
    ///
    /// # Example
    ///
    /// ```
    /// # use voronoi_tessellation::*;
    /// # let config = TessellationConfigBuilder::new().seed(1).point_count(100).build().unwrap();
    /// # let diagram = Diagram::generate(&config);
    /// let nearby_cells = diagram.find_cells_within_radius(0, 2);
    /// assert!(nearby_cells.contains(&0));
    /// ```
    pub fn find_cells_within_radius(&self, center_id: usize, hops: usize) -> Vec<usize> {
        if center_id >= self.cells.len() {
            return vec![];
        }

        let mut reached = vec![false; self.cells.len()];
        reached[center_id] = true;
        let mut frontier = vec![center_id];

        for _ in 0..hops {
            if frontier.is_empty() {
                break;
            }
            frontier = frontier
                .iter()
                .flat_map(|&id| self.get_neighbors(id))
                .copied()
                .filter(|&id| !std::mem::replace(&mut reached[id], true))
                .collect();
        }

        (0..reached.len()).filter(|&id| reached[id]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TessellationConfigBuilder;

    fn unit_bounds() -> Bounds {
        Bounds::new(1.0, 1.0).unwrap()
    }

    fn small_config(seed: u64) -> TessellationConfig {
        TessellationConfigBuilder::new()
            .seed(seed)
            .size(1.0, 1.0)
            .unwrap()
            .point_count(200)
            .build()
            .unwrap()
    }

    #[test]
    fn test_generation() {
        let diagram = Diagram::generate(&small_config(42));

        assert!(diagram.cell_count() > 0);
        assert!(diagram.cell_count() <= 200);
        assert_eq!(diagram.points().len(), 200);
        assert_eq!(diagram.stats().iterations_run, 6);
        assert!((diagram.total_area() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Diagram::generate(&small_config(7));
        let b = Diagram::generate(&small_config(7));
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.points(), b.points());
    }

    #[test]
    fn test_quadrant_scenario() {
        let points = vec![
            Point::new(0.25, 0.25),
            Point::new(0.75, 0.25),
            Point::new(0.25, 0.75),
            Point::new(0.75, 0.75),
        ];
        let diagram = Diagram::from_points(points.clone(), unit_bounds(), LloydOptions::fixed(0)).unwrap();

        assert_eq!(diagram.cell_count(), 4);
        for (cell, generator) in diagram.cells().iter().zip(&points) {
            assert!((cell.area() - 0.25).abs() < 1e-9);
            assert!((cell.centroid - *generator).length() < 1e-9);
            assert!((cell.inner_circle_radius - 0.25).abs() < 1e-9);
        }
    }

    #[test]
    fn test_two_points_are_mutual_neighbors() {
        let points = vec![Point::new(0.2, 0.3), Point::new(0.8, 0.7)];
        let diagram = Diagram::from_points(points, unit_bounds(), LloydOptions::default()).unwrap();

        assert_eq!(diagram.cell_count(), 2);
        assert_eq!(diagram.get_neighbors(0), &[1]);
        assert_eq!(diagram.get_neighbors(1), &[0]);
        assert_eq!(diagram.cells()[0].neighbors.len(), 1);
        assert_eq!(diagram.cells()[0].neighbors[0].points, diagram.cells()[1].points);
    }

    #[test]
    fn test_empty_and_single() {
        let empty = Diagram::from_points(Vec::new(), unit_bounds(), LloydOptions::default()).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.locate(0.5, 0.5), None);
        assert!(empty.find_cells_within_radius(0, 3).is_empty());

        let single = Diagram::from_points(vec![Point::new(0.1, 0.9)], unit_bounds(), LloydOptions::default()).unwrap();
        assert_eq!(single.cell_count(), 1);
        assert_eq!(single.locate(0.5, 0.5), Some(0));
        assert!((single.total_area() - 1.0).abs() < 1e-12);
        // The sole generator relaxes to the center of the rectangle
        assert!((single.points()[0] - Point::new(0.5, 0.5)).length() < 1e-12);
    }

    #[test]
    fn test_rejects_non_finite_points() {
        let points = vec![Point::new(0.5, 0.5), Point::new(f64::NAN, 0.2)];
        let result = Diagram::from_points(points, unit_bounds(), LloydOptions::default());
        assert_eq!(result.unwrap_err(), VoronoiError::NonFinitePoint(1));
    }

    #[test]
    fn test_locate_centroid_round_trip() {
        let diagram = Diagram::generate(&small_config(3));
        for cell in diagram.cells() {
            assert_eq!(diagram.locate(cell.centroid.x, cell.centroid.y), Some(cell.id));
        }
    }

    #[test]
    fn test_locate_out_of_range() {
        let diagram = Diagram::generate(&small_config(5));
        let id = diagram.locate(-10.0, 0.5).unwrap();
        assert!(id < diagram.cell_count());
    }

    #[test]
    fn test_get_cell() {
        let diagram = Diagram::generate(&small_config(42));
        assert!(diagram.get_cell(0).is_some());
        assert!(diagram.get_cell(diagram.cell_count()).is_none());
        assert!(diagram.get_neighbors(999_999).is_empty());
    }

    fn hull_pair_points() -> Vec<Point> {
        vec![
            Point::new(0.1, 0.01),
            Point::new(0.5, 0.3),
            Point::new(0.9, 0.01),
            Point::new(0.5, 0.9),
        ]
    }

    #[test]
    fn test_neighbors_are_cells_sharing_an_edge() {
        let diagram = Diagram::from_points(hull_pair_points(), unit_bounds(), LloydOptions::fixed(0)).unwrap();

        assert_eq!(diagram.cell_count(), 4);
        assert_eq!(diagram.get_neighbors(2), &[1]);
        assert!(!diagram.get_neighbors(0).contains(&2));
        assert!(!diagram.get_neighbors(3).contains(&2));
        assert_eq!(diagram.cells()[2].neighbors.len(), 1);
        assert_eq!(diagram.cells()[2].neighbors[0].id, 1);
    }

    #[test]
    fn test_find_cells_within_radius() {
        let diagram = Diagram::from_points(hull_pair_points(), unit_bounds(), LloydOptions::fixed(0)).unwrap();

        assert_eq!(diagram.find_cells_within_radius(2, 0), vec![2]);
        // Cell 2 only touches cell 1, so the far cells need a second hop
        assert_eq!(diagram.find_cells_within_radius(2, 1), vec![1, 2]);
        assert_eq!(diagram.find_cells_within_radius(2, 2), vec![0, 1, 2, 3]);
        assert_eq!(diagram.find_cells_within_radius(1, 1), vec![0, 1, 2, 3]);
        assert!(diagram.find_cells_within_radius(4, 1).is_empty());
    }

    #[test]
    fn test_find_cells_within_radius_grows_by_ring() {
        let diagram = Diagram::generate(&small_config(11));

        let ring1 = diagram.find_cells_within_radius(0, 1);
        let mut expected: Vec<usize> = diagram.get_neighbors(0).to_vec();
        expected.push(0);
        expected.sort_unstable();
        assert_eq!(ring1, expected);

        let ring2 = diagram.find_cells_within_radius(0, 2);
        assert!(ring2.len() > ring1.len());
        for &id in &ring2 {
            assert!(id == 0 || ring1.contains(&id) || diagram.get_neighbors(id).iter().any(|n| ring1.contains(n)));
        }
    }
}
