//! Point location: which cell is under a coordinate
//!
//! A point lies in the Voronoi cell of its nearest generator, so location is a
//! nearest-neighbor query over cell sites. With the default `spatial-index`
//! feature this is a KD-tree lookup; without it, a linear scan.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

use crate::geometry::Point;

/// Nearest-site lookup over cell generators
///
/// # Performance
///
/// - Construction: O(n log n) with the KD-tree, O(n) otherwise
/// - Query: O(log n) with the KD-tree, O(n) otherwise
#[derive(Clone)]
pub struct SpatialIndex {
    #[cfg(feature = "spatial-index")]
    tree: Option<ImmutableKdTree<f64, usize, 2, 32>>,
    #[cfg(not(feature = "spatial-index"))]
    sites: Vec<Point>,
}

impl SpatialIndex {
    /// Build the index from cell sites; the item for `sites[i]` is `i`
    ///
    /// # Arguments
    ///
    /// * `sites` - Cell generators, indexed by cell ID
    ///
    /// # Performance
    ///
    /// O(n log n) with the KD-tree. An empty slice builds no tree at all.
    ///
    /// # Example
    ///
    /// ```
    /// use voronoi_tessellation::{Point, SpatialIndex};
    ///
    /// let sites = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
    /// let index = SpatialIndex::new(&sites);
    /// assert_eq!(index.find_nearest(Point::new(0.9, 0.1)), Some(1));
    /// assert_eq!(SpatialIndex::new(&[]).find_nearest(Point::ZERO), None);
    /// ```
    pub fn new(sites: &[Point]) -> Self {
        #[cfg(feature = "spatial-index")]
        {
            let tree = if sites.is_empty() {
                None
            } else {
                let points: Vec<[f64; 2]> = sites.iter().map(|s| [s.x, s.y]).collect();
                Some(ImmutableKdTree::new_from_slice(&points))
            };
            Self { tree }
        }

        #[cfg(not(feature = "spatial-index"))]
        {
            Self {
                sites: sites.to_vec(),
            }
        }
    }

    /// Index of the nearest site
    ///
    /// Queries outside the bounds still resolve to the nearest site. Ties go
    /// to whichever site the search visits first.
    ///
    /// # Arguments
    ///
    /// * `position` - Query point in diagram coordinates
    ///
    /// # Returns
    ///
    /// The cell ID owning `position`, or `None` when the index is empty.
    ///
    /// # Performance
    ///
    /// O(log n) with the KD-tree, O(n) linear scan otherwise
    pub fn find_nearest(&self, position: Point) -> Option<usize> {
        #[cfg(feature = "spatial-index")]
        {
            let tree = self.tree.as_ref()?;
            let result = tree.nearest_one::<SquaredEuclidean>(&[position.x, position.y]);
            Some(result.item as usize)
        }

        #[cfg(not(feature = "spatial-index"))]
        {
            self.sites
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    a.distance_squared(position)
                        .total_cmp(&b.distance_squared(position))
                })
                .map(|(i, _)| i)
        }
    }
}

impl std::fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("kd_tree", &cfg!(feature = "spatial-index"))
            .finish()
    }
}
