//! Index-based mesh data structures.
//!
//! Points live in an arena (a plain slice) and everything else refers to them
//! by index. Edges and triangles are stored in canonical ascending order so
//! that "same edge" and "same triangle" are exact integer comparisons.

use super::traits::CoordinateScalar;
use std::collections::BTreeMap;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T: CoordinateScalar = f64> {
    /// Horizontal coordinate
    pub x: T,
    /// Vertical coordinate
    pub y: T,
}

impl<T: CoordinateScalar> Point<T> {
    /// Create a new point
    #[must_use]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: CoordinateScalar> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

/// An undirected edge, endpoints stored smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(usize, usize);

impl Edge {
    /// Create an edge in canonical order
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a < b { Self(a, b) } else { Self(b, a) }
    }

    /// The two endpoint indices, smaller first
    #[must_use]
    pub const fn endpoints(&self) -> (usize, usize) {
        (self.0, self.1)
    }

    /// Whether `v` is one of the endpoints
    #[must_use]
    pub const fn contains(&self, v: usize) -> bool {
        self.0 == v || self.1 == v
    }
}

/// A triangle as a sorted triple of point indices.
///
/// The order carries no geometric meaning (it is not an orientation); it only
/// makes identity and set membership exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triangle([usize; 3]);

impl Triangle {
    /// Create a triangle in canonical order
    #[must_use]
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        let mut vertices = [a, b, c];
        vertices.sort_unstable();
        Self(vertices)
    }

    /// Vertex indices in ascending order
    #[must_use]
    pub const fn vertices(&self) -> [usize; 3] {
        self.0
    }

    /// The three edges of the triangle
    #[must_use]
    pub const fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.0;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(a, c)]
    }

    /// Whether `v` is a vertex of this triangle
    #[must_use]
    pub fn contains(&self, v: usize) -> bool {
        self.0.contains(&v)
    }

    /// Whether both endpoints of `edge` are vertices of this triangle
    #[must_use]
    pub fn has_edge(&self, edge: Edge) -> bool {
        let (a, b) = edge.endpoints();
        self.contains(a) && self.contains(b)
    }

    /// The vertex not on `edge`, if the edge belongs to this triangle
    #[must_use]
    pub fn opposite(&self, edge: Edge) -> Option<usize> {
        if !self.has_edge(edge) {
            return None;
        }
        self.0.iter().copied().find(|&v| !edge.contains(v))
    }
}

/// A triangulation over an owned copy of its input points
#[derive(Debug, Clone)]
pub struct Triangulation<T: CoordinateScalar = f64> {
    points: Vec<Point<T>>,
    triangles: Vec<Triangle>,
}

impl<T: CoordinateScalar> Triangulation<T> {
    /// Create a triangulation; triangles are kept sorted
    #[must_use]
    pub fn new(points: Vec<Point<T>>, mut triangles: Vec<Triangle>) -> Self {
        triangles.sort_unstable();
        Self { points, triangles }
    }

    /// Create an empty triangulation over `points`
    #[must_use]
    pub const fn empty(points: Vec<Point<T>>) -> Self {
        Self {
            points,
            triangles: Vec::new(),
        }
    }

    /// The input points
    #[must_use]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// The triangles, in canonical order
    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of input points
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Get the number of triangles
    #[must_use]
    pub const fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the triangulation has no triangles
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Coordinates of a triangle's corners
    #[must_use]
    pub fn triangle_points(&self, triangle: &Triangle) -> [Point<T>; 3] {
        triangle.vertices().map(|v| self.points[v])
    }

    /// Every edge with the number of triangles using it
    #[must_use]
    pub fn edges(&self) -> BTreeMap<Edge, usize> {
        let mut edges = BTreeMap::new();
        for triangle in &self.triangles {
            for edge in triangle.edges() {
                *edges.entry(edge).or_insert(0) += 1;
            }
        }
        edges
    }

    /// Edges used by exactly one triangle
    #[must_use]
    pub fn hull_edges(&self) -> Vec<Edge> {
        self.edges()
            .into_iter()
            .filter_map(|(edge, count)| (count == 1).then_some(edge))
            .collect()
    }

    /// Edges used by exactly two triangles
    #[must_use]
    pub fn interior_edges(&self) -> Vec<Edge> {
        self.edges()
            .into_iter()
            .filter_map(|(edge, count)| (count == 2).then_some(edge))
            .collect()
    }

    /// Get the number of distinct edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Euler characteristic V - E + F over the vertices actually used.
    ///
    /// A triangulated disk has characteristic 1.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    pub fn euler_characteristic(&self) -> i32 {
        let mut used: Vec<usize> = self.triangles.iter().flat_map(Triangle::vertices).collect();
        used.sort_unstable();
        used.dedup();
        let v = used.len() as i32;
        let e = self.edge_count() as i32;
        let f = self.triangle_count() as i32;
        v - e + f
    }

    /// Sum of triangle areas
    #[must_use]
    pub fn area(&self) -> T {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = self.triangle_points(t);
                super::operations::triangle_area(a, b, c)
            })
            .fold(T::zero(), |acc, area| acc + area)
    }

    /// Whether both triangulations contain exactly the same triangles
    #[must_use]
    pub fn same_triangles(&self, other: &Self) -> bool {
        self.triangles == other.triangles
    }

    /// Number of triangles present in exactly one of the two triangulations
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> usize {
        let only_self = self
            .triangles
            .iter()
            .filter(|t| other.triangles.binary_search(t).is_err())
            .count();
        let only_other = other
            .triangles
            .iter()
            .filter(|t| self.triangles.binary_search(t).is_err())
            .count();
        only_self + only_other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square_split() -> Triangulation {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        Triangulation::new(points, vec![Triangle::new(2, 1, 0), Triangle::new(0, 2, 3)])
    }

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        assert_eq!(Edge::new(5, 2).endpoints(), (2, 5));
        assert!(Edge::new(1, 4).contains(4));
        assert!(!Edge::new(1, 4).contains(2));
    }

    #[test]
    fn test_triangle_is_canonical() {
        let t = Triangle::new(7, 3, 5);
        assert_eq!(t.vertices(), [3, 5, 7]);
        assert_eq!(t, Triangle::new(5, 7, 3));
    }

    #[test]
    fn test_triangle_edges_and_opposite() {
        let t = Triangle::new(0, 1, 2);
        assert_eq!(t.edges().len(), 3);
        assert!(t.has_edge(Edge::new(2, 0)));
        assert_eq!(t.opposite(Edge::new(0, 1)), Some(2));
        assert_eq!(t.opposite(Edge::new(0, 3)), None);
    }

    #[test]
    fn test_triangulation_sorted() {
        let tri = unit_square_split();
        assert_eq!(
            tri.triangles(),
            &[Triangle::new(0, 1, 2), Triangle::new(0, 2, 3)]
        );
    }

    #[test]
    fn test_edge_classification() {
        let tri = unit_square_split();
        assert_eq!(tri.edge_count(), 5);
        assert_eq!(tri.interior_edges(), vec![Edge::new(0, 2)]);
        assert_eq!(tri.hull_edges().len(), 4);
    }

    #[test]
    fn test_euler_characteristic() {
        assert_eq!(unit_square_split().euler_characteristic(), 1);
    }

    #[test]
    fn test_area() {
        assert_relative_eq!(unit_square_split().area(), 1.0);
    }

    #[test]
    fn test_same_triangles_and_difference() {
        let a = unit_square_split();
        let b = Triangulation::new(
            a.points().to_vec(),
            vec![Triangle::new(0, 1, 3), Triangle::new(1, 2, 3)],
        );
        assert!(a.same_triangles(&a.clone()));
        assert!(!a.same_triangles(&b));
        assert_eq!(a.symmetric_difference(&b), 4);
    }

    #[test]
    fn test_empty_triangulation() {
        let tri: Triangulation = Triangulation::empty(vec![Point::new(0.0, 0.0)]);
        assert!(tri.is_empty());
        assert_eq!(tri.vertex_count(), 1);
        assert_eq!(tri.edge_count(), 0);
        assert_eq!(tri.euler_characteristic(), 0);
    }

    #[test]
    fn test_point_from_tuple() {
        let p: Point<f32> = (1.5, -2.0).into();
        assert_relative_eq!(p.x, 1.5);
        assert_relative_eq!(p.y, -2.0);
    }
}
