/// Line geometry drawn by the terminal renderer
use frame3d_core::Vector3;

/// A set of points in model space joined by straight edges.
#[derive(Debug, Clone, Default)]
pub struct Wireframe {
    pub vertices: Vec<Vector3>,
    pub edges: Vec<(usize, usize)>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the new vertex.
    pub fn add_vertex(&mut self, position: Vector3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.edges.push((from, to));
    }

    /// Endpoints of every edge. Edges naming a missing vertex are skipped.
    pub fn segments(&self) -> impl Iterator<Item = (Vector3, Vector3)> + '_ {
        self.edges
            .iter()
            .filter_map(|&(a, b)| Some((*self.vertices.get(a)?, *self.vertices.get(b)?)))
    }

    /// Append another wireframe, re-indexing its edges.
    pub fn merge(&mut self, other: &Wireframe) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.edges
            .extend(other.edges.iter().map(|&(a, b)| (a + offset, b + offset)));
    }

    /// An axis-aligned cube centred on the origin.
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut wireframe = Self::new();

        // Vertex index bits select +x, +y, +z.
        for i in 0..8 {
            let pick = |bit: usize| if i & bit != 0 { half } else { -half };
            wireframe.add_vertex(Vector3::new(pick(1), pick(2), pick(4)));
        }
        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    wireframe.add_edge(i, i | bit);
                }
            }
        }
        wireframe
    }

    /// Three lines from the origin along +X, +Y and +Z.
    pub fn axes(length: f32) -> Self {
        let mut wireframe = Self::new();
        let origin = wireframe.add_vertex(Vector3::ZERO);
        for axis in [Vector3::UNIT_X, Vector3::UNIT_Y, Vector3::UNIT_Z] {
            let tip = wireframe.add_vertex(axis * length);
            wireframe.add_edge(origin, tip);
        }
        wireframe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cube_shape() {
        let cube = Wireframe::cube(2.0);
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.edges.len(), 12);

        for (a, b) in cube.segments() {
            assert_relative_eq!((b - a).length(), 2.0, epsilon = 1e-6);
        }
        assert!(cube.vertices.contains(&Vector3::new(1.0, 1.0, 1.0)));
        assert!(cube.vertices.contains(&Vector3::new(-1.0, -1.0, -1.0)));
    }

    #[test]
    fn test_axes() {
        let axes = Wireframe::axes(3.0);
        let tips: Vec<Vector3> = axes.segments().map(|(_, tip)| tip).collect();
        assert_eq!(
            tips,
            vec![
                Vector3::new(3.0, 0.0, 0.0),
                Vector3::new(0.0, 3.0, 0.0),
                Vector3::new(0.0, 0.0, 3.0)
            ]
        );
    }

    #[test]
    fn test_merge_reindexes_edges() {
        let mut scene = Wireframe::cube(1.0);
        scene.merge(&Wireframe::axes(1.0));
        assert_eq!(scene.vertices.len(), 12);
        assert_eq!(scene.edges.len(), 15);
        assert_eq!(scene.edges[12], (8, 9));
    }

    #[test]
    fn test_dangling_edge_is_skipped() {
        let mut wireframe = Wireframe::new();
        let a = wireframe.add_vertex(Vector3::ZERO);
        wireframe.add_edge(a, 5);
        assert_eq!(wireframe.segments().count(), 0);
    }
}
