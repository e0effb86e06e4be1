//! Coordinate axes with tick marks
use crate::matrix::Matrix;
use crate::shape::Surface;

/// A 3d set of axes drawn as a line list: the three axis lines over a
/// min/max box, `scale` tick marks on each side of every axis, and a small
/// plus marker past each positive end.
///
/// Axes are drawn in world space with the projection matrix only.
#[derive(Debug, Clone)]
pub struct Axes {
    vertices: Vec<[f32; 3]>,
    color: [f32; 4],
}

impl Axes {
    /// Builds the axes line list for the given extents and tick count.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
        min_z: f32,
        max_z: f32,
        scale: u16,
    ) -> Self {
        let mut vertices = vec![
            [min_x, 0.0, 0.0],
            [max_x, 0.0, 0.0],
            [0.0, min_y, 0.0],
            [0.0, max_y, 0.0],
            [0.0, 0.0, min_z],
            [0.0, 0.0, max_z],
        ];

        // Tick marks, `scale` per side on every axis.
        let length_x = (max_x - min_x) / 120.0;
        let length_y = (max_y - min_y) / 120.0;
        let width_x = (max_x - min_x) / (scale as f32 * 2.0);
        let width_y = (max_y - min_y) / (scale as f32 * 2.0);
        let width_z = (max_z - min_z) / (scale as f32 * 2.0);
        for i in 1..=scale {
            let i = i as f32;
            vertices.extend_from_slice(&[
                [width_x * i, -length_y, 0.0],
                [width_x * i, length_y, 0.0],
                [-width_x * i, -length_y, 0.0],
                [-width_x * i, length_y, 0.0],
                //
                [-length_x, width_y * i, 0.0],
                [length_x, width_y * i, 0.0],
                [-length_x, -width_y * i, 0.0],
                [length_x, -width_y * i, 0.0],
                //
                [0.0, -length_y, width_z * i],
                [0.0, length_y, width_z * i],
                [0.0, -length_y, -width_z * i],
                [0.0, length_y, -width_z * i],
            ]);
        }

        // Plus markers past the positive ends.
        let offset = 0.06;
        let tl = 0.05;
        let br = 0.01;
        let mid = 0.03;
        vertices.extend_from_slice(&[
            [max_x + offset, br, mid],
            [max_x + offset, tl, mid],
            [max_x + offset, mid, br],
            [max_x + offset, mid, tl],
            //
            [br, max_y + offset, mid],
            [tl, max_y + offset, mid],
            [mid, max_y + offset, br],
            [mid, max_y + offset, tl],
            //
            [br, mid, max_z + offset],
            [tl, mid, max_z + offset],
            [mid, br, max_z + offset],
            [mid, tl, max_z + offset],
        ]);

        Self {
            vertices,
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }

    /// The raw line list; consecutive vertex pairs form segments.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Draws the axes onto `surface` through `projection`.
    pub fn draw(&self, surface: &mut dyn Surface, projection: &Matrix) {
        for pair in self.vertices.chunks_exact(2) {
            surface.stroke_line(
                projection.transform_point(pair[0]),
                projection.transform_point(pair[1]),
                self.color,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LineCounter(usize);

    impl Surface for LineCounter {
        fn fill_triangle(&mut self, _tri: [[f32; 4]; 3], _color: [f32; 4]) {
            panic!("axes never fill triangles");
        }

        fn stroke_line(&mut self, _a: [f32; 4], _b: [f32; 4], _color: [f32; 4]) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_vertex_count() {
        let axes = Axes::new(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 4);
        // 6 axis endpoints + 12 tick endpoints per scale step + 12 plus
        // marker endpoints.
        assert_eq!(axes.vertices().len(), 6 + 12 * 4 + 12);
        assert_eq!(axes.vertices().len() % 2, 0);
    }

    #[test]
    fn test_draw_emits_one_line_per_pair() {
        let axes = Axes::new(-2.0, 2.0, -2.0, 2.0, -2.0, 2.0, 5);
        let mut counter = LineCounter(0);
        axes.draw(&mut counter, &Matrix::new());
        assert_eq!(counter.0, axes.vertices().len() / 2);
    }

    #[test]
    fn test_axis_lines_span_extents() {
        let axes = Axes::new(-3.0, 4.0, -1.0, 2.0, -5.0, 6.0, 1);
        assert_eq!(axes.vertices()[0], [-3.0, 0.0, 0.0]);
        assert_eq!(axes.vertices()[1], [4.0, 0.0, 0.0]);
        assert_eq!(axes.vertices()[5], [0.0, 0.0, 6.0]);
    }
}
