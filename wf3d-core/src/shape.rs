//! Renderable primitives and their placement in the world
use std::collections::{BTreeSet, HashMap};
use std::f32::consts::TAU;

use crate::camera::Camera;
use crate::error::GeometryError;
use crate::matrix::Matrix;
use crate::vector::Vector;

/// Deepest supported sphere subdivision (8 * 4^5 = 8192 triangles).
const MAX_SUBDIVISIONS: u8 = 5;

/// Most cylinder sides a tessellation will accept. Keeps the ring index
/// arithmetic (up to `2 * sides`) inside u16 with plenty of headroom.
const MAX_SIDES: u16 = 4096;

const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Drawing surface a shape renders onto.
///
/// Implementations receive raw clip-space positions (homogeneous, before
/// the perspective divide) and are responsible for the divide, viewport
/// mapping and depth handling. This is the seam between the math core and
/// whatever rasterizer or graphics API sits behind it.
pub trait Surface {
    /// Draws a filled triangle from three clip-space corners.
    fn fill_triangle(&mut self, tri: [[f32; 4]; 3], color: [f32; 4]);

    /// Draws a line segment between two clip-space endpoints.
    fn stroke_line(&mut self, a: [f32; 4], b: [f32; 4], color: [f32; 4]);
}

/// Something that can place itself in the world and draw itself.
pub trait Renderable {
    /// The model matrix placing the object into the world.
    fn model(&self) -> Matrix;

    /// Draws the object onto `surface` using the camera's current view and
    /// projection matrices.
    fn render(&self, surface: &mut dyn Surface, camera: &Camera);
}

/// Transform state shared by every shape: a translation, rotation and
/// scale triple, kept as prebuilt matrices alongside the raw values so the
/// originals can be read back.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    translated: Matrix,
    rotated: Matrix,
    scaled: Matrix,
    location: [f32; 3],
    orientation: [f32; 3],
    size: [f32; 3],
}

impl Placement {
    pub fn new() -> Self {
        Self {
            translated: Matrix::new(),
            rotated: Matrix::new(),
            scaled: Matrix::new(),
            location: [0.0; 3],
            orientation: [0.0; 3],
            size: [1.0; 3],
        }
    }

    /// Moves to the location `(x, y, z)`.
    pub fn move_to(&mut self, x: f32, y: f32, z: f32) {
        self.translated = Matrix::new().translate(x, y, z);
        self.location = [x, y, z];
    }

    /// Sets the orientation from three per-axis angles in degrees.
    pub fn orient(&mut self, tx: f32, ty: f32, tz: f32) {
        self.rotated = Matrix::new().rotate(tx, ty, tz, 0.0, 0.0, 0.0);
        self.orientation = [tx, ty, tz];
    }

    /// Sets the size as width, height and depth scale factors.
    pub fn resize(&mut self, w: f32, h: f32, d: f32) {
        self.scaled = Matrix::new().scale(w, h, d, 0.0, 0.0, 0.0);
        self.size = [w, h, d];
    }

    pub fn location(&self) -> [f32; 3] {
        self.location
    }

    pub fn orientation(&self) -> [f32; 3] {
        self.orientation
    }

    pub fn size(&self) -> [f32; 3] {
        self.size
    }

    /// Composes the model matrix: translation, then rotation, then scale,
    /// applied to the shape's base `world` matrix.
    pub fn model(&self, world: &Matrix) -> Matrix {
        self.translated
            .mult(&self.rotated)
            .mult(&self.scaled)
            .mult(world)
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new()
    }
}

/// A renderable primitive: vertex positions plus triangle and edge index
/// tables, per-vertex fill colors, and a placement.
///
/// The `world` matrix moves the raw vertex data into its default pose,
/// centered on the origin and fitting a unit box.
#[derive(Debug, Clone)]
pub struct Shape {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u16; 3]>,
    pub edges: Vec<[u16; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub edge_color: [f32; 4],
    /// When set, only the edges are drawn.
    pub wire: bool,
    world: Matrix,
    placement: Placement,
}

impl Shape {
    fn with_world(world: Matrix) -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            edges: Vec::new(),
            colors: Vec::new(),
            edge_color: BLACK,
            wire: false,
            world,
            placement: Placement::new(),
        }
    }

    /// A unit cube with a differently colored corner at each vertex.
    pub fn cube() -> Self {
        // Raw data spans [0, 1] on each axis with a corner on the origin;
        // the world matrix recenters it.
        let mut shape = Self::with_world(Matrix::new().translate(-0.5, -0.5, -0.5));
        shape.vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ];
        shape.triangles = vec![
            [0, 1, 5],
            [0, 5, 3], // bottom
            [2, 6, 7],
            [2, 7, 4], // top
            [3, 5, 7],
            [3, 7, 6], // front
            [0, 2, 4],
            [0, 4, 1], // back
            [1, 4, 7],
            [1, 7, 5], // right
            [0, 3, 6],
            [0, 6, 2], // left
        ];
        shape.edges = vec![
            [0, 1],
            [1, 4],
            [4, 2],
            [2, 0],
            [3, 6],
            [6, 7],
            [7, 5],
            [5, 3],
            [0, 3],
            [1, 5],
            [2, 6],
            [4, 7],
        ];
        shape.colors = vec![
            [0.0, 0.0, 0.0, 1.0], // black
            [1.0, 0.0, 0.0, 1.0], // red
            [0.0, 1.0, 0.0, 1.0], // green
            [0.0, 0.0, 1.0, 1.0], // blue
            [1.0, 1.0, 0.0, 1.0], // yellow
            [1.0, 0.0, 1.0, 1.0], // magenta
            [0.0, 1.0, 1.0, 1.0], // cyan
            [1.0, 1.0, 1.0, 1.0], // white
        ];
        shape
    }

    /// A regular tetrahedron with one color per vertex.
    pub fn tetra() -> Self {
        let mut shape = Self::with_world(Matrix::new().scale(0.5, 0.5, 0.5, 0.0, 0.0, 0.0));
        let s3 = 3.0f32.sqrt();
        let s6 = 6.0f32.sqrt();
        shape.vertices = vec![
            [1.0, -1.0 / s3, -1.0 / s6],
            [0.0, 2.0 / s3, -1.0 / s6],
            [0.0, 0.0, 3.0 / s6],
            [-1.0, -1.0 / s3, -1.0 / s6],
        ];
        shape.triangles = vec![[0, 1, 2], [1, 2, 3], [2, 3, 0], [3, 0, 1]];
        shape.edges = vec![[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];
        shape.colors = vec![
            [1.0, 0.0, 0.0, 1.0], // red
            [0.0, 1.0, 0.0, 1.0], // green
            [0.0, 0.0, 1.0, 1.0], // blue
            [1.0, 1.0, 0.0, 1.0], // yellow
        ];
        shape
    }

    /// A cylinder of diameter and height 1, tessellated with `sides`
    /// vertices per cap ring.
    pub fn cylinder(sides: u16) -> Result<Self, GeometryError> {
        if sides < 3 {
            return Err(GeometryError::TooFewSides(sides));
        }
        if sides > MAX_SIDES {
            return Err(GeometryError::TooManySides {
                got: sides,
                max: MAX_SIDES,
            });
        }

        let mut shape = Self::with_world(Matrix::new());
        let radius = 0.5;
        let theta = TAU / sides as f32;

        // Top ring winds clockwise, bottom ring counter-clockwise, so the
        // side quads pair bottom vertex i with top vertex (sides - i).
        for i in 0..sides {
            let angle = TAU - theta * i as f32;
            shape.vertices.push([radius * angle.cos(), 0.5, radius * angle.sin()]);
        }
        for i in 0..sides {
            let angle = theta * i as f32;
            shape
                .vertices
                .push([radius * angle.cos(), -0.5, radius * angle.sin()]);
        }

        // Cap fans.
        for i in 1..sides - 1 {
            shape.triangles.push([0, i, i + 1]);
            shape.triangles.push([sides, sides + i, sides + i + 1]);
        }

        // Side quads.
        for i in 0..sides {
            let b0 = sides + i;
            let b1 = sides + (i + 1) % sides;
            let t0 = (sides - i) % sides;
            let t1 = (2 * sides - i - 1) % sides;
            shape.triangles.push([b0, b1, t0]);
            shape.triangles.push([b1, t1, t0]);
        }

        // Wireframe: both rims plus one vertical per side.
        for i in 0..sides {
            shape.edges.push([i, (i + 1) % sides]);
            shape.edges.push([sides + i, sides + (i + 1) % sides]);
            shape.edges.push([sides + i, (sides - i) % sides]);
        }

        shape.colors = vec![[0.0, 0.2, 1.0, 1.0]; shape.vertices.len()];
        log::debug!(
            "tessellated cylinder: {} sides, {} triangles",
            sides,
            shape.triangles.len()
        );
        Ok(shape)
    }

    /// A sphere of diameter 1, built by subdividing an octahedron
    /// `subdivisions` times and pushing the new vertices onto the surface.
    pub fn sphere(subdivisions: u8) -> Result<Self, GeometryError> {
        if subdivisions > MAX_SUBDIVISIONS {
            return Err(GeometryError::SubdivisionTooDeep {
                got: subdivisions,
                max: MAX_SUBDIVISIONS,
            });
        }

        let mut shape = Self::with_world(Matrix::new());
        let r = 0.5;
        shape.vertices = vec![
            [r, 0.0, 0.0],
            [-r, 0.0, 0.0],
            [0.0, r, 0.0],
            [0.0, -r, 0.0],
            [0.0, 0.0, r],
            [0.0, 0.0, -r],
        ];
        shape.triangles = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];

        let mut midpoints: HashMap<(u16, u16), u16> = HashMap::new();
        for _ in 0..subdivisions {
            let mut next = Vec::with_capacity(shape.triangles.len() * 4);
            for [a, b, c] in shape.triangles.drain(..).collect::<Vec<_>>() {
                let ab = midpoint(&mut shape.vertices, &mut midpoints, a, b, r);
                let bc = midpoint(&mut shape.vertices, &mut midpoints, b, c, r);
                let ca = midpoint(&mut shape.vertices, &mut midpoints, c, a, r);
                next.push([a, ab, ca]);
                next.push([b, bc, ab]);
                next.push([c, ca, bc]);
                next.push([ab, bc, ca]);
            }
            shape.triangles = next;
        }

        shape.edges = edges_from_triangles(&shape.triangles);
        shape.colors = vec![[1.0, 0.5, 0.3, 1.0]; shape.vertices.len()];
        log::debug!(
            "tessellated sphere: depth {}, {} triangles",
            subdivisions,
            shape.triangles.len()
        );
        Ok(shape)
    }

    /// Moves the shape to the location `(x, y, z)`.
    pub fn move_to(&mut self, x: f32, y: f32, z: f32) {
        self.placement.move_to(x, y, z);
    }

    /// Rotates the shape by per-axis angles in degrees.
    pub fn orient(&mut self, tx: f32, ty: f32, tz: f32) {
        self.placement.orient(tx, ty, tz);
    }

    /// Resizes the shape by width, height and depth factors.
    pub fn resize(&mut self, w: f32, h: f32, d: f32) {
        self.placement.resize(w, h, d);
    }

    pub fn location(&self) -> [f32; 3] {
        self.placement.location()
    }

    pub fn orientation(&self) -> [f32; 3] {
        self.placement.orientation()
    }

    pub fn size(&self) -> [f32; 3] {
        self.placement.size()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }
}

impl Renderable for Shape {
    fn model(&self) -> Matrix {
        self.placement.model(&self.world)
    }

    fn render(&self, surface: &mut dyn Surface, camera: &Camera) {
        let mvp = camera
            .projection()
            .mult(&camera.view())
            .mult(&self.model());
        let clip: Vec<[f32; 4]> = self
            .vertices
            .iter()
            .map(|&v| mvp.transform_point(v))
            .collect();

        if !self.wire {
            for &[a, b, c] in &self.triangles {
                let color = average_color(
                    self.colors[a as usize],
                    self.colors[b as usize],
                    self.colors[c as usize],
                );
                surface.fill_triangle(
                    [clip[a as usize], clip[b as usize], clip[c as usize]],
                    color,
                );
            }
        }

        for &[a, b] in &self.edges {
            surface.stroke_line(clip[a as usize], clip[b as usize], self.edge_color);
        }
    }
}

/// Returns the index of the surface point halfway between vertices `a` and
/// `b`, inserting it if this edge has not been split yet.
fn midpoint(
    vertices: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(u16, u16), u16>,
    a: u16,
    b: u16,
    radius: f32,
) -> u16 {
    let key = (a.min(b), a.max(b));
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let va = vertices[a as usize];
    let vb = vertices[b as usize];
    let mid = Vector::new(
        (va[0] + vb[0]) * 0.5,
        (va[1] + vb[1]) * 0.5,
        (va[2] + vb[2]) * 0.5,
    )
    .normalize()
    .scale(radius);
    let idx = vertices.len() as u16;
    vertices.push([mid.x(), mid.y(), mid.z()]);
    cache.insert(key, idx);
    idx
}

/// Collects the unique undirected edges of a triangle list, in a
/// deterministic order.
fn edges_from_triangles(triangles: &[[u16; 3]]) -> Vec<[u16; 2]> {
    let mut set = BTreeSet::new();
    for &[a, b, c] in triangles {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            set.insert((u.min(v), u.max(v)));
        }
    }
    set.into_iter().map(|(u, v)| [u, v]).collect()
}

fn average_color(a: [f32; 4], b: [f32; 4], c: [f32; 4]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for i in 0..4 {
        out[i] = (a[i] + b[i] + c[i]) / 3.0;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    /// Records surface calls for inspection.
    #[derive(Default)]
    struct Recorder {
        triangles: Vec<([[f32; 4]; 3], [f32; 4])>,
        lines: Vec<([f32; 4], [f32; 4], [f32; 4])>,
    }

    impl Surface for Recorder {
        fn fill_triangle(&mut self, tri: [[f32; 4]; 3], color: [f32; 4]) {
            self.triangles.push((tri, color));
        }

        fn stroke_line(&mut self, a: [f32; 4], b: [f32; 4], color: [f32; 4]) {
            self.lines.push((a, b, color));
        }
    }

    #[test]
    fn test_placement_model_composition() {
        let mut placement = Placement::new();
        placement.move_to(1.0, 2.0, 3.0);
        placement.orient(0.0, 0.0, 90.0);
        placement.resize(2.0, 2.0, 2.0);
        let model = placement.model(&Matrix::new());

        // (1, 0, 0) scales to (2, 0, 0), rotates to (0, 2, 0), then
        // translates to (1, 4, 3).
        let p = model.transform_point([1.0, 0.0, 0.0]);
        assert!((p[0] - 1.0).abs() < EPS);
        assert!((p[1] - 4.0).abs() < EPS);
        assert!((p[2] - 3.0).abs() < EPS);
    }

    #[test]
    fn test_placement_readback() {
        let mut placement = Placement::new();
        assert_eq!(placement.size(), [1.0, 1.0, 1.0]);
        placement.move_to(1.0, 2.0, 3.0);
        placement.orient(10.0, 20.0, 30.0);
        placement.resize(4.0, 5.0, 6.0);
        assert_eq!(placement.location(), [1.0, 2.0, 3.0]);
        assert_eq!(placement.orientation(), [10.0, 20.0, 30.0]);
        assert_eq!(placement.size(), [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_cube_is_centered_unit_box() {
        let cube = Shape::cube();
        assert_eq!(cube.vertices.len(), 8);
        assert_eq!(cube.triangles.len(), 12);
        assert_eq!(cube.edges.len(), 12);
        assert_eq!(cube.colors.len(), 8);

        // The default model maps the raw corners into [-0.5, 0.5]^3.
        let model = cube.model();
        for &v in &cube.vertices {
            let p = model.transform_point(v);
            for coord in &p[..3] {
                assert!((coord.abs() - 0.5).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_tetra_tables() {
        let tetra = Shape::tetra();
        assert_eq!(tetra.vertices.len(), 4);
        assert_eq!(tetra.triangles.len(), 4);
        assert_eq!(tetra.edges.len(), 6);
        // All vertices are equidistant from each other.
        let d = |a: [f32; 3], b: [f32; 3]| {
            Vector::new(a[0] - b[0], a[1] - b[1], a[2] - b[2]).length()
        };
        let reference = d(tetra.vertices[0], tetra.vertices[1]);
        for &[a, b] in &tetra.edges {
            let dist = d(tetra.vertices[a as usize], tetra.vertices[b as usize]);
            assert!((dist - reference).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cylinder_tessellation_counts() {
        let sides = 8;
        let cylinder = Shape::cylinder(sides).unwrap();
        assert_eq!(cylinder.vertices.len(), 2 * sides as usize);
        // Two fans of (sides - 2) plus 2 triangles per side quad.
        assert_eq!(
            cylinder.triangles.len(),
            2 * (sides as usize - 2) + 2 * sides as usize
        );
        assert_eq!(cylinder.edges.len(), 3 * sides as usize);

        // Every vertex sits on the radius-0.5 cylinder surface.
        for &[x, y, z] in &cylinder.vertices {
            assert!(((x * x + z * z).sqrt() - 0.5).abs() < EPS);
            assert!((y.abs() - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn test_cylinder_rejects_degenerate_sides() {
        assert_eq!(
            Shape::cylinder(2).unwrap_err(),
            GeometryError::TooFewSides(2)
        );
    }

    #[test]
    fn test_cylinder_rejects_excessive_sides() {
        assert_eq!(
            Shape::cylinder(40_000).unwrap_err(),
            GeometryError::TooManySides {
                got: 40_000,
                max: 4096
            }
        );
        assert!(Shape::cylinder(4096).is_ok());
    }

    #[test]
    fn test_sphere_subdivision_counts() {
        let sphere = Shape::sphere(0).unwrap();
        assert_eq!(sphere.triangles.len(), 8);
        assert_eq!(sphere.vertices.len(), 6);

        let sphere = Shape::sphere(2).unwrap();
        assert_eq!(sphere.triangles.len(), 8 * 16);
        // All vertices lie on the radius-0.5 sphere.
        for &[x, y, z] in &sphere.vertices {
            assert!((Vector::new(x, y, z).length() - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn test_sphere_rejects_excessive_depth() {
        assert_eq!(
            Shape::sphere(6).unwrap_err(),
            GeometryError::SubdivisionTooDeep { got: 6, max: 5 }
        );
    }

    #[test]
    fn test_render_emits_triangles_and_edges() {
        let cube = Shape::cube();
        let camera = Camera::new();
        let mut recorder = Recorder::default();
        cube.render(&mut recorder, &camera);
        assert_eq!(recorder.triangles.len(), 12);
        assert_eq!(recorder.lines.len(), 12);
        // Edge color passes through untouched.
        assert_eq!(recorder.lines[0].2, BLACK);
    }

    #[test]
    fn test_wireframe_skips_fill() {
        let mut cube = Shape::cube();
        cube.wire = true;
        let camera = Camera::new();
        let mut recorder = Recorder::default();
        cube.render(&mut recorder, &camera);
        assert!(recorder.triangles.is_empty());
        assert_eq!(recorder.lines.len(), 12);
    }

    #[test]
    fn test_render_applies_placement() {
        let mut cube = Shape::cube();
        cube.wire = true;
        cube.move_to(0.0, 0.0, -10.0);
        let camera = Camera::new();
        let mut recorder = Recorder::default();
        cube.render(&mut recorder, &camera);
        // With identity view/projection the clip z carries the translation.
        for (a, b, _) in &recorder.lines {
            assert!(a[2] < -9.0 && b[2] < -9.0);
        }
    }
}
