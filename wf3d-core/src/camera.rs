//! Camera view and projection construction
use crate::matrix::Matrix;
use crate::vector::Vector;

/// A camera owning a view matrix and a projection matrix.
///
/// Both matrices start as the identity and are overwritten only by the
/// builder methods below, each of which stores the freshly built matrix and
/// returns it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    projection: Matrix,
    view: Matrix,
}

impl Camera {
    /// Creates a camera with identity view and projection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current view matrix.
    pub fn view(&self) -> Matrix {
        self.view
    }

    /// Returns the current projection matrix.
    pub fn projection(&self) -> Matrix {
        self.projection
    }

    /// Builds, stores and returns an orthographic projection mapping the
    /// box `[left, right] x [bottom, top] x [near, far]` to normalized
    /// device coordinates.
    ///
    /// Degenerate spans (`left == right` and so on) are a caller contract
    /// violation and propagate as non-finite values.
    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix {
        self.projection = Matrix::from_rows(&[
            2.0 / (right - left),
            0.0,
            0.0,
            -(right + left) / (right - left),
            //
            0.0,
            2.0 / (top - bottom),
            0.0,
            -(top + bottom) / (top - bottom),
            //
            0.0,
            0.0,
            -2.0 / (far - near),
            -(far + near) / (far - near),
            //
            0.0,
            0.0,
            0.0,
            1.0,
        ]);
        self.projection
    }

    /// Builds, stores and returns a perspective frustum projection. The
    /// caller must keep `near != far`, `right != left` and `top != bottom`.
    pub fn frustum(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Matrix {
        self.projection = Matrix::from_rows(&[
            2.0 * near / (right - left),
            0.0,
            (right + left) / (right - left),
            0.0,
            //
            0.0,
            2.0 * near / (top - bottom),
            (top + bottom) / (top - bottom),
            0.0,
            //
            0.0,
            0.0,
            -(far + near) / (far - near),
            -2.0 * far * near / (far - near),
            //
            0.0,
            0.0,
            -1.0,
            0.0,
        ]);
        self.projection
    }

    /// Builds, stores and returns a right-handed view matrix looking from
    /// `eye` toward `target`.
    ///
    /// The forward axis `n` points from the target to the eye; `up` must
    /// not be parallel to it or the basis degenerates.
    pub fn look_at(&mut self, eye: Vector, target: Vector, up: Vector) -> Matrix {
        let n = eye.subtract(&target).normalize();
        let u = up.cross(&n).normalize();
        let v = n.cross(&u).normalize();
        self.view = Self::assemble(u, v, n, eye);
        self.view
    }

    /// Builds, stores and returns a view matrix from the camera location
    /// and an explicit forward normal instead of a look-at target.
    ///
    /// `up` is projected onto the plane orthogonal to the normal via
    /// Gram-Schmidt before the basis is assembled.
    pub fn view_point(&mut self, location: Vector, view_normal: Vector, up: Vector) -> Matrix {
        let n = view_normal.normalize();
        let v = up.subtract(&n.scale(up.dot(&n))).normalize();
        let u = v.cross(&n).normalize();
        self.view = Self::assemble(u, v, n, location);
        self.view
    }

    /// Lays the basis vectors into the rotation rows and post-translates by
    /// the negated camera position.
    fn assemble(u: Vector, v: Vector, n: Vector, position: Vector) -> Matrix {
        let rotation = Matrix::from_rows(&[
            u.x(),
            u.y(),
            u.z(),
            0.0,
            //
            v.x(),
            v.y(),
            v.z(),
            0.0,
            //
            n.x(),
            n.y(),
            n.z(),
            0.0,
            //
            0.0,
            0.0,
            0.0,
            1.0,
        ]);
        rotation.translate(-position.x(), -position.y(), -position.z())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn basis_rows(view: &Matrix) -> [Vector; 3] {
        [
            Vector::new(view.value(0, 0), view.value(0, 1), view.value(0, 2)),
            Vector::new(view.value(1, 0), view.value(1, 1), view.value(1, 2)),
            Vector::new(view.value(2, 0), view.value(2, 1), view.value(2, 2)),
        ]
    }

    fn assert_orthonormal(view: &Matrix) {
        let [u, v, n] = basis_rows(view);
        assert!(u.dot(&v).abs() < EPS);
        assert!(u.dot(&n).abs() < EPS);
        assert!(v.dot(&n).abs() < EPS);
        assert!((u.length() - 1.0).abs() < EPS);
        assert!((v.length() - 1.0).abs() < EPS);
        assert!((n.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn test_defaults_to_identity() {
        let camera = Camera::new();
        assert_eq!(camera.view().data(), Matrix::new().data());
        assert_eq!(camera.projection().data(), Matrix::new().data());
    }

    #[test]
    fn test_ortho_maps_box_corners() {
        let mut camera = Camera::new();
        let proj = camera.ortho(-2.0, 2.0, -1.0, 1.0, 1.0, 11.0);
        assert_eq!(proj.data(), camera.projection().data());

        // (right, top, -near) maps to (1, 1, -1).
        let p = proj.transform_point([2.0, 1.0, -1.0]);
        assert!((p[0] - 1.0).abs() < EPS);
        assert!((p[1] - 1.0).abs() < EPS);
        assert!((p[2] + 1.0).abs() < EPS);
        // (left, bottom, -far) maps to (-1, -1, 1).
        let p = proj.transform_point([-2.0, -1.0, -11.0]);
        assert!((p[0] + 1.0).abs() < EPS);
        assert!((p[1] + 1.0).abs() < EPS);
        assert!((p[2] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_frustum_reference_values() {
        let mut camera = Camera::new();
        let proj = camera.frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);
        assert!((proj.value(0, 0) - 1.0).abs() < EPS);
        assert!((proj.value(1, 1) - 1.0).abs() < EPS);
        assert!((proj.value(2, 2) + 2.0).abs() < EPS);
        assert!((proj.value(2, 3) + 3.0).abs() < EPS);
        assert!((proj.value(3, 2) + 1.0).abs() < EPS);
        assert!(proj.value(3, 3).abs() < EPS);

        // A point on the near plane center projects to ndc z = -1 after
        // the perspective divide.
        let p = proj.transform_point([0.0, 0.0, -1.0]);
        assert!((p[2] / p[3] + 1.0).abs() < EPS);
    }

    #[test]
    fn test_look_at_basis_is_orthonormal() {
        let mut camera = Camera::new();
        let view = camera.look_at(
            Vector::new(3.0, 4.0, 5.0),
            Vector::new(-1.0, 0.5, 2.0),
            Vector::new(0.0, 1.0, 0.0),
        );
        assert_orthonormal(&view);
        assert_eq!(view.data(), camera.view().data());
    }

    #[test]
    fn test_look_at_places_target_in_front() {
        let mut camera = Camera::new();
        let view = camera.look_at(
            Vector::new(0.0, 0.0, 5.0),
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
        );
        // The origin ends up 5 units down the -z axis in view space.
        let p = view.transform_point([0.0, 0.0, 0.0]);
        assert!(p[0].abs() < EPS);
        assert!(p[1].abs() < EPS);
        assert!((p[2] + 5.0).abs() < EPS);
        // The eye maps to the view-space origin.
        let eye = view.transform_point([0.0, 0.0, 5.0]);
        assert!(eye[0].abs() < EPS && eye[1].abs() < EPS && eye[2].abs() < EPS);
    }

    #[test]
    fn test_view_point_basis_is_orthonormal() {
        let mut camera = Camera::new();
        let view = camera.view_point(
            Vector::new(1.0, 2.0, 3.0),
            Vector::new(0.3, -0.2, 0.9),
            Vector::new(0.0, 1.0, 0.0),
        );
        assert_orthonormal(&view);
    }

    #[test]
    fn test_view_point_matches_look_at_for_same_pose() {
        // Looking from (0, 0, 5) toward the origin is the same pose as a
        // view normal of +z from (0, 0, 5).
        let mut a = Camera::new();
        let mut b = Camera::new();
        let eye = Vector::new(0.0, 0.0, 5.0);
        let up = Vector::new(0.0, 1.0, 0.0);
        let look = a.look_at(eye, Vector::new(0.0, 0.0, 0.0), up);
        let point = b.view_point(eye, Vector::new(0.0, 0.0, 1.0), up);
        for r in 0..4 {
            for c in 0..4 {
                assert!((look.value(r, c) - point.value(r, c)).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_builders_overwrite_only_their_field() {
        let mut camera = Camera::new();
        let view = camera.look_at(
            Vector::new(0.0, 0.0, 5.0),
            Vector::new(0.0, 0.0, 0.0),
            Vector::new(0.0, 1.0, 0.0),
        );
        camera.ortho(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
        assert_eq!(camera.view().data(), view.data());

        let proj = camera.projection();
        camera.view_point(
            Vector::new(1.0, 1.0, 1.0),
            Vector::new(0.0, 0.0, 1.0),
            Vector::new(0.0, 1.0, 0.0),
        );
        assert_eq!(camera.projection().data(), proj.data());
    }
}
