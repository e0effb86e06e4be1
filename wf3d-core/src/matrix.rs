//! Column-major 4x4 transformation matrices
use std::fmt;
use std::ops::Mul;

/// Row-major identity values. Used both for default construction and to pad
/// partially specified matrices.
const IDENTITY_ROWS: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A 4x4 transformation matrix for homogeneous coordinates.
///
/// Storage is a flat 16-element array in COLUMN MAJOR order
/// (`data[c * 4 + r]`), matching what a column-major graphics API expects
/// for a `mat4` uniform. Input is always taken in ROW MAJOR order because
/// that is how people write matrices down; the transposition happens in
/// [`Matrix::from_rows`] and nowhere else.
///
/// Every transform method returns a new matrix and leaves the receiver
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    data: [f32; 16],
}

impl Matrix {
    /// Creates the identity matrix.
    pub fn new() -> Self {
        Self::from_rows(&[])
    }

    /// Creates a matrix from up to 16 values in ROW MAJOR order.
    ///
    /// Missing trailing values are filled from the identity matrix's
    /// row-major values; extra values beyond 16 are ignored. So
    /// `Matrix::from_rows(&[2.0, 0.0, 0.0, 0.0, 0.0, 3.0])` is the identity
    /// with 2 at (0,0) and 3 at (1,1).
    pub fn from_rows(values: &[f32]) -> Self {
        let mut rows = IDENTITY_ROWS;
        let n = values.len().min(16);
        rows[..n].copy_from_slice(&values[..n]);

        // The single row-major -> column-major transposition.
        let mut data = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                data[c * 4 + r] = rows[r * 4 + c];
            }
        }

        Self { data }
    }

    /// Returns the flat column-major data, suitable for direct upload to a
    /// column-major `mat4` uniform slot.
    pub fn data(&self) -> [f32; 16] {
        self.data
    }

    /// Reads the value at row `r`, column `c`. Both must be in `0..4`.
    pub fn value(&self, r: usize, c: usize) -> f32 {
        debug_assert!(r < 4 && c < 4);
        self.data[c * 4 + r]
    }

    /// Writes `v` at row `r`, column `c`. Both must be in `0..4`.
    ///
    /// This is the only mutating operation; the transform builders below
    /// never touch the receiver.
    pub fn set_value(&mut self, r: usize, c: usize, v: f32) {
        debug_assert!(r < 4 && c < 4);
        self.data[c * 4 + r] = v;
    }

    /// Returns a fresh identity matrix.
    pub fn identity(&self) -> Matrix {
        Matrix::new()
    }

    /// Multiplies `self` by `other` (receiver on the left) and returns the
    /// product. In composition terms `a.mult(&b)` applies `b` first, then
    /// `a`, when the result multiplies a column vector.
    pub fn mult(&self, other: &Matrix) -> Matrix {
        let mut out = Matrix { data: [0.0; 16] };
        for r in 0..4 {
            for c in 0..4 {
                let mut sum = 0.0;
                for i in 0..4 {
                    sum += self.value(r, i) * other.value(i, c);
                }
                out.set_value(r, c, sum);
            }
        }
        out
    }

    /// Returns `self` translated by `(x, y, z)` (post-multiplied by the
    /// elementary translation matrix).
    pub fn translate(&self, x: f32, y: f32, z: f32) -> Matrix {
        self.mult(&Matrix::from_rows(&[
            1.0, 0.0, 0.0, x, //
            0.0, 1.0, 0.0, y, //
            0.0, 0.0, 1.0, z, //
            0.0, 0.0, 0.0, 1.0,
        ]))
    }

    /// Returns `self` rotated by `theta` DEGREES around the x-axis, about
    /// the point `(x, y, z)`. Pass the origin for a plain axis rotation.
    pub fn rotate_x(&self, theta: f32, x: f32, y: f32, z: f32) -> Matrix {
        let (s, c) = theta.to_radians().sin_cos();
        let rotation = Matrix::from_rows(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.about(&rotation, x, y, z)
    }

    /// Returns `self` rotated by `theta` DEGREES around the y-axis, about
    /// the point `(x, y, z)`.
    pub fn rotate_y(&self, theta: f32, x: f32, y: f32, z: f32) -> Matrix {
        let (s, c) = theta.to_radians().sin_cos();
        let rotation = Matrix::from_rows(&[
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.about(&rotation, x, y, z)
    }

    /// Returns `self` rotated by `theta` DEGREES around the z-axis, about
    /// the point `(x, y, z)`.
    pub fn rotate_z(&self, theta: f32, x: f32, y: f32, z: f32) -> Matrix {
        let (s, c) = theta.to_radians().sin_cos();
        let rotation = Matrix::from_rows(&[
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.about(&rotation, x, y, z)
    }

    /// Returns `self` rotated around all three axes, about the point
    /// `(x, y, z)`. The rotations are composed x-axis first, then y-axis,
    /// then z-axis, each post-multiplying the running result.
    pub fn rotate(&self, tx: f32, ty: f32, tz: f32, x: f32, y: f32, z: f32) -> Matrix {
        self.rotate_x(tx, x, y, z)
            .rotate_y(ty, x, y, z)
            .rotate_z(tz, x, y, z)
    }

    /// Returns `self` scaled by `(sx, sy, sz)` relative to the point
    /// `(x, y, z)`.
    pub fn scale(&self, sx: f32, sy: f32, sz: f32, x: f32, y: f32, z: f32) -> Matrix {
        let scaling = Matrix::from_rows(&[
            sx, 0.0, 0.0, 0.0, //
            0.0, sy, 0.0, 0.0, //
            0.0, 0.0, sz, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]);
        self.about(&scaling, x, y, z)
    }

    /// Transforms the point `(p[0], p[1], p[2], 1)` and returns the raw
    /// homogeneous result.
    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 4] {
        let p = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (r, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for i in 0..4 {
                sum += self.value(r, i) * p[i];
            }
            *slot = sum;
        }
        out
    }

    /// Post-multiplies by `m` conjugated with translations to and from the
    /// pivot `(x, y, z)`: `self * T(x,y,z) * m * T(-x,-y,-z)`.
    fn about(&self, m: &Matrix, x: f32, y: f32, z: f32) -> Matrix {
        if x == 0.0 && y == 0.0 && z == 0.0 {
            self.mult(m)
        } else {
            self.translate(x, y, z).mult(m).translate(-x, -y, -z)
        }
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        self.mult(&rhs)
    }
}

impl fmt::Display for Matrix {
    /// Renders the matrix as a 4-line grid with two-decimal precision.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "{:8.2} {:8.2} {:8.2} {:8.2}",
                self.value(r, 0),
                self.value(r, 1),
                self.value(r, 2),
                self.value(r, 3)
            )?;
        }
        Ok(())
    }
}
