//! 3-component vectors in homogeneous form
use std::ops::{Add, Sub};

/// A vector in 3d space.
///
/// Held internally as four components `[x, y, z, 0]` so the data can be
/// multiplied directly by a 4x4 matrix. The w component is always 0 (a
/// direction, not a point) and is never settable.
///
/// Every operation returns a new vector; the receiver and argument are
/// never mutated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    data: [f32; 4],
}

impl Vector {
    /// Creates a vector from its three components.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            data: [x, y, z, 0.0],
        }
    }

    /// Creates a vector from up to 3 values. Missing trailing values
    /// default to 0; extras are ignored.
    pub fn from_slice(values: &[f32]) -> Self {
        let mut data = [0.0; 4];
        let n = values.len().min(3);
        data[..n].copy_from_slice(&values[..n]);
        Self { data }
    }

    pub fn x(&self) -> f32 {
        self.data[0]
    }

    pub fn y(&self) -> f32 {
        self.data[1]
    }

    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Returns the contents as `[x, y, z, 0]`, suitable for multiplying by
    /// a 4x4 matrix.
    pub fn data(&self) -> [f32; 4] {
        self.data
    }

    /// Computes the cross product `self x other`. Not commutative:
    /// `a.cross(&b) == -b.cross(&a)`.
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y() * other.z() - self.z() * other.y(),
            self.z() * other.x() - self.x() * other.z(),
            self.x() * other.y() - self.y() * other.x(),
        )
    }

    /// Computes the dot product over the x, y and z components.
    pub fn dot(&self, other: &Vector) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Componentwise sum.
    pub fn add(&self, other: &Vector) -> Vector {
        Vector::new(
            self.x() + other.x(),
            self.y() + other.y(),
            self.z() + other.z(),
        )
    }

    /// Componentwise difference.
    pub fn subtract(&self, other: &Vector) -> Vector {
        Vector::new(
            self.x() - other.x(),
            self.y() - other.y(),
            self.z() - other.z(),
        )
    }

    /// Euclidean length over x, y and z.
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Returns a unit vector with the same direction. A zero-length vector
    /// normalizes to the zero vector instead of dividing by zero.
    pub fn normalize(&self) -> Vector {
        let len = self.length();
        if len == 0.0 {
            Vector::default()
        } else {
            self.scale(1.0 / len)
        }
    }

    /// Componentwise multiply by the scalar `s` (including the always-zero
    /// w slot).
    pub fn scale(&self, s: f32) -> Vector {
        let mut data = self.data;
        for v in &mut data {
            *v *= s;
        }
        Vector { data }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::add(&self, &rhs)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        self.subtract(&rhs)
    }
}
