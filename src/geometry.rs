//! Minimal 3D vector and bounding-box math
//!
//! Coordinates follow the Z-up, +Y-forward convention of Panda3D: layers run
//! along +X, neurons of a layer stack along +Z and the camera looks down +Y.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point or direction in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    pub fn midpoint(self, other: Vec3) -> Vec3 {
        (self + other) / 2.0
    }

    pub fn min(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    pub fn max(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// Heading, pitch and roll in degrees (Panda3D HPR order).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub heading: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Orientation {
    /// Orientation whose local +Y axis points from `from` towards `to`.
    ///
    /// Returns the identity orientation when both points coincide.
    pub fn look_at(from: Vec3, to: Vec3) -> Self {
        let d = to - from;
        if d.length() == 0.0 {
            return Self::default();
        }
        let heading = (-d.x).atan2(d.y).to_degrees();
        let pitch = d.z.atan2(d.x.hypot(d.y)).to_degrees();
        Self {
            heading,
            pitch,
            roll: 0.0,
        }
    }

    /// Unit direction of the local +Y axis after applying heading and pitch.
    pub fn forward(self) -> Vec3 {
        let h = self.heading.to_radians();
        let p = self.pitch.to_radians();
        Vec3::new(-h.sin() * p.cos(), h.cos() * p.cos(), p.sin())
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` with the given full extents.
    pub fn around(center: Vec3, extents: Vec3) -> Self {
        let half = extents / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn union(self, other: BoundingBox) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn center(&self) -> Vec3 {
        self.min.midpoint(self.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }
}
