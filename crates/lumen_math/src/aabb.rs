use crate::{Interval, Vec3};

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create an empty AABB (contains nothing).
    pub fn empty() -> Self {
        Self {
            x: Interval::EMPTY,
            y: Interval::EMPTY,
            z: Interval::EMPTY,
        }
    }

    /// Smallest box containing every point of the iterator.
    ///
    /// Returns `Aabb::empty()` for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |aabb, p| aabb.include(p))
    }

    /// Returns a copy of the box grown to include `point`.
    pub fn include(&self, point: Vec3) -> Self {
        Self {
            x: self.x.include(point.x),
            y: self.y.include(point.y),
            z: self.z.include(point.z),
        }
    }

    /// True when no point has been included yet.
    pub fn is_empty(&self) -> bool {
        self.x.min > self.x.max || self.y.min > self.y.max || self.z.min > self.z.max
    }

    /// Size of the box along each axis.
    pub fn extent(&self) -> Vec3 {
        Vec3::new(self.x.size(), self.y.size(), self.z.size())
    }

    /// Length of the longest side.
    pub fn max_extent(&self) -> f64 {
        self.extent().max_element()
    }

    /// Get the center point of the AABB.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(self.x.midpoint(), self.y.midpoint(), self.z.midpoint())
    }
}
