//! Device-space geometry: points, rectangles and sizes.  All of these live in the output
//! coordinate space of a backend (x grows to the right, y grows **down**), and none of the code in
//! this crate ever transforms between data space and device space.

use angle::Angle;

use crate::V2;

/// An axis-aligned rectangle, stored as its top-left corner and its extents.  The constructors
/// always give non-negative extents, but the fields are public so a `Rect` built by hand may not
/// be; use [`Rect::normalised`] before relying on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Creates a `Rect` from its top-left corner and size.  Negative extents are treated as if the
    /// rectangle was given by two corners, so `Rect::new(10.0, 10.0, -5.0, 2.0)` spans `x = 5..10`.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self::from_corners(V2::new(left, top), V2::new(left + width, top + height))
    }

    /// Creates the smallest `Rect` which has both `a` and `b` as corners.  The points can be any
    /// two opposite corners, in any order.
    pub fn from_corners(a: V2, b: V2) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            left,
            top,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn from_min_size(min: V2, size: Size) -> Self {
        Self {
            left: min.x,
            top: min.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Returns the same area with non-negative extents, as if this `Rect` was given by two
    /// opposite corners
    pub fn normalised(&self) -> Rect {
        Self::from_corners(self.top_left(), self.bottom_right())
    }

    /// Returns the smallest `Rect` containing every point in `points`, or `None` if the iterator
    /// yields no points.
    pub fn bbox(points: impl IntoIterator<Item = V2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), v| {
            (
                V2::new(min.x.min(v.x), min.y.min(v.y)),
                V2::new(max.x.max(v.x), max.y.max(v.y)),
            )
        });
        Some(Self::from_corners(min, max))
    }

    /// Returns the smallest `Rect` which contains both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_corners(
            V2::new(self.left.min(other.left), self.top.min(other.top)),
            V2::new(self.right().max(other.right()), self.bottom().max(other.bottom())),
        )
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn top_left(&self) -> V2 {
        V2::new(self.left, self.top)
    }

    pub fn bottom_right(&self) -> V2 {
        V2::new(self.right(), self.bottom())
    }

    pub fn centre(&self) -> V2 {
        V2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The four corners of this `Rect` in clockwise order (in screen space), starting at the
    /// top-left corner.
    pub fn corners(&self) -> [V2; 4] {
        [
            self.top_left(),
            V2::new(self.right(), self.top),
            self.bottom_right(),
            V2::new(self.left, self.bottom()),
        ]
    }

    /// `true` if this `Rect` covers no area
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn contains(&self, pt: V2) -> bool {
        (self.left..=self.right()).contains(&pt.x) && (self.top..=self.bottom()).contains(&pt.y)
    }
}

/// A (width, height) pair.  Both components are always non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new `Size`, clamping negative (or NaN) components to zero
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: clamp_non_negative(width),
            height: clamp_non_negative(height),
        }
    }

    pub fn is_zero_area(&self) -> bool {
        self.width * self.height == 0.0
    }

    /// Multiplies both extents by `factor`
    pub fn scale(&self, factor: f64) -> Size {
        Size::new(self.width * factor, self.height * factor)
    }
}

/// Clamps `v` to `[0, inf)`, mapping NaN to `0`
pub(crate) fn clamp_non_negative(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Rotates a vector **clockwise** (on screen) by an angle
pub fn rotate_vec(v: V2, angle: impl Angle<f64> + Copy) -> V2 {
    let sin = angle.sin();
    let cos = angle.cos();
    // Rotation **clockwise** corresponds to multiplication by the following matrix (which looks
    // like the classic anti-clockwise matrix because our y-axis goes down where the one in maths
    // goes up):
    // | cos(angle)  -sin(angle) |
    // | sin(angle)   cos(angle) |
    V2 {
        x: v.x * cos - v.y * sin,
        y: v.x * sin + v.y * cos,
    }
}

#[cfg(test)]
mod tests {
    use angle::Deg;

    use super::*;

    fn assert_close(a: V2, b: V2) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn negative_extents_are_normalised() {
        let r = Rect::new(10.0, 10.0, -5.0, 2.0);
        assert_eq!(r, Rect::new(5.0, 10.0, 5.0, 2.0));
        assert_eq!(r.right(), 10.0);
    }

    #[test]
    fn hand_built_rects_can_be_normalised() {
        let r = Rect {
            left: 10.0,
            top: 10.0,
            width: -5.0,
            height: 5.0,
        };
        assert_eq!(r.normalised(), Rect::new(5.0, 10.0, 5.0, 5.0));
        assert_eq!(r.normalised().width, 5.0);
    }

    #[test]
    fn bbox_of_nothing_is_none() {
        assert_eq!(Rect::bbox(std::iter::empty()), None);
        let r = Rect::bbox(vec![V2::new(1.0, 5.0), V2::new(-2.0, 3.0), V2::new(0.0, 9.0)]).unwrap();
        assert_eq!(r, Rect::new(-2.0, 3.0, 3.0, 6.0));
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, -1.0, 1.0, 1.0);
        assert_eq!(a.union(&b), Rect::new(0.0, -1.0, 3.0, 2.0));
    }

    #[test]
    fn size_clamps_negative_and_nan() {
        assert_eq!(Size::new(-3.0, f64::NAN), Size::ZERO);
        assert!(Size::new(4.0, 0.0).is_zero_area());
    }

    #[test]
    fn rotation_is_clockwise_on_screen() {
        // +x rotated by 90 degrees clockwise points down the screen, i.e. +y
        assert_close(rotate_vec(V2::new(1.0, 0.0), Deg(90.0)), V2::new(0.0, 1.0));
        assert_close(rotate_vec(V2::new(0.0, 1.0), Deg(90.0)), V2::new(-1.0, 0.0));
    }
}
