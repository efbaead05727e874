//! Plain geometry carried through the transforms.
//!
//! - [`Point`] - a position (or, for delta transforms, a direction)
//! - [`Rect`] - an origin plus signed width and height
//! - [`Bounds`] - an axis-aligned min/max box, possibly empty
//!
//! These types hold no invariants of their own beyond what each method
//! documents; the transforms in [`crate::affine`] and [`crate::transform`]
//! define the exact numeric contracts.

use num_traits::Float;

use crate::util::{extent, sorted_pair};

/// A point in the plane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point<T = f64> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
}

impl<T> Point<T> {
    /// Creates a new point.
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Float> Point<T> {
    /// The origin.
    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero())
    }
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

/// A rectangle given by its origin and a signed size.
///
/// # Fields
///
/// - `x`, `y`: the origin corner
/// - `width`, `height`: extents from the origin (can be negative)
///
/// Negative widths and heights are handled by every transform: the result
/// always describes the same set of points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect<T = f64> {
    /// X coordinate of the origin corner.
    pub x: T,
    /// Y coordinate of the origin corner.
    pub y: T,
    /// Width (can be negative).
    pub width: T,
    /// Height (can be negative).
    pub height: T,
}

impl<T> Rect<T> {
    /// Creates a rectangle from its origin and signed size.
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl<T: Float> Rect<T> {
    /// Creates a `Rect` from two opposite corner points.
    ///
    /// The resulting rectangle has non-negative width and height,
    /// regardless of the order of the points.
    ///
    /// ```
    /// use aksel_affine::{Point, Rect};
    ///
    /// let rect = Rect::from_points(Point::new(50.0, 80.0), Point::new(10.0, 20.0));
    /// assert_eq!(rect, Rect::new(10.0, 20.0, 40.0, 60.0));
    /// ```
    pub fn from_points(p1: Point<T>, p2: Point<T>) -> Self {
        let (x_min, x_max) = sorted_pair(p1.x, p2.x);
        let (y_min, y_max) = sorted_pair(p1.y, p2.y);

        Self {
            x: x_min,
            y: y_min,
            width: x_max - x_min,
            height: y_max - y_min,
        }
    }

    /// Returns the corner opposite the origin, `(x + width, y + height)`.
    pub fn far_corner(&self) -> Point<T> {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Returns true if the provided point lies within this rectangle.
    ///
    /// Bounds are inclusive and negative spans are handled correctly.
    pub fn contains(&self, point: &Point<T>) -> bool {
        self.to_bounds().contains(point)
    }

    /// The axis-aligned box covering the same area.
    pub fn to_bounds(&self) -> Bounds<T> {
        let (min_x, max_x) = sorted_pair(self.x, self.x + self.width);
        let (min_y, max_y) = sorted_pair(self.y, self.y + self.height);
        Bounds::new(min_x, min_y, max_x, max_y)
    }
}

/// An axis-aligned box stored as its minimum and maximum corners.
///
/// A box whose maximum is below its minimum on either axis is empty; see
/// [`Bounds::empty`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Bounds<T = f64> {
    /// Smallest X.
    pub min_x: T,
    /// Smallest Y.
    pub min_y: T,
    /// Largest X.
    pub max_x: T,
    /// Largest Y.
    pub max_y: T,
}

impl<T> Bounds<T> {
    /// Creates a box from its corners, taken as given.
    pub const fn new(min_x: T, min_y: T, max_x: T, max_y: T) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}

impl<T: Float> Bounds<T> {
    /// The canonical empty box.
    pub fn empty() -> Self {
        Self::new(T::zero(), T::zero(), -T::one(), -T::one())
    }

    /// The smallest box enclosing all `points`, or `None` for no points.
    pub fn from_points(points: &[Point<T>]) -> Option<Self> {
        let (min_x, max_x) = extent(points.iter().map(|p| p.x))?;
        let (min_y, max_y) = extent(points.iter().map(|p| p.y))?;
        Some(Self::new(min_x, min_y, max_x, max_y))
    }

    /// The smallest box enclosing an interleaved `x, y, x, y, ...` slice.
    pub(crate) fn from_coords(coords: &[T]) -> Option<Self> {
        let (min_x, max_x) = extent(coords.iter().step_by(2).copied())?;
        let (min_y, max_y) = extent(coords.iter().skip(1).step_by(2).copied())?;
        Some(Self::new(min_x, min_y, max_x, max_y))
    }

    /// True when the box contains no points.
    pub fn is_empty(&self) -> bool {
        !(self.max_x >= self.min_x && self.max_y >= self.min_y)
    }

    /// Extent along X.
    pub fn width(&self) -> T {
        self.max_x - self.min_x
    }

    /// Extent along Y.
    pub fn height(&self) -> T {
        self.max_y - self.min_y
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: &Point<T>) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// The four corners as an interleaved coordinate array, in the order
    /// `(min, min)`, `(max, min)`, `(min, max)`, `(max, max)`.
    pub(crate) fn corner_coords(&self) -> [T; 8] {
        [
            self.min_x, self.min_y, self.max_x, self.min_y, self.min_x, self.max_y, self.max_x,
            self.max_y,
        ]
    }

    /// Converts back to an origin-plus-size rectangle with non-negative size.
    pub fn to_rect(&self) -> Rect<T> {
        Rect::new(self.min_x, self.min_y, self.width(), self.height())
    }
}

/// Interleaved `x, y` coordinates handed to the batch transforms.
///
/// `Shared` covers the case where source and destination live in the same
/// buffer and may overlap.
pub(crate) enum CoordPairs<'a, T> {
    Split {
        src: &'a [T],
        dst: &'a mut [T],
    },
    Shared {
        buf: &'a mut [T],
        src: usize,
        dst: usize,
        pairs: usize,
    },
}

impl<'a, T: Copy> CoordPairs<'a, T> {
    /// Pairs `src` with `dst`, transforming `src.len() / 2` points.
    ///
    /// # Panics
    ///
    /// Panics if `dst` is shorter than the even prefix of `src`.
    pub(crate) fn split(src: &'a [T], dst: &'a mut [T]) -> Self {
        let len = src.len() - src.len() % 2;
        assert!(
            dst.len() >= len,
            "destination holds {} coordinates but {len} are required",
            dst.len()
        );
        Self::Split {
            src: &src[..len],
            dst: &mut dst[..len],
        }
    }

    /// Pairs two possibly overlapping ranges of one buffer.
    ///
    /// # Panics
    ///
    /// Panics if either range runs past the end of `buf`.
    pub(crate) fn shared(buf: &'a mut [T], src: usize, dst: usize, pairs: usize) -> Self {
        let fits = |start: usize| {
            pairs
                .checked_mul(2)
                .and_then(|len| start.checked_add(len))
                .is_some_and(|end| end <= buf.len())
        };
        assert!(
            fits(src) && fits(dst),
            "{pairs} pairs from {src} to {dst} exceed a buffer of {}",
            buf.len()
        );
        Self::Shared {
            buf,
            src,
            dst,
            pairs,
        }
    }

    /// Runs `f` over every source pair and stores its output in the
    /// destination. Overlapping shared ranges are copied forward first so
    /// no source pair is overwritten before it is read.
    pub(crate) fn map<F>(self, mut f: F)
    where
        F: FnMut(T, T) -> (T, T),
    {
        match self {
            Self::Split { src, dst } => {
                for (s, d) in src.chunks_exact(2).zip(dst.chunks_exact_mut(2)) {
                    let (x, y) = f(s[0], s[1]);
                    d[0] = x;
                    d[1] = y;
                }
            }
            Self::Shared {
                buf,
                mut src,
                dst,
                pairs,
            } => {
                let len = pairs * 2;
                if dst > src && dst < src + len {
                    buf.copy_within(src..src + len, dst);
                    src = dst;
                }
                for i in (0..len).step_by(2) {
                    let (x, y) = f(buf[src + i], buf[src + i + 1]);
                    buf[dst + i] = x;
                    buf[dst + i + 1] = y;
                }
            }
        }
    }
}
