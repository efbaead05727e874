use std::fmt;

use num_traits::Float;

use super::compose::{Shape, compose, positive_zeros};
use super::kind::{Degree, State, TransformType};
use crate::error::TransformError;
use crate::geometry::Rect;
use crate::util::is_degenerate;

/// A general 2D affine transform.
///
/// Six coefficients `(a, b, c, d, e, f)` describe the mapping
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// or, as a matrix acting on column vectors,
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
///
/// The coefficients are private: every constructor and mutator recomputes
/// the cached [`State`] and [`TransformType`] from them, so the caches can
/// never disagree with the matrix. Zero coefficients are always stored as
/// `+0`. Operations dispatch on the state to skip
/// arithmetic on terms that are structurally zero.
///
/// Mutators post-multiply: after `m.translate(..)`, `m.scale(..)` or
/// `m.concatenate(..)`, the new operation is applied to points *before*
/// the previous contents of `m`. Use [`Affine::pre_concatenate`] to apply
/// an operation after.
///
/// # Examples
///
/// ```
/// use aksel_affine::{Affine, Point};
///
/// let mut m = Affine::from_translation(10.0, 0.0);
/// m.scale(2.0, 2.0);
///
/// // Scale first, then translate.
/// assert_eq!(m.transform_point(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
///
/// let back = m.inverse_transform_point(Point::new(12.0, 2.0)).unwrap();
/// assert_eq!(back, Point::new(1.0, 1.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine<T = f64> {
    pub(super) a: T,
    pub(super) b: T,
    pub(super) c: T,
    pub(super) d: T,
    pub(super) e: T,
    pub(super) f: T,
    pub(super) state: State,
    kind: TransformType,
}

impl<T: Float> Affine<T> {
    /// Creates a transform from its six coefficients.
    pub fn new(a: T, b: T, c: T, d: T, e: T, f: T) -> Self {
        let mut m = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            state: State::IDENTITY,
            kind: TransformType::IDENTITY,
        };
        m.refresh();
        m
    }

    /// Creates a transform from coefficients in `(a, b, c, d, e, f)` order.
    pub fn from_array([a, b, c, d, e, f]: [T; 6]) -> Self {
        Self::new(a, b, c, d, e, f)
    }

    /// The identity transform.
    pub fn identity() -> Self {
        let (zero, one) = (T::zero(), T::one());
        Self::new(one, zero, zero, one, zero, zero)
    }

    /// Creates a translation by `(tx, ty)`.
    pub fn from_translation(tx: T, ty: T) -> Self {
        let (zero, one) = (T::zero(), T::one());
        Self::new(one, zero, zero, one, tx, ty)
    }

    /// Creates a scale of `(sx, sy)` about the origin.
    pub fn from_scale(sx: T, sy: T) -> Self {
        let zero = T::zero();
        Self::new(sx, zero, zero, sy, zero, zero)
    }

    /// Creates a shear: `(x, y) -> (x + shx·y, shy·x + y)`.
    pub fn from_shear(shx: T, shy: T) -> Self {
        let (zero, one) = (T::zero(), T::one());
        Self::new(one, shy, shx, one, zero, zero)
    }

    /// Creates a rotation by `theta` radians about the origin.
    ///
    /// Positive angles turn the positive X axis towards the positive Y axis.
    /// Angles whose sine or cosine is exactly ±1 produce exact quadrant
    /// rotations.
    pub fn from_rotation(theta: T) -> Self {
        let mut m = Self::identity();
        m.set_to_rotation(theta);
        m
    }

    /// Creates a rotation by `theta` radians about `(anchor_x, anchor_y)`.
    pub fn from_rotation_about(theta: T, anchor_x: T, anchor_y: T) -> Self {
        let mut m = Self::identity();
        m.set_to_rotation_about(theta, anchor_x, anchor_y);
        m
    }

    /// Creates a rotation that turns the positive X axis towards the vector
    /// `(vec_x, vec_y)`. A zero vector yields the identity.
    pub fn from_rotation_vector(vec_x: T, vec_y: T) -> Self {
        let mut m = Self::identity();
        m.rotate_vector(vec_x, vec_y);
        m
    }

    /// Creates a rotation by `quadrants` quarter turns.
    pub fn from_quadrant_rotation(quadrants: i32) -> Self {
        let mut m = Self::identity();
        m.set_to_quadrant_rotation(quadrants);
        m
    }

    /// Builds the axis-aligned mapping that takes `from` onto `to`.
    ///
    /// Opposite height signs express a Y inversion, e.g. mapping chart
    /// coordinates (Y up) onto screen pixels (Y down).
    ///
    /// ```
    /// use aksel_affine::{Affine, Point, Rect};
    ///
    /// let plot = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let screen = Rect::new(0.0, 600.0, 800.0, -600.0);
    /// let m = Affine::rect_to_rect(&plot, &screen).unwrap();
    ///
    /// assert_eq!(m.transform_point(Point::new(50.0, 25.0)), Point::new(400.0, 300.0));
    /// assert_eq!(m.transform_point(Point::new(0.0, 50.0)), Point::new(0.0, 0.0));
    /// ```
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] when `from` has a zero or subnormal
    /// width or height.
    pub fn rect_to_rect(from: &Rect<T>, to: &Rect<T>) -> Result<Self, TransformError> {
        if is_degenerate(from.width) || is_degenerate(from.height) {
            return Err(TransformError::non_invertible(from.width * from.height));
        }
        let zero = T::zero();
        let sx = to.width / from.width;
        let sy = to.height / from.height;
        Ok(Self::new(
            sx,
            zero,
            zero,
            sy,
            to.x - from.x * sx,
            to.y - from.y * sy,
        ))
    }

    fn refresh(&mut self) {
        [self.a, self.b, self.c, self.d, self.e, self.f] = positive_zeros(self.to_array());
        self.state = State::of(self.a, self.b, self.c, self.d, self.e, self.f);
        self.kind = TransformType::classify(self.state, self.a, self.b, self.c, self.d);
    }

    fn assign(&mut self, [a, b, c, d, e, f]: [T; 6]) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.refresh();
    }

    /// The coefficients in `(a, b, c, d, e, f)` order.
    pub fn to_array(&self) -> [T; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// `a`: X scale factor.
    pub fn scale_x(&self) -> T {
        self.a
    }

    /// `b`: Y shear factor (contribution of x to y').
    pub fn shear_y(&self) -> T {
        self.b
    }

    /// `c`: X shear factor (contribution of y to x').
    pub fn shear_x(&self) -> T {
        self.c
    }

    /// `d`: Y scale factor.
    pub fn scale_y(&self) -> T {
        self.d
    }

    /// `e`: X translation.
    pub fn translate_x(&self) -> T {
        self.e
    }

    /// `f`: Y translation.
    pub fn translate_y(&self) -> T {
        self.f
    }

    /// Always [`Degree::Affine`]: this type stores all six coefficients.
    pub fn degree(&self) -> Degree {
        Degree::Affine
    }

    /// The cheapest degree able to represent this transform exactly.
    pub fn minimal_degree(&self) -> Degree {
        if self.state == State::IDENTITY {
            Degree::Identity
        } else if self.state == State::TRANSLATE {
            Degree::Translate
        } else {
            Degree::Affine
        }
    }

    /// Which coefficient groups are non-trivial.
    pub fn state(&self) -> State {
        self.state
    }

    /// The geometric effect of the transform.
    pub fn transform_type(&self) -> TransformType {
        self.kind
    }

    /// True when every coefficient matches the identity.
    pub fn is_identity(&self) -> bool {
        self.state == State::IDENTITY
    }

    /// True when the linear part is the identity.
    pub fn is_translate_or_identity(&self) -> bool {
        self.state.linear() == State::IDENTITY
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> T {
        let (shear, scale, _) = self.state.flags();
        match (shear, scale) {
            (true, true) => self.a * self.d - self.c * self.b,
            (true, false) => -(self.c * self.b),
            (false, true) => self.a * self.d,
            (false, false) => T::one(),
        }
    }

    /// True when [`create_inverse`](Self::create_inverse) would succeed.
    pub fn is_invertible(&self) -> bool {
        !self.is_singular()
    }

    /// The determinant, and every divisor the state's inverse formula uses,
    /// must be at least the smallest positive normal value in magnitude.
    fn is_singular(&self) -> bool {
        let (shear, scale, _) = self.state.flags();
        let factors = match (shear, scale) {
            (true, false) => is_degenerate(self.b) || is_degenerate(self.c),
            (false, true) => is_degenerate(self.a) || is_degenerate(self.d),
            _ => false,
        };
        factors || is_degenerate(self.determinant())
    }

    pub(super) fn check_invertible(&self) -> Result<(), TransformError> {
        if self.is_singular() {
            Err(TransformError::non_invertible(self.determinant()))
        } else {
            Ok(())
        }
    }

    // --- Setters ---

    /// Replaces all six coefficients.
    pub fn set_transform(&mut self, a: T, b: T, c: T, d: T, e: T, f: T) {
        self.assign([a, b, c, d, e, f]);
    }

    /// Resets to the identity.
    pub fn set_to_identity(&mut self) {
        *self = Self::identity();
    }

    /// Resets to a translation by `(tx, ty)`.
    pub fn set_to_translation(&mut self, tx: T, ty: T) {
        *self = Self::from_translation(tx, ty);
    }

    /// Resets to a scale of `(sx, sy)`.
    pub fn set_to_scale(&mut self, sx: T, sy: T) {
        *self = Self::from_scale(sx, sy);
    }

    /// Resets to a shear; see [`Affine::from_shear`].
    pub fn set_to_shear(&mut self, shx: T, shy: T) {
        *self = Self::from_shear(shx, shy);
    }

    /// Resets to a rotation by `theta` radians about the origin.
    pub fn set_to_rotation(&mut self, theta: T) {
        let one = T::one();
        let (sin, cos) = theta.sin_cos();
        if sin == one {
            self.set_to_quadrant_rotation(1);
        } else if sin == -one {
            self.set_to_quadrant_rotation(3);
        } else if cos == -one {
            self.set_to_quadrant_rotation(2);
        } else if cos == one {
            self.set_to_identity();
        } else {
            let zero = T::zero();
            self.assign([cos, sin, -sin, cos, zero, zero]);
        }
    }

    /// Resets to a rotation by `theta` radians about `(anchor_x, anchor_y)`.
    pub fn set_to_rotation_about(&mut self, theta: T, anchor_x: T, anchor_y: T) {
        self.set_to_rotation(theta);
        let sin = self.b;
        let one_minus_cos = T::one() - self.a;
        self.e = anchor_x * one_minus_cos + anchor_y * sin;
        self.f = anchor_y * one_minus_cos - anchor_x * sin;
        self.refresh();
    }

    fn set_to_quadrant_rotation(&mut self, quadrants: i32) {
        let (zero, one) = (T::zero(), T::one());
        let coefficients = match quadrants.rem_euclid(4) {
            0 => [one, zero, zero, one, zero, zero],
            1 => [zero, one, -one, zero, zero, zero],
            2 => [-one, zero, zero, -one, zero, zero],
            _ => [zero, -one, one, zero, zero, zero],
        };
        self.assign(coefficients);
    }

    // --- Mutators ---

    /// Post-multiplies by a translation: `(tx, ty)` is applied to points
    /// before the current transform.
    pub fn translate(&mut self, tx: T, ty: T) {
        let (shear, scale, _) = self.state.flags();
        match (shear, scale) {
            (false, false) => {
                self.e = tx + self.e;
                self.f = ty + self.f;
            }
            (false, true) => {
                self.e = tx * self.a + self.e;
                self.f = ty * self.d + self.f;
            }
            (true, false) => {
                self.e = ty * self.c + self.e;
                self.f = tx * self.b + self.f;
            }
            (true, true) => {
                self.e = tx * self.a + ty * self.c + self.e;
                self.f = tx * self.b + ty * self.d + self.f;
            }
        }
        self.refresh();
    }

    /// Pre-multiplies by a translation: `(tx, ty)` is added to every image
    /// after the current transform.
    pub fn pre_translate(&mut self, tx: T, ty: T) {
        self.e = self.e + tx;
        self.f = self.f + ty;
        self.refresh();
    }

    /// Post-multiplies by a scale of `(sx, sy)`.
    pub fn scale(&mut self, sx: T, sy: T) {
        let (shear, scale, _) = self.state.flags();
        if shear {
            self.b = self.b * sx;
            self.c = self.c * sy;
            if scale {
                self.a = self.a * sx;
                self.d = self.d * sy;
            }
        } else if scale {
            self.a = self.a * sx;
            self.d = self.d * sy;
        } else {
            self.a = sx;
            self.d = sy;
        }
        self.refresh();
    }

    /// Post-multiplies by a shear: `(x, y) -> (x + shx·y, shy·x + y)`.
    pub fn shear(&mut self, shx: T, shy: T) {
        let (shear, scale, _) = self.state.flags();
        match (shear, scale) {
            (true, true) => {
                let (a, c) = (self.a, self.c);
                self.a = a + c * shy;
                self.c = a * shx + c;
                let (b, d) = (self.b, self.d);
                self.b = b + d * shy;
                self.d = b * shx + d;
            }
            (true, false) => {
                self.a = self.c * shy;
                self.d = self.b * shx;
            }
            (false, true) => {
                self.c = self.a * shx;
                self.b = self.d * shy;
            }
            (false, false) => {
                self.c = shx;
                self.b = shy;
            }
        }
        self.refresh();
    }

    /// Post-multiplies by a rotation of `theta` radians about the origin.
    ///
    /// When the sine or cosine of `theta` is exactly ±1 the rotation is a
    /// quadrant rotation and is carried out by swapping and negating
    /// coefficients, so no rounding error is introduced.
    pub fn rotate(&mut self, theta: T) {
        let one = T::one();
        let (sin, cos) = theta.sin_cos();
        if sin == one {
            self.rotate_quadrants(1);
        } else if sin == -one {
            self.rotate_quadrants(3);
        } else if cos == -one {
            self.rotate_quadrants(2);
        } else if cos != one {
            self.rotate_by(sin, cos);
        }
    }

    /// Post-multiplies by a rotation of `theta` radians about
    /// `(anchor_x, anchor_y)`.
    pub fn rotate_about(&mut self, theta: T, anchor_x: T, anchor_y: T) {
        self.translate(anchor_x, anchor_y);
        self.rotate(theta);
        self.translate(-anchor_x, -anchor_y);
    }

    /// Post-multiplies by the rotation that turns the positive X axis
    /// towards `(vec_x, vec_y)`.
    ///
    /// Axis-aligned vectors select exact quadrant rotations. A zero vector
    /// leaves the transform unchanged.
    pub fn rotate_vector(&mut self, vec_x: T, vec_y: T) {
        let zero = T::zero();
        if vec_y == zero {
            if vec_x < zero {
                self.rotate_quadrants(2);
            }
        } else if vec_x == zero {
            if vec_y > zero {
                self.rotate_quadrants(1);
            } else {
                self.rotate_quadrants(3);
            }
        } else {
            let len = vec_x.hypot(vec_y);
            self.rotate_by(vec_y / len, vec_x / len);
        }
    }

    /// Vector rotation about `(anchor_x, anchor_y)`.
    pub fn rotate_vector_about(&mut self, vec_x: T, vec_y: T, anchor_x: T, anchor_y: T) {
        self.translate(anchor_x, anchor_y);
        self.rotate_vector(vec_x, vec_y);
        self.translate(-anchor_x, -anchor_y);
    }

    /// Post-multiplies by `quadrants` quarter turns (any integer; taken mod 4).
    pub fn quadrant_rotate(&mut self, quadrants: i32) {
        self.rotate_quadrants(quadrants);
    }

    /// Quarter turns about `(anchor_x, anchor_y)`.
    pub fn quadrant_rotate_about(&mut self, quadrants: i32, anchor_x: T, anchor_y: T) {
        if quadrants.rem_euclid(4) == 0 {
            return;
        }
        self.translate(anchor_x, anchor_y);
        self.rotate_quadrants(quadrants);
        self.translate(-anchor_x, -anchor_y);
    }

    fn rotate_quadrants(&mut self, quadrants: i32) {
        let Self { a, b, c, d, .. } = *self;
        match quadrants.rem_euclid(4) {
            0 => return,
            1 => {
                self.a = c;
                self.b = d;
                self.c = -a;
                self.d = -b;
            }
            2 => {
                self.a = -a;
                self.b = -b;
                self.c = -c;
                self.d = -d;
            }
            _ => {
                self.a = -c;
                self.b = -d;
                self.c = a;
                self.d = b;
            }
        }
        self.refresh();
    }

    fn rotate_by(&mut self, sin: T, cos: T) {
        let (a, c) = (self.a, self.c);
        self.a = cos * a + sin * c;
        self.c = -sin * a + cos * c;
        let (b, d) = (self.b, self.d);
        self.b = cos * b + sin * d;
        self.d = -sin * b + cos * d;
        self.refresh();
    }

    /// Sets `self = self ∘ other`: `other` is applied to points first.
    pub fn concatenate(&mut self, other: &Affine<T>) {
        let product = compose(
            &self.to_array(),
            Shape::of(self.state),
            &other.to_array(),
            Shape::of(other.state),
        );
        self.assign(product);
    }

    /// Sets `self = other ∘ self`: `other` is applied to points last.
    pub fn pre_concatenate(&mut self, other: &Affine<T>) {
        let product = compose(
            &other.to_array(),
            Shape::of(other.state),
            &self.to_array(),
            Shape::of(self.state),
        );
        self.assign(product);
    }

    /// Returns the inverse transform.
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] when the determinant, or for pure
    /// scales and pure shears either factor, is zero, subnormal or NaN.
    pub fn create_inverse(&self) -> Result<Self, TransformError> {
        self.check_invertible()?;

        let (zero, one) = (T::zero(), T::one());
        let Self { a, b, c, d, e, f, .. } = *self;
        let (shear, scale, translate) = self.state.flags();
        let inverse = match (shear, scale) {
            (false, false) if translate => [one, zero, zero, one, -e, -f],
            (false, false) => return Ok(*self),
            (false, true) if translate => [one / a, zero, zero, one / d, -e / a, -f / d],
            (false, true) => [one / a, zero, zero, one / d, zero, zero],
            (true, false) if translate => [zero, one / c, one / b, zero, -f / b, -e / c],
            (true, false) => [zero, one / c, one / b, zero, zero, zero],
            (true, true) => {
                let det = a * d - c * b;
                let (ie, i_f) = if translate {
                    ((c * f - d * e) / det, (b * e - a * f) / det)
                } else {
                    (zero, zero)
                };
                [d / det, -b / det, -c / det, a / det, ie, i_f]
            }
        };
        Ok(Self::from_array(inverse))
    }

    /// Inverts in place; on failure `self` is left unchanged.
    pub fn invert(&mut self) -> Result<(), TransformError> {
        *self = self.create_inverse()?;
        Ok(())
    }
}

impl<T: Float> Default for Affine<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Float> From<[T; 6]> for Affine<T> {
    fn from(coefficients: [T; 6]) -> Self {
        Self::from_array(coefficients)
    }
}

impl<T: Float + fmt::Display> fmt::Display for Affine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Affine[[{}, {}, {}], [{}, {}, {}]]",
            self.a, self.c, self.e, self.b, self.d, self.f
        )
    }
}
