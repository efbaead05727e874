use std::fmt;

use num_traits::Float;

use super::kind::{Degree, State, TransformType};
use super::matrix::Affine;
use crate::error::TransformError;
use crate::geometry::{Bounds, CoordPairs, Point, Rect};

/// A pure translation by `(tx, ty)`.
///
/// Stores two offsets instead of six coefficients, and never fails to
/// invert. Converts losslessly into [`Affine`]; the reverse conversion
/// succeeds only when the linear part is exactly identity.
///
/// ```
/// use aksel_affine::{Affine, Point, Translate};
///
/// let t = Translate::new(3.0, -1.0);
/// assert_eq!(t.transform_point(Point::new(1.0, 1.0)), Point::new(4.0, 0.0));
///
/// let m = Affine::from(t);
/// assert_eq!(Translate::try_from(m), Ok(t));
/// assert!(Translate::try_from(Affine::from_scale(2.0, 2.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Translate<T = f64> {
    tx: T,
    ty: T,
}

impl<T: Float> Translate<T> {
    /// Creates a translation by `(tx, ty)`.
    pub fn new(tx: T, ty: T) -> Self {
        Self { tx, ty }
    }

    /// X offset.
    pub fn tx(&self) -> T {
        self.tx
    }

    /// Y offset.
    pub fn ty(&self) -> T {
        self.ty
    }

    /// Always [`Degree::Translate`].
    pub fn degree(&self) -> Degree {
        Degree::Translate
    }

    /// [`State::TRANSLATE`], or [`State::IDENTITY`] for a zero offset.
    pub fn state(&self) -> State {
        if self.is_identity() {
            State::IDENTITY
        } else {
            State::TRANSLATE
        }
    }

    /// [`TransformType::TRANSLATION`], or identity for a zero offset.
    pub fn transform_type(&self) -> TransformType {
        if self.is_identity() {
            TransformType::IDENTITY
        } else {
            TransformType::TRANSLATION
        }
    }

    /// True for a zero offset.
    pub fn is_identity(&self) -> bool {
        self.tx == T::zero() && self.ty == T::zero()
    }

    /// Always true: the linear part is the identity.
    pub fn is_translate_or_identity(&self) -> bool {
        true
    }

    /// Always true.
    pub fn is_invertible(&self) -> bool {
        true
    }

    /// Always one.
    pub fn determinant(&self) -> T {
        T::one()
    }

    /// The equivalent `(a, b, c, d, e, f)` coefficients.
    pub fn to_array(&self) -> [T; 6] {
        let (zero, one) = (T::zero(), T::one());
        [one, zero, zero, one, self.tx, self.ty]
    }

    /// Adds `(tx, ty)` to the offset.
    pub fn translate(&mut self, tx: T, ty: T) {
        self.tx = tx + self.tx;
        self.ty = ty + self.ty;
    }

    /// Translations commute, so this matches [`pre_concatenate`](Self::pre_concatenate).
    pub fn concatenate(&mut self, other: &Translate<T>) {
        self.translate(other.tx, other.ty);
    }

    /// Adds `other`'s offset after this one.
    pub fn pre_concatenate(&mut self, other: &Translate<T>) {
        self.tx = self.tx + other.tx;
        self.ty = self.ty + other.ty;
    }

    /// The opposite offset.
    pub fn create_inverse(&self) -> Translate<T> {
        Self::new(-self.tx, -self.ty)
    }

    /// Negates the offset in place.
    pub fn invert(&mut self) {
        *self = self.create_inverse();
    }

    /// Moves `point` by the offset.
    pub fn transform_point(&self, point: Point<T>) -> Point<T> {
        Point::new(point.x + self.tx, point.y + self.ty)
    }

    /// Directions are unaffected by a translation.
    pub fn delta_transform(&self, vector: Point<T>) -> Point<T> {
        vector
    }

    /// Moves `point` back by the offset.
    pub fn inverse_transform_point(&self, point: Point<T>) -> Point<T> {
        Point::new(point.x - self.tx, point.y - self.ty)
    }

    /// Directions are unaffected by a translation.
    pub fn inverse_delta_transform(&self, vector: Point<T>) -> Point<T> {
        vector
    }

    /// See [`Affine::transform_coords`].
    pub fn transform_coords(&self, src: &[T], dst: &mut [T]) {
        let (tx, ty) = (self.tx, self.ty);
        CoordPairs::split(src, dst).map(|x, y| (x + tx, y + ty));
    }

    /// See [`Affine::transform_coords_within`].
    pub fn transform_coords_within(&self, buf: &mut [T], src: usize, dst: usize, pairs: usize) {
        let (tx, ty) = (self.tx, self.ty);
        CoordPairs::shared(buf, src, dst, pairs).map(|x, y| (x + tx, y + ty));
    }

    /// Copies the coordinate pairs of `src` into `dst` unchanged.
    pub fn delta_transform_coords(&self, src: &[T], dst: &mut [T]) {
        CoordPairs::split(src, dst).map(|x, y| (x, y));
    }

    /// Inverse of [`transform_coords`](Self::transform_coords).
    pub fn inverse_transform_coords(&self, src: &[T], dst: &mut [T]) {
        let (tx, ty) = (self.tx, self.ty);
        CoordPairs::split(src, dst).map(|x, y| (x - tx, y - ty));
    }

    /// Inverse of [`transform_coords_within`](Self::transform_coords_within).
    pub fn inverse_transform_coords_within(
        &self,
        buf: &mut [T],
        src: usize,
        dst: usize,
        pairs: usize,
    ) {
        let (tx, ty) = (self.tx, self.ty);
        CoordPairs::shared(buf, src, dst, pairs).map(|x, y| (x - tx, y - ty));
    }

    /// Shifts `bounds` by the offset; empty stays empty.
    pub fn transform_bounds(&self, bounds: &Bounds<T>) -> Bounds<T> {
        self.offset_bounds(bounds, self.tx, self.ty)
    }

    /// Shifts `bounds` back by the offset.
    pub fn inverse_transform_bounds(&self, bounds: &Bounds<T>) -> Bounds<T> {
        self.offset_bounds(bounds, -self.tx, -self.ty)
    }

    fn offset_bounds(&self, bounds: &Bounds<T>, dx: T, dy: T) -> Bounds<T> {
        if bounds.is_empty() {
            return Bounds::empty();
        }
        Bounds::new(
            bounds.min_x + dx,
            bounds.min_y + dy,
            bounds.max_x + dx,
            bounds.max_y + dy,
        )
    }

    /// Shifts `rect`, normalising its size to non-negative.
    pub fn transform_rect(&self, rect: &Rect<T>) -> Rect<T> {
        self.transform_bounds(&rect.to_bounds()).to_rect()
    }

    /// Shifts `rect` back, normalising its size to non-negative.
    pub fn inverse_transform_rect(&self, rect: &Rect<T>) -> Rect<T> {
        self.inverse_transform_bounds(&rect.to_bounds()).to_rect()
    }
}

impl<T: Float> From<Translate<T>> for Affine<T> {
    fn from(t: Translate<T>) -> Self {
        Affine::from_translation(t.tx, t.ty)
    }
}

impl<T: Float> TryFrom<Affine<T>> for Translate<T> {
    type Error = TransformError;

    fn try_from(m: Affine<T>) -> Result<Self, Self::Error> {
        if m.is_translate_or_identity() {
            Ok(Self::new(m.translate_x(), m.translate_y()))
        } else {
            Err(TransformError::UnsupportedDegree {
                degree: Degree::Translate,
                required: Degree::Affine,
            })
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for Translate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Translate[{}, {}]", self.tx, self.ty)
    }
}
