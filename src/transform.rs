//! Transforms stored in the cheapest variant that can represent them.
//!
//! # Overview
//!
//! [`Transform`] is a tagged union over three storage degrees:
//!
//! - [`Transform::Identity`] - no data
//! - [`Transform::Translate`] - two offsets
//! - [`Transform::Affine`] - all six coefficients
//!
//! Operations that could leave the current variant (scaling a translation,
//! concatenating with a rotation, ...) are expressed as consuming
//! `derive_with_*` methods that return the result in the cheapest variant
//! able to hold it. A transform that is already [`Transform::Affine`] keeps
//! that variant and is updated in place, so callers holding a general
//! transform never pay for re-classification into a narrower one.
//!
//! # Examples
//!
//! ## Promotion
//!
//! ```rust
//! use aksel_affine::{Degree, Transform};
//!
//! let t = Transform::identity().derive_with_translation(5.0, 5.0);
//! assert_eq!(t.degree(), Degree::Translate);
//!
//! let t = t.derive_with_scale(2.0, 2.0);
//! assert_eq!(t.degree(), Degree::Affine);
//! ```
//!
//! ## Translate, Then Rotate
//!
//! `derive_with_*` post-multiplies, so the newest operation reaches points
//! first. To move points by `(5, 5)` and then turn them a quarter turn,
//! start from the rotation:
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_2;
//! use aksel_affine::{Point, Transform};
//!
//! let t = Transform::rotation(FRAC_PI_2).derive_with_translation(5.0, 5.0);
//! assert_eq!(t.transform_point(Point::new(10.0, 0.0)), Point::new(-5.0, 15.0));
//!
//! // Or pre-concatenate the rotation onto the translation.
//! let t = Transform::translation(5.0, 5.0)
//!     .derive_with_pre_concatenation(&Transform::rotation(FRAC_PI_2));
//! assert_eq!(t.transform_point(Point::new(10.0, 0.0)), Point::new(-5.0, 15.0));
//! ```
//!
//! ## Collapsing
//!
//! ```rust
//! use aksel_affine::Transform;
//!
//! let t = Transform::translation(3.0, 4.0).derive_with_translation(-3.0, -4.0);
//! assert!(matches!(t, Transform::Identity));
//! ```

use std::fmt;

use num_traits::Float;

use crate::affine::{Affine, Degree, State, Translate, TransformType};
use crate::error::TransformError;
use crate::geometry::{Bounds, CoordPairs, Point, Rect};

/// A 2D affine transform in its cheapest storage variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform<T = f64> {
    /// Maps every point to itself.
    Identity,
    /// A pure translation.
    Translate(Translate<T>),
    /// Any affine mapping.
    Affine(Affine<T>),
}

impl<T: Float> Transform<T> {
    /// The identity variant.
    pub fn identity() -> Self {
        Self::Identity
    }

    /// A translation, or [`Transform::Identity`] for a zero offset.
    pub fn translation(tx: T, ty: T) -> Self {
        Self::from_translate(Translate::new(tx, ty))
    }

    /// A scale about the origin in the cheapest variant.
    pub fn scale(sx: T, sy: T) -> Self {
        Self::narrowest(Affine::from_scale(sx, sy))
    }

    /// A rotation about the origin in the cheapest variant.
    pub fn rotation(theta: T) -> Self {
        Self::narrowest(Affine::from_rotation(theta))
    }

    /// A rotation about `(anchor_x, anchor_y)` in the cheapest variant.
    pub fn rotation_about(theta: T, anchor_x: T, anchor_y: T) -> Self {
        Self::narrowest(Affine::from_rotation_about(theta, anchor_x, anchor_y))
    }

    /// The cheapest variant holding the given `(a, b, c, d, e, f)` mapping.
    pub fn from_coefficients(a: T, b: T, c: T, d: T, e: T, f: T) -> Self {
        Self::narrowest(Affine::new(a, b, c, d, e, f))
    }

    /// The cheapest variant holding the same mapping as `m`.
    pub fn narrowest(m: Affine<T>) -> Self {
        match m.minimal_degree() {
            Degree::Identity => Self::Identity,
            Degree::Translate => {
                Self::Translate(Translate::new(m.translate_x(), m.translate_y()))
            }
            Degree::Affine => Self::Affine(m),
        }
    }

    fn from_translate(t: Translate<T>) -> Self {
        if t.is_identity() {
            Self::Identity
        } else {
            Self::Translate(t)
        }
    }

    /// Narrows `m`, the widened form of a transform of degree `from`.
    fn settle(m: Affine<T>, from: Degree) -> Self {
        let settled = Self::narrowest(m);
        let to = settled.degree();
        if to > from {
            tracing::trace!(%from, %to, "promoted transform variant");
        }
        settled
    }

    /// The storage degree of the current variant.
    pub fn degree(&self) -> Degree {
        match self {
            Self::Identity => Degree::Identity,
            Self::Translate(_) => Degree::Translate,
            Self::Affine(_) => Degree::Affine,
        }
    }

    /// Which coefficient groups are non-trivial.
    pub fn state(&self) -> State {
        match self {
            Self::Identity => State::IDENTITY,
            Self::Translate(t) => t.state(),
            Self::Affine(m) => m.state(),
        }
    }

    /// The geometric effect of the mapping.
    pub fn transform_type(&self) -> TransformType {
        match self {
            Self::Identity => TransformType::IDENTITY,
            Self::Translate(t) => t.transform_type(),
            Self::Affine(m) => m.transform_type(),
        }
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> T {
        match self {
            Self::Identity => T::one(),
            Self::Translate(t) => t.determinant(),
            Self::Affine(m) => m.determinant(),
        }
    }

    /// True when the mapping is the identity, whatever the variant.
    pub fn is_identity(&self) -> bool {
        self.state() == State::IDENTITY
    }

    /// True when the linear part is the identity.
    pub fn is_translate_or_identity(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Translate(t) => t.is_translate_or_identity(),
            Self::Affine(m) => m.is_translate_or_identity(),
        }
    }

    /// True when [`create_inverse`](Self::create_inverse) would succeed.
    pub fn is_invertible(&self) -> bool {
        match self {
            Self::Identity => true,
            Self::Translate(t) => t.is_invertible(),
            Self::Affine(m) => m.is_invertible(),
        }
    }

    /// The `(a, b, c, d, e, f)` coefficients.
    pub fn to_array(&self) -> [T; 6] {
        self.to_affine().to_array()
    }

    /// The same mapping widened to [`Affine`].
    pub fn to_affine(&self) -> Affine<T> {
        match self {
            Self::Identity => Affine::identity(),
            Self::Translate(t) => Affine::from(*t),
            Self::Affine(m) => *m,
        }
    }

    /// `self ∘ translate(tx, ty)`.
    pub fn derive_with_translation(self, tx: T, ty: T) -> Self {
        match self {
            Self::Identity => Self::translation(tx, ty),
            Self::Translate(mut t) => {
                t.translate(tx, ty);
                Self::from_translate(t)
            }
            Self::Affine(mut m) => {
                m.translate(tx, ty);
                Self::Affine(m)
            }
        }
    }

    /// `translate(tx, ty) ∘ self`.
    pub fn derive_with_pre_translation(self, tx: T, ty: T) -> Self {
        match self {
            Self::Identity => Self::translation(tx, ty),
            Self::Translate(mut t) => {
                t.pre_concatenate(&Translate::new(tx, ty));
                Self::from_translate(t)
            }
            Self::Affine(mut m) => {
                m.pre_translate(tx, ty);
                Self::Affine(m)
            }
        }
    }

    /// `self ∘ scale(sx, sy)`.
    pub fn derive_with_scale(self, sx: T, sy: T) -> Self {
        self.derive_affine(|m| m.scale(sx, sy))
    }

    /// `self ∘ rotate(theta)`.
    pub fn derive_with_rotation(self, theta: T) -> Self {
        self.derive_affine(|m| m.rotate(theta))
    }

    /// `self ∘ shear(shx, shy)`.
    pub fn derive_with_shear(self, shx: T, shy: T) -> Self {
        self.derive_affine(|m| m.shear(shx, shy))
    }

    fn derive_affine(self, op: impl FnOnce(&mut Affine<T>)) -> Self {
        match self {
            Self::Affine(mut m) => {
                op(&mut m);
                Self::Affine(m)
            }
            narrow => {
                let from = narrow.degree();
                let mut m = narrow.to_affine();
                op(&mut m);
                Self::settle(m, from)
            }
        }
    }

    /// `self ∘ other`: `other` is applied to points first.
    pub fn derive_with_concatenation(self, other: &Transform<T>) -> Self {
        match (self, other) {
            (this, Self::Identity) => this,
            (Self::Identity, other) => *other,
            (Self::Translate(mut t), Self::Translate(o)) => {
                t.concatenate(o);
                Self::from_translate(t)
            }
            (Self::Translate(t), Self::Affine(o)) => {
                let mut m = Affine::from(t);
                m.concatenate(o);
                Self::settle(m, Degree::Translate)
            }
            (Self::Affine(mut m), Self::Translate(o)) => {
                m.translate(o.tx(), o.ty());
                Self::Affine(m)
            }
            (Self::Affine(mut m), Self::Affine(o)) => {
                m.concatenate(o);
                Self::Affine(m)
            }
        }
    }

    /// `other ∘ self`: `other` is applied to points last.
    pub fn derive_with_pre_concatenation(self, other: &Transform<T>) -> Self {
        match (self, other) {
            (this, Self::Identity) => this,
            (Self::Identity, other) => *other,
            (Self::Translate(mut t), Self::Translate(o)) => {
                t.pre_concatenate(o);
                Self::from_translate(t)
            }
            (Self::Translate(t), Self::Affine(o)) => {
                let mut m = Affine::from(t);
                m.pre_concatenate(o);
                Self::settle(m, Degree::Translate)
            }
            (Self::Affine(mut m), Self::Translate(o)) => {
                m.pre_translate(o.tx(), o.ty());
                Self::Affine(m)
            }
            (Self::Affine(mut m), Self::Affine(o)) => {
                m.pre_concatenate(o);
                Self::Affine(m)
            }
        }
    }

    /// Replaces the mapping with the given coefficients.
    ///
    /// An [`Transform::Affine`] stays affine; narrower variants take the
    /// cheapest variant of the new mapping.
    pub fn derive_with_new_transform(self, a: T, b: T, c: T, d: T, e: T, f: T) -> Self {
        match self {
            Self::Affine(mut m) => {
                m.set_transform(a, b, c, d, e, f);
                Self::Affine(m)
            }
            narrow => {
                let from = narrow.degree();
                Self::settle(Affine::new(a, b, c, d, e, f), from)
            }
        }
    }

    /// Overwrites the mapping in place without widening the variant.
    ///
    /// A [`Transform::Translate`] restored to a zero offset collapses to
    /// [`Transform::Identity`]; an affine receiver stays affine.
    ///
    /// # Errors
    ///
    /// [`TransformError::UnsupportedDegree`] when the coefficients need a
    /// more general variant than `self`; `self` is left unchanged.
    pub fn try_restore_transform(
        &mut self,
        a: T,
        b: T,
        c: T,
        d: T,
        e: T,
        f: T,
    ) -> Result<(), TransformError> {
        let required = Affine::new(a, b, c, d, e, f).minimal_degree();
        let degree = self.degree();
        if required > degree {
            return Err(TransformError::UnsupportedDegree { degree, required });
        }
        match self {
            Self::Identity => {}
            Self::Translate(_) => *self = Self::from_translate(Translate::new(e, f)),
            Self::Affine(m) => m.set_transform(a, b, c, d, e, f),
        }
        Ok(())
    }

    /// Overwrites the mapping in place without widening the variant.
    ///
    /// Use [`try_restore_transform`](Self::try_restore_transform) for a
    /// non-panicking version.
    ///
    /// # Panics
    ///
    /// Panics when the coefficients need a more general variant than `self`,
    /// e.g. restoring a scale into a [`Transform::Translate`].
    pub fn restore_transform(&mut self, a: T, b: T, c: T, d: T, e: T, f: T) {
        if let Err(err) = self.try_restore_transform(a, b, c, d, e, f) {
            panic!("{err}");
        }
    }

    /// The inverse mapping in the same variant.
    ///
    /// # Errors
    ///
    /// [`TransformError::NonInvertible`] for a singular affine transform.
    pub fn create_inverse(&self) -> Result<Self, TransformError> {
        Ok(match self {
            Self::Identity => Self::Identity,
            Self::Translate(t) => Self::Translate(t.create_inverse()),
            Self::Affine(m) => Self::Affine(m.create_inverse()?),
        })
    }

    /// Inverts in place; on failure `self` is left unchanged.
    pub fn invert(&mut self) -> Result<(), TransformError> {
        *self = self.create_inverse()?;
        Ok(())
    }

    /// Maps a point through the transform.
    pub fn transform_point(&self, point: Point<T>) -> Point<T> {
        match self {
            Self::Identity => point,
            Self::Translate(t) => t.transform_point(point),
            Self::Affine(m) => m.transform_point(point),
        }
    }

    /// Maps a direction through the linear part.
    pub fn delta_transform(&self, vector: Point<T>) -> Point<T> {
        match self {
            Self::Identity => vector,
            Self::Translate(t) => t.delta_transform(vector),
            Self::Affine(m) => m.delta_transform(vector),
        }
    }

    /// Maps a point through the inverse transform.
    pub fn inverse_transform_point(&self, point: Point<T>) -> Result<Point<T>, TransformError> {
        match self {
            Self::Identity => Ok(point),
            Self::Translate(t) => Ok(t.inverse_transform_point(point)),
            Self::Affine(m) => m.inverse_transform_point(point),
        }
    }

    /// Maps a direction through the inverse of the linear part.
    pub fn inverse_delta_transform(&self, vector: Point<T>) -> Result<Point<T>, TransformError> {
        match self {
            Self::Identity => Ok(vector),
            Self::Translate(t) => Ok(t.inverse_delta_transform(vector)),
            Self::Affine(m) => m.inverse_delta_transform(vector),
        }
    }

    /// See [`Affine::transform_coords`].
    pub fn transform_coords(&self, src: &[T], dst: &mut [T]) {
        match self {
            Self::Identity => CoordPairs::split(src, dst).map(|x, y| (x, y)),
            Self::Translate(t) => t.transform_coords(src, dst),
            Self::Affine(m) => m.transform_coords(src, dst),
        }
    }

    /// See [`Affine::transform_coords_within`].
    pub fn transform_coords_within(&self, buf: &mut [T], src: usize, dst: usize, pairs: usize) {
        match self {
            Self::Identity => CoordPairs::shared(buf, src, dst, pairs).map(|x, y| (x, y)),
            Self::Translate(t) => t.transform_coords_within(buf, src, dst, pairs),
            Self::Affine(m) => m.transform_coords_within(buf, src, dst, pairs),
        }
    }

    /// See [`Affine::delta_transform_coords`].
    pub fn delta_transform_coords(&self, src: &[T], dst: &mut [T]) {
        match self {
            Self::Identity => CoordPairs::split(src, dst).map(|x, y| (x, y)),
            Self::Translate(t) => t.delta_transform_coords(src, dst),
            Self::Affine(m) => m.delta_transform_coords(src, dst),
        }
    }

    /// See [`Affine::inverse_transform_coords`].
    pub fn inverse_transform_coords(&self, src: &[T], dst: &mut [T]) -> Result<(), TransformError> {
        match self {
            Self::Identity => CoordPairs::split(src, dst).map(|x, y| (x, y)),
            Self::Translate(t) => t.inverse_transform_coords(src, dst),
            Self::Affine(m) => m.inverse_transform_coords(src, dst)?,
        }
        Ok(())
    }

    /// See [`Affine::inverse_transform_coords_within`].
    pub fn inverse_transform_coords_within(
        &self,
        buf: &mut [T],
        src: usize,
        dst: usize,
        pairs: usize,
    ) -> Result<(), TransformError> {
        match self {
            Self::Identity => CoordPairs::shared(buf, src, dst, pairs).map(|x, y| (x, y)),
            Self::Translate(t) => t.inverse_transform_coords_within(buf, src, dst, pairs),
            Self::Affine(m) => m.inverse_transform_coords_within(buf, src, dst, pairs)?,
        }
        Ok(())
    }

    /// The smallest axis-aligned box enclosing the image of `bounds`.
    pub fn transform_bounds(&self, bounds: &Bounds<T>) -> Bounds<T> {
        match self {
            Self::Identity if bounds.is_empty() => Bounds::empty(),
            Self::Identity => *bounds,
            Self::Translate(t) => t.transform_bounds(bounds),
            Self::Affine(m) => m.transform_bounds(bounds),
        }
    }

    /// The smallest axis-aligned box enclosing the preimage of `bounds`.
    pub fn inverse_transform_bounds(&self, bounds: &Bounds<T>) -> Result<Bounds<T>, TransformError> {
        match self {
            Self::Identity if bounds.is_empty() => Ok(Bounds::empty()),
            Self::Identity => Ok(*bounds),
            Self::Translate(t) => Ok(t.inverse_transform_bounds(bounds)),
            Self::Affine(m) => m.inverse_transform_bounds(bounds),
        }
    }

    /// Bounding rectangle of the image of `rect`.
    pub fn transform_rect(&self, rect: &Rect<T>) -> Rect<T> {
        self.transform_bounds(&rect.to_bounds()).to_rect()
    }

    /// Bounding rectangle of the preimage of `rect`.
    pub fn inverse_transform_rect(&self, rect: &Rect<T>) -> Result<Rect<T>, TransformError> {
        Ok(self.inverse_transform_bounds(&rect.to_bounds())?.to_rect())
    }
}

impl<T> Default for Transform<T> {
    fn default() -> Self {
        Self::Identity
    }
}

impl<T> From<Affine<T>> for Transform<T> {
    fn from(m: Affine<T>) -> Self {
        Self::Affine(m)
    }
}

impl<T: Float> From<Translate<T>> for Transform<T> {
    fn from(t: Translate<T>) -> Self {
        Self::from_translate(t)
    }
}

impl<T: Float> From<&Transform<T>> for Affine<T> {
    fn from(t: &Transform<T>) -> Self {
        t.to_affine()
    }
}

impl<T: Float + fmt::Display> fmt::Display for Transform<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Translate(t) => fmt::Display::fmt(t, f),
            Self::Affine(m) => fmt::Display::fmt(m, f),
        }
    }
}
