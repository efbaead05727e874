//! Two-dimensional affine transforms
//!
//! `aksel_affine` is a small algebra of 2D affine transforms. It focuses on
//! exactness where the arithmetic allows it: quarter-turn rotations never
//! pick up trigonometric rounding, identity operands are never multiplied
//! through, and every fast path agrees with the full matrix product.
//!
//! # Core Concepts
//!
//! ## The Matrix Engine
//!
//! [`Affine`] holds the six coefficients `(a, b, c, d, e, f)` of the mapping
//!
//! ```text
//! x' = a·x + c·y + e
//! y' = b·x + d·y + f
//! ```
//!
//! together with a [`State`] bitmask saying which coefficient groups are
//! non-trivial. Every operation dispatches on that state, so applying a pure
//! translation costs two additions per point.
//!
//! ## Classification
//!
//! - [`Degree`] - storage generality: identity, translate or affine
//! - [`State`] - translate / scale / shear membership, drives the fast paths
//! - [`TransformType`] - geometric effect: scale, rotation, flip, ...
//!
//! ## Variants
//!
//! [`Transform`] stores a mapping in the cheapest of three variants and
//! promotes it when an operation needs more (see [`transform`]).
//!
//! ## Geometry
//!
//! - [`Point`] - a position or direction
//! - [`Rect`] - origin plus signed size
//! - [`Bounds`] - axis-aligned min/max box
//!
//! # Examples
//!
//! ## Building a Transform
//!
//! ```rust
//! use std::f64::consts::FRAC_PI_2;
//! use aksel_affine::{Affine, Point, TransformType};
//!
//! let mut m = Affine::from_translation(5.0, 5.0);
//! m.rotate(FRAC_PI_2);
//!
//! // The rotation is applied first, then the translation.
//! assert_eq!(m.transform_point(Point::new(1.0, 0.0)), Point::new(5.0, 6.0));
//! assert_eq!(
//!     m.transform_type(),
//!     TransformType::TRANSLATION | TransformType::QUADRANT_ROTATION
//! );
//! ```
//!
//! ## Concatenation Order
//!
//! ```rust
//! use aksel_affine::{Affine, Point};
//!
//! let scale = Affine::from_scale(2.0, 3.0);
//! let shift = Affine::from_translation(1.0, 1.0);
//!
//! // scale ∘ shift: shift first, then scale.
//! let mut post = scale;
//! post.concatenate(&shift);
//! assert_eq!(post.transform_point(Point::new(1.0, 1.0)), Point::new(4.0, 6.0));
//!
//! // shift ∘ scale: scale first, then shift.
//! let mut pre = scale;
//! pre.pre_concatenate(&shift);
//! assert_eq!(pre.transform_point(Point::new(1.0, 1.0)), Point::new(3.0, 4.0));
//! ```
//!
//! ## Inversion
//!
//! ```rust
//! use aksel_affine::{Affine, TransformError};
//!
//! let m = Affine::from_scale(2.0, 0.5);
//! assert_eq!(m.create_inverse().unwrap().to_array(), [0.5, 0.0, 0.0, 2.0, 0.0, 0.0]);
//!
//! let flat = Affine::from_scale(0.0, 1.0);
//! assert!(matches!(
//!     flat.create_inverse(),
//!     Err(TransformError::NonInvertible { .. })
//! ));
//! ```
//!
//! ## Other Precisions
//!
//! Every type is generic over [`Float`], defaulting to `f64`:
//!
//! ```rust
//! use aksel_affine::{Affine, Point};
//!
//! let m = Affine::<f32>::from_scale(2.0, 2.0);
//! assert_eq!(m.transform_point(Point::new(1.5f32, -1.0)), Point::new(3.0, -2.0));
//! ```
//!

pub mod affine;
pub mod error;
pub mod geometry;
pub mod transform;
mod util;

pub use affine::{Affine, Degree, State, TransformType, Translate};
pub use error::TransformError;
pub use geometry::{Bounds, Point, Rect};
pub use num_traits::Float;
pub use transform::Transform;
