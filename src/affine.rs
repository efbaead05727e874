//! The affine matrix engine.
//!
//! [`Affine`] stores all six coefficients and keeps a cached [`State`]
//! (which coefficient groups are non-trivial) and [`TransformType`]
//! (the geometric effect) in sync with them. [`Translate`] is the two-offset
//! variant used when the linear part is exactly identity.
//!
//! # Conventions
//!
//! - Coefficients are listed in `(a, b, c, d, e, f)` order, mapping
//!   `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
//! - `concatenate` and the operation mutators (`translate`, `scale`,
//!   `rotate`, `shear`) post-multiply; `pre_concatenate` and
//!   `pre_translate` pre-multiply.
//! - Positive rotation angles turn the positive X axis towards the
//!   positive Y axis.

mod apply;
pub mod compose;
mod kind;
mod matrix;
mod translate;

pub use kind::{Degree, State, TransformType};
pub use matrix::Affine;
pub use translate::Translate;
