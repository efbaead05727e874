//! Classification of affine transforms.
//!
//! Three views of the same coefficients, from coarsest to finest:
//!
//! - [`Degree`] picks the storage variant (identity, translation, general).
//! - [`State`] records which coefficient groups are structurally non-trivial
//!   and drives the arithmetic fast paths.
//! - [`TransformType`] describes the geometric effect (scale, rotation,
//!   flip, ...).
//!
//! All three are pure functions of the coefficients.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

use num_traits::Float;

/// Structural generality of a transform, ordered from cheapest to most general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Degree {
    /// No stored coefficients; maps every point to itself.
    Identity,
    /// Two stored offsets; the linear part is exactly identity.
    Translate,
    /// All six coefficients.
    Affine,
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Degree::Identity => "identity",
            Degree::Translate => "translate",
            Degree::Affine => "affine",
        })
    }
}

/// Which coefficient groups of `(a, b, c, d, e, f)` are non-trivial.
///
/// - `TRANSLATE`: `e` or `f` is non-zero.
/// - `SHEAR`: `b` or `c` is non-zero.
/// - `SCALE`: without `SHEAR`, the diagonal `(a, d)` is not `(1, 1)`;
///   with `SHEAR`, at least one of `a`, `d` is non-zero.
///
/// `IDENTITY` is the empty set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct State(u8);

impl State {
    pub const IDENTITY: Self = Self(0);
    pub const TRANSLATE: Self = Self(1);
    pub const SCALE: Self = Self(2);
    pub const SHEAR: Self = Self(4);

    /// Derives the state from the coefficients.
    pub fn of<T: Float>(a: T, b: T, c: T, d: T, e: T, f: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        let mut state = Self::IDENTITY;
        if b != zero || c != zero {
            state |= Self::SHEAR;
            if a != zero || d != zero {
                state |= Self::SCALE;
            }
        } else if a != one || d != one {
            state |= Self::SCALE;
        }
        if e != zero || f != zero {
            state |= Self::TRANSLATE;
        }
        state
    }

    /// The raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any flag of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// The state with the translation group removed.
    pub const fn linear(self) -> Self {
        Self(self.0 & !Self::TRANSLATE.0)
    }

    /// `(shear, scale, translate)` membership, for exhaustive matching.
    pub(crate) const fn flags(self) -> (bool, bool, bool) {
        (
            self.contains(Self::SHEAR),
            self.contains(Self::SCALE),
            self.contains(Self::TRANSLATE),
        )
    }
}

impl BitOr for State {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for State {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for State {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl Not for State {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0 & 0b111)
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(
            f,
            self.0,
            "IDENTITY",
            &[(1, "TRANSLATE"), (2, "SCALE"), (4, "SHEAR")],
        )
    }
}

/// Geometric classification of a transform.
///
/// A bitwise combination of the constants below. `IDENTITY` is the empty
/// set; a pure `GENERAL_TRANSFORM` is never combined with other flags except
/// `TRANSLATION`.
///
/// ```
/// use aksel_affine::{Affine, TransformType};
///
/// let mut m = Affine::from_scale(2.0, 2.0);
/// m.translate(1.0, 0.0);
/// assert_eq!(
///     m.transform_type(),
///     TransformType::TRANSLATION | TransformType::UNIFORM_SCALE
/// );
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TransformType(u8);

impl TransformType {
    pub const IDENTITY: Self = Self(0);
    pub const TRANSLATION: Self = Self(1);
    pub const UNIFORM_SCALE: Self = Self(2);
    pub const GENERAL_SCALE: Self = Self(4);
    pub const MASK_SCALE: Self = Self(2 | 4);
    /// Rotation by a multiple of 90 degrees.
    pub const QUADRANT_ROTATION: Self = Self(8);
    pub const GENERAL_ROTATION: Self = Self(16);
    pub const MASK_ROTATION: Self = Self(8 | 16);
    /// Non-orthogonal mapping (the images of the axes are not perpendicular).
    pub const GENERAL_TRANSFORM: Self = Self(32);
    /// Mirror image about some axis.
    pub const FLIP: Self = Self(64);

    const ALL: u8 = 0x7f;

    /// The raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Rebuilds a classification from raw bits, rejecting unknown flags.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::ALL == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// True when every flag of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any flag of `other` is set.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// True when no flag is set.
    pub const fn is_identity(self) -> bool {
        self.0 == 0
    }

    /// Classifies the linear part `(a, b, c, d)` under `state`.
    ///
    /// `state` must be `State::of` the same coefficients.
    pub fn classify<T: Float>(state: State, a: T, b: T, c: T, d: T) -> Self {
        let zero = T::zero();
        let one = T::one();
        let mut ty = if state.contains(State::TRANSLATE) {
            Self::TRANSLATION
        } else {
            Self::IDENTITY
        };

        match state.linear() {
            State::IDENTITY => {}
            State::SCALE => {
                let (sx, sy) = (a, d);
                let (pos_x, pos_y) = (sx >= zero, sy >= zero);
                if pos_x == pos_y {
                    if pos_x {
                        ty |= if sx == sy {
                            Self::UNIFORM_SCALE
                        } else {
                            Self::GENERAL_SCALE
                        };
                    } else {
                        // Both negative: a half turn.
                        ty |= Self::QUADRANT_ROTATION;
                        if sx != sy {
                            ty |= Self::GENERAL_SCALE;
                        } else if sx != -one {
                            ty |= Self::UNIFORM_SCALE;
                        }
                    }
                } else {
                    ty |= Self::FLIP;
                    if sx != -sy {
                        ty |= Self::GENERAL_SCALE;
                    } else if sx != one && sx != -one {
                        ty |= Self::UNIFORM_SCALE;
                    }
                }
            }
            State::SHEAR => {
                let (shx, shy) = (c, b);
                ty |= Self::QUADRANT_ROTATION;
                if (shx >= zero) != (shy >= zero) {
                    // Opposite signs: a quarter turn.
                    if shx != -shy {
                        ty |= Self::GENERAL_SCALE;
                    } else if shx != one && shx != -one {
                        ty |= Self::UNIFORM_SCALE;
                    }
                } else {
                    // Same signs: a quarter turn plus a flip.
                    ty |= Self::FLIP;
                    if shx != shy {
                        ty |= Self::GENERAL_SCALE;
                    } else if shx != one && shx != -one {
                        ty |= Self::UNIFORM_SCALE;
                    }
                }
            }
            _ => {
                // Images of the unit axes are (a, b) and (c, d).
                if a * c + b * d != zero {
                    return ty | Self::GENERAL_TRANSFORM;
                }
                ty |= Self::GENERAL_ROTATION;
                if (a >= zero) == (d >= zero) {
                    if a != d || c != -b {
                        ty |= Self::GENERAL_SCALE;
                    } else if a * d - c * b != one {
                        ty |= Self::UNIFORM_SCALE;
                    }
                } else {
                    ty |= Self::FLIP;
                    if a != -d || c != b {
                        ty |= Self::GENERAL_SCALE;
                    } else if a * d - c * b != -one {
                        ty |= Self::UNIFORM_SCALE;
                    }
                }
            }
        }
        ty
    }
}

impl BitOr for TransformType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TransformType {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TransformType {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_flags(
            f,
            self.0,
            "IDENTITY",
            &[
                (1, "TRANSLATION"),
                (2, "UNIFORM_SCALE"),
                (4, "GENERAL_SCALE"),
                (8, "QUADRANT_ROTATION"),
                (16, "GENERAL_ROTATION"),
                (32, "GENERAL_TRANSFORM"),
                (64, "FLIP"),
            ],
        )
    }
}

fn write_flags(
    f: &mut fmt::Formatter<'_>,
    bits: u8,
    empty: &str,
    names: &[(u8, &str)],
) -> fmt::Result {
    if bits == 0 {
        return f.write_str(empty);
    }
    let mut first = true;
    for &(bit, name) in names {
        if bits & bit != 0 {
            if !first {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
            first = false;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> State {
        State::of(a, b, c, d, e, f)
    }

    fn classify(a: f64, b: f64, c: f64, d: f64) -> TransformType {
        TransformType::classify(state(a, b, c, d, 0.0, 0.0), a, b, c, d)
    }

    #[test]
    fn degree_is_ordered_by_generality() {
        assert!(Degree::Identity < Degree::Translate);
        assert!(Degree::Translate < Degree::Affine);
        assert_eq!(Degree::Translate.to_string(), "translate");
    }

    #[test]
    fn state_covers_all_eight_combinations() {
        assert_eq!(state(1.0, 0.0, 0.0, 1.0, 0.0, 0.0), State::IDENTITY);
        assert_eq!(state(1.0, 0.0, 0.0, 1.0, 3.0, 0.0), State::TRANSLATE);
        assert_eq!(state(2.0, 0.0, 0.0, 1.0, 0.0, 0.0), State::SCALE);
        assert_eq!(
            state(2.0, 0.0, 0.0, 1.0, 0.0, -1.0),
            State::SCALE | State::TRANSLATE
        );
        assert_eq!(state(0.0, 1.0, -1.0, 0.0, 0.0, 0.0), State::SHEAR);
        assert_eq!(
            state(0.0, 1.0, -1.0, 0.0, 1.0, 0.0),
            State::SHEAR | State::TRANSLATE
        );
        assert_eq!(
            state(1.0, 0.5, 0.0, 1.0, 0.0, 0.0),
            State::SHEAR | State::SCALE
        );
        assert_eq!(
            state(1.0, 0.5, 0.0, 1.0, 0.0, 4.0),
            State::SHEAR | State::SCALE | State::TRANSLATE
        );
    }

    #[test]
    fn all_zero_linear_part_is_a_scale() {
        assert_eq!(state(0.0, 0.0, 0.0, 0.0, 0.0, 0.0), State::SCALE);
    }

    #[test]
    fn state_set_operations() {
        let s = State::SHEAR | State::TRANSLATE;
        assert!(s.contains(State::SHEAR));
        assert!(!s.contains(State::SCALE));
        assert!(s.intersects(State::TRANSLATE | State::SCALE));
        assert_eq!(s.linear(), State::SHEAR);
        assert_eq!(!s, State::SCALE);
        assert_eq!(format!("{s:?}"), "TRANSLATE | SHEAR");
        assert_eq!(format!("{:?}", State::IDENTITY), "IDENTITY");
    }

    #[test]
    fn classify_scales() {
        assert_eq!(classify(1.0, 0.0, 0.0, 1.0), TransformType::IDENTITY);
        assert_eq!(classify(3.0, 0.0, 0.0, 3.0), TransformType::UNIFORM_SCALE);
        assert_eq!(classify(3.0, 0.0, 0.0, 2.0), TransformType::GENERAL_SCALE);
    }

    #[test]
    fn classify_half_turns_and_flips() {
        assert_eq!(
            classify(-1.0, 0.0, 0.0, -1.0),
            TransformType::QUADRANT_ROTATION
        );
        assert_eq!(
            classify(-2.0, 0.0, 0.0, -2.0),
            TransformType::QUADRANT_ROTATION | TransformType::UNIFORM_SCALE
        );
        assert_eq!(classify(-1.0, 0.0, 0.0, 1.0), TransformType::FLIP);
        assert_eq!(
            classify(2.0, 0.0, 0.0, -2.0),
            TransformType::FLIP | TransformType::UNIFORM_SCALE
        );
        assert_eq!(
            classify(2.0, 0.0, 0.0, -3.0),
            TransformType::FLIP | TransformType::GENERAL_SCALE
        );
    }

    #[test]
    fn classify_quarter_turns() {
        // 90 degrees: (x, y) -> (-y, x)
        assert_eq!(
            classify(0.0, 1.0, -1.0, 0.0),
            TransformType::QUADRANT_ROTATION
        );
        assert_eq!(
            classify(0.0, 2.0, -2.0, 0.0),
            TransformType::QUADRANT_ROTATION | TransformType::UNIFORM_SCALE
        );
        // Swap of axes: a quarter turn plus a flip.
        assert_eq!(
            classify(0.0, 1.0, 1.0, 0.0),
            TransformType::QUADRANT_ROTATION | TransformType::FLIP
        );
        assert_eq!(
            classify(0.0, 1.0, 3.0, 0.0),
            TransformType::QUADRANT_ROTATION | TransformType::FLIP | TransformType::GENERAL_SCALE
        );
    }

    #[test]
    fn classify_general_rotation_and_shear() {
        let (s, c) = 0.3f64.sin_cos();
        assert_eq!(classify(c, s, -s, c), TransformType::GENERAL_ROTATION);
        assert_eq!(
            classify(2.0 * c, 2.0 * s, -2.0 * s, 2.0 * c),
            TransformType::GENERAL_ROTATION | TransformType::UNIFORM_SCALE
        );
        assert_eq!(
            classify(c, s, s, -c),
            TransformType::GENERAL_ROTATION | TransformType::FLIP
        );
        assert_eq!(
            classify(1.0, 0.0, 0.5, 1.0),
            TransformType::GENERAL_TRANSFORM
        );
    }

    #[test]
    fn classify_keeps_translation_flag() {
        let st = state(1.0, 0.0, 0.5, 1.0, 2.0, 0.0);
        assert_eq!(
            TransformType::classify(st, 1.0, 0.0, 0.5, 1.0),
            TransformType::TRANSLATION | TransformType::GENERAL_TRANSFORM
        );
    }

    #[test]
    fn transform_type_bits() {
        assert_eq!(TransformType::from_bits(0x80), None);
        assert_eq!(
            TransformType::from_bits(1 | 8),
            Some(TransformType::TRANSLATION | TransformType::QUADRANT_ROTATION)
        );
        assert!(TransformType::MASK_SCALE.contains(TransformType::UNIFORM_SCALE));
        assert!(TransformType::MASK_ROTATION.intersects(TransformType::GENERAL_ROTATION));
        assert_eq!(
            format!("{:?}", TransformType::FLIP | TransformType::TRANSLATION),
            "TRANSLATION | FLIP"
        );
    }
}
