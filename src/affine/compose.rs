//! Matrix composition through a table of operand shapes.
//!
//! Composition is the bilinear product of two 2x3 matrices. Most transforms
//! met in practice have structurally zero terms, so each operand is first
//! reduced to a [`Shape`] and the pair of shapes selects the formula with
//! the fewest multiplications.
//!
//! Skipping a product with a structural zero can flip the sign of a zero
//! result, so for finite inputs every cell agrees with [`compose_general`]
//! up to the sign of zero coefficients. [`positive_zeros`] removes that
//! difference; [`Affine`](super::Affine) stores only its output, so stored
//! products are bit-identical whichever cell produced them.

use num_traits::Float;

use super::kind::State;

/// Coefficients in `(a, b, c, d, e, f)` order.
pub type Coefficients<T> = [T; 6];

/// Coarse operand shape used to index the composition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `b = c = 0`, `a = d = 1`, `e = f = 0`.
    Identity,
    /// Identity linear part with a non-zero translation.
    Translation,
    /// `b = c = 0`; translation may be present.
    Diagonal,
    /// Off-diagonal terms present; translation may be present.
    General,
}

impl Shape {
    /// The coarsest shape covering `state`.
    pub fn of(state: State) -> Self {
        if state.contains(State::SHEAR) {
            Shape::General
        } else if state.contains(State::SCALE) {
            Shape::Diagonal
        } else if state.contains(State::TRANSLATE) {
            Shape::Translation
        } else {
            Shape::Identity
        }
    }
}

/// Reference product `lhs ∘ rhs`: the mapping that applies `rhs` first.
pub fn compose_general<T: Float>(lhs: &Coefficients<T>, rhs: &Coefficients<T>) -> Coefficients<T> {
    let [la, lb, lc, ld, le, lf] = *lhs;
    let [ra, rb, rc, rd, re, rf] = *rhs;
    [
        la * ra + lc * rb,
        lb * ra + ld * rb,
        la * rc + lc * rd,
        lb * rc + ld * rd,
        la * re + lc * rf + le,
        lb * re + ld * rf + lf,
    ]
}

/// Replaces every `-0` coefficient with `+0`, leaving all other values
/// (including NaN) as they are.
pub fn positive_zeros<T: Float>(coefficients: Coefficients<T>) -> Coefficients<T> {
    coefficients.map(|v| v + T::zero())
}

/// Product `lhs ∘ rhs` using the cheapest formula for the operand shapes.
pub fn compose<T: Float>(
    lhs: &Coefficients<T>,
    lhs_shape: Shape,
    rhs: &Coefficients<T>,
    rhs_shape: Shape,
) -> Coefficients<T> {
    use Shape::*;

    let zero = T::zero();
    let one = T::one();
    let [la, lb, lc, ld, le, lf] = *lhs;
    let [ra, rb, rc, rd, re, rf] = *rhs;

    match (lhs_shape, rhs_shape) {
        (_, Identity) => *lhs,
        (Identity, _) => *rhs,

        (Translation, Translation) => [one, zero, zero, one, re + le, rf + lf],
        (Translation, Diagonal) => [ra, zero, zero, rd, re + le, rf + lf],
        (Translation, General) => [ra, rb, rc, rd, re + le, rf + lf],

        (Diagonal, Translation) => [la, zero, zero, ld, la * re + le, ld * rf + lf],
        (Diagonal, Diagonal) => [la * ra, zero, zero, ld * rd, la * re + le, ld * rf + lf],
        (Diagonal, General) => [
            la * ra,
            ld * rb,
            la * rc,
            ld * rd,
            la * re + le,
            ld * rf + lf,
        ],

        (General, Translation) => [
            la,
            lb,
            lc,
            ld,
            la * re + lc * rf + le,
            lb * re + ld * rf + lf,
        ],
        (General, Diagonal) => [
            la * ra,
            lb * ra,
            lc * rd,
            ld * rd,
            la * re + lc * rf + le,
            lb * re + ld * rf + lf,
        ],
        (General, General) => compose_general(lhs, rhs),
    }
}
