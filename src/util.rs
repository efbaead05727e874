use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Return `(min, max)` over the given values, or `None` when empty.
///
/// NaN values never win a comparison, so they are skipped unless every
/// value is NaN.
pub fn extent<T: Float>(values: impl IntoIterator<Item = T>) -> Option<(T, T)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// True when `value` is too small in magnitude to divide by: zero or subnormal.
pub(crate) fn is_degenerate<T: Float>(value: T) -> bool {
    !(value.abs() >= T::min_positive_value())
}
