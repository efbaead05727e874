//! Error type shared by every transform variant.

use thiserror::Error;

use crate::affine::Degree;

/// Failures reported by transform operations.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    /// The linear part cannot be inverted: its determinant (or the divisor
    /// used by the state-specific inverse formula) is zero or subnormal.
    #[error("transform is not invertible (determinant {determinant})")]
    NonInvertible { determinant: f64 },

    /// A transform of degree `required` was offered to a variant that can
    /// only represent `degree`.
    #[error("{required} mapping does not fit the {degree} variant")]
    UnsupportedDegree { degree: Degree, required: Degree },
}

impl TransformError {
    /// Builds a [`TransformError::NonInvertible`] for an inverse that is
    /// being refused, and logs the refusal.
    pub(crate) fn non_invertible<T: num_traits::Float>(determinant: T) -> Self {
        let determinant = determinant.to_f64().unwrap_or(f64::NAN);
        tracing::debug!(determinant, "refusing to invert a singular transform");
        Self::NonInvertible { determinant }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::span;

    use super::*;
    use crate::affine::Affine;

    /// Counts events and ignores spans.
    struct EventCounter(Arc<AtomicUsize>);

    impl tracing::Subscriber for EventCounter {
        fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
            true
        }
        fn new_span(&self, _: &span::Attributes<'_>) -> span::Id {
            span::Id::from_u64(1)
        }
        fn record(&self, _: &span::Id, _: &span::Record<'_>) {}
        fn record_follows_from(&self, _: &span::Id, _: &span::Id) {}
        fn event(&self, _: &tracing::Event<'_>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
        fn enter(&self, _: &span::Id) {}
        fn exit(&self, _: &span::Id) {}
    }

    #[test]
    fn only_refused_inverses_are_logged() {
        let events = Arc::new(AtomicUsize::new(0));
        let subscriber = EventCounter(Arc::clone(&events));
        let singular = Affine::from_scale(0.0, 1.0);

        tracing::subscriber::with_default(subscriber, || {
            assert!(!singular.is_invertible());
            assert_eq!(events.load(Ordering::SeqCst), 0);

            assert!(singular.create_inverse().is_err());
            assert_eq!(events.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn messages_name_the_failure() {
        let err = TransformError::non_invertible(0.0f64);
        assert_eq!(err.to_string(), "transform is not invertible (determinant 0)");

        let err = TransformError::UnsupportedDegree {
            degree: Degree::Translate,
            required: Degree::Affine,
        };
        assert_eq!(
            err.to_string(),
            "affine mapping does not fit the translate variant"
        );
    }
}
