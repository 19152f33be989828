//! The uniform result envelope returned by every CRUD operation.
//!
//! Callers distinguish success from failure solely by checking whether
//! `error` is non-null; they never receive a raw error value. The envelope
//! serializes as `{ "data": ..., "error": ... }` with the unused side `null`.

use serde::Serialize;

/// Outcome of a data access operation: data on success, a message on failure.
///
/// Exactly one of the two sides is ever populated. The fields are private and
/// the only constructors are [`Envelope::success`] and [`Envelope::failure`],
/// so the invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    data: Option<T>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    /// Wraps a successful result; `error` is null.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure message; `data` is null.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    /// Returns the success payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Returns the failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Converts the envelope back into a plain `Result`.
    pub fn into_result(self) -> Result<T, String> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (None, Some(error)) => Err(error),
            // Unreachable through the public constructors.
            _ => Err("malformed envelope".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_has_no_error() {
        let envelope = Envelope::success(vec![1, 2, 3]);

        assert!(envelope.is_success());
        assert_eq!(envelope.data(), Some(&vec![1, 2, 3]));
        assert_eq!(envelope.error(), None);
    }

    #[test]
    fn failure_has_no_data() {
        let envelope: Envelope<Vec<i32>> = Envelope::failure("boom");

        assert!(!envelope.is_success());
        assert_eq!(envelope.data(), None);
        assert_eq!(envelope.error(), Some("boom"));
    }

    #[test]
    fn serializes_with_null_side() {
        let success = serde_json::to_value(Envelope::success(true)).unwrap();
        assert_eq!(success, serde_json::json!({ "data": true, "error": null }));

        let failure = serde_json::to_value(Envelope::<bool>::failure("nope")).unwrap();
        assert_eq!(failure, serde_json::json!({ "data": null, "error": "nope" }));
    }

    #[test]
    fn into_result_round_trips() {
        assert_eq!(Envelope::success(7).into_result(), Ok(7));
        assert_eq!(
            Envelope::<i32>::failure("bad").into_result(),
            Err("bad".to_string())
        );
    }
}
