//! Per-request outcomes and batch verification
//!
//! Every HTTP strategy aggregates one `RequestOutcome` per call and checks
//! the batch before the invocation counts toward the measured rate.

use reqwest::StatusCode;

use crate::error::CaseError;

/// Outcome of a single HTTP request within a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    /// HTTP status code, or 0 when the request never produced a response
    pub status: u16,
    /// Whether the response counts as a success (2xx)
    pub success: bool,
}

impl RequestOutcome {
    /// Outcome for a response with the given status
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            success: status.is_success(),
        }
    }

    /// Outcome for a request that failed before producing a response
    pub fn failed() -> Self {
        Self {
            status: 0,
            success: false,
        }
    }
}

/// Verify a completed batch: the count must match and every outcome must be
/// a success. The count is checked first so a short batch reports as a count
/// mismatch rather than as whichever status happened to be missing.
pub fn check_batch(outcomes: &[RequestOutcome], expected: usize) -> Result<(), CaseError> {
    if outcomes.len() != expected {
        return Err(CaseError::ResponseCount {
            expected,
            observed: outcomes.len(),
        });
    }

    if let Some(bad) = outcomes.iter().find(|outcome| !outcome.success) {
        return Err(CaseError::BadStatus(bad.status));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_status() {
        let ok = RequestOutcome::from_status(StatusCode::OK);
        assert_eq!(ok.status, 200);
        assert!(ok.success);

        let created = RequestOutcome::from_status(StatusCode::CREATED);
        assert!(created.success);

        let server_error = RequestOutcome::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server_error.status, 500);
        assert!(!server_error.success);
    }

    #[test]
    fn test_failed_outcome() {
        let outcome = RequestOutcome::failed();
        assert_eq!(outcome.status, 0);
        assert!(!outcome.success);
    }

    #[test]
    fn test_check_batch_passes() {
        let outcomes = vec![RequestOutcome::from_status(StatusCode::OK); 10];
        assert!(check_batch(&outcomes, 10).is_ok());
    }

    #[test]
    fn test_check_batch_empty() {
        assert!(check_batch(&[], 0).is_ok());
    }

    #[test]
    fn test_check_batch_count_mismatch() {
        let outcomes = vec![RequestOutcome::from_status(StatusCode::OK); 9];
        let err = check_batch(&outcomes, 10).unwrap_err();
        assert!(matches!(
            err,
            CaseError::ResponseCount {
                expected: 10,
                observed: 9
            }
        ));
    }

    #[test]
    fn test_check_batch_bad_status() {
        let mut outcomes = vec![RequestOutcome::from_status(StatusCode::OK); 10];
        outcomes[3] = RequestOutcome::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        let err = check_batch(&outcomes, 10).unwrap_err();
        assert!(matches!(err, CaseError::BadStatus(500)));
    }

    #[test]
    fn test_count_checked_before_status() {
        // A short batch with a failed outcome reports the count mismatch.
        let outcomes = vec![RequestOutcome::failed(); 5];
        let err = check_batch(&outcomes, 10).unwrap_err();
        assert!(matches!(err, CaseError::ResponseCount { .. }));
    }
}
