//! Unit tests for fetch error types

#[cfg(test)]
mod tests {
    use crate::api::FetchError;
    use std::error::Error;

    #[test]
    fn test_status_error_display() {
        let error = FetchError::Status(429);
        assert_eq!(error.to_string(), "API responded with status 429");
    }

    #[test]
    fn test_transport_error_display() {
        let error = FetchError::Transport("connection refused".to_string());
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_decode_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: FetchError = json_error.into();

        match error {
            FetchError::Decode(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected Decode variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_is_std_error() {
        let error = FetchError::InvalidRequest("bad base".to_string());
        assert!(error.source().is_none());
        assert!(format!("{error:?}").contains("InvalidRequest"));
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(FetchError::Status(500), FetchError::Status(500));
        assert_ne!(FetchError::Status(500), FetchError::Status(502));
    }
}
