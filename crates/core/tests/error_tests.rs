// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("eof".into());
        assert_eq!(err.to_string(), "Deserialization error: eof");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("denied".into());
        assert_eq!(err.to_string(), "File I/O error: denied");
    }

    #[test]
    fn invalid_date_names_expected_format() {
        let err = CoreError::InvalidDate("2024-13-01".into());
        assert_eq!(
            err.to_string(),
            "Invalid date '2024-13-01': expected YYYY-MM-DD"
        );
    }

    #[test]
    fn unknown_currency() {
        let err = CoreError::UnknownCurrency("JPY".into());
        assert_eq!(err.to_string(), "Unknown currency code: JPY");
    }

    #[test]
    fn invalid_amount() {
        let err = CoreError::InvalidAmount("12,5".into());
        assert_eq!(err.to_string(), "Invalid amount '12,5'");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("amount must be positive".into());
        assert_eq!(
            err.to_string(),
            "Record validation failed: amount must be positive"
        );
    }

    #[test]
    fn record_not_found() {
        let err = CoreError::RecordNotFound("Debt 42".into());
        assert_eq!(err.to_string(), "Record not found: Debt 42");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod from_impls {
    use super::*;

    #[test]
    fn io_error_becomes_file_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("gone")));
    }

    #[test]
    fn json_error_becomes_deserialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn decimal_error_becomes_invalid_amount() {
        let dec_err = "x1".parse::<rust_decimal::Decimal>().unwrap_err();
        let err: CoreError = dec_err.into();
        assert!(matches!(err, CoreError::InvalidAmount(_)));
    }

    #[test]
    fn question_mark_propagates() {
        fn read(path: &str) -> Result<String, CoreError> {
            Ok(std::fs::read_to_string(path)?)
        }
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }
}

// ── Trait bounds ────────────────────────────────────────────────────

mod traits {
    use super::*;

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<CoreError>();
    }

    #[test]
    fn debug_includes_variant() {
        let err = CoreError::UnknownCurrency("BTC".into());
        assert!(format!("{err:?}").contains("UnknownCurrency"));
    }
}
