#[cfg(feature = "serde")]
mod serde_tests {
    use minicond::{Condition, FlagSet, ParseError, ParseErrorKind, TokenKind};

    #[test]
    fn test_flag_set_round_trip() {
        let mut flags = FlagSet::new();
        flags.enable("_ALPHATEST_ON").enable("_EMISSION");

        let serialized = serde_json::to_string(&flags).unwrap();
        let deserialized: FlagSet = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, flags);
        assert!(deserialized.contains("_EMISSION"));
        assert!(!deserialized.contains("_NORMALMAP"));
    }

    #[test]
    fn test_parse_error_serialization() {
        let error = ParseError {
            position: 4,
            kind: ParseErrorKind::UnexpectedToken {
                expected: TokenKind::RightParen,
            },
        };

        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: ParseError = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, error);
    }

    #[test]
    fn test_condition_serializes_source_only() {
        let condition = Condition::parse("a and not b").unwrap();

        let serialized = serde_json::to_string(&condition).unwrap();
        assert_eq!(serialized, r#"{"source":"a and not b"}"#);
    }

    #[test]
    fn test_condition_deserialization_reparses() {
        let condition = Condition::parse("_EMISSION or _BAKED").unwrap();

        let serialized = serde_json::to_string(&condition).unwrap();
        let deserialized: Condition = serde_json::from_str(&serialized).unwrap();

        // Both conditions must answer identically.
        let flags = FlagSet::from_iter(["_BAKED"]);
        assert_eq!(deserialized.evaluate(&flags), condition.evaluate(&flags));
        assert_eq!(deserialized.source(), condition.source());
        assert_eq!(deserialized.node(), condition.node());
    }

    #[test]
    fn test_condition_deserialization_rejects_malformed_source() {
        let result: Result<Condition, _> =
            serde_json::from_str(r#"{"source":"a and ("}"#);
        assert!(result.is_err());
    }
}
