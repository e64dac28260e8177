//! Canonical schema constants for structured logging
//!
//! These constants keep field keys and event names consistent between the
//! logging macros, the error facility and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_DISPATCHER_ID: &str = "dispatcher_id";
pub const FIELD_RUN_ID: &str = "run_id";

// Dispatch fields
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_INPUT_KIND: &str = "input_kind";
pub const FIELD_OPERAND_COUNT: &str = "operand_count";
pub const FIELD_RESULT: &str = "result";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Input classification names, as logged under `input_kind`
pub const INPUT_KIND_NUMBER: &str = "number";
pub const INPUT_KIND_TOKEN: &str = "token";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_COMMAND.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_keys_are_flat_identifiers() {
        for key in [FIELD_ERR_KIND, FIELD_ERR_CODE] {
            assert!(key.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_input_kinds_are_distinct() {
        assert_ne!(INPUT_KIND_NUMBER, INPUT_KIND_TOKEN);
    }
}
