//! Fixed texts and message formats used by the response helpers.

use std::fmt::Display;

/// `errorMessage` of every 401 response.
pub const UNAUTHORIZED: &str = "error you are not authorized";

/// Log event emitted for a plain success response.
pub const EVENT_SUCCESS: &str = "success";

/// Log event emitted for a 201 response.
pub const EVENT_CREATE_OR_UPDATE: &str = "create or update";

/// Prefix for the plain-text fallback when the envelope cannot be written.
pub const ENCODE_FAILED: &str = "error to encode: ";

/// `"<name>: <err>"`, the message of a guard-clause failure.
pub fn step_failed(err_name: &str, err: &(impl Display + ?Sized)) -> String {
    format!("{err_name}: {err}")
}

/// Rollback after an unconditional failure did not go through.
pub fn rollback_failed(rollback_err: &(impl Display + ?Sized), err_name: &str) -> String {
    format!("ERROR rollback: {rollback_err}, ON: {err_name}")
}

/// Rollback after an unconditional failure went through.
pub fn rolled_back(err_name: &str) -> String {
    format!("{err_name}, execute ROLLBACK")
}

/// Rollback after a guarded step failure did not go through.
pub fn step_rollback_failed(rollback_err: &(impl Display + ?Sized), err_name: &str) -> String {
    format!("error ROLLBACK: {rollback_err}, ON: {err_name}")
}

/// Rollback after a guarded step failure went through.
pub fn step_rolled_back(err_name: &str, err: &(impl Display + ?Sized)) -> String {
    format!("{err_name} | execute ROLLBACK, {err}")
}

/// Plain-text body written when the envelope could not be encoded or sent.
pub fn encode_failed(err: &(impl Display + ?Sized)) -> String {
    format!("{ENCODE_FAILED}{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_joins_name_and_error() {
        assert_eq!(step_failed("step1", "boom"), "step1: boom");
    }

    #[test]
    fn unconditional_rollback_messages() {
        assert_eq!(
            rollback_failed("conn closed", "insert order"),
            "ERROR rollback: conn closed, ON: insert order"
        );
        assert_eq!(rolled_back("insert order"), "insert order, execute ROLLBACK");
    }

    #[test]
    fn guarded_rollback_messages() {
        assert_eq!(
            step_rollback_failed("conn closed", "insert order"),
            "error ROLLBACK: conn closed, ON: insert order"
        );
        assert_eq!(
            step_rolled_back("insert order", "duplicate key"),
            "insert order | execute ROLLBACK, duplicate key"
        );
    }

    #[test]
    fn encode_failure_is_prefixed() {
        assert_eq!(
            encode_failed("key must be a string"),
            "error to encode: key must be a string"
        );
    }
}
