//! First-failure reporting over `serde_valid` payload checks.
//!
//! Payloads derive [`serde_valid::Validate`] and carry their client-facing
//! messages on the rules. Only the first failure is reported: fields in
//! declaration order, then rules in attribute order within a field.

use serde_valid::Validate;
use serde_valid::validation::{self, Errors};
use thiserror::Error;

/// The first failed rule of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Empty when the failure is not tied to a single field.
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, error: &validation::Error) -> Self {
        Self {
            field: field.into(),
            message: error.to_string(),
        }
    }
}

pub fn validate<T: Validate>(payload: &T) -> Result<(), FieldError> {
    payload.validate().map_err(|errors| first_failure("", &errors))
}

/// Custom rule: integer fields treat zero as absent.
pub fn nonzero(value: &i64, message: &str) -> Result<(), validation::Error> {
    if *value == 0 {
        Err(validation::Error::Custom(message.to_string()))
    } else {
        Ok(())
    }
}

fn first_failure(field: &str, errors: &Errors) -> FieldError {
    match errors {
        Errors::Object(object) => {
            if let Some(err) = object.errors.first() {
                return FieldError::new(field, err);
            }
            if let Some((name, nested)) = object.properties.iter().next() {
                return first_failure(&name.to_string(), nested);
            }
        }
        Errors::NewType(list) => {
            if let Some(err) = list.first() {
                return FieldError::new(field, err);
            }
        }
        Errors::Array(_) => {}
    }
    FieldError {
        field: field.to_string(),
        message: errors.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port_required(value: &i64) -> Result<(), validation::Error> {
        nonzero(value, "port required")
    }

    #[derive(Validate)]
    struct Listener {
        #[validate(min_length = 1, message = "host required")]
        host: String,
        #[validate(custom = port_required)]
        #[validate(minimum = 1024, message = "port too low")]
        #[validate(maximum = 49151, message = "port too high")]
        port: i64,
    }

    fn listener(host: &str, port: i64) -> Listener {
        Listener {
            host: host.to_string(),
            port,
        }
    }

    #[test]
    fn passes_when_every_rule_holds() {
        assert_eq!(validate(&listener("localhost", 8080)), Ok(()));
    }

    #[test]
    fn first_field_wins() {
        let err = validate(&listener("", 0)).unwrap_err();
        assert_eq!(err.field, "host");
        assert_eq!(err.message, "host required");
    }

    #[test]
    fn rules_run_in_declared_order() {
        let err = validate(&listener("h", 0)).unwrap_err();
        assert_eq!(err.field, "port");
        assert_eq!(err.message, "port required");

        let err = validate(&listener("h", 80)).unwrap_err();
        assert_eq!(err.to_string(), "port too low");

        let err = validate(&listener("h", 60000)).unwrap_err();
        assert_eq!(err.message, "port too high");
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(validate(&listener("h", 1024)).is_ok());
        assert!(validate(&listener("h", 49151)).is_ok());
    }

    #[test]
    fn nonzero_rejects_only_zero() {
        assert!(nonzero(&-3, "x").is_ok());
        assert_eq!(nonzero(&0, "x").unwrap_err().to_string(), "x");
    }
}
