//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for envelopes and form errors
//! that give more meaningful error messages than standard assertions.

use std::fmt::Debug;

use core_kernel::{ApiResponse, NETWORK_ERROR_CODE, NETWORK_ERROR_MESSAGE};
use domain_transaction::{Field, FieldErrors, SubmitError, ValidationCode};
use domain_transaction::MockBrokeragePort;

/// Asserts the envelope is exactly the network-error envelope
pub fn assert_network_error<T: Debug>(envelope: &ApiResponse<T>) {
    assert!(!envelope.success, "Expected failure envelope, got {:?}", envelope);
    assert_eq!(envelope.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(envelope.error_code.as_deref(), Some(NETWORK_ERROR_CODE));
    assert!(envelope.data.is_none(), "Network error carried data: {:?}", envelope.data);
}

/// Asserts the envelope succeeded and returns its payload
pub fn assert_success<T: Debug>(envelope: ApiResponse<T>) -> T {
    assert!(envelope.success, "Expected success envelope, got {:?}", envelope);
    match envelope.data {
        Some(data) => data,
        None => panic!("Success envelope carried no data"),
    }
}

/// Asserts one field error by code and message
pub fn assert_field_error(errors: &FieldErrors, field: Field, code: ValidationCode, message: &str) {
    let error = errors
        .get(field)
        .unwrap_or_else(|| panic!("No error on {}; errors: {}", field, errors));
    assert_eq!(error.code, Some(code), "Wrong code on {}", field);
    assert_eq!(error.message, message, "Wrong message on {}", field);
}

/// Asserts a submit failed local validation and returns the errors
pub fn assert_validation_failure<T: Debug>(result: Result<T, SubmitError>) -> FieldErrors {
    match result {
        Err(SubmitError::Validation(errors)) => errors,
        other => panic!("Expected validation failure, got {:?}", other),
    }
}

/// Asserts no order reached the mock
pub async fn assert_no_orders(port: &MockBrokeragePort) {
    let submissions = port.submissions().await;
    assert!(submissions.is_empty(), "Expected no orders, got {:?}", submissions);
}
