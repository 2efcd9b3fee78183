//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, buffer sizes > 0)
//! - Check addresses parse for the datastore kind in use
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use crate::config::schema::{AppConfig, DatastoreKind};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: &'static str },

    #[error("datastore.address: required when kind is {kind}")]
    MissingDatastoreAddress { kind: &'static str },

    #[error("datastore.address: invalid URL {value:?}")]
    InvalidDatastoreUrl { value: String },

    #[error("websocket.allowed_origins: blank entry at index {index}")]
    BlankOrigin { index: usize },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_socket_addr(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_socket_addr(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    let ws = &config.websocket;
    if ws.read_buffer_size == 0 {
        errors.push(ValidationError::Zero { field: "websocket.read_buffer_size" });
    }
    if ws.write_buffer_size == 0 {
        errors.push(ValidationError::Zero { field: "websocket.write_buffer_size" });
    }
    if ws.max_message_size == Some(0) {
        errors.push(ValidationError::Zero { field: "websocket.max_message_size" });
    }
    for (index, origin) in ws.allowed_origins.iter().enumerate() {
        if origin.trim().is_empty() {
            errors.push(ValidationError::BlankOrigin { index });
        }
    }

    let store = &config.datastore;
    if store.timeout_ms == 0 {
        errors.push(ValidationError::Zero { field: "datastore.timeout_ms" });
    }
    match store.kind {
        DatastoreKind::None => {}
        DatastoreKind::Tcp => {
            if store.address.trim().is_empty() {
                errors.push(ValidationError::MissingDatastoreAddress { kind: "tcp" });
            }
        }
        DatastoreKind::Http => {
            if store.address.trim().is_empty() {
                errors.push(ValidationError::MissingDatastoreAddress { kind: "http" });
            } else if url::Url::parse(&store.address).is_err() {
                errors.push(ValidationError::InvalidDatastoreUrl {
                    value: store.address.clone(),
                });
            }
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero { field: "timeouts.request_secs" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_socket_addr(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
