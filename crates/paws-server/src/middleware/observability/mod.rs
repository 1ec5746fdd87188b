//! Request ids, request tracing and header redaction.

mod tracing;

pub use self::tracing::{
    REQUEST_ID_HEADER, create_propagate_request_id_layer, create_request_id_layer,
    create_sensitive_headers_layer, create_trace_layer,
};
