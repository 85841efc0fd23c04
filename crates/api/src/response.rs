//! Shared response envelope types for API handlers.
//!
//! Catalog responses use a `{ "data": ... }` envelope. The room analysis
//! endpoint returns the bare analysis object so clients can forward it
//! unchanged.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
