//! Shared HTTP types

pub mod response;
pub mod validated_json;

pub use response::{error_response, ApiError, ApiResponse, PaginatedResponse};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
