//! Custom extractors for Axum handlers.
//!
//! Every rejection is an [`AppError`](crate::AppError), so malformed input
//! gets the same JSON error body as service errors.

pub mod id_path;
pub mod query_args;
pub mod validated_json;

pub use id_path::IdPath;
pub use query_args::QueryArgs;
pub use validated_json::ValidatedJson;
