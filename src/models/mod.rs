//! Data transfer objects for the HTTP surface
//!
//! Request bodies with validation, and response bodies with serde.

mod requests;
mod responses;

pub use requests::{AcquireLockRequest, ExpireRequest, IncrRequest, ReleaseLockRequest, SetRequest, WarmUpRequest};
pub use responses::{
    DeleteResponse, ExpireResponse, GetResponse, HealthResponse, IncrResponse, LockResponse,
    PatternDeleteResponse, ReleaseResponse, SetResponse, StatsResponse, TtlResponse,
};
