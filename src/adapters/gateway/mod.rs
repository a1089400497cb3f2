//! Submission gateway adapters.

mod http;
mod mock;

pub use http::HttpSubmissionGateway;
pub use mock::MockSubmissionGateway;
