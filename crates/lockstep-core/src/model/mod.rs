pub mod lease;
pub mod request;
pub mod response;

pub use lease::{AcquireOutcome, LeaseRecord, ReleaseOutcome};
pub use request::OperationRequest;
pub use response::{OperationResult, Row};
