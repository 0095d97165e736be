pub mod error;
pub mod optional;
pub mod schema;
pub mod time;
pub mod validate;

pub use error::{CoreError, ErrorCategory, Result, ValidationError, ValidationErrors};
pub use optional::OptionalValue;
pub use schema::{
    AttributeSpec, AttributeType, AttributeValues, ENTERPRISE, Mutability, Presence,
    ResourceDescriptor, ResourceTimeouts,
};
pub use time::{Timestamp, normalize_timestamp, now_utc};
pub use validate::{validate_enterprise_name, validate_iam_id};
