//! Wire representations of the job-search API
//!
//! These types mirror the JSON the Adzuna search endpoint returns. They
//! are deserialized once per fetch and immediately converted into domain
//! records; nothing else in the system touches them.

pub mod search;
