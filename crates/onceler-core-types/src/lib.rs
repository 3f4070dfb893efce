//! Leaf types shared by the onceler crates
//!
//! - **Batch correlation**: `BatchId` minted once per `migrate` call
//! - **Schema constants**: canonical structured-logging field keys and event names

pub mod batch;
pub mod schema;

pub use batch::BatchId;
