// Application layer - the facade the excluded UI/persistence layers talk to.
// Resolves account ids to handles, drives transactions, and hosts the
// password-provisioning seam. No balance logic lives here.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
