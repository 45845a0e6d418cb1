//! Adapter module
//!
//! Concrete implementations of the collaborator ports.

pub mod http;
pub mod memory;

pub use http::{HttpAuthorizer, HttpNotifier};
pub use memory::{
    InMemoryAccountRepository, InMemoryTransferRepository, LoggingNotifier, StaticAuthorizer,
};
