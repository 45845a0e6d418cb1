//! Command Handlers module
//!
//! Handlers orchestrate business operations over the collaborator ports.
//! The transfer handler is the core of the system; user registration and
//! lookup round out the request surface.

mod commands;
mod find_user_handler;
mod transfer_handler;
mod user_handler;

pub use commands::{CreateUserCommand, TransferCommand, TransferResult};
pub use find_user_handler::FindUserHandler;
pub use transfer_handler::TransferHandler;
pub use user_handler::CreateUserHandler;
