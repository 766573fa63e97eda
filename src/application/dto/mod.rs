//! Data transfer objects for the application layer.

mod launch_dto;

pub use launch_dto::{DirectConnectRequest, NO_MPPASS, SignInRequest};
