//! Login sessions issued after GitHub sign-in.

pub mod service;

pub use service::SessionService;
