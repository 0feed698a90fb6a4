//! Client identity and credential wrappers.

pub mod identity;
pub mod secret;

pub use identity::*;
pub use secret::*;
