//! Supporting services.

pub mod oidc;
