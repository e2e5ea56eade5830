//! Access-token handling for operator and donor requests.

pub mod jwt;
