//! HTTP response model

mod spec;

pub use spec::{ResponseSpec, StatusClass, StatusCode};
