mod materializer_impl;

pub use materializer_impl::{MaterializeError, Materializer};
