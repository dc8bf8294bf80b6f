//! Integration tests for huevar crates.
//!
//! End-to-end checks across decode, hue shift, batch encoding and the
//! service layer.

#[cfg(test)]
mod golden;
