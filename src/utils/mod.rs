//! Internal helpers shared by the payload cipher.

pub(crate) mod converter;
