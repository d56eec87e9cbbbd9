//! FFI crate for the sign-off core.
//! Exposes use-case level functions to the Flutter shell.

pub mod api;
