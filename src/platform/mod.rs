//! OS implementations of the capability traits.

#[cfg(target_os = "windows")]
pub mod windows;
