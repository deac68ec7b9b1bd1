//! WGL provider of the interop extension (Windows).

pub mod extensions;

pub use extensions::WglExtensions;
