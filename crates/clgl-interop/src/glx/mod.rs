//! GLX provider of the interop extension (Linux).
//!
//! Entry points are looked up through `glXGetProcAddress` from the system GL
//! library, which is opened with `libloading` on first use.

pub mod extensions;

pub use extensions::GlxExtensions;
