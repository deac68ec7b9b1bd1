//! GL/compute memory interop.
//!
//! [`InteropDevice`] attaches GL textures, renderbuffers and vertex buffers
//! through the vendor interop extension and wraps them as compute memory
//! objects that alias the GL storage. Before any attach the GL context and
//! the compute device must report the same physical GPU.
//!
//! The driver extension sits behind [`InteropExtensions`] (GLX on Linux, WGL
//! on Windows), the compute memory manager behind [`MemoryAllocator`] and the
//! device's adapter query behind [`GpuAdapter`].

pub mod config;
pub mod device;
pub mod error;
pub mod extensions;
pub mod format;
pub mod identity;
pub mod memory;

// Platform-specific providers.

#[cfg(target_os = "linux")]
pub mod glx;

#[cfg(target_os = "windows")]
pub mod wgl;

pub use config::InteropConfig;
pub use device::{InteropDevice, InteropResource, ResourceState};
pub use error::{DriverOp, InteropError, Result};
pub use extensions::{default_extensions, InteropExtensions, ResourceRequest};
pub use format::{translate_format, ChannelOrder, InternalFormat, UnsupportedKind};
pub use identity::{GpuAdapter, GpuIdentity};
pub use memory::{MemoryAllocator, MemoryAttribs, Tiling};
