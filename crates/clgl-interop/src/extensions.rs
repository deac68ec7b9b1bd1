//! Common interface to the driver's GL/compute interop extension.

use clgl_core::{DriverResourceHandle, GlContext, GlContextHandle, ResourceAttachment, ResourceKind};

use crate::config::InteropConfig;
use crate::identity::GpuIdentity;

/// A GL object to attach.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub kind: ResourceKind,
    /// GL object name (texture, renderbuffer or buffer name).
    pub name: u32,
    /// Driver attach flags, passed through.
    pub flags: u32,
}

impl ResourceRequest {
    pub fn new(kind: ResourceKind, name: u32) -> Self {
        Self {
            kind,
            name,
            flags: 0,
        }
    }
}

/// Entry points of the vendor interop extension.
///
/// Implementations exist for GLX (Linux, via `glXGetProcAddress`) and WGL
/// (Windows, via `wglGetProcAddress`). Nothing above this trait branches on
/// the platform.
///
/// Entry points are resolved once by [`resolve`](Self::resolve). Until then,
/// or if resolution failed, every driver call reports failure.
pub trait InteropExtensions: Send + Sync {
    /// Downcast to a concrete provider.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Resolve all entry points. Succeeds only if every one of them was found;
    /// a failed attempt is not remembered and the next call tries again.
    fn resolve(&self, context: &GlContext) -> anyhow::Result<()>;

    /// Whether [`resolve`](Self::resolve) has succeeded.
    fn is_resolved(&self) -> bool;

    fn begin_interop(&self, context: GlContextHandle) -> bool;

    fn end_interop(&self, context: GlContextHandle) -> bool;

    /// Bind a GL object for compute access and describe its storage.
    fn attach(&self, context: GlContextHandle, request: &ResourceRequest)
        -> Option<ResourceAttachment>;

    /// Hand ownership of an attached resource to the compute side.
    fn acquire(
        &self,
        context: GlContextHandle,
        kind: ResourceKind,
        handle: DriverResourceHandle,
    ) -> bool;

    /// Hand ownership of an attached resource back to GL.
    fn release(
        &self,
        context: GlContextHandle,
        kind: ResourceKind,
        handle: DriverResourceHandle,
    ) -> bool;

    /// Drop the driver's attachment and its handle.
    fn detach(
        &self,
        context: GlContextHandle,
        kind: ResourceKind,
        handle: DriverResourceHandle,
    ) -> bool;

    /// Adapter and chain mask the GL context is bound to.
    fn context_gpu_info(&self, context: GlContextHandle) -> Option<GpuIdentity>;

    /// Whether the calling thread has a GL context current.
    fn has_current_context(&self) -> bool;
}

/// Provider for the platform this crate was built for.
#[cfg(target_os = "linux")]
pub fn default_extensions(config: &InteropConfig) -> anyhow::Result<Box<dyn InteropExtensions>> {
    Ok(Box::new(crate::glx::GlxExtensions::new(config)))
}

/// Provider for the platform this crate was built for.
#[cfg(target_os = "windows")]
pub fn default_extensions(_config: &InteropConfig) -> anyhow::Result<Box<dyn InteropExtensions>> {
    Ok(Box::new(crate::wgl::WglExtensions::new()))
}

/// Provider for the platform this crate was built for.
#[cfg(not(any(target_os = "linux", target_os = "windows")))]
pub fn default_extensions(_config: &InteropConfig) -> anyhow::Result<Box<dyn InteropExtensions>> {
    anyhow::bail!("no GL interop extension provider for this platform")
}
