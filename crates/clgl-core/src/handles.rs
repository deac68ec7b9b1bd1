//! Opaque handles passed between the compute runtime and the GL driver.

use std::ffi::c_void;
use std::num::NonZeroUsize;

/// A platform GL context (`GLXContext` on Linux, `HGLRC` on Windows).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GlContextHandle(*mut c_void);

/// A platform device context (`HDC` on Windows, the X display on Linux).
/// May be null when the platform does not need one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GlDeviceContext(*mut c_void);

// SAFETY: both are opaque driver handles. They are only dereferenced by the
// driver, and every driver call made with them is serialized by the owning
// device's lock.
unsafe impl Send for GlContextHandle {}
unsafe impl Sync for GlContextHandle {}
unsafe impl Send for GlDeviceContext {}
unsafe impl Sync for GlDeviceContext {}

impl GlContextHandle {
    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> *mut c_void {
        self.0
    }
}

impl GlDeviceContext {
    pub fn from_raw(raw: *mut c_void) -> Self {
        Self(raw)
    }

    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn as_raw(self) -> *mut c_void {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }
}

/// The pair of handles that identify a GL context to the interop extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GlContext {
    pub platform: GlContextHandle,
    pub device: GlDeviceContext,
}

impl GlContext {
    pub fn new(platform: GlContextHandle, device: GlDeviceContext) -> Self {
        Self { platform, device }
    }
}

/// Driver-owned handle for an attached GL resource (`mbResHandle`).
///
/// Only ever handed back to the driver; never freed by the compute side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DriverResourceHandle(NonZeroUsize);

impl DriverResourceHandle {
    /// Returns `None` for the null handle.
    pub fn new(raw: usize) -> Option<Self> {
        NonZeroUsize::new(raw).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}
