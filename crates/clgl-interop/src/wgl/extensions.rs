use std::any::Any;
use std::ffi::{c_void, CStr};

use anyhow::{bail, Context, Result};
use clgl_core::ffi::*;
use clgl_core::{
    DriverResourceHandle, GlContext, GlContextHandle, GlDeviceContext, ResourceAttachment,
    ResourceKind,
};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};
use windows::Win32::Graphics::Gdi::HDC;
use windows::Win32::Graphics::OpenGL::*;

use crate::extensions::{InteropExtensions, ResourceRequest};
use crate::identity::GpuIdentity;

// ---------------------------------------------------------------------------
// WglFunctions
// ---------------------------------------------------------------------------

/// Resolved WGL interop entry points.
struct WglFunctions {
    begin_interop: WglBeginClInteropAmd,
    end_interop: WglEndClInteropAmd,
    resource_attach: WglResourceAttachAmd,
    resource_acquire: WglResourceDetachAmd,
    resource_release: WglResourceDetachAmd,
    resource_detach: WglResourceDetachAmd,
    get_context_gpu_info: WglGetContextGpuInfoAmd,
}

impl WglFunctions {
    /// Load every entry point via wglGetProcAddress. A GL context must be
    /// current on the calling thread.
    fn load() -> Result<Self> {
        unsafe {
            let load = |name: &CStr| -> Result<*mut c_void> {
                let addr = wglGetProcAddress(windows::core::PCSTR(name.as_ptr() as *const u8));
                match addr {
                    Some(addr) => Ok(addr as usize as *mut c_void),
                    None => bail!("{} is not exported", name.to_string_lossy()),
                }
            };

            Ok(Self {
                begin_interop: std::mem::transmute::<*mut c_void, WglBeginClInteropAmd>(load(
                    WGL_BEGIN_CL_INTEROP,
                )?),
                end_interop: std::mem::transmute::<*mut c_void, WglEndClInteropAmd>(load(
                    WGL_END_CL_INTEROP,
                )?),
                resource_attach: std::mem::transmute::<*mut c_void, WglResourceAttachAmd>(load(
                    WGL_RESOURCE_ATTACH,
                )?),
                resource_acquire: std::mem::transmute::<*mut c_void, WglResourceDetachAmd>(load(
                    WGL_RESOURCE_ACQUIRE,
                )?),
                resource_release: std::mem::transmute::<*mut c_void, WglResourceDetachAmd>(load(
                    WGL_RESOURCE_RELEASE,
                )?),
                resource_detach: std::mem::transmute::<*mut c_void, WglResourceDetachAmd>(load(
                    WGL_RESOURCE_DETACH,
                )?),
                get_context_gpu_info: std::mem::transmute::<*mut c_void, WglGetContextGpuInfoAmd>(
                    load(WGL_GET_CONTEXT_GPU_INFO)?,
                ),
            })
        }
    }

    /// Load with a throwaway context on `device` when nothing is current.
    fn load_on(device: GlDeviceContext) -> Result<Self> {
        if !current_context().as_raw().is_null() {
            return Self::load();
        }
        if device.is_null() {
            bail!("no GL context is current and no device context was given");
        }

        let hdc = HDC(device.as_raw());
        unsafe {
            let temp = wglCreateContext(hdc).context("wglCreateContext")?;
            let loaded = match wglMakeCurrent(hdc, temp) {
                Ok(()) => {
                    debug!("made a temporary GL context current to resolve interop entry points");
                    let loaded = Self::load();
                    if let Err(err) = wglMakeCurrent(HDC::default(), HGLRC::default()) {
                        warn!("failed to clear temporary GL context: {err}");
                    }
                    loaded
                }
                Err(err) => Err(err).context("wglMakeCurrent"),
            };
            if let Err(err) = wglDeleteContext(temp) {
                warn!("failed to delete temporary GL context: {err}");
            }
            loaded
        }
    }
}

// ---------------------------------------------------------------------------
// WglExtensions
// ---------------------------------------------------------------------------

/// Interop extension reached through `wglGetProcAddress`.
pub struct WglExtensions {
    functions: OnceCell<WglFunctions>,
}

impl WglExtensions {
    pub fn new() -> Self {
        Self {
            functions: OnceCell::new(),
        }
    }

    fn resource_call(
        &self,
        context: GlContextHandle,
        kind: ResourceKind,
        handle: DriverResourceHandle,
        entry: impl FnOnce(&WglFunctions) -> WglResourceDetachAmd,
    ) -> bool {
        let Some(functions) = self.functions.get() else {
            return false;
        };
        let mut resource = GLResource {
            type_: kind.code(),
            name: 0,
            flags: 0,
            mbResHandle: handle.get(),
        };
        unsafe { entry(functions)(context.as_raw(), &mut resource) != 0 }
    }
}

impl Default for WglExtensions {
    fn default() -> Self {
        Self::new()
    }
}

impl InteropExtensions for WglExtensions {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "wgl"
    }

    fn resolve(&self, context: &GlContext) -> Result<()> {
        self.functions
            .get_or_try_init(|| WglFunctions::load_on(context.device))
            .map(|_| ())
    }

    fn is_resolved(&self) -> bool {
        self.functions.get().is_some()
    }

    fn begin_interop(&self, context: GlContextHandle) -> bool {
        self.functions
            .get()
            .is_some_and(|f| unsafe { (f.begin_interop)(context.as_raw(), 0) } != 0)
    }

    fn end_interop(&self, context: GlContextHandle) -> bool {
        self.functions
            .get()
            .is_some_and(|f| unsafe { (f.end_interop)(context.as_raw(), 0) } != 0)
    }

    fn attach(
        &self,
        context: GlContextHandle,
        request: &ResourceRequest,
    ) -> Option<ResourceAttachment> {
        let functions = self.functions.get()?;
        let mut resource = GLResource {
            type_: request.kind.code(),
            name: request.name,
            flags: request.flags,
            mbResHandle: 0,
        };
        let mut data = GLResourceData::new_boxed();

        let ok = unsafe { (functions.resource_attach)(context.as_raw(), &mut resource, &mut *data) };
        (ok != 0).then(|| ResourceAttachment::from_driver(&data))
    }

    /// WGL acquires on whatever context is current, not the attach context.
    fn acquire(&self, _context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(current_context(), kind, handle, |f| f.resource_acquire)
    }

    /// WGL releases on whatever context is current, not the attach context.
    fn release(&self, _context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(current_context(), kind, handle, |f| f.resource_release)
    }

    fn detach(&self, context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(context, kind, handle, |f| f.resource_detach)
    }

    fn context_gpu_info(&self, context: GlContextHandle) -> Option<GpuIdentity> {
        let functions = self.functions.get()?;
        let mut luid = AdapterLuid::default();
        let mut chain_mask = 0u32;
        let ok = unsafe {
            (functions.get_context_gpu_info)(context.as_raw(), &mut luid, &mut chain_mask)
        };
        (ok != 0).then(|| GpuIdentity::new(luid.to_u64(), chain_mask))
    }

    fn has_current_context(&self) -> bool {
        !current_context().as_raw().is_null()
    }
}

/// Context current on the calling thread, null if none.
fn current_context() -> GlContextHandle {
    GlContextHandle::from_raw(unsafe { wglGetCurrentContext() }.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_calls_need_a_current_context() {
        let ext = WglExtensions::new();
        let saved = GlContextHandle::from_raw(std::ptr::NonNull::dangling().as_ptr());
        let handle = DriverResourceHandle::new(1).unwrap();

        // Test threads never have a GL context current.
        assert!(current_context().as_raw().is_null());
        assert!(!ext.has_current_context());
        assert!(!ext.acquire(saved, ResourceKind::Texture, handle));
        assert!(!ext.release(saved, ResourceKind::Texture, handle));
    }
}
