use std::any::Any;
use std::ffi::{c_void, CStr};

use anyhow::{bail, Context, Result};
use clgl_core::ffi::*;
use clgl_core::{DriverResourceHandle, GlContext, GlContextHandle, ResourceAttachment, ResourceKind};
use gl::types::GLuint;
use libloading::Library;
use once_cell::sync::OnceCell;
use tracing::{debug, trace};

use crate::config::InteropConfig;
use crate::extensions::{InteropExtensions, ResourceRequest};
use crate::identity::GpuIdentity;

// ---------------------------------------------------------------------------
// GlxFunctions
// ---------------------------------------------------------------------------

/// Resolved GLX interop entry points, plus the library they live in.
struct GlxFunctions {
    get_current_context: GlxGetCurrentContext,
    begin_interop: GlxBeginClInteropAmd,
    end_interop: GlxEndClInteropAmd,
    resource_attach: GlxResourceAttachAmd,
    resource_acquire: GlxResourceDetachAmd,
    resource_release: GlxResourceDetachAmd,
    resource_detach: GlxResourceDetachAmd,
    get_context_mvpu_info: GlxGetContextMvpuInfoAmd,
    /// Keeps the function pointers above valid.
    _library: Library,
}

impl GlxFunctions {
    /// Open the first loadable library in `paths` and resolve every entry
    /// point from it.
    fn load(paths: &[String]) -> Result<Self> {
        let mut last_err = None;
        for path in paths {
            // SAFETY: libGL has no initialization routines with preconditions.
            match unsafe { Library::new(path) } {
                Ok(library) => {
                    debug!(path, "opened GL library");
                    return Self::from_library(library)
                        .with_context(|| format!("GL interop extension not found in {path}"));
                }
                Err(err) => {
                    trace!(path, "cannot open GL library: {err}");
                    last_err = Some(err);
                }
            }
        }
        match last_err {
            Some(err) => Err(err).context("no GL library could be opened"),
            None => bail!("no GL library configured"),
        }
    }

    fn from_library(library: Library) -> Result<Self> {
        unsafe {
            let get_proc_address = *library
                .get::<GlxGetProcAddress>(GLX_GET_PROC_ADDRESS.to_bytes_with_nul())
                .context("glXGetProcAddress")?;
            let get_current_context = *library
                .get::<GlxGetCurrentContext>(GLX_GET_CURRENT_CONTEXT.to_bytes_with_nul())
                .context("glXGetCurrentContext")?;

            let load = |name: &CStr| -> Result<*mut c_void> {
                let ptr = get_proc_address(name.as_ptr().cast());
                if ptr.is_null() {
                    bail!("{} is not exported", name.to_string_lossy());
                }
                Ok(ptr)
            };

            Ok(Self {
                get_current_context,
                begin_interop: std::mem::transmute::<*mut c_void, GlxBeginClInteropAmd>(load(
                    GLX_BEGIN_CL_INTEROP,
                )?),
                end_interop: std::mem::transmute::<*mut c_void, GlxEndClInteropAmd>(load(
                    GLX_END_CL_INTEROP,
                )?),
                resource_attach: std::mem::transmute::<*mut c_void, GlxResourceAttachAmd>(load(
                    GLX_RESOURCE_ATTACH,
                )?),
                resource_acquire: std::mem::transmute::<*mut c_void, GlxResourceDetachAmd>(load(
                    GLX_RESOURCE_ACQUIRE,
                )?),
                resource_release: std::mem::transmute::<*mut c_void, GlxResourceDetachAmd>(load(
                    GLX_RESOURCE_RELEASE,
                )?),
                resource_detach: std::mem::transmute::<*mut c_void, GlxResourceDetachAmd>(load(
                    GLX_RESOURCE_DETACH,
                )?),
                get_context_mvpu_info: std::mem::transmute::<*mut c_void, GlxGetContextMvpuInfoAmd>(
                    load(GLX_GET_CONTEXT_MVPU_INFO)?,
                ),
                _library: library,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// GlxExtensions
// ---------------------------------------------------------------------------

/// Interop extension reached through `glXGetProcAddress`.
pub struct GlxExtensions {
    library_paths: Vec<String>,
    functions: OnceCell<GlxFunctions>,
}

impl GlxExtensions {
    pub fn new(config: &InteropConfig) -> Self {
        Self {
            library_paths: config.gl_library_paths.clone(),
            functions: OnceCell::new(),
        }
    }

    fn resource_call(
        &self,
        context: GlContextHandle,
        kind: ResourceKind,
        handle: DriverResourceHandle,
        entry: impl FnOnce(&GlxFunctions) -> GlxResourceDetachAmd,
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
        unsafe { entry(functions)(context.as_raw(), &mut resource) != gl::FALSE }
    }
}

impl InteropExtensions for GlxExtensions {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "glx"
    }

    fn resolve(&self, _context: &GlContext) -> Result<()> {
        self.functions
            .get_or_try_init(|| GlxFunctions::load(&self.library_paths))
            .map(|_| ())
    }

    fn is_resolved(&self) -> bool {
        self.functions.get().is_some()
    }

    fn begin_interop(&self, context: GlContextHandle) -> bool {
        self.functions
            .get()
            .is_some_and(|f| unsafe { (f.begin_interop)(context.as_raw(), 0) } != gl::FALSE)
    }

    fn end_interop(&self, context: GlContextHandle) -> bool {
        self.functions
            .get()
            .is_some_and(|f| unsafe { (f.end_interop)(context.as_raw(), 0) } != gl::FALSE)
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
        if ok == gl::FALSE {
            return None;
        }

        let mut attachment = ResourceAttachment::from_driver(&data);
        attachment.shared_buffer_id = Some(data.sharedBufferID);
        Some(attachment)
    }

    fn acquire(&self, context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(context, kind, handle, |f| f.resource_acquire)
    }

    fn release(&self, context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(context, kind, handle, |f| f.resource_release)
    }

    fn detach(&self, context: GlContextHandle, kind: ResourceKind, handle: DriverResourceHandle) -> bool {
        self.resource_call(context, kind, handle, |f| f.resource_detach)
    }

    fn context_gpu_info(&self, context: GlContextHandle) -> Option<GpuIdentity> {
        let functions = self.functions.get()?;
        let mut device_id: GLuint = 0;
        let mut chain_mask: GLuint = 0;
        let ok = unsafe {
            (functions.get_context_mvpu_info)(context.as_raw(), &mut device_id, &mut chain_mask)
        };
        (ok != gl::FALSE).then(|| GpuIdentity::new(u64::from(device_id), chain_mask))
    }

    fn has_current_context(&self) -> bool {
        self.functions
            .get()
            .is_some_and(|f| !unsafe { (f.get_current_context)() }.is_null())
    }
}

#[cfg(test)]
mod tests {
    use clgl_core::GlDeviceContext;

    use super::*;

    fn unresolved() -> GlxExtensions {
        GlxExtensions::new(&InteropConfig {
            gl_library_paths: vec!["libclgl-does-not-exist.so".to_owned()],
            verify_format_table: false,
        })
    }

    #[test]
    fn missing_library_fails_resolution() {
        let ext = unresolved();
        let context = GlContext::new(GlContextHandle::from_raw(std::ptr::null_mut()), GlDeviceContext::null());
        let err = ext.resolve(&context).unwrap_err();
        assert!(format!("{err:#}").contains("no GL library could be opened"));
        assert!(!ext.is_resolved());
    }

    #[test]
    fn unresolved_calls_report_failure() {
        let ext = unresolved();
        let context = GlContextHandle::from_raw(std::ptr::null_mut());
        let handle = DriverResourceHandle::new(1).unwrap();

        assert!(!ext.begin_interop(context));
        assert!(ext.attach(context, &ResourceRequest::new(ResourceKind::Texture, 1)).is_none());
        assert!(!ext.acquire(context, ResourceKind::Texture, handle));
        assert!(!ext.detach(context, ResourceKind::Texture, handle));
        assert!(ext.context_gpu_info(context).is_none());
        assert!(!ext.has_current_context());
    }
}
