//! Hand-written C-repr structs and entry-point types for the AMD GL/CL
//! interop extension.
//!
//! The driver exposes these through `glXGetProcAddress` (Linux) and
//! `wglGetProcAddress` (Windows). Field names follow the driver headers.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::c_void;

use gl::types::{GLboolean, GLuint};

// =====================================================================
// Resource types
// =====================================================================

pub const GL_RESOURCE_ATTACH_TEXTURE_AMD: u32 = 0x0001;
pub const GL_RESOURCE_ATTACH_RENDERBUFFER_AMD: u32 = 0x0002;
pub const GL_RESOURCE_ATTACH_VERTEXBUFFER_AMD: u32 = 0x0003;

/// Version stamped into [`GLResourceData::version`] before attaching.
pub const GL_RESOURCE_DATA_VERSION: u32 = 1;

/// Capacity of the per-layer swizzle arrays in [`GLResourceData`].
pub const GLRDATA_MAX_LAYERS: usize = 2048;

// =====================================================================
// Entry point names
// =====================================================================

pub const GLX_GET_PROC_ADDRESS: &std::ffi::CStr = c"glXGetProcAddress";
pub const GLX_GET_CURRENT_CONTEXT: &std::ffi::CStr = c"glXGetCurrentContext";
pub const GLX_BEGIN_CL_INTEROP: &std::ffi::CStr = c"glXBeginCLInteroperabilityAMD";
pub const GLX_END_CL_INTEROP: &std::ffi::CStr = c"glXEndCLInteroperabilityAMD";
pub const GLX_RESOURCE_ATTACH: &std::ffi::CStr = c"glXResourceAttachAMD";
pub const GLX_RESOURCE_ACQUIRE: &std::ffi::CStr = c"glXResourceAcquireAMD";
pub const GLX_RESOURCE_RELEASE: &std::ffi::CStr = c"glXResourceReleaseAMD";
pub const GLX_RESOURCE_DETACH: &std::ffi::CStr = c"glXResourceDetachAMD";
pub const GLX_GET_CONTEXT_MVPU_INFO: &std::ffi::CStr = c"glXGetContextMVPUInfoAMD";

pub const WGL_BEGIN_CL_INTEROP: &std::ffi::CStr = c"wglBeginCLInteroperabilityAMD";
pub const WGL_END_CL_INTEROP: &std::ffi::CStr = c"wglEndCLInteroperabilityAMD";
pub const WGL_RESOURCE_ATTACH: &std::ffi::CStr = c"wglResourceAttachAMD";
pub const WGL_RESOURCE_ACQUIRE: &std::ffi::CStr = c"wglResourceAcquireAMD";
pub const WGL_RESOURCE_RELEASE: &std::ffi::CStr = c"wglResourceReleaseAMD";
pub const WGL_RESOURCE_DETACH: &std::ffi::CStr = c"wglResourceDetachAMD";
pub const WGL_GET_CONTEXT_GPU_INFO: &std::ffi::CStr = c"wglGetContextGPUInfoAMD";

// =====================================================================
// C-repr structs matching the driver headers
// =====================================================================

/// Identifies a GL object to attach, acquire, release or detach.
///
/// `name` is the GL object name on attach; the remaining calls identify the
/// object by the `mbResHandle` the driver returned from attach.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default)]
pub struct GLResource {
    pub type_: GLuint,
    pub name: GLuint,
    pub flags: GLuint,
    pub mbResHandle: usize,
}

/// Width/height/depth triple used by [`GLResourceData`].
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GLResourceDimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// Description of an attached GL object, filled in by the driver.
#[repr(C)]
#[derive(Copy, Clone)]
pub struct GLResourceData {
    pub version: u32,
    pub sharedBufferID: u32,
    pub rawDimensions: GLResourceDimensions,
    pub paddedDimensions: GLResourceDimensions,
    pub levels: u32,
    pub format: u32,
    pub objectAttribType: u32,
    pub tilingMode: u32,
    pub perSurfTileInfo: u32,
    pub cardAddr: u64,
    pub handle: usize,
    pub offset: u64,
    pub surfaceSize: u64,
    pub mbResHandle: usize,
    pub swizzles: [u32; GLRDATA_MAX_LAYERS],
    pub swizzlesMip: [u32; GLRDATA_MAX_LAYERS],
}

impl GLResourceData {
    /// A zeroed, versioned block ready to hand to the attach entry point.
    ///
    /// Boxed because the swizzle arrays make the struct too large to pass
    /// around by value comfortably.
    pub fn new_boxed() -> Box<Self> {
        // SAFETY: every field is an integer or an integer array, so the
        // all-zero bit pattern is a valid value.
        let mut data: Box<Self> = Box::new(unsafe { std::mem::zeroed() });
        data.version = GL_RESOURCE_DATA_VERSION;
        data
    }
}

/// Windows adapter LUID as returned by `wglGetContextGPUInfoAMD`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct AdapterLuid {
    pub LowPart: u32,
    pub HighPart: i32,
}

impl AdapterLuid {
    /// Pack the LUID into a single 64-bit identifier.
    pub fn to_u64(self) -> u64 {
        ((self.HighPart as u32 as u64) << 32) | self.LowPart as u64
    }
}

// =====================================================================
// GLX entry points
// =====================================================================

pub type GlxGetProcAddress = unsafe extern "C" fn(proc_name: *const u8) -> *mut c_void;
pub type GlxGetCurrentContext = unsafe extern "C" fn() -> *mut c_void;
pub type GlxBeginClInteropAmd = unsafe extern "C" fn(ctx: *mut c_void, flags: GLuint) -> GLboolean;
pub type GlxEndClInteropAmd = unsafe extern "C" fn(ctx: *mut c_void, flags: GLuint) -> GLboolean;
pub type GlxResourceAttachAmd = unsafe extern "C" fn(
    ctx: *mut c_void,
    resource: *mut GLResource,
    data: *mut GLResourceData,
) -> GLboolean;
/// Shared signature of the acquire, release and detach entry points.
pub type GlxResourceDetachAmd =
    unsafe extern "C" fn(ctx: *mut c_void, resource: *mut GLResource) -> GLboolean;
pub type GlxGetContextMvpuInfoAmd = unsafe extern "C" fn(
    ctx: *mut c_void,
    device_id: *mut GLuint,
    chain_mask: *mut GLuint,
) -> GLboolean;

// =====================================================================
// WGL entry points
// =====================================================================

pub type WglBeginClInteropAmd = unsafe extern "system" fn(hglrc: *mut c_void, flags: GLuint) -> i32;
pub type WglEndClInteropAmd = unsafe extern "system" fn(hglrc: *mut c_void, flags: GLuint) -> i32;
pub type WglResourceAttachAmd = unsafe extern "system" fn(
    hglrc: *mut c_void,
    resource: *mut GLResource,
    data: *mut GLResourceData,
) -> i32;
/// Shared signature of the acquire, release and detach entry points.
pub type WglResourceDetachAmd =
    unsafe extern "system" fn(hglrc: *mut c_void, resource: *mut GLResource) -> i32;
pub type WglGetContextGpuInfoAmd = unsafe extern "system" fn(
    hglrc: *mut c_void,
    adapter_luid: *mut AdapterLuid,
    chain_mask: *mut u32,
) -> i32;
