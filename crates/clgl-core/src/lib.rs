//! Driver-facing types for GL/compute interop.
//!
//! This crate holds the pieces that mirror the vendor driver: the C-repr
//! structs and entry-point signatures of the AMD interop extension
//! ([`ffi`]), the driver's raw surface-format enumeration
//! ([`surface_format`]), the handles passed across the boundary
//! ([`handles`]), and a safe copy of the attach output ([`attachment`]).
//! The interop logic itself lives in `clgl-interop`.

pub mod attachment;
pub mod ffi;
pub mod handles;
pub mod logging;
pub mod surface_format;

pub use attachment::{Extent3d, ResourceAttachment, ResourceKind};
pub use handles::{DriverResourceHandle, GlContext, GlContextHandle, GlDeviceContext};
pub use surface_format::{RawFormat, FIRST_RAW_FORMAT, LAST_RAW_FORMAT, RAW_FORMAT_COUNT};
