//! Failure taxonomy for interop operations.

use std::fmt;

use crate::format::UnsupportedKind;
use crate::identity::GpuIdentity;

/// Driver entry point that reported failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverOp {
    BeginInterop,
    EndInterop,
    Attach,
    Acquire,
    Release,
    Detach,
}

impl fmt::Display for DriverOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverOp::BeginInterop => "begin interop",
            DriverOp::EndInterop => "end interop",
            DriverOp::Attach => "resource attach",
            DriverOp::Acquire => "resource acquire",
            DriverOp::Release => "resource release",
            DriverOp::Detach => "resource detach",
        };
        f.write_str(name)
    }
}

/// Errors returned by the interop device and its collaborators.
///
/// Every operation is a single synchronous attempt; nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum InteropError {
    /// The driver does not expose the interop entry points.
    #[error("GL interop extension unavailable: {0:#}")]
    ExtensionUnavailable(anyhow::Error),

    /// GL and compute run on different adapters or GPU chains.
    #[error("GL context is on {gl:?}, compute device is on {device:?}")]
    GpuMismatch {
        gl: Option<GpuIdentity>,
        device: Option<GpuIdentity>,
    },

    /// The surface format has no compute-side representation.
    #[error("surface format {raw} is not supported for interop ({kind})")]
    UnsupportedFormat { raw: u32, kind: UnsupportedKind },

    /// The memory allocator returned no object.
    #[error("failed to allocate {0} memory object")]
    AllocationFailure(&'static str),

    /// A driver entry point returned failure.
    #[error("driver {0} call failed")]
    DriverCall(DriverOp),

    /// The driver returned an attachment the backend cannot use.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// The format table no longer lines up with the raw enumeration.
    #[error("format table entry {index} holds raw format {found}")]
    FormatTableDrift { index: usize, found: u32 },
}

pub type Result<T, E = InteropError> = std::result::Result<T, E>;
