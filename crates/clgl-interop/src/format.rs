//! Format compatibility resolver.
//!
//! Maps every raw GL surface format onto the compute runtime's internal
//! format and channel order, or marks it unsupported. The table is dense and
//! ordered by raw code; the order is checked at compile time and again by
//! [`validate_format_table`].

use std::fmt;

use clgl_core::{RawFormat, ResourceKind, FIRST_RAW_FORMAT, RAW_FORMAT_COUNT};
use tracing::debug;

use crate::error::{InteropError, Result};

/// Format every vertex buffer is treated as: raw, byte-addressed storage.
pub const BYTE_BUFFER_FORMAT: RawFormat = RawFormat::Luminance8;

/// Internal format [`BYTE_BUFFER_FORMAT`] resolves to.
pub const BYTE_BUFFER_INTERNAL: InternalFormat = InternalFormat::R8I;

/// Why a raw format cannot be shared.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnsupportedKind {
    /// The code is outside the known raw enumeration.
    OutOfRange,
    /// No internal format can hold it (driver sentinel 500).
    NotRepresentable,
    /// Packed 10:10:10:2 and similar integer layouts the runtime has not
    /// enabled yet (driver sentinel 501).
    NotYetSupported,
}

impl UnsupportedKind {
    /// The driver's sentinel value, if the kind has one.
    pub fn sentinel(self) -> Option<u32> {
        match self {
            UnsupportedKind::OutOfRange => None,
            UnsupportedKind::NotRepresentable => Some(500),
            UnsupportedKind::NotYetSupported => Some(501),
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnsupportedKind::OutOfRange => "unknown format code",
            UnsupportedKind::NotRepresentable => "no internal representation",
            UnsupportedKind::NotYetSupported => "not yet supported",
        };
        f.write_str(text)
    }
}

/// Channel permutation or replication implied by an internal format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    R,
    Rg,
    Rgb,
    Rgba,
    Bgra,
    Argb,
    Abgr,
    /// Single channel replicated into R, G and B.
    ReplicateR,
}

impl ChannelOrder {
    /// Number of channels stored per element.
    pub fn channel_count(self) -> u32 {
        match self {
            ChannelOrder::R | ChannelOrder::ReplicateR => 1,
            ChannelOrder::Rg => 2,
            ChannelOrder::Rgb => 3,
            ChannelOrder::Rgba | ChannelOrder::Bgra | ChannelOrder::Argb | ChannelOrder::Abgr => 4,
        }
    }
}

/// Surface formats the compute runtime can allocate.
///
/// Discriminants are the surface codes the memory allocator expects.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum InternalFormat {
    Intensity8 = 4,
    B5G6R5 = 17,
    Bgr5X1 = 19,
    Bgr10X2 = 21,
    Rgba8 = 41,
    Rgba16 = 43,
    Rgba16F = 44,
    Rgba32I = 45,
    Rgba32F = 46,
    Depth16 = 53,
    Depth24Sten8 = 57,
    SU16 = 62,
    SUv16 = 63,
    SUvwq16 = 64,
    Rg16 = 65,
    Rg16F = 66,
    Rg32F = 67,
    SR8 = 77,
    SRg8 = 78,
    SR32I = 79,
    SRg32I = 80,
    SRgba32I = 81,
    R32I = 82,
    Rg32I = 83,
    Rg8 = 84,
    SRgba8 = 85,
    R16 = 97,
    R16F = 98,
    R32F = 99,
    R8I = 100,
    SR8I = 101,
    Rg8I = 102,
    SRg8I = 103,
    R16I = 104,
    SR16I = 105,
    Rg16I = 106,
    SRg16I = 107,
    Rgba32UI = 108,
    Rgba16UI = 114,
    Rgba8UI = 120,
    SRgba16I = 132,
    SRgba8I = 138,
}

impl InternalFormat {
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Bytes per element.
    pub fn element_size(self) -> u32 {
        use InternalFormat::*;
        match self {
            Intensity8 | SR8 | R8I | SR8I => 1,
            B5G6R5 | Bgr5X1 | Depth16 | SU16 | SRg8 | Rg8 | R16 | R16F | Rg8I | SRg8I | R16I
            | SR16I => 2,
            Bgr10X2 | Rgba8 | Depth24Sten8 | SUv16 | Rg16 | Rg16F | SR32I | R32I | SRgba8
            | R32F | Rg16I | SRg16I | Rgba8UI | SRgba8I => 4,
            Rgba16 | Rgba16F | SUvwq16 | Rg32F | SRg32I | Rg32I | Rgba16UI | SRgba16I => 8,
            Rgba32I | Rgba32F | SRgba32I | Rgba32UI => 16,
        }
    }
}

/// What a raw format resolves to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FormatTarget {
    Supported(InternalFormat),
    Unsupported(UnsupportedKind),
}

/// One row of the format table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FormatMapping {
    pub raw: RawFormat,
    pub target: FormatTarget,
    pub channel_order: ChannelOrder,
}

const fn map(raw: RawFormat, target: FormatTarget, channel_order: ChannelOrder) -> FormatMapping {
    FormatMapping {
        raw,
        target,
        channel_order,
    }
}

const fn supported(format: InternalFormat) -> FormatTarget {
    FormatTarget::Supported(format)
}

const fn unsupported() -> FormatTarget {
    FormatTarget::Unsupported(UnsupportedKind::NotRepresentable)
}

const fn not_yet_supported() -> FormatTarget {
    FormatTarget::Unsupported(UnsupportedKind::NotYetSupported)
}

// Row i describes raw code FIRST_RAW_FORMAT + i.
const TABLE: [FormatMapping; RAW_FORMAT_COUNT] = [
    map(RawFormat::Luminance8, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::Luminance16, supported(InternalFormat::R16), ChannelOrder::R),
    map(RawFormat::Luminance16F, supported(InternalFormat::R16F), ChannelOrder::R),
    map(RawFormat::Luminance32F, supported(InternalFormat::R32F), ChannelOrder::R),
    map(RawFormat::Intensity8, supported(InternalFormat::Intensity8), ChannelOrder::ReplicateR),
    map(RawFormat::Intensity16, supported(InternalFormat::R16), ChannelOrder::R),
    map(RawFormat::Intensity16F, supported(InternalFormat::R16F), ChannelOrder::R),
    map(RawFormat::Intensity32F, supported(InternalFormat::R32F), ChannelOrder::R),
    map(RawFormat::Alpha8, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::Alpha16, supported(InternalFormat::R16), ChannelOrder::R),
    map(RawFormat::Alpha16F, supported(InternalFormat::R16F), ChannelOrder::R),
    map(RawFormat::Alpha32F, supported(InternalFormat::R32F), ChannelOrder::R),
    map(RawFormat::Luminance8Alpha8, supported(InternalFormat::Rg8I), ChannelOrder::Rg),
    map(RawFormat::Luminance16Alpha16, supported(InternalFormat::Rg16I), ChannelOrder::Rg),
    map(RawFormat::Luminance16FAlpha16F, supported(InternalFormat::Rg16F), ChannelOrder::Rg),
    map(RawFormat::Luminance32FAlpha32F, supported(InternalFormat::Rg16F), ChannelOrder::Rg),
    map(RawFormat::B2G3R3, unsupported(), ChannelOrder::R),
    map(RawFormat::B5G6R5, supported(InternalFormat::B5G6R5), ChannelOrder::Rgb),
    map(RawFormat::Bgrx4, unsupported(), ChannelOrder::Bgra),
    map(RawFormat::Bgr5X1, supported(InternalFormat::Bgr5X1), ChannelOrder::Rgb),
    map(RawFormat::Bgrx8, supported(InternalFormat::Rgba8), ChannelOrder::Bgra),
    map(RawFormat::Bgr10X2, supported(InternalFormat::Bgr10X2), ChannelOrder::Rgb),
    map(RawFormat::Bgrx16, supported(InternalFormat::Rgba16), ChannelOrder::Bgra),
    map(RawFormat::Bgrx16F, supported(InternalFormat::Rgba16F), ChannelOrder::Bgra),
    map(RawFormat::Bgrx32F, supported(InternalFormat::Rgba32F), ChannelOrder::Bgra),
    map(RawFormat::Rgbx4, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Rgb5X1, supported(InternalFormat::Bgr5X1), ChannelOrder::Rgba),
    map(RawFormat::Rgbx8, supported(InternalFormat::Rgba8), ChannelOrder::Rgba),
    map(RawFormat::Rgb10X2, supported(InternalFormat::Bgr10X2), ChannelOrder::Rgba),
    map(RawFormat::Rgbx16, supported(InternalFormat::Rgba16), ChannelOrder::Rgba),
    map(RawFormat::Rgbx16F, supported(InternalFormat::Rgba16F), ChannelOrder::Rgba),
    map(RawFormat::Rgbx32F, supported(InternalFormat::Rgba32F), ChannelOrder::Rgba),
    map(RawFormat::Bgra4, unsupported(), ChannelOrder::Bgra),
    map(RawFormat::Bgr5A1, supported(InternalFormat::Bgr5X1), ChannelOrder::Bgra),
    map(RawFormat::Bgra8, supported(InternalFormat::Rgba8), ChannelOrder::Bgra),
    map(RawFormat::Bgr10A2, supported(InternalFormat::Bgr10X2), ChannelOrder::Bgra),
    map(RawFormat::Bgra16, supported(InternalFormat::Rgba16), ChannelOrder::Bgra),
    map(RawFormat::Bgra16F, supported(InternalFormat::Rgba16), ChannelOrder::Bgra),
    map(RawFormat::Bgra32F, supported(InternalFormat::Rgba32F), ChannelOrder::Bgra),
    map(RawFormat::Rgba4, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Rgb5A1, supported(InternalFormat::Bgr5X1), ChannelOrder::Rgba),
    map(RawFormat::Rgba8, supported(InternalFormat::Rgba8), ChannelOrder::Rgba),
    map(RawFormat::Rgb10A2, supported(InternalFormat::Bgr10X2), ChannelOrder::Rgba),
    map(RawFormat::Rgba16, supported(InternalFormat::Rgba16), ChannelOrder::Rgba),
    map(RawFormat::Rgba16F, supported(InternalFormat::Rgba16F), ChannelOrder::Rgba),
    map(RawFormat::Rgba32I, supported(InternalFormat::Rgba32I), ChannelOrder::Rgba),
    map(RawFormat::Rgba32F, supported(InternalFormat::Rgba32F), ChannelOrder::Rgba),
    map(RawFormat::Dudv8, supported(InternalFormat::Rg8I), ChannelOrder::Rg),
    map(RawFormat::Dxt1, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt23, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt45, unsupported(), ChannelOrder::R),
    map(RawFormat::Ati1N, unsupported(), ChannelOrder::R),
    map(RawFormat::Ati2N, unsupported(), ChannelOrder::R),
    map(RawFormat::Depth16, supported(InternalFormat::Depth16), ChannelOrder::ReplicateR),
    map(RawFormat::Depth16F, supported(InternalFormat::R16F), ChannelOrder::R),
    map(RawFormat::Depth24X8, unsupported(), ChannelOrder::R),
    map(RawFormat::Depth24FX8, unsupported(), ChannelOrder::R),
    map(RawFormat::Depth24Sten8, supported(InternalFormat::Depth24Sten8), ChannelOrder::ReplicateR),
    map(RawFormat::Depth24FSten8, unsupported(), ChannelOrder::R),
    map(RawFormat::Depth32FX24Sten8, supported(InternalFormat::Rg32I), ChannelOrder::ReplicateR),
    map(RawFormat::Depth32F, supported(InternalFormat::R32F), ChannelOrder::ReplicateR),
    map(RawFormat::SR11SG11SB10, unsupported(), ChannelOrder::R),
    map(RawFormat::SU16, supported(InternalFormat::SU16), ChannelOrder::R),
    map(RawFormat::SUv16, supported(InternalFormat::SUv16), ChannelOrder::Rg),
    map(RawFormat::SUvwq16, supported(InternalFormat::SUvwq16), ChannelOrder::Rgba),
    map(RawFormat::Rg16, supported(InternalFormat::Rg16), ChannelOrder::Rg),
    map(RawFormat::Rg16F, supported(InternalFormat::Rg16F), ChannelOrder::Rg),
    map(RawFormat::Rg32F, supported(InternalFormat::Rg32F), ChannelOrder::Rg),
    map(RawFormat::Abgr4, unsupported(), ChannelOrder::Argb),
    map(RawFormat::A1Bgr5, supported(InternalFormat::Bgr5X1), ChannelOrder::Argb),
    map(RawFormat::Abgr8, supported(InternalFormat::Rgba8), ChannelOrder::Argb),
    map(RawFormat::A2Bgr10, supported(InternalFormat::Bgr10X2), ChannelOrder::Argb),
    map(RawFormat::Abgr16, supported(InternalFormat::Rgba16), ChannelOrder::Argb),
    map(RawFormat::Abgr16F, supported(InternalFormat::Rgba16F), ChannelOrder::Argb),
    map(RawFormat::Abgr32F, supported(InternalFormat::Rgba32F), ChannelOrder::Argb),
    map(RawFormat::Dxt1A, unsupported(), ChannelOrder::R),
    map(RawFormat::SRgb10A2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::SR8, supported(InternalFormat::SR8), ChannelOrder::R),
    map(RawFormat::SRg8, supported(InternalFormat::SRg8), ChannelOrder::Rg),
    map(RawFormat::SR32I, supported(InternalFormat::SR32I), ChannelOrder::R),
    map(RawFormat::SRg32I, supported(InternalFormat::SRg32I), ChannelOrder::Rg),
    map(RawFormat::SRgba32I, supported(InternalFormat::SRgba32I), ChannelOrder::Rgba),
    map(RawFormat::R32I, supported(InternalFormat::R32I), ChannelOrder::ReplicateR),
    map(RawFormat::Rg32I, supported(InternalFormat::Rg32I), ChannelOrder::Rg),
    map(RawFormat::Rg8, supported(InternalFormat::Rg8), ChannelOrder::Rg),
    map(RawFormat::SRgba8, supported(InternalFormat::SRgba8), ChannelOrder::Rgba),
    map(RawFormat::R11FG11FB10F, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Rgb9E5, supported(InternalFormat::Rgba8), ChannelOrder::Argb),
    map(RawFormat::LuminanceLatc1, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::SignedLuminanceLatc1, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::LuminanceAlphaLatc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::SignedLuminanceAlphaLatc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::RedRgtc1, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::SignedRedRgtc1, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::RedGreenRgtc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::SignedRedGreenRgtc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::R8, supported(InternalFormat::Intensity8), ChannelOrder::R),
    map(RawFormat::R16, supported(InternalFormat::R16), ChannelOrder::R),
    map(RawFormat::R16F, supported(InternalFormat::R16F), ChannelOrder::R),
    map(RawFormat::R32F, supported(InternalFormat::R32F), ChannelOrder::R),
    map(RawFormat::R8I, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::SR8I, supported(InternalFormat::SR8I), ChannelOrder::R),
    map(RawFormat::Rg8I, supported(InternalFormat::Rg8I), ChannelOrder::Rg),
    map(RawFormat::SRg8I, supported(InternalFormat::SRg8I), ChannelOrder::Rg),
    map(RawFormat::R16I, supported(InternalFormat::R16I), ChannelOrder::R),
    map(RawFormat::SR16I, supported(InternalFormat::SR16I), ChannelOrder::R),
    map(RawFormat::Rg16I, supported(InternalFormat::Rg16I), ChannelOrder::Rg),
    map(RawFormat::SRg16I, supported(InternalFormat::SRg16I), ChannelOrder::Rg),
    map(RawFormat::Rgba32UI, supported(InternalFormat::Rgba32UI), ChannelOrder::Rgba),
    map(RawFormat::Rgbx32UI, supported(InternalFormat::Rgba32UI), ChannelOrder::Rgba),
    map(RawFormat::Alpha32UI, supported(InternalFormat::R32I), ChannelOrder::R),
    map(RawFormat::Intensity32UI, supported(InternalFormat::R32I), ChannelOrder::R),
    map(RawFormat::Luminance32UI, supported(InternalFormat::R32I), ChannelOrder::R),
    map(RawFormat::LuminanceAlpha32UI, supported(InternalFormat::Rg32I), ChannelOrder::Rg),
    map(RawFormat::Rgba16UI, supported(InternalFormat::Rgba16UI), ChannelOrder::Rgba),
    map(RawFormat::Rgbx16UI, supported(InternalFormat::Rgba16UI), ChannelOrder::Rgba),
    map(RawFormat::Alpha16UI, supported(InternalFormat::R16I), ChannelOrder::R),
    map(RawFormat::Intensity16UI, supported(InternalFormat::R16I), ChannelOrder::R),
    map(RawFormat::Luminance16UI, supported(InternalFormat::R16I), ChannelOrder::R),
    map(RawFormat::LuminanceAlpha16UI, supported(InternalFormat::R32I), ChannelOrder::Rg),
    map(RawFormat::Rgba8UI, supported(InternalFormat::Rgba8UI), ChannelOrder::Rgba),
    map(RawFormat::Rgbx8UI, supported(InternalFormat::Rgba8UI), ChannelOrder::Rgba),
    map(RawFormat::Alpha8UI, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::Intensity8UI, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::Luminance8UI, supported(InternalFormat::R8I), ChannelOrder::R),
    map(RawFormat::LuminanceAlpha8UI, supported(InternalFormat::Rg8I), ChannelOrder::Rg),
    map(RawFormat::SRgba32IExt, supported(InternalFormat::SRgba32I), ChannelOrder::Rgba),
    map(RawFormat::SRgbx32I, supported(InternalFormat::SRgba32I), ChannelOrder::Rgba),
    map(RawFormat::SAlpha32I, supported(InternalFormat::SR32I), ChannelOrder::R),
    map(RawFormat::SIntensity32I, supported(InternalFormat::SR32I), ChannelOrder::R),
    map(RawFormat::SLuminance32I, supported(InternalFormat::SR32I), ChannelOrder::R),
    map(RawFormat::SLuminanceAlpha32I, supported(InternalFormat::SRg32I), ChannelOrder::Rg),
    map(RawFormat::SRgba16I, supported(InternalFormat::SRgba16I), ChannelOrder::Rgba),
    map(RawFormat::SRgbx16I, supported(InternalFormat::SRgba16I), ChannelOrder::Rgba),
    map(RawFormat::SAlpha16I, supported(InternalFormat::SR16I), ChannelOrder::R),
    map(RawFormat::SIntensity16I, supported(InternalFormat::SR16I), ChannelOrder::R),
    map(RawFormat::SLuminance16I, supported(InternalFormat::SR16I), ChannelOrder::R),
    map(RawFormat::SLuminanceAlpha16I, supported(InternalFormat::SRg16I), ChannelOrder::Rg),
    map(RawFormat::SRgba8I, supported(InternalFormat::SRgba8I), ChannelOrder::Rgba),
    map(RawFormat::SRgbx8I, supported(InternalFormat::SRgba8I), ChannelOrder::Rgba),
    map(RawFormat::SAlpha8I, supported(InternalFormat::SR8I), ChannelOrder::R),
    map(RawFormat::SIntensity8I, supported(InternalFormat::SR8I), ChannelOrder::R),
    map(RawFormat::SLuminance8I, supported(InternalFormat::SR8I), ChannelOrder::R),
    map(RawFormat::SLuminanceAlpha8I, supported(InternalFormat::SRg8I), ChannelOrder::Rg),
    map(RawFormat::SDxt6, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt6, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt7, unsupported(), ChannelOrder::R),
    map(RawFormat::Luminance8Snorm, supported(InternalFormat::SR8), ChannelOrder::R),
    map(RawFormat::Luminance16Snorm, supported(InternalFormat::SU16), ChannelOrder::R),
    map(RawFormat::Intensity8Snorm, supported(InternalFormat::SR8), ChannelOrder::R),
    map(RawFormat::Intensity16Snorm, supported(InternalFormat::SU16), ChannelOrder::R),
    map(RawFormat::Alpha8Snorm, supported(InternalFormat::SR8), ChannelOrder::R),
    map(RawFormat::Alpha16Snorm, supported(InternalFormat::SU16), ChannelOrder::R),
    map(RawFormat::LuminanceAlpha8Snorm, supported(InternalFormat::SRg8), ChannelOrder::Rg),
    map(RawFormat::LuminanceAlpha16Snorm, supported(InternalFormat::SUv16), ChannelOrder::Rg),
    map(RawFormat::R8Snorm, supported(InternalFormat::SR8), ChannelOrder::R),
    map(RawFormat::R16Snorm, supported(InternalFormat::SU16), ChannelOrder::R),
    map(RawFormat::Rg8Snorm, supported(InternalFormat::SRg8), ChannelOrder::Rg),
    map(RawFormat::Rg16Snorm, supported(InternalFormat::SUv16), ChannelOrder::Rg),
    map(RawFormat::Rgbx8Snorm, supported(InternalFormat::SRgba8), ChannelOrder::Rgba),
    map(RawFormat::Rgbx16Snorm, supported(InternalFormat::SUvwq16), ChannelOrder::Rgba),
    map(RawFormat::Rgba8Snorm, supported(InternalFormat::SRgba8), ChannelOrder::Rgba),
    map(RawFormat::Rgba16Snorm, supported(InternalFormat::SUvwq16), ChannelOrder::Rgba),
    map(RawFormat::Rgb10A2UI, not_yet_supported(), ChannelOrder::Rgba),
    map(RawFormat::Rgb32F, unsupported(), ChannelOrder::Rgb),
    map(RawFormat::Rgb32I, unsupported(), ChannelOrder::Rgb),
    map(RawFormat::Rgb32UI, unsupported(), ChannelOrder::Rgb),
    map(RawFormat::Rgbx8Srgb, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Rgba8Srgb, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Dxt1Srgb, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt1ASrgb, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt23Srgb, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt45Srgb, unsupported(), ChannelOrder::R),
    map(RawFormat::Dxt7Srgb, unsupported(), ChannelOrder::R),
    map(RawFormat::Rgb8Etc2, unsupported(), ChannelOrder::Rgb),
    map(RawFormat::Srgb8Etc2, unsupported(), ChannelOrder::Rgb),
    map(RawFormat::Rgb8PtAlpha1Etc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Srgb8PtAlpha1Etc2, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Rgba8Etc2Eac, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Srgb8Alpha8Etc2Eac, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::R11Eac, unsupported(), ChannelOrder::R),
    map(RawFormat::SignedR11Eac, unsupported(), ChannelOrder::R),
    map(RawFormat::Rg11Eac, unsupported(), ChannelOrder::Rg),
    map(RawFormat::SignedRg11Eac, unsupported(), ChannelOrder::Rg),
    map(RawFormat::Bgr10A2UI, not_yet_supported(), ChannelOrder::Bgra),
    map(RawFormat::A2Bgr10UI, not_yet_supported(), ChannelOrder::Argb),
    map(RawFormat::A2Rgb10UI, not_yet_supported(), ChannelOrder::Abgr),
    map(RawFormat::B5G6R5UI, unsupported(), ChannelOrder::Bgra),
    map(RawFormat::R5G6B5UI, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Depth32FX24Sten8Unclamped, supported(InternalFormat::Rg32I), ChannelOrder::ReplicateR),
    map(RawFormat::Depth32FUnclamped, supported(InternalFormat::R32F), ChannelOrder::ReplicateR),
    map(RawFormat::L8X16A8Srgb, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::L8X24Srgb, unsupported(), ChannelOrder::Rgba),
    map(RawFormat::Stencil8, supported(InternalFormat::R8I), ChannelOrder::R),
];

const fn table_is_dense(table: &[FormatMapping]) -> bool {
    let mut i = 0;
    while i < table.len() {
        if table[i].raw as u32 != FIRST_RAW_FORMAT + i as u32 {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(table_is_dense(&TABLE), "format table out of order");

/// The raw-to-internal format table, indexed by `raw - FIRST_RAW_FORMAT`.
pub static FORMAT_TABLE: [FormatMapping; RAW_FORMAT_COUNT] = TABLE;

/// Check that `table[i]` describes raw code `FIRST_RAW_FORMAT + i` for
/// every row.
pub fn check_table_order(table: &[FormatMapping]) -> Result<()> {
    for (index, entry) in table.iter().enumerate() {
        let expected = FIRST_RAW_FORMAT as usize + index;
        if entry.raw.code() as usize != expected {
            return Err(InteropError::FormatTableDrift {
                index,
                found: entry.raw.code(),
            });
        }
    }
    Ok(())
}

/// Re-validate [`FORMAT_TABLE`] against the raw enumeration.
pub fn validate_format_table() -> Result<()> {
    check_table_order(&FORMAT_TABLE)?;
    for code in FIRST_RAW_FORMAT..FIRST_RAW_FORMAT + RAW_FORMAT_COUNT as u32 {
        if RawFormat::from_code(code).is_none() {
            return Err(InteropError::FormatTableDrift {
                index: (code - FIRST_RAW_FORMAT) as usize,
                found: code,
            });
        }
    }
    Ok(())
}

/// Table row for a raw code, `None` if the code is out of range.
pub fn lookup(raw: u32) -> Option<&'static FormatMapping> {
    let index = raw.checked_sub(FIRST_RAW_FORMAT)? as usize;
    let entry = FORMAT_TABLE.get(index)?;
    debug_assert_eq!(entry.raw.code(), raw, "format table drifted at index {index}");
    Some(entry)
}

/// Translate a raw GL surface format into the internal format and channel
/// order, or report why it cannot be shared.
///
/// Unsupported formats are an ordinary outcome: block-compressed, ETC/EAC,
/// LATC/RGTC and most sRGB formats all land here.
pub fn translate_format(raw: u32) -> Result<(InternalFormat, ChannelOrder)> {
    let Some(entry) = lookup(raw) else {
        debug!(raw, "surface format outside the known range");
        return Err(InteropError::UnsupportedFormat {
            raw,
            kind: UnsupportedKind::OutOfRange,
        });
    };

    match entry.target {
        FormatTarget::Supported(format) => Ok((format, entry.channel_order)),
        FormatTarget::Unsupported(kind) => {
            debug!(raw, format = ?entry.raw, %kind, "surface format cannot be shared");
            Err(InteropError::UnsupportedFormat { raw, kind })
        }
    }
}

/// Resolve the format of an attached resource.
///
/// Vertex buffers are raw byte storage, so whatever format the driver
/// reported for them is replaced by [`BYTE_BUFFER_FORMAT`].
pub fn resolve_attachment_format(
    kind: ResourceKind,
    raw: u32,
) -> Result<(InternalFormat, ChannelOrder)> {
    let raw = match kind {
        ResourceKind::VertexBuffer => BYTE_BUFFER_FORMAT.code(),
        ResourceKind::Texture | ResourceKind::RenderBuffer => raw,
    };
    translate_format(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unsupported_kind(raw: u32) -> UnsupportedKind {
        match translate_format(raw) {
            Err(InteropError::UnsupportedFormat { kind, .. }) => kind,
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn common_formats() {
        assert_eq!(
            translate_format(RawFormat::Luminance8.code()).unwrap(),
            (InternalFormat::R8I, ChannelOrder::R)
        );
        assert_eq!(
            translate_format(RawFormat::Rgba8.code()).unwrap(),
            (InternalFormat::Rgba8, ChannelOrder::Rgba)
        );
        assert_eq!(
            translate_format(RawFormat::Bgra8.code()).unwrap(),
            (InternalFormat::Rgba8, ChannelOrder::Bgra)
        );
        assert_eq!(
            translate_format(RawFormat::Abgr8.code()).unwrap(),
            (InternalFormat::Rgba8, ChannelOrder::Argb)
        );
        assert_eq!(
            translate_format(RawFormat::Intensity8.code()).unwrap(),
            (InternalFormat::Intensity8, ChannelOrder::ReplicateR)
        );
        assert_eq!(
            translate_format(RawFormat::Depth32F.code()).unwrap(),
            (InternalFormat::R32F, ChannelOrder::ReplicateR)
        );
    }

    #[test]
    fn compressed_and_srgb_formats_are_rejected() {
        for raw in [
            RawFormat::Dxt1,
            RawFormat::Dxt23,
            RawFormat::Dxt45,
            RawFormat::LuminanceLatc1,
            RawFormat::RedGreenRgtc2,
            RawFormat::Rgba4,
            RawFormat::Rgb8Etc2,
            RawFormat::Rgba8Srgb,
            RawFormat::L8X24Srgb,
        ] {
            assert_eq!(unsupported_kind(raw.code()), UnsupportedKind::NotRepresentable, "{raw:?}");
        }
    }

    #[test]
    fn packed_integer_formats_are_not_yet_supported() {
        for raw in [
            RawFormat::Bgr10A2UI,
            RawFormat::A2Bgr10UI,
            RawFormat::A2Rgb10UI,
            RawFormat::Rgb10A2UI,
        ] {
            assert_eq!(unsupported_kind(raw.code()), UnsupportedKind::NotYetSupported, "{raw:?}");
        }
        assert_eq!(UnsupportedKind::NotYetSupported.sentinel(), Some(501));
        assert_eq!(UnsupportedKind::NotRepresentable.sentinel(), Some(500));
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        let past_end = FIRST_RAW_FORMAT + FORMAT_TABLE.len() as u32 + 5;
        assert_eq!(unsupported_kind(past_end), UnsupportedKind::OutOfRange);
        assert_eq!(unsupported_kind(u32::MAX), UnsupportedKind::OutOfRange);
        assert!(lookup(past_end).is_none());
    }

    #[test]
    fn every_code_resolves_deterministically() {
        for code in FIRST_RAW_FORMAT..FIRST_RAW_FORMAT + RAW_FORMAT_COUNT as u32 {
            let first = translate_format(code);
            let second = translate_format(code);
            match (first, second) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (
                    Err(InteropError::UnsupportedFormat { kind: a, .. }),
                    Err(InteropError::UnsupportedFormat { kind: b, .. }),
                ) => {
                    assert_eq!(a, b);
                    assert_ne!(a, UnsupportedKind::OutOfRange);
                }
                (a, b) => panic!("code {code} resolved differently: {a:?} vs {b:?}"),
            }
        }
    }

    #[test]
    fn table_matches_enumeration() {
        assert_eq!(FORMAT_TABLE.len(), RAW_FORMAT_COUNT);
        validate_format_table().unwrap();
        for (index, entry) in FORMAT_TABLE.iter().enumerate() {
            assert_eq!(entry.raw.code(), FIRST_RAW_FORMAT + index as u32);
        }
    }

    #[test]
    fn drift_is_detected() {
        let mut table = FORMAT_TABLE;
        table.swap(10, 11);
        match check_table_order(&table) {
            Err(InteropError::FormatTableDrift { index, found }) => {
                assert_eq!(index, 10);
                assert_eq!(found, 11);
            }
            other => panic!("expected drift, got {other:?}"),
        }
    }

    #[test]
    fn vertex_buffers_are_byte_storage() {
        for raw in [RawFormat::Rgba32F.code(), RawFormat::Dxt1.code(), 9999] {
            let (format, order) = resolve_attachment_format(ResourceKind::VertexBuffer, raw).unwrap();
            assert_eq!(format, BYTE_BUFFER_INTERNAL);
            assert_eq!(order, ChannelOrder::R);
            assert_eq!(format.element_size(), 1);
        }
        assert!(resolve_attachment_format(ResourceKind::Texture, RawFormat::Dxt1.code()).is_err());
    }

    #[test]
    fn channel_counts() {
        assert_eq!(ChannelOrder::ReplicateR.channel_count(), 1);
        assert_eq!(ChannelOrder::Rg.channel_count(), 2);
        assert_eq!(ChannelOrder::Abgr.channel_count(), 4);
    }

    #[test]
    fn internal_codes_match_raw_codes() {
        for entry in FORMAT_TABLE.iter() {
            if let FormatTarget::Supported(format) = entry.target {
                assert!(RawFormat::from_code(format.code()).is_some(), "{format:?}");
            }
        }
    }
}
