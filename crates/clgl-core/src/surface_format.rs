//! Raw surface-format enumeration reported by the GL driver.
//!
//! The driver describes every attached resource with one of these codes. The
//! values are dense and zero-based; `clgl-interop` keeps a mapping table
//! indexed by them, so the discriminants here must never be reordered.

use num_derive::{FromPrimitive, ToPrimitive};

/// Lowest raw format code.
pub const FIRST_RAW_FORMAT: u32 = RawFormat::Luminance8 as u32;

/// Highest raw format code.
pub const LAST_RAW_FORMAT: u32 = RawFormat::Stencil8 as u32;

/// Number of raw format codes.
pub const RAW_FORMAT_COUNT: usize = (LAST_RAW_FORMAT - FIRST_RAW_FORMAT + 1) as usize;

/// A GL-side surface format code.
///
/// A leading `S` marks the driver's signed variants (`SR8` is signed R8,
/// `SRgba32I` is signed RGBA 32-bit integer).
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum RawFormat {
    Luminance8 = 0,
    Luminance16 = 1,
    Luminance16F = 2,
    Luminance32F = 3,
    Intensity8 = 4,
    Intensity16 = 5,
    Intensity16F = 6,
    Intensity32F = 7,
    Alpha8 = 8,
    Alpha16 = 9,
    Alpha16F = 10,
    Alpha32F = 11,
    Luminance8Alpha8 = 12,
    Luminance16Alpha16 = 13,
    Luminance16FAlpha16F = 14,
    Luminance32FAlpha32F = 15,
    B2G3R3 = 16,
    B5G6R5 = 17,
    Bgrx4 = 18,
    Bgr5X1 = 19,
    Bgrx8 = 20,
    Bgr10X2 = 21,
    Bgrx16 = 22,
    Bgrx16F = 23,
    Bgrx32F = 24,
    Rgbx4 = 25,
    Rgb5X1 = 26,
    Rgbx8 = 27,
    Rgb10X2 = 28,
    Rgbx16 = 29,
    Rgbx16F = 30,
    Rgbx32F = 31,
    Bgra4 = 32,
    Bgr5A1 = 33,
    Bgra8 = 34,
    Bgr10A2 = 35,
    Bgra16 = 36,
    Bgra16F = 37,
    Bgra32F = 38,
    Rgba4 = 39,
    Rgb5A1 = 40,
    Rgba8 = 41,
    Rgb10A2 = 42,
    Rgba16 = 43,
    Rgba16F = 44,
    Rgba32I = 45,
    Rgba32F = 46,
    Dudv8 = 47,
    Dxt1 = 48,
    Dxt23 = 49,
    Dxt45 = 50,
    Ati1N = 51,
    Ati2N = 52,
    Depth16 = 53,
    Depth16F = 54,
    Depth24X8 = 55,
    Depth24FX8 = 56,
    Depth24Sten8 = 57,
    Depth24FSten8 = 58,
    Depth32FX24Sten8 = 59,
    Depth32F = 60,
    SR11SG11SB10 = 61,
    SU16 = 62,
    SUv16 = 63,
    SUvwq16 = 64,
    Rg16 = 65,
    Rg16F = 66,
    Rg32F = 67,
    Abgr4 = 68,
    A1Bgr5 = 69,
    Abgr8 = 70,
    A2Bgr10 = 71,
    Abgr16 = 72,
    Abgr16F = 73,
    Abgr32F = 74,
    Dxt1A = 75,
    SRgb10A2 = 76,
    SR8 = 77,
    SRg8 = 78,
    SR32I = 79,
    SRg32I = 80,
    SRgba32I = 81,
    R32I = 82,
    Rg32I = 83,
    Rg8 = 84,
    SRgba8 = 85,
    R11FG11FB10F = 86,
    Rgb9E5 = 87,
    LuminanceLatc1 = 88,
    SignedLuminanceLatc1 = 89,
    LuminanceAlphaLatc2 = 90,
    SignedLuminanceAlphaLatc2 = 91,
    RedRgtc1 = 92,
    SignedRedRgtc1 = 93,
    RedGreenRgtc2 = 94,
    SignedRedGreenRgtc2 = 95,
    R8 = 96,
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
    Rgbx32UI = 109,
    Alpha32UI = 110,
    Intensity32UI = 111,
    Luminance32UI = 112,
    LuminanceAlpha32UI = 113,
    Rgba16UI = 114,
    Rgbx16UI = 115,
    Alpha16UI = 116,
    Intensity16UI = 117,
    Luminance16UI = 118,
    LuminanceAlpha16UI = 119,
    Rgba8UI = 120,
    Rgbx8UI = 121,
    Alpha8UI = 122,
    Intensity8UI = 123,
    Luminance8UI = 124,
    LuminanceAlpha8UI = 125,
    SRgba32IExt = 126,
    SRgbx32I = 127,
    SAlpha32I = 128,
    SIntensity32I = 129,
    SLuminance32I = 130,
    SLuminanceAlpha32I = 131,
    SRgba16I = 132,
    SRgbx16I = 133,
    SAlpha16I = 134,
    SIntensity16I = 135,
    SLuminance16I = 136,
    SLuminanceAlpha16I = 137,
    SRgba8I = 138,
    SRgbx8I = 139,
    SAlpha8I = 140,
    SIntensity8I = 141,
    SLuminance8I = 142,
    SLuminanceAlpha8I = 143,
    SDxt6 = 144,
    Dxt6 = 145,
    Dxt7 = 146,
    Luminance8Snorm = 147,
    Luminance16Snorm = 148,
    Intensity8Snorm = 149,
    Intensity16Snorm = 150,
    Alpha8Snorm = 151,
    Alpha16Snorm = 152,
    LuminanceAlpha8Snorm = 153,
    LuminanceAlpha16Snorm = 154,
    R8Snorm = 155,
    R16Snorm = 156,
    Rg8Snorm = 157,
    Rg16Snorm = 158,
    Rgbx8Snorm = 159,
    Rgbx16Snorm = 160,
    Rgba8Snorm = 161,
    Rgba16Snorm = 162,
    Rgb10A2UI = 163,
    Rgb32F = 164,
    Rgb32I = 165,
    Rgb32UI = 166,
    Rgbx8Srgb = 167,
    Rgba8Srgb = 168,
    Dxt1Srgb = 169,
    Dxt1ASrgb = 170,
    Dxt23Srgb = 171,
    Dxt45Srgb = 172,
    Dxt7Srgb = 173,
    Rgb8Etc2 = 174,
    Srgb8Etc2 = 175,
    Rgb8PtAlpha1Etc2 = 176,
    Srgb8PtAlpha1Etc2 = 177,
    Rgba8Etc2Eac = 178,
    Srgb8Alpha8Etc2Eac = 179,
    R11Eac = 180,
    SignedR11Eac = 181,
    Rg11Eac = 182,
    SignedRg11Eac = 183,
    Bgr10A2UI = 184,
    A2Bgr10UI = 185,
    A2Rgb10UI = 186,
    B5G6R5UI = 187,
    R5G6B5UI = 188,
    Depth32FX24Sten8Unclamped = 189,
    Depth32FUnclamped = 190,
    L8X16A8Srgb = 191,
    L8X24Srgb = 192,
    Stencil8 = 193,
}

impl RawFormat {
    /// Look up a raw driver code. Returns `None` for codes past
    /// [`LAST_RAW_FORMAT`].
    pub fn from_code(code: u32) -> Option<Self> {
        num_traits::FromPrimitive::from_u32(code)
    }

    /// The driver code for this format.
    pub fn code(self) -> u32 {
        self as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumeration_is_dense() {
        for code in FIRST_RAW_FORMAT..=LAST_RAW_FORMAT {
            let format = RawFormat::from_code(code).expect("every code in range is defined");
            assert_eq!(format.code(), code);
        }
        assert_eq!(RawFormat::from_code(LAST_RAW_FORMAT + 1), None);
    }

    #[test]
    fn anchors_match_driver_header() {
        assert_eq!(RawFormat::Luminance8.code(), 0);
        assert_eq!(RawFormat::Rgba8.code(), 41);
        assert_eq!(RawFormat::Dxt1.code(), 48);
        assert_eq!(RawFormat::R8I.code(), 100);
        assert_eq!(RawFormat::Rgb10A2UI.code(), 163);
        assert_eq!(RawFormat::Stencil8.code(), 193);
        assert_eq!(RAW_FORMAT_COUNT, 194);
    }
}
