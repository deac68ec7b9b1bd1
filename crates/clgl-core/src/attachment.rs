//! Safe view of what the driver reports when a GL resource is attached.

use num_derive::{FromPrimitive, ToPrimitive};

use crate::ffi::*;

/// Kind of GL object being shared with the compute runtime.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum ResourceKind {
    Texture = GL_RESOURCE_ATTACH_TEXTURE_AMD,
    RenderBuffer = GL_RESOURCE_ATTACH_RENDERBUFFER_AMD,
    VertexBuffer = GL_RESOURCE_ATTACH_VERTEXBUFFER_AMD,
}

impl ResourceKind {
    pub fn from_code(code: u32) -> Option<Self> {
        num_traits::FromPrimitive::from_u32(code)
    }

    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Width, height and depth of a surface.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Extent3d {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl From<GLResourceDimensions> for Extent3d {
    fn from(val: GLResourceDimensions) -> Extent3d {
        Extent3d {
            width: val.width,
            height: val.height,
            depth: val.depth,
        }
    }
}

/// Everything the driver reported for one attach call.
///
/// Built inside the attach call and consumed before it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceAttachment {
    pub raw_dimensions: Extent3d,
    pub padded_dimensions: Extent3d,
    pub levels: u32,
    /// Per-layer swizzles of the base level.
    pub swizzles: Vec<u32>,
    /// Per-layer swizzles of the mip chain. Only meaningful when `levels > 1`.
    pub mip_swizzles: Vec<u32>,
    /// Raw surface format code, see [`crate::RawFormat`].
    pub format: u32,
    /// Driver memory-object attribute type (2D, 3D, buffer ...).
    pub object_kind: u32,
    pub card_address: u64,
    pub cpu_handle: usize,
    pub tiling_mode: u32,
    pub per_surface_tile_info: u32,
    /// Opaque driver handle (`mbResHandle`), zero if the driver gave none.
    pub driver_handle: usize,
    /// Byte offset into the base allocation. Nonzero only for buffer views.
    pub offset: u64,
    pub surface_size: u64,
    /// Shared buffer id, only reported by the GLX driver.
    pub shared_buffer_id: Option<u32>,
}

impl ResourceAttachment {
    /// Copy the driver block into an owned attachment.
    ///
    /// Swizzles are copied for as many layers as the driver reports, clamped
    /// to `1..=GLRDATA_MAX_LAYERS`.
    pub fn from_driver(data: &GLResourceData) -> Self {
        let layers = (data.rawDimensions.depth as usize).clamp(1, GLRDATA_MAX_LAYERS);
        Self {
            raw_dimensions: data.rawDimensions.into(),
            padded_dimensions: data.paddedDimensions.into(),
            levels: data.levels,
            swizzles: data.swizzles[..layers].to_vec(),
            mip_swizzles: data.swizzlesMip[..layers].to_vec(),
            format: data.format,
            object_kind: data.objectAttribType,
            card_address: data.cardAddr,
            cpu_handle: data.handle,
            tiling_mode: data.tilingMode,
            per_surface_tile_info: data.perSurfTileInfo,
            driver_handle: data.mbResHandle,
            offset: data.offset,
            surface_size: data.surfaceSize,
            shared_buffer_id: None,
        }
    }

    /// Whether this attachment is a view into a larger base allocation.
    pub fn is_buffer_view(&self) -> bool {
        self.offset != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_swizzles_for_reported_layers() {
        let mut data = GLResourceData::new_boxed();
        data.rawDimensions = GLResourceDimensions {
            width: 64,
            height: 32,
            depth: 3,
        };
        data.levels = 2;
        data.swizzles[..4].copy_from_slice(&[10, 11, 12, 13]);
        data.swizzlesMip[..4].copy_from_slice(&[20, 21, 22, 23]);
        data.mbResHandle = 0xbeef;

        let attachment = ResourceAttachment::from_driver(&data);
        assert_eq!(attachment.swizzles, vec![10, 11, 12]);
        assert_eq!(attachment.mip_swizzles, vec![20, 21, 22]);
        assert_eq!(attachment.raw_dimensions.depth, 3);
        assert_eq!(attachment.driver_handle, 0xbeef);
        assert!(!attachment.is_buffer_view());
    }

    #[test]
    fn zero_depth_still_keeps_one_layer() {
        let data = GLResourceData::new_boxed();
        let attachment = ResourceAttachment::from_driver(&data);
        assert_eq!(attachment.swizzles.len(), 1);
        assert_eq!(data.version, GL_RESOURCE_DATA_VERSION);
    }

    #[test]
    fn resource_kind_round_trips_driver_codes() {
        assert_eq!(
            ResourceKind::from_code(GL_RESOURCE_ATTACH_VERTEXBUFFER_AMD),
            Some(ResourceKind::VertexBuffer)
        );
        assert_eq!(ResourceKind::Texture.code(), GL_RESOURCE_ATTACH_TEXTURE_AMD);
        assert_eq!(ResourceKind::from_code(0), None);
    }
}
