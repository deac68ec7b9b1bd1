//! Seam to the compute device's memory manager.

use crate::format::{ChannelOrder, InternalFormat};

/// Tiling layout of a memory object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tiling {
    Linear,
    Tiled,
}

/// Attributes of a memory object that aliases GL-owned storage.
///
/// Assembled from a [`clgl_core::ResourceAttachment`] plus the resolved
/// format, and only alive while the memory object is being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAttribs {
    /// Driver memory-object attribute type, passed through untouched.
    pub object_kind: u32,
    pub tiling: Tiling,
    pub mipmap: bool,
    pub levels: u32,
    /// Base-level swizzles for each layer, followed by mip-level swizzles
    /// when `mipmap` is set. Capacity is `depth * 2`.
    pub swizzles: Vec<u32>,
    pub cpu_address: usize,
    pub card_address: u64,
    pub subtile: u32,
    pub per_surface_tile_info: u32,
    pub channel_order: ChannelOrder,
    pub shared_buffer_id: Option<u32>,
}

/// Memory manager operations used by the interop device.
///
/// Implementations need not be thread-safe: the device only calls them while
/// holding its lock.
pub trait MemoryAllocator: Send {
    /// Handle to a created memory object.
    type Memory;

    fn create_2d(
        &mut self,
        format: InternalFormat,
        width: u64,
        height: u32,
        attribs: &MemoryAttribs,
    ) -> Option<Self::Memory>;

    fn create_3d(
        &mut self,
        format: InternalFormat,
        width: u32,
        height: u32,
        depth: u32,
        attribs: &MemoryAttribs,
    ) -> Option<Self::Memory>;

    /// A view starting `offset` bytes into `base`.
    fn create_offset_2d(
        &mut self,
        base: &Self::Memory,
        offset: u64,
        format: InternalFormat,
        width: u32,
        height: u32,
        attribs: &MemoryAttribs,
    ) -> Option<Self::Memory>;

    /// A view starting `offset` bytes into `base`.
    #[allow(clippy::too_many_arguments)]
    fn create_offset_3d(
        &mut self,
        base: &Self::Memory,
        offset: u64,
        format: InternalFormat,
        width: u32,
        height: u32,
        depth: u32,
        attribs: &MemoryAttribs,
    ) -> Option<Self::Memory>;

    /// Tiling the allocator picked for `memory`.
    fn tiling(&self, memory: &Self::Memory) -> Tiling;

    fn destroy(&mut self, memory: Self::Memory);
}
