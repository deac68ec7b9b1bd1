//! [`InteropDevice`] — attaches GL resources as compute memory objects.
//!
//! A resource moves through attach → (acquire ↔ release)* → free. The
//! driver session behind the extension and the memory allocator are not
//! reentrant, so every operation here, the GPU identity check included, runs
//! under one per-device lock.

use std::iter;

use clgl_core::ffi::GLRDATA_MAX_LAYERS;
use clgl_core::{DriverResourceHandle, GlContext, GlContextHandle, ResourceKind};
use parking_lot::Mutex;
use tracing::{debug, error, trace, warn};

use crate::config::InteropConfig;
use crate::error::{DriverOp, InteropError, Result};
use crate::extensions::{default_extensions, InteropExtensions, ResourceRequest};
use crate::format::{resolve_attachment_format, validate_format_table, BYTE_BUFFER_INTERNAL};
use crate::identity::{identities_match, GpuAdapter};
use crate::memory::{MemoryAllocator, MemoryAttribs, Tiling};

/// Where an attached resource currently belongs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Attached, not yet acquired.
    Attached,
    /// Owned by the compute side.
    Acquired,
    /// Handed back to GL after an acquire.
    Released,
}

/// A GL resource attached as a compute memory object.
///
/// Must be passed to [`InteropDevice::free`] exactly once; `free` consumes it.
#[must_use = "attached resources must be returned with InteropDevice::free"]
#[derive(Debug)]
pub struct InteropResource<M> {
    context: GlContextHandle,
    kind: ResourceKind,
    handle: DriverResourceHandle,
    memory: M,
    base: Option<M>,
    state: ResourceState,
}

impl<M> InteropResource<M> {
    /// The memory object compute work should use.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// The base allocation backing an offset view, if one was created.
    pub fn base(&self) -> Option<&M> {
        self.base.as_ref()
    }

    pub fn handle(&self) -> DriverResourceHandle {
        self.handle
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn context(&self) -> GlContextHandle {
        self.context
    }

    pub fn state(&self) -> ResourceState {
        self.state
    }
}

/// GL interop front end of one compute device.
pub struct InteropDevice<A: MemoryAllocator> {
    extensions: Box<dyn InteropExtensions>,
    adapter: Box<dyn GpuAdapter>,
    /// Guards the allocator and serializes every driver call.
    session: Mutex<A>,
}

impl<A: MemoryAllocator> InteropDevice<A> {
    /// Create a device from explicit collaborators.
    ///
    /// Fails only if `config.verify_format_table` is set and the format table
    /// no longer matches the raw enumeration.
    pub fn new(
        extensions: Box<dyn InteropExtensions>,
        adapter: Box<dyn GpuAdapter>,
        allocator: A,
        config: &InteropConfig,
    ) -> Result<Self> {
        if config.verify_format_table {
            validate_format_table()?;
        }
        debug!(provider = extensions.name(), "GL interop device created");
        Ok(Self {
            extensions,
            adapter,
            session: Mutex::new(allocator),
        })
    }

    /// Create a device using the extension provider for this platform.
    pub fn with_default_extensions(
        adapter: Box<dyn GpuAdapter>,
        allocator: A,
        config: &InteropConfig,
    ) -> Result<Self> {
        let extensions = default_extensions(config).map_err(InteropError::ExtensionUnavailable)?;
        Self::new(extensions, adapter, allocator, config)
    }

    /// Borrow the extension provider.
    pub fn extensions(&self) -> &dyn InteropExtensions {
        self.extensions.as_ref()
    }

    /// Run `f` with the allocator while holding the device lock.
    pub fn with_allocator<R>(&self, f: impl FnOnce(&mut A) -> R) -> R {
        f(&mut self.session.lock())
    }

    // -----------------------------------------------------------------------
    // Context association
    // -----------------------------------------------------------------------

    /// Resolve the extension, check both APIs share a GPU, and begin interop
    /// on `context`.
    pub fn associate_context(&self, context: &GlContext) -> Result<()> {
        let _session = self.session.lock();

        if let Err(err) = self.extensions.resolve(context) {
            warn!(provider = self.extensions.name(), "GL interop extension unavailable: {err:#}");
            return Err(InteropError::ExtensionUnavailable(err));
        }
        self.check_identity(context.platform)?;

        if !self.extensions.begin_interop(context.platform) {
            error!("begin interop failed for GL context {:?}", context.platform);
            return Err(InteropError::DriverCall(DriverOp::BeginInterop));
        }
        debug!(provider = self.extensions.name(), "GL context associated");
        Ok(())
    }

    /// End interop on `context`.
    pub fn dissociate_context(&self, context: &GlContext) -> Result<()> {
        let _session = self.session.lock();

        if !self.extensions.end_interop(context.platform) {
            error!("end interop failed for GL context {:?}", context.platform);
            return Err(InteropError::DriverCall(DriverOp::EndInterop));
        }
        debug!("GL context dissociated");
        Ok(())
    }

    /// Whether `context` runs on the same adapter and GPU chain as this
    /// device. Any failed query counts as a mismatch. Not cached.
    pub fn can_interoperate(&self, context: &GlContext) -> bool {
        let _session = self.session.lock();
        self.check_identity(context.platform).is_ok()
    }

    /// Caller holds the session lock.
    fn check_identity(&self, context: GlContextHandle) -> Result<()> {
        let gl = self.extensions.context_gpu_info(context);
        let device = self.adapter.multi_gpu_info();
        if identities_match(gl, device) {
            return Ok(());
        }
        warn!(?gl, ?device, "GL context and compute device are on different GPUs");
        Err(InteropError::GpuMismatch { gl, device })
    }

    // -----------------------------------------------------------------------
    // Resource lifecycle
    // -----------------------------------------------------------------------

    /// Attach a GL object and create the memory object(s) that alias it.
    ///
    /// Buffer-style attachments (nonzero offset) must be a single row and
    /// layer; they get a one-row byte allocation, everything else a full 3D
    /// allocation. Vertex buffers and offset resources additionally get an
    /// offset view over that allocation, which then only serves as the
    /// view's base.
    ///
    /// If anything fails after the driver attached the object, the driver
    /// attachment is dropped again and no memory object survives.
    pub fn attach(
        &self,
        context: &GlContext,
        request: &ResourceRequest,
    ) -> Result<InteropResource<A::Memory>> {
        let mut allocator = self.session.lock();

        self.check_identity(context.platform)?;

        let Some(attachment) = self.extensions.attach(context.platform, request) else {
            warn!(name = request.name, kind = ?request.kind, "driver refused to attach GL resource");
            return Err(InteropError::DriverCall(DriverOp::Attach));
        };
        let Some(handle) = DriverResourceHandle::new(attachment.driver_handle) else {
            error!(name = request.name, "driver attached GL resource without a handle");
            return Err(InteropError::InvalidAttachment(
                "driver returned a null resource handle".to_owned(),
            ));
        };
        let abandon = |err: InteropError| {
            if !self.extensions.detach(context.platform, request.kind, handle) {
                warn!(?handle, "failed to detach abandoned GL resource");
            }
            err
        };

        // Only textures may have more than one layer.
        let depth = match request.kind {
            ResourceKind::Texture => attachment.raw_dimensions.depth,
            ResourceKind::RenderBuffer | ResourceKind::VertexBuffer => 1,
        };
        if depth == 0 || depth as usize > GLRDATA_MAX_LAYERS {
            return Err(abandon(InteropError::InvalidAttachment(format!(
                "texture depth {depth} outside 1..={GLRDATA_MAX_LAYERS}"
            ))));
        }
        let layers = depth as usize;
        let mipmap = attachment.levels > 1;

        let mut swizzles = Vec::with_capacity(layers * 2);
        swizzles.extend(attachment.swizzles.iter().copied().chain(iter::repeat(0)).take(layers));
        if mipmap {
            swizzles.extend(
                attachment
                    .mip_swizzles
                    .iter()
                    .copied()
                    .chain(iter::repeat(0))
                    .take(layers),
            );
        }

        let (format, channel_order) =
            resolve_attachment_format(request.kind, attachment.format).map_err(abandon)?;

        let mut attribs = MemoryAttribs {
            object_kind: attachment.object_kind,
            tiling: Tiling::Tiled,
            mipmap,
            levels: attachment.levels.max(1),
            swizzles,
            cpu_address: attachment.cpu_handle,
            card_address: attachment.card_address,
            subtile: attachment.tiling_mode,
            per_surface_tile_info: attachment.per_surface_tile_info,
            channel_order,
            shared_buffer_id: attachment.shared_buffer_id,
        };

        let raw = attachment.raw_dimensions;
        let padded = attachment.padded_dimensions;
        let offset = attachment.offset;

        // Offset attachments are byte views into a one-row base allocation.
        if offset != 0 && (raw.height != 1 || depth != 1) {
            return Err(abandon(InteropError::InvalidAttachment(format!(
                "offset {offset} on a {}x{depth} surface, expected a single row",
                raw.height
            ))));
        }

        let primary = if offset != 0 {
            allocator.create_2d(BYTE_BUFFER_INTERNAL, attachment.surface_size, 1, &attribs)
        } else {
            allocator.create_3d(format, padded.width, raw.height, depth, &attribs)
        };
        let Some(primary) = primary else {
            error!(?format, width = padded.width, height = raw.height, depth, "memory object allocation failed");
            return Err(abandon(InteropError::AllocationFailure("interop")));
        };

        let view = match request.kind {
            ResourceKind::VertexBuffer => {
                attribs.tiling = allocator.tiling(&primary);
                Some(allocator.create_offset_2d(&primary, offset, format, padded.width, 1, &attribs))
            }
            _ if offset != 0 => {
                attribs.tiling = allocator.tiling(&primary);
                Some(allocator.create_offset_3d(
                    &primary,
                    offset,
                    format,
                    padded.width,
                    raw.height,
                    depth,
                    &attribs,
                ))
            }
            _ => None,
        };

        let (memory, base) = match view {
            None => (primary, None),
            Some(Some(view)) => (view, Some(primary)),
            Some(None) => {
                error!(offset, ?format, "offset view allocation failed");
                allocator.destroy(primary);
                return Err(abandon(InteropError::AllocationFailure("offset view")));
            }
        };

        debug!(
            name = request.name,
            kind = ?request.kind,
            ?format,
            ?channel_order,
            offset,
            with_base = base.is_some(),
            "GL resource attached"
        );
        Ok(InteropResource {
            context: context.platform,
            kind: request.kind,
            handle,
            memory,
            base,
            state: ResourceState::Attached,
        })
    }

    /// Give the compute side ownership of `resource` for the coming work.
    ///
    /// Succeeds without calling the driver when the calling thread has no GL
    /// context current.
    pub fn acquire(&self, resource: &mut InteropResource<A::Memory>) -> Result<()> {
        let _session = self.session.lock();

        if !self.extensions.has_current_context() {
            trace!(handle = ?resource.handle, "no current GL context, skipping acquire");
            return Ok(());
        }
        if !self
            .extensions
            .acquire(resource.context, resource.kind, resource.handle)
        {
            warn!(handle = ?resource.handle, "driver refused to acquire GL resource");
            return Err(InteropError::DriverCall(DriverOp::Acquire));
        }
        resource.state = ResourceState::Acquired;
        Ok(())
    }

    /// Hand `resource` back to GL.
    ///
    /// Succeeds without calling the driver when the calling thread has no GL
    /// context current.
    pub fn release(&self, resource: &mut InteropResource<A::Memory>) -> Result<()> {
        let _session = self.session.lock();

        if !self.extensions.has_current_context() {
            trace!(handle = ?resource.handle, "no current GL context, skipping release");
            return Ok(());
        }
        if !self
            .extensions
            .release(resource.context, resource.kind, resource.handle)
        {
            warn!(handle = ?resource.handle, "driver refused to release GL resource");
            return Err(InteropError::DriverCall(DriverOp::Release));
        }
        resource.state = ResourceState::Released;
        Ok(())
    }

    /// Destroy the memory objects of `resource` and detach it from the
    /// driver. A resource still acquired is released first.
    pub fn free(&self, resource: InteropResource<A::Memory>) -> Result<()> {
        let mut allocator = self.session.lock();

        let InteropResource {
            context,
            kind,
            handle,
            memory,
            base,
            state,
        } = resource;

        if state == ResourceState::Acquired {
            warn!(?handle, "freeing an acquired GL resource, releasing it first");
            if self.extensions.has_current_context() && !self.extensions.release(context, kind, handle) {
                warn!(?handle, "release before free failed");
            }
        }

        if let Some(base) = base {
            allocator.destroy(base);
        }
        allocator.destroy(memory);

        if !self.extensions.detach(context, kind, handle) {
            error!(?handle, "driver failed to detach GL resource");
            return Err(InteropError::DriverCall(DriverOp::Detach));
        }
        debug!(?handle, "GL resource freed");
        Ok(())
    }
}
