//! Physical GPU identity used to gate interop.

/// Adapter plus multi-GPU chain mask.
///
/// On Windows `adapter_id` is the packed adapter LUID; on Linux it is the
/// driver's device id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GpuIdentity {
    pub adapter_id: u64,
    pub chain_mask: u32,
}

impl GpuIdentity {
    pub fn new(adapter_id: u64, chain_mask: u32) -> Self {
        Self {
            adapter_id,
            chain_mask,
        }
    }
}

/// The compute device's view of which GPU it runs on.
pub trait GpuAdapter: Send + Sync {
    /// Adapter id and chain mask, or `None` if the query failed.
    fn multi_gpu_info(&self) -> Option<GpuIdentity>;
}

/// Interop is allowed only when both sides report the exact same identity.
pub fn identities_match(gl: Option<GpuIdentity>, device: Option<GpuIdentity>) -> bool {
    matches!((gl, device), (Some(gl), Some(device)) if gl == device)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let a = GpuIdentity::new(0x1_0000_0002, 0b01);
        assert!(identities_match(Some(a), Some(a)));
        assert!(!identities_match(Some(a), Some(GpuIdentity::new(0x1_0000_0003, 0b01))));
        assert!(!identities_match(Some(a), Some(GpuIdentity::new(0x1_0000_0002, 0b11))));
        assert!(!identities_match(None, Some(a)));
        assert!(!identities_match(Some(a), None));
        assert!(!identities_match(None, None));
    }
}
