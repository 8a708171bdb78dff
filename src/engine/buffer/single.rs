//! ### English
//! Degenerate single-buffer pool for software-rendering backends.
//!
//! Acquisition always succeeds by design: the sole unit is claimed
//! unconditionally and releases are no-ops, trading tearing for
//! compatibility on platforms that cannot multi-buffer (e.g., emulators).
//!
//! ### 中文
//! 面向软件渲染后端的退化单缓冲池。
//!
//! 占用按设计总是成功：唯一的 unit 被无条件占用，release 为 no-op；
//! 在无法多缓冲的平台（如模拟器）上，以画面撕裂换取兼容性。

use std::sync::Arc;

use dpi::PhysicalSize;

use super::{BufferUnit, SurfacePool, UnitHandle};
use crate::engine::error::EngineError;
use crate::engine::surface::SurfaceAllocator;

/// ### English
/// Pool of exactly one unit that never exhausts.
///
/// ### 中文
/// 只有一个 unit、永不耗尽的池。
pub struct SingleBufferPool {
    /// ### English
    /// The sole unit.
    ///
    /// ### 中文
    /// 唯一的 unit。
    unit: BufferUnit,
}

impl SingleBufferPool {
    /// ### English
    /// Creates the pool with one surface of `size` pixels.
    ///
    /// ### 中文
    /// 创建池，并分配一块 `size` 像素的 surface。
    pub fn new(
        allocator: Arc<dyn SurfaceAllocator>,
        size: PhysicalSize<u32>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            unit: BufferUnit::new(allocator, size)?,
        })
    }
}

impl SurfacePool for SingleBufferPool {
    fn acquire(&self) -> Option<UnitHandle> {
        self.unit.mark_in_use_unchecked();
        Some(UnitHandle(0))
    }

    fn release(&self, _unit: UnitHandle) {}

    fn release_presented(&self, _unit: UnitHandle) {}

    fn prepare(&self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        self.unit.reset(size)
    }

    fn unit(&self, _handle: UnitHandle) -> &BufferUnit {
        &self.unit
    }

    fn exclusive_claims(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::CountingAllocator;

    fn single_pool() -> SingleBufferPool {
        SingleBufferPool::new(
            Arc::new(CountingAllocator::default()),
            PhysicalSize::new(100, 100),
        )
        .unwrap()
    }

    #[test]
    fn acquire_never_returns_none() {
        let pool = single_pool();
        for _ in 0..10 {
            let handle = pool.acquire().unwrap();
            assert_eq!(handle, UnitHandle(0));
        }
    }

    #[test]
    fn release_is_a_no_op() {
        let pool = single_pool();
        let handle = pool.acquire().unwrap();
        pool.release(handle);
        assert!(pool.unit(handle).is_in_use());
        pool.release_presented(handle);
        assert!(pool.unit(handle).is_in_use());
    }

    #[test]
    fn prepare_resizes_the_sole_unit() {
        let pool = single_pool();
        pool.prepare(PhysicalSize::new(320, 240)).unwrap();
        assert_eq!(pool.unit(UnitHandle(0)).size(), PhysicalSize::new(320, 240));
    }
}
