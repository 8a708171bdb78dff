//! ### English
//! Round-robin buffer pool for multi-buffered backends.
//!
//! ### 中文
//! 多缓冲后端使用的轮询缓冲池。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dpi::PhysicalSize;

use super::{BufferUnit, SurfacePool, UnitHandle};
use crate::engine::error::EngineError;
use crate::engine::surface::SurfaceAllocator;

/// ### English
/// Fixed-size pool handing out units round-robin with a claim CAS per unit.
///
/// The scan takes no lock: the cursor is a relaxed atomic hint and the claim
/// itself is the per-unit CAS, so `acquire`/`release` can be called from the
/// relay's critical section without ever blocking.
///
/// ### 中文
/// 固定大小的池，按轮询顺序分发 unit，每个 unit 以 CAS 占用。
///
/// 扫描不加锁：游标只是 relaxed 原子提示，真正的占用由每 unit 的 CAS
/// 完成，因此 `acquire`/`release` 可以在中转逻辑的临界区内调用而不会阻塞。
pub struct BufferPool {
    /// ### English
    /// Unit storage; the vector length is fixed for the pool's lifetime and
    /// indices are stable (`UnitHandle`).
    ///
    /// ### 中文
    /// unit 存储；向量长度在池的生命周期内固定，下标稳定（`UnitHandle`）。
    units: Vec<BufferUnit>,
    /// ### English
    /// Round-robin cursor: index of the unit handed out last.
    ///
    /// ### 中文
    /// 轮询游标：最近一次分发的 unit 下标。
    last_index: AtomicUsize,
}

impl BufferPool {
    /// ### English
    /// Creates a pool of `pool_size` units (clamped to at least 1), each with
    /// a surface of `size` pixels.
    ///
    /// #### Parameters
    /// - `allocator`: Allocator shared by every unit.
    /// - `size`: Initial surface size.
    /// - `pool_size`: Unit count; fixed for the pool's lifetime.
    ///
    /// ### 中文
    /// 创建包含 `pool_size` 个 unit 的池（至少 1 个），每个 unit 分配
    /// 一块 `size` 像素的 surface。
    ///
    /// #### 参数
    /// - `allocator`：所有 unit 共享的分配器。
    /// - `size`：初始 surface 尺寸。
    /// - `pool_size`：unit 数量；在池的生命周期内固定。
    pub fn new(
        allocator: Arc<dyn SurfaceAllocator>,
        size: PhysicalSize<u32>,
        pool_size: usize,
    ) -> Result<Self, EngineError> {
        let pool_size = pool_size.max(1);
        let mut units = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            units.push(BufferUnit::new(allocator.clone(), size)?);
        }
        Ok(Self {
            units,
            last_index: AtomicUsize::new(0),
        })
    }

    /// ### English
    /// Number of units in the pool.
    ///
    /// ### 中文
    /// 池内 unit 数量。
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// ### English
    /// Whether the pool is empty (never true; pools hold at least one unit).
    ///
    /// ### 中文
    /// 池是否为空（不会为真；池至少持有一个 unit）。
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl SurfacePool for BufferPool {
    fn acquire(&self) -> Option<UnitHandle> {
        let len = self.units.len();
        let start = (self.last_index.load(Ordering::Relaxed) + 1) % len;
        for offset in 0..len {
            let index = (start + offset) % len;
            if self.units[index].mark_in_use() {
                self.last_index.store(index, Ordering::Relaxed);
                return Some(UnitHandle(index));
            }
        }
        None
    }

    fn release(&self, unit: UnitHandle) {
        self.units[unit.0].unmark_in_use();
    }

    fn release_presented(&self, unit: UnitHandle) {
        self.units[unit.0].unmark_in_use();
    }

    fn prepare(&self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        for unit in &self.units {
            unit.reset(size)?;
        }
        Ok(())
    }

    fn unit(&self, handle: UnitHandle) -> &BufferUnit {
        &self.units[handle.0]
    }

    fn exclusive_claims(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::CountingAllocator;

    fn pool_of(pool_size: usize) -> (BufferPool, Arc<CountingAllocator>) {
        let allocator = Arc::new(CountingAllocator::default());
        let pool =
            BufferPool::new(allocator.clone(), PhysicalSize::new(100, 100), pool_size).unwrap();
        (pool, allocator)
    }

    #[test]
    fn hands_out_units_round_robin() {
        let (pool, _) = pool_of(3);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        let c = pool.acquire().unwrap();
        assert_eq!([a.0, b.0, c.0], [1, 2, 0]);
    }

    #[test]
    fn exhaustion_returns_none_then_recovers_after_release() {
        let (pool, _) = pool_of(5);
        let handles: Vec<_> = (0..5).map(|_| pool.acquire().unwrap()).collect();
        assert!(pool.acquire().is_none());

        pool.release(handles[2]);
        let again = pool.acquire().unwrap();
        assert_eq!(again, handles[2]);
    }

    #[test]
    fn release_paths_both_clear_the_claim() {
        let (pool, _) = pool_of(2);
        let a = pool.acquire().unwrap();
        let b = pool.acquire().unwrap();
        pool.release(a);
        pool.release_presented(b);
        assert!(!pool.unit(a).is_in_use());
        assert!(!pool.unit(b).is_in_use());
    }

    #[test]
    fn prepare_resizes_every_unit_exactly_once() {
        let (pool, allocator) = pool_of(5);
        assert_eq!(allocator.allocations(), 5);

        pool.prepare(PhysicalSize::new(640, 480)).unwrap();
        assert_eq!(allocator.allocations(), 10);

        // Same size again: idempotent per unit.
        pool.prepare(PhysicalSize::new(640, 480)).unwrap();
        assert_eq!(allocator.allocations(), 10);
    }

    #[test]
    fn prepare_rejects_zero_dimensions_without_touching_units() {
        let (pool, allocator) = pool_of(3);
        let err = pool.prepare(PhysicalSize::new(100, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));
        assert_eq!(allocator.allocations(), 3);
        for index in 0..3 {
            assert_eq!(pool.unit(UnitHandle(index)).size(), PhysicalSize::new(100, 100));
        }
    }

    #[test]
    fn pool_size_zero_is_clamped_to_one() {
        let (pool, _) = pool_of(0);
        assert_eq!(pool.len(), 1);
        assert!(pool.acquire().is_some());
    }
}
