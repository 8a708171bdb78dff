//! ### English
//! One pooled buffer unit: an owned pixel surface, an optional adopted
//! renderer-owned frame, and the compare-and-set claim flag.
//!
//! ### 中文
//! 池内的单个缓冲 unit：自有像素 surface、可选的渲染器自有帧，以及
//! 通过 CAS 占用的标志位。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dpi::PhysicalSize;
use parking_lot::Mutex;

use crate::engine::cache::pad_after;
use crate::engine::error::EngineError;
use crate::engine::surface::{PixelSurface, SurfaceAllocator, SurfaceImage};

const CLAIM_PAD_BYTES: usize = pad_after::<AtomicBool>();

/// ### English
/// Claim flag padded to a cache line: the renderer thread CASes it while the
/// compositor thread clears it, and adjacent units must not false-share.
///
/// ### 中文
/// 填充到整个 cache line 的占用标志：渲染线程对其 CAS，合成器线程将其
/// 清零，相邻 unit 之间不应伪共享。
#[repr(C, align(64))]
struct ClaimFlag {
    in_use: AtomicBool,
    _pad: [u8; CLAIM_PAD_BYTES],
}

impl ClaimFlag {
    fn new() -> Self {
        Self {
            in_use: AtomicBool::new(false),
            _pad: [0; CLAIM_PAD_BYTES],
        }
    }
}

/// ### English
/// Surface state guarded by the unit's mutex (reset and adoption are rare and
/// serialized; the claim flag stays lock-free).
///
/// ### 中文
/// 由 unit 互斥锁保护的 surface 状态（reset 与采纳外部帧是低频且串行的；
/// 占用标志保持无锁）。
struct UnitSurface {
    /// ### English
    /// Current allocated size (pixels).
    ///
    /// ### 中文
    /// 当前分配尺寸（像素）。
    size: PhysicalSize<u32>,
    /// ### English
    /// Owned pixel surface; always present while the unit is reachable from
    /// its pool.
    ///
    /// ### 中文
    /// 自有像素 surface；unit 可从池访问期间始终存在。
    surface: Option<Box<dyn PixelSurface>>,
    /// ### English
    /// Adopted renderer-owned frame, overriding the owned surface when set.
    ///
    /// ### 中文
    /// 采纳的渲染器自有帧；存在时覆盖自有 surface。
    external: Option<SurfaceImage>,
}

/// ### English
/// One buffer unit of a pool.
///
/// ### 中文
/// 池中的一个缓冲 unit。
pub struct BufferUnit {
    claim: ClaimFlag,
    inner: Mutex<UnitSurface>,
    allocator: Arc<dyn SurfaceAllocator>,
}

impl BufferUnit {
    /// ### English
    /// Creates a unit with a freshly allocated surface of `size` pixels.
    ///
    /// #### Parameters
    /// - `allocator`: Allocator shared by the whole pool.
    /// - `size`: Initial surface size; zero in either axis is rejected.
    ///
    /// ### 中文
    /// 创建一个 unit，并分配一块 `size` 像素的新 surface。
    ///
    /// #### 参数
    /// - `allocator`：整池共享的分配器。
    /// - `size`：初始 surface 尺寸；任一维度为 0 都会被拒绝。
    pub(super) fn new(
        allocator: Arc<dyn SurfaceAllocator>,
        size: PhysicalSize<u32>,
    ) -> Result<Self, EngineError> {
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        let surface = allocator.allocate(size)?;
        Ok(Self {
            claim: ClaimFlag::new(),
            inner: Mutex::new(UnitSurface {
                size,
                surface: Some(surface),
                external: None,
            }),
            allocator,
        })
    }

    /// ### English
    /// Claims the unit: returns `true` and sets `in_use` only if it was free.
    /// This CAS is the sole primitive preventing a double claim.
    ///
    /// ### 中文
    /// 占用该 unit：仅当空闲时设置 `in_use` 并返回 `true`。
    /// 该 CAS 是防止重复占用的唯一原语。
    pub fn mark_in_use(&self) -> bool {
        self.claim
            .in_use
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    /// ### English
    /// Claims the unit unconditionally (single-buffer pools accept
    /// overwrite-while-reading and skip the CAS).
    ///
    /// ### 中文
    /// 无条件占用该 unit（单缓冲池接受“读时被覆盖”，跳过 CAS）。
    pub(super) fn mark_in_use_unchecked(&self) {
        self.claim.in_use.store(true, Ordering::Release);
    }

    /// ### English
    /// Clears the claim unconditionally.
    ///
    /// ### 中文
    /// 无条件清除占用标志。
    pub fn unmark_in_use(&self) {
        self.claim.in_use.store(false, Ordering::Release);
    }

    /// ### English
    /// Whether the unit is currently claimed.
    ///
    /// ### 中文
    /// 该 unit 当前是否被占用。
    pub fn is_in_use(&self) -> bool {
        self.claim.in_use.load(Ordering::Acquire)
    }

    /// ### English
    /// Resizes the owned surface.
    ///
    /// Idempotent: a call with the current size allocates nothing and keeps
    /// the existing surface. On failure the old surface is kept untouched.
    /// Any adopted frame is dropped on an actual resize.
    ///
    /// #### Parameters
    /// - `size`: New size; zero in either axis is rejected.
    ///
    /// ### 中文
    /// 调整自有 surface 的尺寸。
    ///
    /// 幂等：以当前尺寸调用不会分配任何内容并保留现有 surface。失败时
    /// 旧 surface 保持不变。实际发生 resize 时会丢弃已采纳的外部帧。
    ///
    /// #### 参数
    /// - `size`：新尺寸；任一维度为 0 都会被拒绝。
    pub fn reset(&self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }

        let mut inner = self.inner.lock();
        if inner.size == size && inner.surface.is_some() {
            return Ok(());
        }

        let surface = self.allocator.allocate(size)?;
        inner.surface = Some(surface);
        inner.size = size;
        inner.external = None;
        Ok(())
    }

    /// ### English
    /// Adopts a renderer-owned frame; the unit's authoritative image becomes
    /// `frame` until the next reset or adoption.
    ///
    /// ### 中文
    /// 采纳渲染器自有帧；在下一次 reset 或再次采纳之前，该 unit 的权威
    /// 图像即为 `frame`。
    pub fn adopt_external(&self, frame: SurfaceImage) {
        self.inner.lock().external = Some(frame);
    }

    /// ### English
    /// The image the renderer should paint into, or `None` when the unit is
    /// not claimed (a writable handle is never exposed for an unclaimed unit).
    ///
    /// ### 中文
    /// 渲染器应绘制到的图像；unit 未被占用时返回 `None`（绝不为未占用的
    /// unit 暴露可写句柄）。
    pub fn paint_target(&self) -> Option<SurfaceImage> {
        if !self.is_in_use() {
            return None;
        }
        self.inner.lock().surface.as_ref().map(|s| s.image())
    }

    /// ### English
    /// The image to hand to the compositor: the adopted frame when present,
    /// else the owned surface. `None` when the unit is not claimed.
    ///
    /// ### 中文
    /// 交给合成器的图像：存在已采纳帧时为该帧，否则为自有 surface。
    /// unit 未被占用时返回 `None`。
    pub fn presented_image(&self) -> Option<SurfaceImage> {
        if !self.is_in_use() {
            return None;
        }
        let inner = self.inner.lock();
        inner
            .external
            .or_else(|| inner.surface.as_ref().map(|s| s.image()))
    }

    /// ### English
    /// Current surface size.
    ///
    /// ### 中文
    /// 当前 surface 尺寸。
    pub fn size(&self) -> PhysicalSize<u32> {
        self.inner.lock().size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::CountingAllocator;

    fn unit_with_counter() -> (BufferUnit, Arc<CountingAllocator>) {
        let allocator = Arc::new(CountingAllocator::default());
        let unit = BufferUnit::new(allocator.clone(), PhysicalSize::new(100, 100)).unwrap();
        (unit, allocator)
    }

    #[test]
    fn mark_in_use_is_a_compare_and_set() {
        let (unit, _) = unit_with_counter();
        assert!(unit.mark_in_use());
        assert!(!unit.mark_in_use());
        unit.unmark_in_use();
        assert!(unit.mark_in_use());
    }

    #[test]
    fn unmark_is_unconditional() {
        let (unit, _) = unit_with_counter();
        unit.unmark_in_use();
        assert!(!unit.is_in_use());
        unit.unmark_in_use();
        assert!(!unit.is_in_use());
    }

    #[test]
    fn reset_with_same_size_allocates_nothing() {
        let (unit, allocator) = unit_with_counter();
        assert_eq!(allocator.allocations(), 1);
        unit.reset(PhysicalSize::new(100, 100)).unwrap();
        unit.reset(PhysicalSize::new(100, 100)).unwrap();
        assert_eq!(allocator.allocations(), 1);
    }

    #[test]
    fn reset_with_new_size_reallocates_once() {
        let (unit, allocator) = unit_with_counter();
        unit.reset(PhysicalSize::new(200, 150)).unwrap();
        assert_eq!(allocator.allocations(), 2);
        assert_eq!(unit.size(), PhysicalSize::new(200, 150));
    }

    #[test]
    fn reset_rejects_zero_dimensions_and_keeps_surface() {
        let (unit, allocator) = unit_with_counter();
        let err = unit.reset(PhysicalSize::new(0, 50)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDimensions { .. }));
        assert_eq!(allocator.allocations(), 1);
        assert_eq!(unit.size(), PhysicalSize::new(100, 100));
    }

    #[test]
    fn paint_target_requires_a_claim() {
        let (unit, _) = unit_with_counter();
        assert!(unit.paint_target().is_none());
        assert!(unit.mark_in_use());
        let target = unit.paint_target().unwrap();
        assert_eq!(target.size, PhysicalSize::new(100, 100));
        assert_ne!(target.handle.0, 0);
    }

    #[test]
    fn adopted_frame_overrides_owned_surface() {
        let (unit, _) = unit_with_counter();
        assert!(unit.mark_in_use());
        let owned = unit.presented_image().unwrap();

        let external = SurfaceImage {
            handle: crate::engine::surface::SurfaceHandle(0xdead_beef),
            size: PhysicalSize::new(100, 100),
            stride: 400,
        };
        unit.adopt_external(external);
        assert_eq!(unit.presented_image().unwrap(), external);
        assert_ne!(unit.presented_image().unwrap(), owned);
    }

    #[test]
    fn resize_drops_the_adopted_frame() {
        let (unit, _) = unit_with_counter();
        assert!(unit.mark_in_use());
        unit.adopt_external(SurfaceImage {
            handle: crate::engine::surface::SurfaceHandle(7),
            size: PhysicalSize::new(100, 100),
            stride: 400,
        });
        unit.reset(PhysicalSize::new(300, 200)).unwrap();
        let presented = unit.presented_image().unwrap();
        assert_eq!(presented.size, PhysicalSize::new(300, 200));
        assert_ne!(presented.handle.0, 7);
    }
}
