//! ### English
//! Fixed pool of GPU-compatible buffer units shared between the renderer
//! thread (producer) and the compositor thread (consumer).
//!
//! A unit is claimed with a compare-and-set on its `in_use` flag and returned
//! either by the relay (slot superseded) or by the compositor's descriptor
//! release. Claim scans never block; exhaustion is reported as `None` and the
//! producer drops the frame.
//!
//! ### 中文
//! 渲染线程（生产者）与合成器线程（消费者）共享的固定大小 GPU 兼容
//! 缓冲池。
//!
//! unit 通过对其 `in_use` 标志做 CAS 来占用，并由中转逻辑（槽位被取代）
//! 或合成器的 descriptor release 归还。占用扫描从不阻塞；池耗尽以 `None`
//! 表示，生产者丢弃该帧。

mod pool;
mod single;
mod unit;

pub use pool::BufferPool;
pub use single::SingleBufferPool;
pub use unit::BufferUnit;

use dpi::PhysicalSize;

use super::error::EngineError;

/// ### English
/// Default pool size for multi-buffered rendering.
///
/// ### 中文
/// 多缓冲渲染的默认池大小。
pub const DEFAULT_POOL_SIZE: usize = 5;

/// ### English
/// Stable index of one unit inside its pool. Handles are plain values; they
/// cross callback boundaries instead of pointers into pool memory.
///
/// ### 中文
/// unit 在其池内的稳定下标。句柄是纯值；跨回调边界传递的是它而不是指向
/// 池内存的指针。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnitHandle(pub(crate) usize);

/// ### English
/// Pool contract shared by the round-robin pool and the degenerate
/// single-buffer pool.
///
/// All methods are non-blocking; `release` is the relay's supersede path while
/// `release_presented` is the compositor's descriptor-release path (the two
/// are deliberately decoupled).
///
/// ### 中文
/// 轮询池与退化单缓冲池共用的池契约。
///
/// 所有方法均不阻塞；`release` 是中转逻辑的“槽位被取代”路径，
/// `release_presented` 是合成器 descriptor release 路径（两者刻意解耦）。
pub trait SurfacePool: Send + Sync {
    /// ### English
    /// Claims the next available unit, or `None` when every unit is in use.
    ///
    /// ### 中文
    /// 占用下一个可用 unit；所有 unit 都被占用时返回 `None`。
    fn acquire(&self) -> Option<UnitHandle>;

    /// ### English
    /// Returns a unit claimed by the relay (slot superseded or cleared).
    ///
    /// ### 中文
    /// 归还中转逻辑占用的 unit（槽位被取代或清空）。
    fn release(&self, unit: UnitHandle);

    /// ### English
    /// Returns a unit the compositor has finished reading (descriptor path).
    ///
    /// ### 中文
    /// 归还合成器读取完成的 unit（descriptor 路径）。
    fn release_presented(&self, unit: UnitHandle);

    /// ### English
    /// Resizes every unit to `size`. Serialized with frame production by the
    /// caller (the relay clears its slots first).
    ///
    /// ### 中文
    /// 将所有 unit 调整为 `size`。由调用方保证与帧生产串行（中转逻辑会
    /// 先清空槽位）。
    fn prepare(&self, size: PhysicalSize<u32>) -> Result<(), EngineError>;

    /// ### English
    /// Accesses the unit behind `handle`.
    ///
    /// ### 中文
    /// 访问 `handle` 对应的 unit。
    fn unit(&self, handle: UnitHandle) -> &BufferUnit;

    /// ### English
    /// Whether `acquire` hands out exclusively-claimed units. The
    /// single-buffer pool returns `false`: its sole unit aliases across roles
    /// by design, and role-distinctness is not enforced for it.
    ///
    /// ### 中文
    /// `acquire` 是否分发独占占用的 unit。单缓冲池返回 `false`：其唯一的
    /// unit 按设计在各角色间复用，不对其强制角色互斥。
    fn exclusive_claims(&self) -> bool;
}
