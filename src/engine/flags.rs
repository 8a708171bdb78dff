//! ### English
//! Bitflags controlling optional view behaviors.
//!
//! These are carried in `ViewConfig::flags` as a `u32` bitmask supplied by the
//! embedder at view construction.
//!
//! ### 中文
//! 控制 view 可选行为的位标志（bitflags）。
//!
//! 由宿主在创建 view 时通过 `ViewConfig::flags` 以 `u32` 位掩码传入。

/// ### English
/// The host platform only supports software rendering (e.g., an emulator).
///
/// Views created with this flag use a single-buffer pool and accept
/// overwrite-while-reading instead of multi-buffering.
///
/// ### 中文
/// 宿主平台仅支持软件渲染（例如模拟器）。
///
/// 带该标志创建的 view 使用单缓冲池，以“读时可被覆盖”换取兼容性，
/// 不做多缓冲。
pub const VIEW_FLAG_SOFTWARE_BACKEND: u32 = 1 << 0;

/// ### English
/// Force a single-buffer pool even on hardware backends.
///
/// Intended for single-surface view configurations where the renderer and the
/// compositor already share one synchronized surface.
///
/// ### 中文
/// 即使在硬件后端也强制使用单缓冲池。
///
/// 适用于渲染器与合成器已共享单个同步 surface 的单 surface view 配置。
pub const VIEW_FLAG_SINGLE_BUFFER: u32 = 1 << 1;

/// ### English
/// Returns whether `flags` selects the degenerate single-buffer pool.
///
/// ### 中文
/// 返回 `flags` 是否选择退化的单缓冲池。
#[inline]
pub(crate) fn wants_single_buffer(flags: u32) -> bool {
    flags & (VIEW_FLAG_SOFTWARE_BACKEND | VIEW_FLAG_SINGLE_BUFFER) != 0
}
