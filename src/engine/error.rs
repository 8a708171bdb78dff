//! ### English
//! Error taxonomy for surface allocation and resizing.
//!
//! Pool exhaustion is deliberately *not* an error: `acquire` returns `None`
//! and the producer drops the frame (backpressure). Nothing in the frame path
//! ever propagates an error to the embedding application.
//!
//! ### 中文
//! surface 分配与 resize 的错误类型。
//!
//! 缓冲池耗尽刻意*不*作为错误：`acquire` 返回 `None`，生产者丢弃该帧
//! （背压处理）。帧路径上的任何失败都不会向宿主应用层传播错误。

use thiserror::Error;

/// ### English
/// Errors surfaced by the fallible entry points (`reset`/`prepare`/`resize`
/// and surface allocation).
///
/// ### 中文
/// 可失败入口（`reset`/`prepare`/`resize` 以及 surface 分配）返回的错误。
#[derive(Debug, Error)]
pub enum EngineError {
    /// ### English
    /// A surface dimension was zero. The previous surface, if any, is kept.
    ///
    /// ### 中文
    /// surface 尺寸为 0。若已有旧 surface 则保持不变。
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// ### English
    /// The backing allocator failed to create a pixel surface.
    ///
    /// ### 中文
    /// 后端分配器创建像素 surface 失败。
    #[error("surface allocation failed: {reason}")]
    SurfaceAllocation { reason: String },
}
