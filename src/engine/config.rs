//! ### English
//! Per-view configuration supplied by the embedder at construction.
//!
//! ### 中文
//! 宿主在创建 view 时提供的配置。

use dpi::PhysicalSize;

use super::buffer::DEFAULT_POOL_SIZE;
use super::flags;

/// ### English
/// Construction parameters for a `WebView` or `VideoPlayer`.
///
/// ### 中文
/// `WebView` / `VideoPlayer` 的构造参数。
#[derive(Clone, Copy, Debug)]
pub struct ViewConfig {
    /// ### English
    /// Initial view size in physical pixels (must be non-zero in both axes).
    ///
    /// ### 中文
    /// view 的初始尺寸（物理像素，两个维度都必须非 0）。
    pub initial_size: PhysicalSize<u32>,
    /// ### English
    /// Buffer pool size for multi-buffered backends (clamped to at least 1).
    ///
    /// ### 中文
    /// 多缓冲后端的缓冲池大小（至少为 1）。
    pub pool_size: usize,
    /// ### English
    /// Behavior flags (`engine::flags` bitmask).
    ///
    /// ### 中文
    /// 行为标志（`engine::flags` 位掩码）。
    pub flags: u32,
}

impl ViewConfig {
    /// ### English
    /// Creates a config with the default pool size and no flags.
    ///
    /// ### 中文
    /// 创建使用默认池大小且无标志的配置。
    pub fn new(initial_size: PhysicalSize<u32>) -> Self {
        Self {
            initial_size,
            pool_size: DEFAULT_POOL_SIZE,
            flags: 0,
        }
    }

    /// ### English
    /// Returns a copy with the given flags set.
    ///
    /// ### 中文
    /// 返回设置了给定标志的副本。
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags |= flags;
        self
    }

    /// ### English
    /// Returns a copy with the given pool size.
    ///
    /// ### 中文
    /// 返回使用给定池大小的副本。
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// ### English
    /// Returns whether the flags select the single-buffer pool.
    ///
    /// ### 中文
    /// 返回标志是否选择单缓冲池。
    pub(crate) fn wants_single_buffer(&self) -> bool {
        flags::wants_single_buffer(self.flags)
    }
}
