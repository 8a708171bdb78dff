//! ### English
//! Resize path of `FrameRelay`.
//!
//! ### 中文
//! `FrameRelay` 的 resize 路径。

use dpi::PhysicalSize;

use crate::engine::error::EngineError;

use super::FrameRelay;

impl FrameRelay {
    /// ### English
    /// Resizes every pool unit to `size`.
    ///
    /// All three slots are released back to the pool first, so the claim
    /// ledger stays balanced and `prepare` only touches unclaimed units;
    /// in-flight frame content is discarded. The caller serializes this with
    /// frame production (the engine is resized on the same control path).
    ///
    /// #### Parameters
    /// - `size`: New size; zero in either axis is rejected with no effect.
    ///
    /// ### 中文
    /// 将池内所有 unit 调整为 `size`。
    ///
    /// 先把三个槽位全部归还给池，使占用账目保持平衡、`prepare` 只接触
    /// 未被占用的 unit；进行中的帧内容被丢弃。调用方保证本操作与帧生产
    /// 串行（引擎在同一控制路径上被 resize）。
    ///
    /// #### 参数
    /// - `size`：新尺寸；任一维度为 0 都会被拒绝且无任何副作用。
    pub fn resize(&self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        self.clear();
        self.pool.prepare(size)
    }
}
