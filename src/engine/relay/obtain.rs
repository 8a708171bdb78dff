//! ### English
//! Compositor-side pull operation of `FrameRelay`.
//!
//! ### 中文
//! `FrameRelay` 的合成器侧拉取操作。

use dpi::PhysicalSize;

use crate::engine::surface::GpuSurfaceDescriptor;

use super::FrameRelay;

impl FrameRelay {
    /// ### English
    /// Returns the frame to present for this pull.
    ///
    /// With no pending `candidate`, the previously `rendered` frame is
    /// re-presented (repeat pulls are stable); before the first frame there
    /// is nothing to draw and `None` is returned, which is expected during
    /// startup and not an error. Otherwise the superseded `rendered` unit
    /// returns to the pool and `candidate` is promoted.
    ///
    /// #### Parameters
    /// - `requested`: Size the compositor wants to draw at (informational).
    ///
    /// ### 中文
    /// 返回本次拉取要呈现的帧。
    ///
    /// 没有待处理的 `candidate` 时，重新呈现上一次的 `rendered` 帧
    /// （重复拉取是稳定的）；第一帧之前无可绘制内容，返回 `None`，这是
    /// 启动期的正常情况，不是错误。否则被取代的 `rendered` unit 归还给
    /// 池，并提升 `candidate`。
    ///
    /// #### 参数
    /// - `requested`：合成器希望绘制的尺寸（仅供参考）。
    pub fn obtain_gpu_surface(
        &self,
        _requested: PhysicalSize<u32>,
    ) -> Option<GpuSurfaceDescriptor> {
        let mut slots = self.slots.lock();
        if slots.candidate.is_none() {
            let rendered = slots.rendered?;
            let image = self.pool.unit(rendered).presented_image()?;
            return Some(GpuSurfaceDescriptor::new(image, self.frame_release(rendered)));
        }

        if let Some(superseded) = slots.rendered.take() {
            if self.pool.unit(superseded).is_in_use() {
                self.pool.release(superseded);
            }
        }
        slots.rendered = slots.candidate.take();
        self.assert_roles_distinct(&slots);

        let rendered = slots.rendered?;
        let image = self.pool.unit(rendered).presented_image()?;
        Some(GpuSurfaceDescriptor::new(image, self.frame_release(rendered)))
    }
}
