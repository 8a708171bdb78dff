//! ### English
//! Producer-side operations of `FrameRelay`, called from the renderer's own
//! thread.
//!
//! Two production patterns exist in the wild and both are supported: engines
//! that paint into a surface we hand them (`prepare_image` + `commit_frame`)
//! and engines that deliver a surface they own (`submit_external_frame`).
//! Either way the unit holds a single authoritative image before promotion.
//!
//! ### 中文
//! `FrameRelay` 的生产者侧操作，在渲染器自己的线程上调用。
//!
//! 现实中存在两种产帧模式，二者都支持：引擎绘制到我们提供的 surface
//! （`prepare_image` + `commit_frame`），或引擎交付其自有 surface
//! （`submit_external_frame`）。无论哪种，提升前 unit 都持有唯一的权威
//! 图像。

use crate::engine::surface::SurfaceImage;

use super::FrameRelay;

impl FrameRelay {
    /// ### English
    /// Claims (or reuses) the `working` unit and returns the image the engine
    /// should paint into.
    ///
    /// `None` means the pool is exhausted: the engine must skip this frame.
    /// That is the designed backpressure path, never a fatal condition.
    ///
    /// ### 中文
    /// 占用（或复用）`working` unit，并返回引擎应绘制到的图像。
    ///
    /// 返回 `None` 表示池已耗尽：引擎必须跳过这一帧。这是设计内的背压
    /// 路径，绝非致命错误。
    pub fn prepare_image(&self) -> Option<SurfaceImage> {
        let mut slots = self.slots.lock();
        if slots.working.is_none() {
            slots.working = self.pool.acquire();
        }
        let Some(working) = slots.working else {
            tracing::debug!("buffer pool exhausted, skipping frame");
            return None;
        };
        self.pool.unit(working).paint_target()
    }

    /// ### English
    /// Promotes the finished `working` frame to `candidate` and signals the
    /// compositor.
    ///
    /// A still-unpulled previous candidate returns to the pool: only the
    /// latest frame is retained. Called with no `working` in flight (the
    /// engine flushed without preparing), this is a no-op.
    ///
    /// ### 中文
    /// 将完成的 `working` 帧提升为 `candidate` 并通知合成器。
    ///
    /// 尚未被拉取的旧 candidate 归还给池：只保留最新的帧。若当前没有
    /// `working`（引擎未 prepare 就 flush），则为 no-op。
    pub fn commit_frame(&self) {
        {
            let mut slots = self.slots.lock();
            let Some(working) = slots.working.take() else {
                return;
            };
            if let Some(superseded) = slots.candidate.replace(working) {
                self.pool.release(superseded);
                tracing::debug!("unpulled frame superseded");
            }
            self.assert_roles_distinct(&slots);
        }
        self.notify_frame_available();
    }

    /// ### English
    /// Accepts a renderer-owned frame: claims a unit if needed, adopts the
    /// handle, promotes it to `candidate`, and signals the compositor.
    ///
    /// On pool exhaustion the frame is dropped (logged, not an error).
    ///
    /// #### Parameters
    /// - `frame`: The renderer-owned image to present.
    ///
    /// ### 中文
    /// 接收渲染器自有的帧：按需占用 unit、采纳句柄、提升为 `candidate`
    /// 并通知合成器。
    ///
    /// 池耗尽时丢弃该帧（仅记录日志，不是错误）。
    ///
    /// #### 参数
    /// - `frame`：要呈现的渲染器自有图像。
    pub fn submit_external_frame(&self, frame: SurfaceImage) {
        {
            let mut slots = self.slots.lock();
            if slots.working.is_none() {
                slots.working = self.pool.acquire();
            }
            let Some(working) = slots.working.take() else {
                tracing::debug!("buffer pool exhausted, dropping renderer-owned frame");
                return;
            };
            self.pool.unit(working).adopt_external(frame);
            if let Some(superseded) = slots.candidate.replace(working) {
                self.pool.release(superseded);
                tracing::debug!("unpulled frame superseded");
            }
            self.assert_roles_distinct(&slots);
        }
        self.notify_frame_available();
    }
}
