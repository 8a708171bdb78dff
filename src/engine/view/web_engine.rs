//! ### English
//! Seam to the external web engine collaborator.
//!
//! The engine runs its own render thread; the hooks installed here are
//! invoked from that thread, never from the platform or compositor threads.
//!
//! ### 中文
//! 与外部 web 引擎协作对象的接口。
//!
//! 引擎运行在自己的渲染线程上；这里安装的钩子从该线程调用，绝不会来自
//! 平台线程或合成器线程。

use dpi::PhysicalSize;
use url::Url;

use crate::engine::events::PageEvent;
use crate::engine::surface::SurfaceImage;

/// ### English
/// Render hook pair installed into the engine.
///
/// Before painting a frame the engine calls `prepare_image` and paints into
/// the returned image; a `None` return means "skip this frame" (pool
/// backpressure). After flushing it calls `frame_rendered` with whether the
/// paint actually happened.
///
/// ### 中文
/// 安装进引擎的一对渲染钩子。
///
/// 引擎在绘制一帧前调用 `prepare_image` 并绘制到返回的图像中；返回
/// `None` 表示“跳过这一帧”（池背压）。flush 之后引擎调用
/// `frame_rendered`，参数指明绘制是否真的发生。
pub struct RenderHooks {
    /// ### English
    /// Returns the paint target for the next frame, or `None` to skip it.
    ///
    /// ### 中文
    /// 返回下一帧的绘制目标；返回 `None` 则跳过该帧。
    pub prepare_image: Box<dyn FnMut() -> Option<SurfaceImage> + Send>,
    /// ### English
    /// Called after flush; `true` when a frame was painted.
    ///
    /// ### 中文
    /// flush 后调用；绘制了帧时为 `true`。
    pub frame_rendered: Box<dyn FnMut(bool) + Send>,
}

/// ### English
/// External web engine contract consumed by `WebView`.
///
/// All methods are called from the platform thread that owns the view.
///
/// ### 中文
/// `WebView` 消费的外部 web 引擎契约。
///
/// 所有方法都从持有该 view 的平台线程调用。
pub trait WebEngine: Send {
    /// ### English
    /// Installs the render hook pair; replaces any previous pair.
    ///
    /// ### 中文
    /// 安装渲染钩子对；替换之前安装的钩子。
    fn install_render_hooks(&mut self, hooks: RenderHooks);

    /// ### English
    /// Removes the render hooks. After this returns, the engine must no
    /// longer invoke them.
    ///
    /// ### 中文
    /// 移除渲染钩子。返回后引擎不得再调用它们。
    fn remove_render_hooks(&mut self);

    /// ### English
    /// Installs the page lifecycle observer; replaces any previous one.
    ///
    /// ### 中文
    /// 安装页面生命周期 observer；替换之前安装的 observer。
    fn install_page_observer(&mut self, observer: Box<dyn FnMut(PageEvent) + Send>);

    /// ### English
    /// Removes the page observer.
    ///
    /// ### 中文
    /// 移除页面 observer。
    fn remove_page_observer(&mut self);

    /// ### English
    /// Begins loading `url`.
    ///
    /// ### 中文
    /// 开始加载 `url`。
    fn load_url(&mut self, url: &Url);

    /// ### English
    /// Resizes the engine's viewport.
    ///
    /// ### 中文
    /// 调整引擎视口尺寸。
    fn resize(&mut self, size: PhysicalSize<u32>);
}
