//! ### English
//! Host-compositor texture registration seam.
//!
//! The compositor pulls frames on its own schedule: the closure handed to
//! `register_texture` is invoked by the compositor thread whenever it wants
//! to draw, and must never block for an unbounded time.
//!
//! ### 中文
//! 宿主合成器的纹理注册接口。
//!
//! 合成器按自身节奏拉取帧：传给 `register_texture` 的闭包会在合成器线程
//! 想要绘制时被调用，且不得无限期阻塞。

use dpi::PhysicalSize;

use super::surface::GpuSurfaceDescriptor;

/// ### English
/// Identifier assigned by the host compositor to a registered texture.
///
/// ### 中文
/// 宿主合成器为已注册纹理分配的标识符。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub i64);

/// ### English
/// Compositor pull callback: receives the requested draw size (informational)
/// and returns the descriptor of the frame to present, or `None` when no
/// frame has been produced yet.
///
/// ### 中文
/// 合成器拉取回调：收到请求绘制的尺寸（仅供参考），返回要呈现帧的
/// descriptor；尚未产出任何帧时返回 `None`。
pub type SurfacePullFn = dyn Fn(PhysicalSize<u32>) -> Option<GpuSurfaceDescriptor> + Send + Sync;

/// ### English
/// Host-compositor registration contract.
///
/// Implemented by the embedder; all methods may be called from the platform
/// thread while the pull callback runs on the compositor thread.
///
/// ### 中文
/// 宿主合成器注册契约。
///
/// 由宿主实现；各方法可在平台线程调用，而拉取回调运行在合成器线程。
pub trait TextureRegistry: Send + Sync {
    /// ### English
    /// Registers a pull callback and returns the new texture's ID.
    ///
    /// ### 中文
    /// 注册拉取回调并返回新纹理的 ID。
    fn register_texture(&self, pull: Box<SurfacePullFn>) -> TextureId;

    /// ### English
    /// Notifies the compositor that a new frame is available for `texture`.
    ///
    /// ### 中文
    /// 通知合成器纹理 `texture` 有新帧可用。
    fn mark_frame_available(&self, texture: TextureId);

    /// ### English
    /// Unregisters `texture`. The pull callback will not be invoked afterwards
    /// and implementations must drop it here (it keeps the view's frame state
    /// alive while stored).
    ///
    /// ### 中文
    /// 注销纹理 `texture`。此后拉取回调不会再被调用，实现必须在此将其
    /// 丢弃（回调在被保存期间会使 view 的帧状态保持存活）。
    fn unregister_texture(&self, texture: TextureId);
}
