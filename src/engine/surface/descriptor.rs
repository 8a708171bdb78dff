//! ### English
//! Compositor-facing surface descriptor and its release path.
//!
//! The release context is a `Weak` relay reference plus a stable unit index,
//! never a raw pointer, so a descriptor outliving its view degrades to a
//! no-op release instead of a dangling access.
//!
//! ### 中文
//! 面向合成器的 surface descriptor 及其释放路径。
//!
//! 释放上下文是 `Weak` 中转引用加稳定的 unit 下标，而非裸指针，因此
//! descriptor 比 view 活得更久时，release 退化为 no-op 而不是悬垂访问。

use std::sync::Weak;

use super::SurfaceImage;
use crate::engine::buffer::UnitHandle;
use crate::engine::relay::FrameRelay;

/// ### English
/// Release context embedded in a descriptor: which unit to give back when the
/// compositor finishes reading, routed through the relay so a unit still
/// occupying a slot is never returned early.
///
/// ### 中文
/// 内嵌于 descriptor 的释放上下文：合成器读取完成后要归还哪个 unit；
/// 经由中转路由，确保仍占据槽位的 unit 不会被提前归还。
#[derive(Clone)]
pub(crate) struct FrameRelease {
    /// ### English
    /// Relay that presented the unit.
    ///
    /// ### 中文
    /// 呈现该 unit 的中转。
    relay: Weak<FrameRelay>,
    /// ### English
    /// Stable index of the presented unit.
    ///
    /// ### 中文
    /// 被呈现 unit 的稳定下标。
    unit: UnitHandle,
}

impl FrameRelease {
    pub(crate) fn new(relay: Weak<FrameRelay>, unit: UnitHandle) -> Self {
        Self { relay, unit }
    }
}

/// ### English
/// Descriptor returned to the host compositor from a frame pull: the image to
/// present plus the release hook the compositor invokes when it has finished
/// reading the surface.
///
/// ### 中文
/// 帧拉取返回给宿主合成器的 descriptor：要呈现的图像，以及合成器读取
/// 完成后调用的释放钩子。
#[derive(Clone)]
pub struct GpuSurfaceDescriptor {
    /// ### English
    /// The image to present.
    ///
    /// ### 中文
    /// 要呈现的图像。
    pub image: SurfaceImage,
    /// ### English
    /// Release context (relay + unit).
    ///
    /// ### 中文
    /// 释放上下文（中转 + unit）。
    release: FrameRelease,
}

impl GpuSurfaceDescriptor {
    pub(crate) fn new(image: SurfaceImage, release: FrameRelease) -> Self {
        Self { image, release }
    }

    /// ### English
    /// Signals that the compositor has finished reading this surface.
    ///
    /// Safe to call more than once and safe on descriptors that outlive their
    /// view; a unit still presented by the relay is returned later, when it is
    /// superseded.
    ///
    /// ### 中文
    /// 表示合成器已完成对该 surface 的读取。
    ///
    /// 可重复调用；descriptor 比 view 活得更久时调用也是安全的。仍被中转
    /// 呈现的 unit 会在被取代时再归还。
    pub fn release(&self) {
        if let Some(relay) = self.release.relay.upgrade() {
            relay.release_presented(self.release.unit);
        }
    }
}

impl std::fmt::Debug for GpuSurfaceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GpuSurfaceDescriptor")
            .field("image", &self.image)
            .finish()
    }
}
