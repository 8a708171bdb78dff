//! ### English
//! Pixel-surface abstraction: opaque GPU-compatible buffers, their allocator
//! seam, and the compositor-facing descriptor.
//!
//! ### 中文
//! 像素 surface 抽象：不透明的 GPU 兼容缓冲、其分配器接口，以及面向
//! 合成器的 descriptor。

mod descriptor;
pub mod gl;
pub mod software;

pub use descriptor::GpuSurfaceDescriptor;
pub(crate) use descriptor::FrameRelease;

use dpi::PhysicalSize;

use super::error::EngineError;

/// ### English
/// Bytes per pixel of the fixed surface format (32-bit ARGB).
///
/// ### 中文
/// 固定 surface 格式（32 位 ARGB）的每像素字节数。
pub const BYTES_PER_PIXEL: u32 = 4;

/// ### English
/// Opaque handle to a pixel surface, as understood by the renderer and the
/// host compositor (a GL texture name, a DMA buffer handle, a mapped address).
///
/// `0` never denotes a valid surface.
///
/// ### 中文
/// 像素 surface 的不透明句柄，渲染器与宿主合成器据此识别 surface
/// （GL 纹理名、DMA 缓冲句柄、映射地址等）。
///
/// `0` 永远不是有效 surface。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// ### English
/// One frame-sized pixel image: the handle plus the geometry needed to read
/// or write it. Used as the renderer's paint target, as the payload of an
/// adopted renderer-owned frame, and inside the compositor descriptor.
///
/// ### 中文
/// 一幅帧尺寸的像素图像：句柄加上读写所需的几何信息。用作渲染器的绘制
/// 目标、渲染器自有帧的采纳载荷，以及合成器 descriptor 的内容。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceImage {
    /// ### English
    /// Opaque surface handle.
    ///
    /// ### 中文
    /// 不透明 surface 句柄。
    pub handle: SurfaceHandle,
    /// ### English
    /// Image size in pixels.
    ///
    /// ### 中文
    /// 图像尺寸（像素）。
    pub size: PhysicalSize<u32>,
    /// ### English
    /// Row stride in bytes.
    ///
    /// ### 中文
    /// 行跨距（字节）。
    pub stride: u32,
}

/// ### English
/// One allocated pixel surface. Implementations release the native resource
/// on drop.
///
/// ### 中文
/// 一个已分配的像素 surface。实现需在 drop 时释放原生资源。
pub trait PixelSurface: Send {
    /// ### English
    /// Surface size in pixels.
    ///
    /// ### 中文
    /// surface 尺寸（像素）。
    fn size(&self) -> PhysicalSize<u32>;

    /// ### English
    /// Row stride in bytes.
    ///
    /// ### 中文
    /// 行跨距（字节）。
    fn stride(&self) -> u32;

    /// ### English
    /// Opaque handle for the renderer / compositor.
    ///
    /// ### 中文
    /// 供渲染器/合成器使用的不透明句柄。
    fn handle(&self) -> SurfaceHandle;

    /// ### English
    /// The surface as a `SurfaceImage` (handle + geometry).
    ///
    /// ### 中文
    /// 以 `SurfaceImage`（句柄 + 几何信息）表示该 surface。
    fn image(&self) -> SurfaceImage {
        SurfaceImage {
            handle: self.handle(),
            size: self.size(),
            stride: self.stride(),
        }
    }
}

/// ### English
/// Allocator seam for pixel surfaces. One allocator is shared by all units of
/// a pool; implementations must be callable from the thread that resizes the
/// view.
///
/// ### 中文
/// 像素 surface 的分配器接口。一个分配器由池内所有 unit 共享；实现必须
/// 可在执行 view resize 的线程上调用。
pub trait SurfaceAllocator: Send + Sync {
    /// ### English
    /// Allocates a surface of `size` pixels.
    ///
    /// #### Parameters
    /// - `size`: Requested size; both axes are guaranteed non-zero by callers.
    ///
    /// ### 中文
    /// 分配一个 `size` 像素的 surface。
    ///
    /// #### 参数
    /// - `size`：请求尺寸；调用方保证两个维度均非 0。
    fn allocate(&self, size: PhysicalSize<u32>) -> Result<Box<dyn PixelSurface>, EngineError>;
}
