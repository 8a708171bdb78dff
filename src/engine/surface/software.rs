//! ### English
//! Heap-backed ARGB surfaces for software rendering (emulators) and tests.
//!
//! The surface handle is the buffer's base address; it is only meaningful
//! inside the current process.
//!
//! ### 中文
//! 基于堆内存的 ARGB surface，用于软件渲染（模拟器）与测试。
//!
//! surface 句柄为缓冲区基地址，仅在当前进程内有意义。

use dpi::PhysicalSize;

use super::{BYTES_PER_PIXEL, PixelSurface, SurfaceAllocator, SurfaceHandle};
use crate::engine::error::EngineError;

/// ### English
/// One heap-allocated ARGB pixel buffer.
///
/// ### 中文
/// 一块堆分配的 ARGB 像素缓冲。
pub struct SoftwareSurface {
    /// ### English
    /// Surface size in pixels.
    ///
    /// ### 中文
    /// surface 尺寸（像素）。
    size: PhysicalSize<u32>,
    /// ### English
    /// Pixel storage (`stride * height` bytes, zero-initialized).
    ///
    /// ### 中文
    /// 像素存储（`stride * height` 字节，零初始化）。
    data: Box<[u8]>,
}

impl SoftwareSurface {
    /// ### English
    /// Allocates a zeroed surface of `size` pixels.
    ///
    /// ### 中文
    /// 分配一个 `size` 像素、内容清零的 surface。
    pub fn new(size: PhysicalSize<u32>) -> Result<Self, EngineError> {
        let stride = size.width.checked_mul(BYTES_PER_PIXEL).ok_or_else(|| {
            EngineError::SurfaceAllocation {
                reason: format!("stride overflow for width {}", size.width),
            }
        })?;
        let bytes = (stride as usize).checked_mul(size.height as usize).ok_or_else(|| {
            EngineError::SurfaceAllocation {
                reason: format!("byte size overflow for {}x{}", size.width, size.height),
            }
        })?;
        Ok(Self {
            size,
            data: vec![0u8; bytes].into_boxed_slice(),
        })
    }

    /// ### English
    /// Read access to the pixel bytes (for embedders that upload manually).
    ///
    /// ### 中文
    /// 像素字节的只读访问（供手动上传的宿主使用）。
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl PixelSurface for SoftwareSurface {
    fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn stride(&self) -> u32 {
        self.size.width * BYTES_PER_PIXEL
    }

    fn handle(&self) -> SurfaceHandle {
        SurfaceHandle(self.data.as_ptr() as u64)
    }
}

/// ### English
/// Allocator producing `SoftwareSurface`s.
///
/// ### 中文
/// 产出 `SoftwareSurface` 的分配器。
#[derive(Clone, Copy, Debug, Default)]
pub struct SoftwareSurfaceAllocator;

impl SurfaceAllocator for SoftwareSurfaceAllocator {
    fn allocate(&self, size: PhysicalSize<u32>) -> Result<Box<dyn PixelSurface>, EngineError> {
        Ok(Box::new(SoftwareSurface::new(size)?))
    }
}
