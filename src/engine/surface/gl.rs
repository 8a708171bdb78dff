//! ### English
//! GL-texture surfaces for hardware backends.
//!
//! Allocation, and therefore `Drop`, must happen on the thread that owns the
//! GL context; the embedder guarantees this by resizing and disposing views
//! from that thread.
//!
//! ### 中文
//! 硬件后端使用的 GL 纹理 surface。
//!
//! 分配（以及 `Drop`）必须发生在持有 GL 上下文的线程上；宿主通过在该
//! 线程上执行 view 的 resize 与销毁来保证这一点。

use std::sync::Arc;

use dpi::PhysicalSize;
use glow::HasContext as _;

use super::{BYTES_PER_PIXEL, PixelSurface, SurfaceAllocator, SurfaceHandle};
use crate::engine::error::EngineError;

/// ### English
/// One GL color texture usable as an external compositor texture.
///
/// ### 中文
/// 一张可作为外部合成器纹理使用的 GL 颜色纹理。
pub struct GlTextureSurface {
    /// ### English
    /// GL API the texture was created with (used again on drop).
    ///
    /// ### 中文
    /// 创建该纹理所用的 GL API（drop 时再次使用）。
    gl: Arc<glow::Context>,
    /// ### English
    /// The color texture.
    ///
    /// ### 中文
    /// 颜色纹理。
    texture: glow::NativeTexture,
    /// ### English
    /// Allocated texture size (pixels).
    ///
    /// ### 中文
    /// 纹理分配尺寸（像素）。
    size: PhysicalSize<u32>,
}

impl GlTextureSurface {
    /// ### English
    /// Creates a linear-filtered RGBA texture of `size` pixels with
    /// uninitialized contents.
    ///
    /// #### Parameters
    /// - `gl`: GL API used to create the texture.
    /// - `size`: Texture size; both axes non-zero.
    ///
    /// ### 中文
    /// 创建一张 `size` 像素、线性过滤、内容未初始化的 RGBA 纹理。
    ///
    /// #### 参数
    /// - `gl`：用于创建纹理的 GL API。
    /// - `size`：纹理尺寸；两个维度均非 0。
    pub fn new(gl: Arc<glow::Context>, size: PhysicalSize<u32>) -> Result<Self, EngineError> {
        let texture = unsafe { gl.create_texture() }.map_err(|reason| {
            EngineError::SurfaceAllocation { reason }
        })?;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                size.width as i32,
                size.height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(None),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        Ok(Self { gl, texture, size })
    }

    /// ### English
    /// The GL texture name.
    ///
    /// ### 中文
    /// GL 纹理名。
    pub fn texture(&self) -> glow::NativeTexture {
        self.texture
    }
}

impl PixelSurface for GlTextureSurface {
    fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn stride(&self) -> u32 {
        self.size.width * BYTES_PER_PIXEL
    }

    fn handle(&self) -> SurfaceHandle {
        SurfaceHandle(self.texture.0.get() as u64)
    }
}

impl Drop for GlTextureSurface {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.texture);
        }
    }
}

/// ### English
/// Allocator producing `GlTextureSurface`s from a shared GL context.
///
/// ### 中文
/// 基于共享 GL 上下文产出 `GlTextureSurface` 的分配器。
pub struct GlSurfaceAllocator {
    /// ### English
    /// Shared GL API.
    ///
    /// ### 中文
    /// 共享 GL API。
    gl: Arc<glow::Context>,
}

impl GlSurfaceAllocator {
    /// ### English
    /// Creates an allocator over `gl`.
    ///
    /// ### 中文
    /// 创建一个基于 `gl` 的分配器。
    pub fn new(gl: Arc<glow::Context>) -> Self {
        Self { gl }
    }
}

impl SurfaceAllocator for GlSurfaceAllocator {
    fn allocate(&self, size: PhysicalSize<u32>) -> Result<Box<dyn PixelSurface>, EngineError> {
        Ok(Box::new(GlTextureSurface::new(self.gl.clone(), size)?))
    }
}
