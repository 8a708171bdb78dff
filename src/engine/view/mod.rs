//! ### English
//! The `WebView` renderer-owning object: owns the buffer pool and frame
//! relay, wires the engine's render callbacks to them, registers the
//! compositor texture, and forwards page events to the embedder.
//!
//! ### 中文
//! 持有渲染器的 `WebView` 对象：拥有缓冲池与帧中转，把引擎的渲染回调
//! 接到它们上面，注册合成器纹理，并把页面事件转发给宿主。

mod web_engine;

pub use web_engine::{RenderHooks, WebEngine};

use std::sync::Arc;

use crossbeam_channel as channel;
use dpi::PhysicalSize;
use url::Url;

use super::buffer::{BufferPool, SingleBufferPool, SurfacePool};
use super::config::ViewConfig;
use super::error::EngineError;
use super::events::PageEvent;
use super::relay::FrameRelay;
use super::surface::SurfaceAllocator;
use super::texture::{TextureId, TextureRegistry};

/// ### English
/// One embedded web view rendered into a compositor texture.
///
/// ### 中文
/// 渲染到合成器纹理中的一个内嵌 web view。
pub struct WebView {
    /// ### English
    /// The external web engine driving this view.
    ///
    /// ### 中文
    /// 驱动该 view 的外部 web 引擎。
    engine: Box<dyn WebEngine>,
    /// ### English
    /// Frame relay shared with the engine hooks and the compositor pull.
    ///
    /// ### 中文
    /// 与引擎钩子及合成器拉取共享的帧中转。
    relay: Arc<FrameRelay>,
    /// ### English
    /// Host compositor interface (used again to unregister on dispose).
    ///
    /// ### 中文
    /// 宿主合成器接口（销毁时再次用于注销）。
    registry: Arc<dyn TextureRegistry>,
    /// ### English
    /// Texture this view draws into.
    ///
    /// ### 中文
    /// 该 view 绘制到的纹理。
    texture: TextureId,
    /// ### English
    /// Current view size.
    ///
    /// ### 中文
    /// 当前 view 尺寸。
    size: PhysicalSize<u32>,
    /// ### English
    /// Receiving side of the page-event relay (cloned out to the embedder).
    ///
    /// ### 中文
    /// 页面事件转发的接收端（克隆后交给宿主）。
    events: channel::Receiver<PageEvent>,
    /// ### English
    /// Guard making `dispose` idempotent.
    ///
    /// ### 中文
    /// 使 `dispose` 幂等的防重入标记。
    disposed: bool,
}

impl std::fmt::Debug for WebView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebView")
            .field("texture", &self.texture)
            .field("size", &self.size)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl WebView {
    /// ### English
    /// Creates a view: builds the pool (single-buffer when the config flags
    /// request the software backend), registers the compositor texture whose
    /// pull callback is the relay's obtain path, and installs the render
    /// hooks and page observer into the engine.
    ///
    /// #### Parameters
    /// - `registry`: Host compositor registration interface.
    /// - `allocator`: Surface allocator for the pool units.
    /// - `engine`: The external web engine collaborator.
    /// - `config`: Initial size, pool size and flags.
    ///
    /// ### 中文
    /// 创建 view：构建缓冲池（配置标志要求软件后端时用单缓冲池），注册
    /// 合成器纹理（其拉取回调即中转的 obtain 路径），并向引擎安装渲染
    /// 钩子与页面 observer。
    ///
    /// #### 参数
    /// - `registry`：宿主合成器注册接口。
    /// - `allocator`：池 unit 的 surface 分配器。
    /// - `engine`：外部 web 引擎协作对象。
    /// - `config`：初始尺寸、池大小与标志。
    pub fn new(
        registry: Arc<dyn TextureRegistry>,
        allocator: Arc<dyn SurfaceAllocator>,
        mut engine: Box<dyn WebEngine>,
        config: ViewConfig,
    ) -> Result<Self, EngineError> {
        let size = config.initial_size;
        if size.width == 0 || size.height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }

        let pool: Arc<dyn SurfacePool> = if config.wants_single_buffer() {
            Arc::new(SingleBufferPool::new(allocator, size)?)
        } else {
            Arc::new(BufferPool::new(allocator, size, config.pool_size)?)
        };
        let relay = FrameRelay::new(pool, registry.clone());

        let pull_relay = relay.clone();
        let texture =
            registry.register_texture(Box::new(move |requested| {
                pull_relay.obtain_gpu_surface(requested)
            }));
        relay.bind_texture(texture);

        let (event_tx, events) = channel::unbounded();
        engine.install_page_observer(Box::new(move |event| {
            let _ = event_tx.send(event);
        }));

        let prepare_relay = relay.clone();
        let commit_relay = relay.clone();
        engine.install_render_hooks(RenderHooks {
            prepare_image: Box::new(move || prepare_relay.prepare_image()),
            frame_rendered: Box::new(move |is_rendered| {
                if is_rendered {
                    commit_relay.commit_frame();
                }
            }),
        });
        engine.resize(size);

        Ok(Self {
            engine,
            relay,
            registry,
            texture,
            size,
            events,
            disposed: false,
        })
    }

    /// ### English
    /// The compositor texture this view draws into.
    ///
    /// ### 中文
    /// 该 view 绘制到的合成器纹理。
    pub fn texture_id(&self) -> TextureId {
        self.texture
    }

    /// ### English
    /// Current view size.
    ///
    /// ### 中文
    /// 当前 view 尺寸。
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// ### English
    /// A receiver for the page lifecycle events relayed from the engine.
    ///
    /// ### 中文
    /// 引擎转发页面生命周期事件的接收端。
    pub fn events(&self) -> channel::Receiver<PageEvent> {
        self.events.clone()
    }

    /// ### English
    /// Begins loading `url` in the engine.
    ///
    /// ### 中文
    /// 让引擎开始加载 `url`。
    pub fn load_url(&mut self, url: &Url) {
        self.engine.load_url(url);
    }

    /// ### English
    /// Resizes the view: relay slots are cleared, every pool unit is resized,
    /// then the engine viewport follows.
    ///
    /// #### Parameters
    /// - `size`: New size; zero in either axis is rejected with no effect.
    ///
    /// ### 中文
    /// 调整 view 尺寸：先清空中转槽位并调整池内所有 unit，再调整引擎
    /// 视口。
    ///
    /// #### 参数
    /// - `size`：新尺寸；任一维度为 0 都会被拒绝且无任何副作用。
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        self.relay.resize(size)?;
        self.engine.resize(size);
        self.size = size;
        Ok(())
    }

    /// ### English
    /// Tears the view down: render hooks and observer are removed first so
    /// the engine stops producing, then the texture is unregistered and the
    /// relay slots are returned to the pool. Idempotent.
    ///
    /// ### 中文
    /// 销毁 view：先移除渲染钩子与 observer 使引擎停止产帧，再注销纹理
    /// 并把中转槽位归还给池。幂等。
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.engine.remove_render_hooks();
        self.engine.remove_page_observer();
        self.registry.unregister_texture(self.texture);
        self.relay.clear();
    }
}

impl Drop for WebView {
    fn drop(&mut self) {
        self.dispose();
    }
}
