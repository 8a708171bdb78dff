//! ### English
//! Test doubles shared by the unit tests: a counting allocator, a recording
//! texture registry, and scripted engine/decoder collaborators.
//!
//! ### 中文
//! 各单元测试共用的测试替身：计数分配器、记录调用的纹理注册表，以及
//! 脚本化的引擎/解码器协作对象。

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use dpi::PhysicalSize;
use parking_lot::Mutex;
use url::Url;

use super::error::EngineError;
use super::events::{PageEvent, PlaybackEvent};
use super::player::VideoDecoder;
use super::surface::software::SoftwareSurfaceAllocator;
use super::surface::{GpuSurfaceDescriptor, PixelSurface, SurfaceAllocator, SurfaceImage};
use super::texture::{SurfacePullFn, TextureId, TextureRegistry};
use super::view::{RenderHooks, WebEngine};

/// ### English
/// Software allocator that counts how many surfaces it created.
///
/// ### 中文
/// 统计已创建 surface 数量的软件分配器。
#[derive(Default)]
pub(crate) struct CountingAllocator {
    inner: SoftwareSurfaceAllocator,
    count: AtomicUsize,
}

impl CountingAllocator {
    pub(crate) fn allocations(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl SurfaceAllocator for CountingAllocator {
    fn allocate(&self, size: PhysicalSize<u32>) -> Result<Box<dyn PixelSurface>, EngineError> {
        let surface = self.inner.allocate(size)?;
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(surface)
    }
}

/// ### English
/// Texture registry that stores pull callbacks and records every
/// `mark_frame_available` / `unregister_texture` call.
///
/// ### 中文
/// 保存拉取回调并记录每次 `mark_frame_available` / `unregister_texture`
/// 调用的纹理注册表。
#[derive(Default)]
pub(crate) struct FakeTextureRegistry {
    next_id: AtomicI64,
    pulls: Mutex<Vec<(TextureId, Box<SurfacePullFn>)>>,
    marks: Mutex<Vec<TextureId>>,
    unregistered: Mutex<Vec<TextureId>>,
}

impl FakeTextureRegistry {
    /// ### English
    /// Invokes the stored pull callback for `texture`, as the compositor would.
    ///
    /// ### 中文
    /// 像合成器那样调用 `texture` 对应的拉取回调。
    pub(crate) fn pull(
        &self,
        texture: TextureId,
        size: PhysicalSize<u32>,
    ) -> Option<GpuSurfaceDescriptor> {
        let pulls = self.pulls.lock();
        let (_, pull) = pulls.iter().find(|(id, _)| *id == texture)?;
        pull(size)
    }

    pub(crate) fn mark_count(&self, texture: TextureId) -> usize {
        self.marks.lock().iter().filter(|id| **id == texture).count()
    }

    pub(crate) fn is_unregistered(&self, texture: TextureId) -> bool {
        self.unregistered.lock().contains(&texture)
    }
}

impl TextureRegistry for FakeTextureRegistry {
    fn register_texture(&self, pull: Box<SurfacePullFn>) -> TextureId {
        let id = TextureId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.pulls.lock().push((id, pull));
        id
    }

    fn mark_frame_available(&self, texture: TextureId) {
        self.marks.lock().push(texture);
    }

    fn unregister_texture(&self, texture: TextureId) {
        self.pulls.lock().retain(|(id, _)| *id != texture);
        self.unregistered.lock().push(texture);
    }
}

/// ### English
/// State shared between a `ScriptedWebEngine` handed to a view and the test
/// that drives it.
///
/// ### 中文
/// 在交给 view 的 `ScriptedWebEngine` 与驱动它的测试之间共享的状态。
#[derive(Default)]
pub(crate) struct ScriptedEngineState {
    hooks: Mutex<Option<RenderHooks>>,
    observer: Mutex<Option<Box<dyn FnMut(PageEvent) + Send>>>,
    size: Mutex<Option<PhysicalSize<u32>>>,
    loaded: Mutex<Vec<Url>>,
}

impl ScriptedEngineState {
    /// ### English
    /// Simulates one engine render: prepare, paint, flush. Returns whether a
    /// frame was actually produced.
    ///
    /// ### 中文
    /// 模拟一次引擎渲染：prepare、绘制、flush。返回是否真的产出了帧。
    pub(crate) fn render_frame(&self) -> bool {
        let mut hooks = self.hooks.lock();
        let Some(hooks) = hooks.as_mut() else {
            return false;
        };
        let rendered = (hooks.prepare_image)().is_some();
        (hooks.frame_rendered)(rendered);
        rendered
    }

    /// ### English
    /// Emits a page event through the installed observer.
    ///
    /// ### 中文
    /// 通过已安装的 observer 发出页面事件。
    pub(crate) fn emit(&self, event: PageEvent) {
        if let Some(observer) = self.observer.lock().as_mut() {
            observer(event);
        }
    }

    pub(crate) fn has_hooks(&self) -> bool {
        self.hooks.lock().is_some()
    }

    pub(crate) fn has_observer(&self) -> bool {
        self.observer.lock().is_some()
    }

    pub(crate) fn size(&self) -> Option<PhysicalSize<u32>> {
        *self.size.lock()
    }

    pub(crate) fn loaded_urls(&self) -> Vec<Url> {
        self.loaded.lock().clone()
    }
}

/// ### English
/// `WebEngine` double driven from tests via its shared state.
///
/// ### 中文
/// 通过共享状态从测试侧驱动的 `WebEngine` 替身。
pub(crate) struct ScriptedWebEngine {
    state: Arc<ScriptedEngineState>,
}

impl ScriptedWebEngine {
    pub(crate) fn new() -> (Self, Arc<ScriptedEngineState>) {
        let state = Arc::new(ScriptedEngineState::default());
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl WebEngine for ScriptedWebEngine {
    fn install_render_hooks(&mut self, hooks: RenderHooks) {
        *self.state.hooks.lock() = Some(hooks);
    }

    fn remove_render_hooks(&mut self) {
        *self.state.hooks.lock() = None;
    }

    fn install_page_observer(&mut self, observer: Box<dyn FnMut(PageEvent) + Send>) {
        *self.state.observer.lock() = Some(observer);
    }

    fn remove_page_observer(&mut self) {
        *self.state.observer.lock() = None;
    }

    fn load_url(&mut self, url: &Url) {
        self.state.loaded.lock().push(url.clone());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        *self.state.size.lock() = Some(size);
    }
}

/// ### English
/// State shared between a `ScriptedDecoder` handed to a player and the test
/// that drives it.
///
/// ### 中文
/// 在交给 player 的 `ScriptedDecoder` 与驱动它的测试之间共享的状态。
#[derive(Default)]
pub(crate) struct ScriptedDecoderState {
    sink: Mutex<Option<Box<dyn FnMut(SurfaceImage) + Send>>>,
    observer: Mutex<Option<Box<dyn FnMut(PlaybackEvent) + Send>>>,
    playing: Mutex<Option<bool>>,
}

impl ScriptedDecoderState {
    /// ### English
    /// Delivers one decoded frame through the installed sink. Returns whether
    /// a sink was installed.
    ///
    /// ### 中文
    /// 通过已安装的 sink 交付一帧解码帧。返回 sink 是否已安装。
    pub(crate) fn deliver_frame(&self, frame: SurfaceImage) -> bool {
        let mut sink = self.sink.lock();
        match sink.as_mut() {
            Some(sink) => {
                sink(frame);
                true
            }
            None => false,
        }
    }

    /// ### English
    /// Emits a playback event through the installed observer.
    ///
    /// ### 中文
    /// 通过已安装的 observer 发出播放事件。
    pub(crate) fn emit(&self, event: PlaybackEvent) {
        if let Some(observer) = self.observer.lock().as_mut() {
            observer(event);
        }
    }

    pub(crate) fn has_sink(&self) -> bool {
        self.sink.lock().is_some()
    }

    pub(crate) fn playing(&self) -> Option<bool> {
        *self.playing.lock()
    }
}

/// ### English
/// `VideoDecoder` double driven from tests via its shared state.
///
/// ### 中文
/// 通过共享状态从测试侧驱动的 `VideoDecoder` 替身。
pub(crate) struct ScriptedDecoder {
    state: Arc<ScriptedDecoderState>,
}

impl ScriptedDecoder {
    pub(crate) fn new() -> (Self, Arc<ScriptedDecoderState>) {
        let state = Arc::new(ScriptedDecoderState::default());
        (
            Self {
                state: state.clone(),
            },
            state,
        )
    }
}

impl VideoDecoder for ScriptedDecoder {
    fn install_frame_sink(&mut self, sink: Box<dyn FnMut(SurfaceImage) + Send>) {
        *self.state.sink.lock() = Some(sink);
    }

    fn remove_frame_sink(&mut self) {
        *self.state.sink.lock() = None;
    }

    fn install_playback_observer(&mut self, observer: Box<dyn FnMut(PlaybackEvent) + Send>) {
        *self.state.observer.lock() = Some(observer);
    }

    fn remove_playback_observer(&mut self) {
        *self.state.observer.lock() = None;
    }

    fn play(&mut self) {
        *self.state.playing.lock() = Some(true);
    }

    fn pause(&mut self) {
        *self.state.playing.lock() = Some(false);
    }
}
