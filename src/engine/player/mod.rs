//! ### English
//! The `VideoPlayer` renderer-owning object: adopts decoder-owned frames into
//! the pool, registers the compositor texture, and forwards playback events.
//!
//! Unlike the web view's paint-into-our-surface pattern, the decoder hands
//! over surfaces it owns; each is adopted by a pool unit before promotion.
//!
//! ### 中文
//! 持有渲染器的 `VideoPlayer` 对象：把解码器自有的帧采纳进缓冲池，注册
//! 合成器纹理，并转发播放事件。
//!
//! 与 web view“绘制到我们 surface”的模式不同，解码器交付其自有的
//! surface；每帧在提升前先由池 unit 采纳。

mod decoder;

pub use decoder::VideoDecoder;

use std::sync::Arc;

use crossbeam_channel as channel;
use dpi::PhysicalSize;

use super::buffer::{BufferPool, SingleBufferPool, SurfacePool};
use super::config::ViewConfig;
use super::error::EngineError;
use super::events::PlaybackEvent;
use super::relay::FrameRelay;
use super::surface::SurfaceAllocator;
use super::texture::{TextureId, TextureRegistry};

/// ### English
/// One video player rendered into a compositor texture.
///
/// ### 中文
/// 渲染到合成器纹理中的一个视频播放器。
pub struct VideoPlayer {
    /// ### English
    /// The external decoder driving this player.
    ///
    /// ### 中文
    /// 驱动该 player 的外部解码器。
    decoder: Box<dyn VideoDecoder>,
    /// ### English
    /// Frame relay shared with the decoder sink and the compositor pull.
    ///
    /// ### 中文
    /// 与解码器 sink 及合成器拉取共享的帧中转。
    relay: Arc<FrameRelay>,
    /// ### English
    /// Host compositor interface (used again to unregister on dispose).
    ///
    /// ### 中文
    /// 宿主合成器接口（销毁时再次用于注销）。
    registry: Arc<dyn TextureRegistry>,
    /// ### English
    /// Texture this player draws into.
    ///
    /// ### 中文
    /// 该 player 绘制到的纹理。
    texture: TextureId,
    /// ### English
    /// Receiving side of the playback-event relay.
    ///
    /// ### 中文
    /// 播放事件转发的接收端。
    events: channel::Receiver<PlaybackEvent>,
    /// ### English
    /// Guard making `dispose` idempotent.
    ///
    /// ### 中文
    /// 使 `dispose` 幂等的防重入标记。
    disposed: bool,
}

impl VideoPlayer {
    /// ### English
    /// Creates a player: builds the pool, registers the compositor texture,
    /// and installs the frame sink and playback observer into the decoder.
    ///
    /// #### Parameters
    /// - `registry`: Host compositor registration interface.
    /// - `allocator`: Surface allocator for the pool units.
    /// - `decoder`: The external decoder collaborator.
    /// - `config`: Initial size, pool size and flags.
    ///
    /// ### 中文
    /// 创建 player：构建缓冲池、注册合成器纹理，并向解码器安装帧 sink
    /// 与播放 observer。
    ///
    /// #### 参数
    /// - `registry`：宿主合成器注册接口。
    /// - `allocator`：池 unit 的 surface 分配器。
    /// - `decoder`：外部解码器协作对象。
    /// - `config`：初始尺寸、池大小与标志。
    pub fn new(
        registry: Arc<dyn TextureRegistry>,
        allocator: Arc<dyn SurfaceAllocator>,
        mut decoder: Box<dyn VideoDecoder>,
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
        decoder.install_playback_observer(Box::new(move |event| {
            let _ = event_tx.send(event);
        }));

        let sink_relay = relay.clone();
        decoder.install_frame_sink(Box::new(move |frame| {
            sink_relay.submit_external_frame(frame);
        }));

        Ok(Self {
            decoder,
            relay,
            registry,
            texture,
            events,
            disposed: false,
        })
    }

    /// ### English
    /// The compositor texture this player draws into.
    ///
    /// ### 中文
    /// 该 player 绘制到的合成器纹理。
    pub fn texture_id(&self) -> TextureId {
        self.texture
    }

    /// ### English
    /// A receiver for the playback events relayed from the decoder.
    ///
    /// ### 中文
    /// 解码器转发播放事件的接收端。
    pub fn events(&self) -> channel::Receiver<PlaybackEvent> {
        self.events.clone()
    }

    /// ### English
    /// Starts or resumes playback.
    ///
    /// ### 中文
    /// 开始或恢复播放。
    pub fn play(&mut self) {
        self.decoder.play();
    }

    /// ### English
    /// Pauses playback.
    ///
    /// ### 中文
    /// 暂停播放。
    pub fn pause(&mut self) {
        self.decoder.pause();
    }

    /// ### English
    /// Resizes the pool units backing this player's texture.
    ///
    /// #### Parameters
    /// - `size`: New size; zero in either axis is rejected with no effect.
    ///
    /// ### 中文
    /// 调整支撑该 player 纹理的池 unit 尺寸。
    ///
    /// #### 参数
    /// - `size`：新尺寸；任一维度为 0 都会被拒绝且无任何副作用。
    pub fn resize(&mut self, size: PhysicalSize<u32>) -> Result<(), EngineError> {
        self.relay.resize(size)
    }

    /// ### English
    /// Tears the player down: the frame sink and observer are removed first
    /// so the decoder stops producing, then the texture is unregistered and
    /// the relay slots are returned to the pool. Idempotent.
    ///
    /// ### 中文
    /// 销毁 player：先移除帧 sink 与 observer 使解码器停止产帧，再注销
    /// 纹理并把中转槽位归还给池。幂等。
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.decoder.remove_frame_sink();
        self.decoder.remove_playback_observer();
        self.registry.unregister_texture(self.texture);
        self.relay.clear();
    }
}

impl Drop for VideoPlayer {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::surface::{SurfaceHandle, SurfaceImage};
    use crate::engine::testing::{CountingAllocator, FakeTextureRegistry, ScriptedDecoder};

    fn decoded_frame(handle: u64) -> SurfaceImage {
        SurfaceImage {
            handle: SurfaceHandle(handle),
            size: PhysicalSize::new(100, 100),
            stride: 400,
        }
    }

    fn new_player() -> (
        VideoPlayer,
        Arc<FakeTextureRegistry>,
        Arc<crate::engine::testing::ScriptedDecoderState>,
    ) {
        let registry = Arc::new(FakeTextureRegistry::default());
        let (decoder, state) = ScriptedDecoder::new();
        let player = VideoPlayer::new(
            registry.clone(),
            Arc::new(CountingAllocator::default()),
            Box::new(decoder),
            ViewConfig::new(PhysicalSize::new(100, 100)),
        )
        .unwrap();
        (player, registry, state)
    }

    #[test]
    fn decoded_frames_reach_the_compositor() {
        let (player, registry, state) = new_player();

        assert!(state.deliver_frame(decoded_frame(0xa)));
        assert_eq!(registry.mark_count(player.texture_id()), 1);

        let descriptor = registry
            .pull(player.texture_id(), PhysicalSize::new(100, 100))
            .unwrap();
        assert_eq!(descriptor.image.handle, SurfaceHandle(0xa));
    }

    #[test]
    fn latest_decoded_frame_wins() {
        let (player, registry, state) = new_player();

        assert!(state.deliver_frame(decoded_frame(0xa)));
        assert!(state.deliver_frame(decoded_frame(0xb)));

        let descriptor = registry
            .pull(player.texture_id(), PhysicalSize::new(100, 100))
            .unwrap();
        assert_eq!(descriptor.image.handle, SurfaceHandle(0xb));
    }

    #[test]
    fn playback_events_are_relayed() {
        let (player, _registry, state) = new_player();
        let events = player.events();

        state.emit(PlaybackEvent::Prepared {
            duration_ms: 60_000,
            width: 1920,
            height: 1080,
        });
        state.emit(PlaybackEvent::Completed);

        assert_eq!(
            events.try_recv().unwrap(),
            PlaybackEvent::Prepared {
                duration_ms: 60_000,
                width: 1920,
                height: 1080,
            }
        );
        assert_eq!(events.try_recv().unwrap(), PlaybackEvent::Completed);
    }

    #[test]
    fn play_and_pause_pass_through() {
        let (mut player, _registry, state) = new_player();
        player.play();
        assert_eq!(state.playing(), Some(true));
        player.pause();
        assert_eq!(state.playing(), Some(false));
    }

    #[test]
    fn dispose_stops_the_decoder_before_unregistering() {
        let (mut player, registry, state) = new_player();
        let texture = player.texture_id();

        player.dispose();
        assert!(!state.has_sink());
        assert!(registry.is_unregistered(texture));
        assert!(!state.deliver_frame(decoded_frame(0xc)));

        player.dispose();
    }
}
