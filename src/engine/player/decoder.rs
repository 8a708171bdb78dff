//! ### English
//! Seam to the external video decoder collaborator.
//!
//! The decoder delivers decoded frames on its own thread; the sink installed
//! here is invoked from that thread.
//!
//! ### 中文
//! 与外部视频解码器协作对象的接口。
//!
//! 解码器在自己的线程上交付解码帧；这里安装的 sink 从该线程调用。

use crate::engine::events::PlaybackEvent;
use crate::engine::surface::SurfaceImage;

/// ### English
/// External video decoder contract consumed by `VideoPlayer`.
///
/// The decoder owns the surfaces it delivers; a delivered frame stays valid
/// until the decoder reuses it, which the single retained-frame policy of the
/// relay bounds to the most recent two frames.
///
/// ### 中文
/// `VideoPlayer` 消费的外部视频解码器契约。
///
/// 解码器拥有其交付的 surface；交付的帧在被解码器复用前保持有效，而
/// 中转的“只保留最新帧”策略将留存帧限定在最近两帧以内。
pub trait VideoDecoder: Send {
    /// ### English
    /// Installs the decoded-frame sink; replaces any previous sink.
    ///
    /// ### 中文
    /// 安装解码帧 sink；替换之前安装的 sink。
    fn install_frame_sink(&mut self, sink: Box<dyn FnMut(SurfaceImage) + Send>);

    /// ### English
    /// Removes the frame sink. After this returns, the decoder must no longer
    /// invoke it.
    ///
    /// ### 中文
    /// 移除帧 sink。返回后解码器不得再调用它。
    fn remove_frame_sink(&mut self);

    /// ### English
    /// Installs the playback observer; replaces any previous one.
    ///
    /// ### 中文
    /// 安装播放 observer；替换之前安装的 observer。
    fn install_playback_observer(&mut self, observer: Box<dyn FnMut(PlaybackEvent) + Send>);

    /// ### English
    /// Removes the playback observer.
    ///
    /// ### 中文
    /// 移除播放 observer。
    fn remove_playback_observer(&mut self);

    /// ### English
    /// Starts or resumes playback.
    ///
    /// ### 中文
    /// 开始或恢复播放。
    fn play(&mut self);

    /// ### English
    /// Pauses playback.
    ///
    /// ### 中文
    /// 暂停播放。
    fn pause(&mut self);
}
