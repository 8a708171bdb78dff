//! ### English
//! Lifecycle events relayed from the native renderers to the embedder.
//!
//! Each view/player owns one unbounded channel; the enums here are the relay
//! payload only, and how the embedder encodes them onward is not this crate's
//! concern.
//!
//! ### 中文
//! 从原生渲染器转发给宿主的生命周期事件。
//!
//! 每个 view/player 持有一条无界 channel；这里的枚举仅是转发载荷，
//! 宿主如何进一步编码不属于本 crate 的职责。

/// ### English
/// Severity of a console message emitted by the web engine.
///
/// ### 中文
/// web 引擎输出的 console 消息级别。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warning,
    Error,
}

/// ### English
/// Page lifecycle events produced by a `WebView`'s engine.
///
/// ### 中文
/// `WebView` 引擎产生的页面生命周期事件。
#[derive(Clone, Debug, PartialEq)]
pub enum PageEvent {
    /// ### English
    /// A main-frame load began.
    ///
    /// ### 中文
    /// 主框架开始加载。
    LoadStarted { url: String },
    /// ### English
    /// The main-frame load finished.
    ///
    /// ### 中文
    /// 主框架加载完成。
    LoadFinished { url: String },
    /// ### English
    /// Load progress changed (`0.0..=1.0`).
    ///
    /// ### 中文
    /// 加载进度变化（`0.0..=1.0`）。
    Progress { progress: f64 },
    /// ### English
    /// A resource load failed.
    ///
    /// ### 中文
    /// 资源加载失败。
    LoadError {
        code: i32,
        description: String,
        url: String,
    },
    /// ### English
    /// The visible URL changed.
    ///
    /// ### 中文
    /// 当前 URL 发生变化。
    UrlChanged { url: String },
    /// ### English
    /// The page wrote a console message.
    ///
    /// ### 中文
    /// 页面输出了一条 console 消息。
    ConsoleMessage {
        level: ConsoleLevel,
        message: String,
    },
}

/// ### English
/// Playback events produced by a `VideoPlayer`'s decoder.
///
/// ### 中文
/// `VideoPlayer` 解码器产生的播放事件。
#[derive(Clone, Debug, PartialEq)]
pub enum PlaybackEvent {
    /// ### English
    /// The media is prepared: duration and intrinsic frame size are known.
    ///
    /// ### 中文
    /// 媒体已就绪：时长与固有帧尺寸已知。
    Prepared {
        duration_ms: u64,
        width: u32,
        height: u32,
    },
    /// ### English
    /// Buffering began (playback may stall).
    ///
    /// ### 中文
    /// 开始缓冲（播放可能停顿）。
    BufferingStart,
    /// ### English
    /// Buffering progress changed (`0..=100`).
    ///
    /// ### 中文
    /// 缓冲进度变化（`0..=100`）。
    BufferingUpdate { percent: u8 },
    /// ### English
    /// Buffering ended.
    ///
    /// ### 中文
    /// 缓冲结束。
    BufferingEnd,
    /// ### English
    /// Playback reached the end of the media.
    ///
    /// ### 中文
    /// 播放到达媒体末尾。
    Completed,
}
