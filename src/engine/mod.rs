/// ### English
/// Engine internal modules (surfaces, buffer pool, frame relay, and the
/// renderer-owning view/player objects).
///
/// ### 中文
/// 引擎内部模块（surface、缓冲池、帧中转，以及持有渲染器的 view/player 对象）。
pub mod buffer;
pub(crate) mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod flags;
pub mod player;
pub mod relay;
pub mod surface;
pub mod texture;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;
