/// ### English
/// `haru_view_engine` crate root.
/// Bridges native web/video renderers to a host UI compositor through pooled
/// GPU surfaces; all implementation lives under `engine`.
///
/// ### 中文
/// `haru_view_engine` 的 crate 根。
/// 通过池化 GPU surface 将原生 web/视频渲染器桥接到宿主 UI 合成器；
/// 全部实现位于 `engine` 模块。
pub mod engine;
