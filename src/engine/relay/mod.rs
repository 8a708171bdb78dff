//! ### English
//! Three-slot frame handoff between a renderer's frame-produced callback and
//! the host compositor's pull callback.
//!
//! One mutex guards the `working`/`candidate`/`rendered` slots; it is held
//! only across slot reassignment and (non-blocking) pool calls, never across
//! a paint, a native render, or the compositor's descriptor consumption.
//! At most one unconsumed frame is retained: a newly committed frame
//! supersedes the previous candidate, which returns to the pool
//! (latest-frame-wins).
//!
//! ### 中文
//! 在渲染器的“帧已产出”回调与宿主合成器的拉取回调之间做三槽位帧中转。
//!
//! 一把互斥锁保护 `working`/`candidate`/`rendered` 三个槽位；锁只在槽位
//! 重新赋值与（不阻塞的）池调用期间持有，绝不覆盖绘制、原生渲染或
//! 合成器消费 descriptor 的过程。最多保留一帧未消费的帧：新提交的帧会
//! 取代上一个 candidate，后者归还给池（最新帧优先）。

mod obtain;
mod produce;
mod resize;

use std::sync::{Arc, OnceLock, Weak};

use parking_lot::Mutex;

use crate::engine::buffer::{SurfacePool, UnitHandle};
use crate::engine::surface::FrameRelease;
use crate::engine::texture::{TextureId, TextureRegistry};

/// ### English
/// The three named slots. With an exclusively-claiming pool, a unit is
/// reachable from at most one slot at any instant;
/// `debug_assert_roles_distinct` checks that mechanically after every
/// transition.
///
/// ### 中文
/// 三个命名槽位。在独占占用的池下，任一时刻一个 unit 至多出现在一个
/// 槽位中；每次状态转换后由 `debug_assert_roles_distinct` 机械校验。
#[derive(Default)]
struct SlotTable {
    /// ### English
    /// Unit currently being filled by the in-progress native render.
    ///
    /// ### 中文
    /// 正在被原生渲染填充的 unit。
    working: Option<UnitHandle>,
    /// ### English
    /// Most recently completed, not-yet-pulled frame.
    ///
    /// ### 中文
    /// 最近完成、尚未被拉取的帧。
    candidate: Option<UnitHandle>,
    /// ### English
    /// Unit last handed to the compositor (kept so repeated pulls without a
    /// new frame re-present the same image).
    ///
    /// ### 中文
    /// 最近一次交给合成器的 unit（保留它，使没有新帧时的重复拉取仍能
    /// 呈现同一图像）。
    rendered: Option<UnitHandle>,
}

impl SlotTable {
    fn holds(&self, unit: UnitHandle) -> bool {
        self.working == Some(unit)
            || self.candidate == Some(unit)
            || self.rendered == Some(unit)
    }

    fn debug_assert_roles_distinct(&self) {
        if cfg!(debug_assertions) {
            let held: Vec<UnitHandle> = [self.working, self.candidate, self.rendered]
                .into_iter()
                .flatten()
                .collect();
            for (i, a) in held.iter().enumerate() {
                for b in held.iter().skip(i + 1) {
                    debug_assert_ne!(a, b, "one unit must not occupy two slots");
                }
            }
        }
    }
}

/// ### English
/// Slot-handoff state embedded in each renderer-owning object.
///
/// ### 中文
/// 内嵌于每个持有渲染器对象中的槽位中转状态。
pub struct FrameRelay {
    /// ### English
    /// Pool the slots draw units from.
    ///
    /// ### 中文
    /// 槽位从中获取 unit 的池。
    pool: Arc<dyn SurfacePool>,
    /// ### English
    /// The slot table and its mutex.
    ///
    /// ### 中文
    /// 槽位表及其互斥锁。
    slots: Mutex<SlotTable>,
    /// ### English
    /// Host compositor registration interface.
    ///
    /// ### 中文
    /// 宿主合成器注册接口。
    registry: Arc<dyn TextureRegistry>,
    /// ### English
    /// Texture this relay signals; bound once right after registration.
    ///
    /// ### 中文
    /// 该中转对应的纹理；注册后立即绑定一次。
    texture: OnceLock<TextureId>,
    /// ### English
    /// Weak self-reference embedded in descriptors as the release context.
    ///
    /// ### 中文
    /// 作为释放上下文嵌入 descriptor 的弱自引用。
    self_weak: Weak<FrameRelay>,
}

impl FrameRelay {
    /// ### English
    /// Creates a relay over `pool`, signaling frames through `registry`.
    ///
    /// ### 中文
    /// 基于 `pool` 创建中转，通过 `registry` 通知新帧。
    pub fn new(pool: Arc<dyn SurfacePool>, registry: Arc<dyn TextureRegistry>) -> Arc<Self> {
        Arc::new_cyclic(|self_weak| Self {
            pool,
            slots: Mutex::new(SlotTable::default()),
            registry,
            texture: OnceLock::new(),
            self_weak: self_weak.clone(),
        })
    }

    /// ### English
    /// Binds the texture ID obtained from `register_texture`. Later calls are
    /// ignored; the binding is write-once.
    ///
    /// ### 中文
    /// 绑定由 `register_texture` 返回的纹理 ID。后续调用被忽略；绑定只写
    /// 一次。
    pub fn bind_texture(&self, texture: TextureId) {
        let _ = self.texture.set(texture);
    }

    /// ### English
    /// The bound texture ID, if any.
    ///
    /// ### 中文
    /// 已绑定的纹理 ID（若有）。
    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture.get().copied()
    }

    /// ### English
    /// Releases every slot back to the pool. Used by resize and teardown;
    /// after this, pulls return `None` until a new frame is committed.
    ///
    /// ### 中文
    /// 将所有槽位归还给池。用于 resize 与销毁；此后在新帧提交前，拉取
    /// 返回 `None`。
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        for unit in [
            slots.working.take(),
            slots.candidate.take(),
            slots.rendered.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.pool.release(unit);
        }
    }

    /// ### English
    /// Descriptor-release entry point (the compositor is done reading).
    ///
    /// A unit still occupying a slot stays claimed and is returned when
    /// superseded or cleared, so the producer can never re-claim a surface
    /// the relay still presents. Units no longer in any slot go back to the
    /// pool immediately (stale descriptors after a resize or teardown).
    ///
    /// ### 中文
    /// descriptor 释放入口（合成器读取完毕）。
    ///
    /// 仍占据槽位的 unit 保持占用，在被取代或清空时归还，因此生产者
    /// 不可能重新占用一个中转仍在呈现的 surface。已不在任何槽位中的
    /// unit 立即归还给池（resize 或销毁后的陈旧 descriptor）。
    pub(crate) fn release_presented(&self, unit: UnitHandle) {
        // Checked and returned under the slot lock: claims only ever change
        // while it is held, so a unit observed outside every slot here cannot
        // be concurrently re-claimed into one.
        let slots = self.slots.lock();
        if !slots.holds(unit) {
            self.pool.release_presented(unit);
        }
    }

    /// ### English
    /// Signals the compositor that a new frame is available. Called after the
    /// slot mutex is released.
    ///
    /// ### 中文
    /// 通知合成器有新帧可用。在槽位互斥锁释放后调用。
    fn notify_frame_available(&self) {
        match self.texture.get() {
            Some(&texture) => self.registry.mark_frame_available(texture),
            None => tracing::debug!("frame committed before a texture was bound"),
        }
    }

    /// ### English
    /// Builds the release context for a presented unit.
    ///
    /// ### 中文
    /// 为被呈现的 unit 构建释放上下文。
    fn frame_release(&self, unit: UnitHandle) -> FrameRelease {
        FrameRelease::new(self.self_weak.clone(), unit)
    }

    /// ### English
    /// Checks role-distinctness after a transition, for pools whose claims
    /// are exclusive (the single-buffer pool aliases by design).
    ///
    /// ### 中文
    /// 在状态转换后校验角色互斥；仅针对独占占用的池（单缓冲池按设计
    /// 存在别名复用）。
    fn assert_roles_distinct(&self, slots: &SlotTable) {
        if self.pool.exclusive_claims() {
            slots.debug_assert_roles_distinct();
        }
    }

    #[cfg(test)]
    pub(crate) fn held_slot_count(&self) -> usize {
        let slots = self.slots.lock();
        [slots.working, slots.candidate, slots.rendered]
            .iter()
            .flatten()
            .count()
    }
}
