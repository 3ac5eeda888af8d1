//! # Animation 模块
//!
//! 单个补间动画：把目标对象的一个属性在 `duration` 内从起始值过渡到目标值。

use std::rc::Weak;

use super::{AnimatedValue, Animatable, AnimationManager, EasingFunction};

/// 动画键
///
/// 同一个键同一时刻最多对应一个动画；用已有的键启动新动画会静默替换旧动画。
/// 自动生成的键与命名键属于不同命名空间，不会冲突。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    /// 由 `AnimationManager` 自动分配
    Auto(u64),
    /// 调用方指定
    Named(String),
}

impl AnimationKey {
    /// 创建命名键
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl std::fmt::Display for AnimationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto(id) => write!(f, "anim_{}", id),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// 完成回调
///
/// 回调拿到管理器的可变引用，可以在回调里继续启动新动画。
pub type OnComplete = Box<dyn FnOnce(&mut AnimationManager)>;

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 等待开始（延迟中）
    #[default]
    Pending,
    /// 正在播放
    Playing,
    /// 已完成（属性已精确写为目标值）
    Completed,
    /// 目标对象已释放，动画作废
    Detached,
}

impl AnimationState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Playing)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Detached)
    }
}

/// 补间动画实例
pub struct Animation {
    target: Weak<dyn Animatable>,
    property: String,
    from: AnimatedValue,
    to: AnimatedValue,
    /// 动画时长（秒）
    duration: f64,
    /// 延迟启动（秒）
    delay: f64,
    easing: EasingFunction,
    /// 创建时刻（时钟时间）
    start_time: f64,
    state: AnimationState,
    /// 当前进度（0.0 - 1.0，未应用缓动）
    progress: f64,
    on_complete: Option<OnComplete>,
}

impl std::fmt::Debug for Animation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Animation")
            .field("property", &self.property)
            .field("from", &self.from)
            .field("to", &self.to)
            .field("duration", &self.duration)
            .field("delay", &self.delay)
            .field("easing", &self.easing)
            .field("state", &self.state)
            .field("progress", &self.progress)
            .finish()
    }
}

impl Animation {
    /// 创建新的动画
    ///
    /// `from` 是创建时对属性的快照。`from` 与 `to` 必须同形，
    /// 由调用方保证（`AnimationManager::animate` 会先校验）。
    pub fn new(
        target: Weak<dyn Animatable>,
        property: impl Into<String>,
        from: AnimatedValue,
        to: AnimatedValue,
        duration: f64,
        start_time: f64,
    ) -> Self {
        debug_assert!(from.same_shape(&to), "起止值形状不一致");

        Self {
            target,
            property: property.into(),
            from,
            to,
            duration: duration.max(0.0),
            delay: 0.0,
            easing: EasingFunction::default(),
            start_time,
            state: AnimationState::Pending,
            progress: 0.0,
            on_complete: None,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 设置延迟
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// 设置完成回调
    pub fn with_on_complete(mut self, on_complete: Option<OnComplete>) -> Self {
        self.on_complete = on_complete;
        self
    }

    /// 更新动画
    ///
    /// # 返回
    /// - `true`: 动画仍在进行中（含延迟期）
    /// - `false`: 动画已结束，应当退役
    pub fn update(&mut self, now: f64) -> bool {
        if self.state.is_finished() {
            return false;
        }

        let begin = self.start_time + self.delay;
        if now < begin {
            return true;
        }
        self.state = AnimationState::Playing;

        let Some(target) = self.target.upgrade() else {
            tracing::debug!(property = %self.property, "动画目标已释放，动画作废");
            self.state = AnimationState::Detached;
            return false;
        };

        self.progress = if self.duration <= 0.0 {
            1.0
        } else {
            ((now - begin) / self.duration).clamp(0.0, 1.0)
        };

        if self.progress >= 1.0 {
            // 完成时精确写入目标值，不留插值残差
            target.set_property(&self.property, self.to);
            self.state = AnimationState::Completed;
            return false;
        }

        let eased = self.easing.apply(self.progress);
        match self.from.lerp(&self.to, eased) {
            Some(value) => {
                target.set_property(&self.property, value);
            }
            None => {
                tracing::warn!(property = %self.property, "起止值形状不一致，跳过写入");
            }
        }
        true
    }

    /// 取走完成回调（只能取一次）
    pub fn take_on_complete(&mut self) -> Option<OnComplete> {
        self.on_complete.take()
    }

    /// 属性名
    pub fn property(&self) -> &str {
        &self.property
    }

    /// 当前状态
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// 当前进度（未应用缓动）
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// 初始值
    pub fn initial_value(&self) -> AnimatedValue {
        self.from
    }

    /// 最终值
    pub fn final_value(&self) -> AnimatedValue {
        self.to
    }

    /// 是否作用于指定对象
    pub fn targets(&self, object: *const ()) -> bool {
        self.target.strong_count() > 0 && self.target.as_ptr() as *const () == object
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// 是否为活跃状态
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}
