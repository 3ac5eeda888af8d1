//! # Animation 模块
//!
//! 通用属性补间系统。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化
//! - 通过 `Animatable` trait 直接写回对象属性
//! - **不假设对象类型**，只要求属性形状稳定（标量或定长元组）
//!
//! ## 核心概念
//!
//! - `AnimatedValue`: 标量或元组值，插值逐分量进行
//! - `Animation`: 单个补间实例
//! - `AnimationManager`: 按 `AnimationKey` 登记动画的管理器
//! - `EasingFunction`: 缓动函数
//! - `Clock`: 时间源（系统时钟 / 手动时钟）

mod animation;
mod clock;
mod easing;
mod manager;
mod sprite;
mod traits;
mod value;

// 核心类型
pub use animation::{Animation, AnimationKey, AnimationState, OnComplete};
pub use clock::{Clock, ManualClock, SystemClock};
pub use easing::EasingFunction;
pub use manager::{AnimationManager, TweenOptions};
pub use value::{AnimatedValue, MAX_COMPONENTS};

// 动画目标
pub use sprite::{AnimatableSprite, SpriteState};
pub use traits::{Animatable, PropertyCell};

/// 动画事件
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationEvent {
    /// 动画登记
    Started(AnimationKey),
    /// 动画完成（属性已写为目标值，回调已触发）
    Completed(AnimationKey),
    /// 动画被同键的新动画替换
    Superseded(AnimationKey),
    /// 目标对象已释放，动画作废
    Detached(AnimationKey),
}
