//! # VFX Runtime
//!
//! 实时视觉特效核心：属性补间动画 + 装饰性粒子。
//!
//! ## 架构概述
//!
//! `vfx-runtime` 不持有窗口，也不关心渲染后端。
//! 宿主在每帧的更新阶段推进两个注册表，在绘制阶段把粒子画到自己的表面上：
//!
//! ```text
//! Host frame loop                 vfx-runtime
//!   │                                │
//!   │── AnimationManager::update() ─►│ 写回目标属性 / 触发完成回调
//!   │── ParticleManager::update(dt) ►│ 发射 / 模拟 / 回收
//!   │── ParticleManager::draw(s) ───►│ Surface::draw_disc(...)
//!   │                                │
//! ```
//!
//! 两个管理器都是普通的值，由宿主持有并按引用传给发起特效的代码，
//! 不存在全局单例。
//!
//! ## 使用示例
//!
//! ```ignore
//! use std::rc::Rc;
//! use vfx_runtime::animation::{AnimatableSprite, AnimationManager, EasingFunction, TweenOptions};
//! use vfx_runtime::particles::{ParticleManager, RecordingSurface};
//!
//! let button = Rc::new(AnimatableSprite::new());
//! let mut animations = AnimationManager::new();
//! let mut particles = ParticleManager::new();
//!
//! animations.animate(
//!     &button,
//!     "scale",
//!     1.05,
//!     animations.tween().with_duration(0.1).with_easing(EasingFunction::EaseOut),
//! )?;
//! particles.create_spark_burst(100.0, 100.0, 10);
//!
//! loop {
//!     animations.update();
//!     particles.update(dt);
//!     particles.draw(&mut surface);
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`animation`]：缓动函数、补间动画与动画管理器
//! - [`particles`]：粒子、发射器、粒子管理器与绘制表面
//! - [`config`]：特效配置
//! - [`error`]：错误类型定义

pub mod animation;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod particles;

// 重导出核心类型
pub use animation::{
    Animatable, AnimatedValue, AnimationEvent, AnimationKey, AnimationManager, EasingFunction,
    ManualClock, TweenOptions,
};
pub use color::Rgba;
pub use config::{EffectsConfig, PerformanceMode};
pub use error::{AnimationError, ConfigError, VfxError, VfxResult};
pub use geometry::{Rect, Vec2};
pub use particles::{EmitterId, ParticleEmitter, ParticleKind, ParticleManager, Surface};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let _value = AnimatedValue::float(1.0);
        let _key = AnimationKey::named("hover");
        let _easing = EasingFunction::from_name("ease_in_out");
        let _manager = ParticleManager::from_config(&EffectsConfig::default());
        let _emitter = ParticleEmitter::new(Rect::new(0.0, 0.0, 1.0, 1.0), ParticleKind::Snow);
    }
}
