//! # Particles 模块
//!
//! 装饰性粒子系统。
//!
//! ## 层级
//!
//! - `Particle`: 单个粒子，按类型决定初速度、尺寸、寿命、颜色和逐帧形变
//! - `ParticleEmitter`: 绑定矩形区域的发射器，持有自己的粒子
//! - `ParticleManager`: 发射器注册表，负责逐帧分发和自动回收
//! - `Surface`: 绘制后端抽象，粒子只会请求画圆

mod emitter;
mod kind;
mod manager;
mod particle;
mod surface;

pub use emitter::{
    DEFAULT_CAPACITY, DEFAULT_EMISSION_RATE, DEFAULT_FRAME_RATE_NORMALIZATION, ParticleEmitter,
};
pub use kind::{KindProfile, ParticleKind, VelocityProfile};
pub use manager::{EmitterId, ParticleManager};
pub use particle::{FADE_START, Particle};
pub use surface::{Disc, RecordingSurface, Surface};
