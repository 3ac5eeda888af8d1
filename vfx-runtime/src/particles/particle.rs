//! # Particle 模块
//!
//! 单个粒子的运动、淡出与寿命。
//!
//! ## 时间换算
//!
//! 速度单位是"每个标称帧的像素数"，每次更新前进 `dt × normalization` 个标称帧。
//! 阻尼、闪烁这类逐帧规则同样按标称帧数折算，帧率变化不改变观感速度。

use rand::Rng;
use rand::seq::IndexedRandom;

use super::kind::ParticleKind;
use super::surface::{Disc, Surface};
use crate::color::Rgba;
use crate::geometry::Vec2;

/// 寿命比例超过该值后开始淡出
pub const FADE_START: f32 = 0.7;

/// 非雾气粒子的最小绘制半径
const MIN_RADIUS: f32 = 1.0;

/// 伤害火花每个标称帧闪烁的概率
const TWINKLE_CHANCE: f64 = 0.3;

/// 闪烁一次扣除的 alpha
const TWINKLE_DROP: f32 = 30.0;

/// 粒子
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    kind: ParticleKind,
    position: Vec2,
    velocity: Vec2,
    size: f32,
    color: Rgba,
    base_alpha: f32,
    alpha: f32,
    age: f32,
    lifetime: f32,
    gravity: f32,
    alive: bool,
}

impl Particle {
    /// 按类型参数在指定位置随机生成粒子
    pub fn spawn(kind: ParticleKind, position: Vec2, rng: &mut impl Rng) -> Self {
        let profile = kind.profile();
        let color = profile
            .colors
            .choose(rng)
            .copied()
            .unwrap_or(Rgba::rgb(255, 255, 255));

        Self {
            kind,
            position,
            velocity: profile.velocity.sample(rng),
            size: rng.random_range(profile.size),
            color,
            base_alpha: f32::from(color.a),
            alpha: f32::from(color.a),
            age: 0.0,
            lifetime: rng.random_range(profile.lifetime),
            gravity: profile.gravity,
            alive: true,
        }
    }

    /// 推进 `dt` 秒
    pub fn update(&mut self, dt: f32, normalization: f32, rng: &mut impl Rng) {
        if !self.alive || !dt.is_finite() || dt < 0.0 {
            return;
        }

        let ticks = dt * normalization;
        self.position += self.velocity * ticks;
        if self.gravity != 0.0 {
            self.velocity.y += self.gravity * dt / normalization;
        }
        self.age += dt;

        self.apply_kind_behavior(dt, ticks, rng);

        let life_ratio = self.age / self.lifetime;
        if life_ratio > FADE_START {
            let fade = ((life_ratio - FADE_START) / (1.0 - FADE_START)).min(1.0);
            self.alpha = self.alpha.min(self.base_alpha * (1.0 - fade));
        }

        if self.age >= self.lifetime || self.alpha <= 0.0 {
            self.alpha = self.alpha.max(0.0);
            self.alive = false;
        }
    }

    fn apply_kind_behavior(&mut self, dt: f32, ticks: f32, rng: &mut impl Rng) {
        match self.kind {
            ParticleKind::MagicDust => {
                self.position.x += (self.age * 2.0).sin() * 0.5 * ticks;
            }
            ParticleKind::GoldenSparks => {
                self.velocity *= 0.98_f32.powf(ticks);
            }
            ParticleKind::Mist => {
                self.size += dt * 0.5;
            }
            ParticleKind::FireEmbers => {
                self.size = (self.size + (self.age * 10.0).sin() * 0.1 * ticks).max(0.1);
            }
            ParticleKind::DamageSparks => {
                self.velocity *= 0.95_f32.powf(ticks);
                let chance = (TWINKLE_CHANCE * f64::from(ticks)).clamp(0.0, 1.0);
                if rng.random_bool(chance) {
                    self.alpha -= TWINKLE_DROP;
                }
            }
            ParticleKind::ImpactBurst => {
                self.velocity *= 0.9_f32.powf(ticks);
            }
            ParticleKind::HealGlow => {
                self.position.x += (self.age * 3.0).sin() * 5.0 * dt;
            }
            ParticleKind::Snow | ParticleKind::Leaves => {}
        }
    }

    /// 绘制到表面
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.alive || self.alpha <= 0.0 {
            return;
        }

        let soft = self.kind.is_soft();
        let radius = if soft {
            self.size
        } else {
            self.size.max(MIN_RADIUS)
        };

        surface.draw_disc(Disc {
            center: self.position,
            radius,
            color: self.color.with_alpha_f32(self.alpha),
            soft,
        });
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// 当前透明度（0-255）
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }
}
