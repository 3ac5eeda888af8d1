//! # Emitter 模块
//!
//! 绑定到矩形区域的粒子发射器：按速率持续发射，受容量上限约束。

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::trace;

use super::kind::ParticleKind;
use super::particle::Particle;
use super::surface::Surface;
use crate::geometry::Rect;

/// 默认发射速率（个/秒）
pub const DEFAULT_EMISSION_RATE: f32 = 5.0;

/// 默认容量
pub const DEFAULT_CAPACITY: usize = 100;

/// 默认帧率归一化常数
pub const DEFAULT_FRAME_RATE_NORMALIZATION: f32 = 60.0;

/// 累积器取整容差：吸收 `1/fps` 这类步长的舍入误差
const EMISSION_EPSILON: f64 = 1e-3;

/// 粒子发射器
#[derive(Debug, Clone)]
pub struct ParticleEmitter {
    /// 生成区域
    region: Rect,
    /// 粒子类型
    kind: ParticleKind,
    /// 每秒发射数量（<= 0 时不持续发射）
    emission_rate: f32,
    /// 存活粒子上限
    capacity: usize,
    /// 是否持续发射
    active: bool,
    /// 累积的待发射数量
    emission_accumulator: f64,
    /// 帧率归一化常数
    frame_rate_normalization: f32,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleEmitter {
    /// 创建发射器（默认速率与容量，处于激活状态）
    pub fn new(region: Rect, kind: ParticleKind) -> Self {
        Self {
            region,
            kind,
            emission_rate: DEFAULT_EMISSION_RATE,
            capacity: DEFAULT_CAPACITY,
            active: true,
            emission_accumulator: 0.0,
            frame_rate_normalization: DEFAULT_FRAME_RATE_NORMALIZATION,
            particles: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// 设置发射速率
    pub fn with_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    /// 设置容量
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// 使用固定种子（测试与回放）
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// 设置帧率归一化常数，非正数忽略
    pub fn with_frame_rate_normalization(mut self, normalization: f32) -> Self {
        self.set_frame_rate_normalization(normalization);
        self
    }

    pub(crate) fn set_frame_rate_normalization(&mut self, normalization: f32) {
        if normalization > 0.0 && normalization.is_finite() {
            self.frame_rate_normalization = normalization;
        }
    }

    /// 本帧应发射的数量
    fn particles_to_emit(&mut self, dt: f32) -> usize {
        if !self.active || self.emission_rate <= 0.0 {
            return 0;
        }

        self.emission_accumulator += f64::from(self.emission_rate) * f64::from(dt);
        let count = (self.emission_accumulator + EMISSION_EPSILON).floor();
        self.emission_accumulator -= count;
        count as usize
    }

    /// 推进 `dt` 秒
    ///
    /// 激活时按速率补发（卡顿后会追帧），超出容量的部分直接丢弃；
    /// 无论是否激活，已有粒子都继续模拟，死亡粒子被移除。
    pub fn update(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let due = self.particles_to_emit(dt);
        let room = self.capacity.saturating_sub(self.particles.len());
        if due > room {
            trace!(kind = %self.kind, dropped = due - room, "发射器已满，丢弃多余粒子");
        }
        self.spawn(self.kind, due.min(room));

        let normalization = self.frame_rate_normalization;
        let rng = &mut self.rng;
        for particle in &mut self.particles {
            particle.update(dt, normalization, rng);
        }
        self.particles.retain(Particle::is_alive);
    }

    fn spawn(&mut self, kind: ParticleKind, count: usize) -> usize {
        let count = count.min(self.capacity.saturating_sub(self.particles.len()));
        for _ in 0..count {
            let position = self.region.random_point(&mut self.rng);
            let particle = Particle::spawn(kind, position, &mut self.rng);
            self.particles.push(particle);
        }
        count
    }

    /// 立即发射至多 `count` 个粒子（绕过速率限制，受容量约束），返回实际数量
    pub fn emit_burst(&mut self, count: usize) -> usize {
        self.spawn(self.kind, count)
    }

    /// 伤害火花爆发
    pub fn emit_damage(&mut self, count: usize) -> usize {
        self.spawn(ParticleKind::DamageSparks, count)
    }

    /// 冲击爆发
    pub fn emit_impact(&mut self, count: usize) -> usize {
        self.spawn(ParticleKind::ImpactBurst, count)
    }

    /// 治疗光点爆发
    pub fn emit_heal(&mut self, count: usize) -> usize {
        self.spawn(ParticleKind::HealGlow, count)
    }

    /// 开关持续发射，不影响已有粒子
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.emission_accumulator = 0.0;
        }
    }

    /// 移动生成区域
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.region.x = x;
        self.region.y = y;
    }

    /// 清空所有粒子
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// 绘制所有存活粒子
    pub fn draw(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            particle.draw(surface);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn emission_rate(&self) -> f32 {
        self.emission_rate
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn frame_rate_normalization(&self) -> f32 {
        self.frame_rate_normalization
    }
}
