//! # Particle Manager 模块
//!
//! 发射器注册表：逐帧分发更新与绘制，并自动回收已经结束的发射器。
//!
//! ## 回收规则
//!
//! 每次 `update` 之后，`!active && empty` 的发射器立即移除。
//! 爆发型发射器另外登记一个截止时间（按管理器自身累计的模拟时间计），
//! 到期时无论是否为空都会移除。

use std::fmt;

use tracing::{debug, info};

use super::emitter::ParticleEmitter;
use super::kind::ParticleKind;
use super::surface::Surface;
use crate::config::{EffectsConfig, ParticleConfig};
use crate::geometry::Rect;

/// 发射器句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(u64);

impl fmt::Display for EmitterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "emitter_{}", self.0)
    }
}

/// 命中效果中冲击爆发的粒子数
const HIT_IMPACT_COUNT: usize = 8;

#[derive(Debug)]
struct ManagedEmitter {
    id: EmitterId,
    emitter: ParticleEmitter,
    /// 兜底移除时间（管理器模拟时间）
    deadline: Option<f64>,
}

/// 粒子管理器
#[derive(Debug)]
pub struct ParticleManager {
    emitters: Vec<ManagedEmitter>,
    next_id: u64,
    enabled: bool,
    /// 累计模拟时间（秒）
    elapsed: f64,
    config: ParticleConfig,
}

impl Default for ParticleManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleManager {
    /// 使用默认粒子配置创建
    pub fn new() -> Self {
        Self::with_particle_config(ParticleConfig::default())
    }

    /// 按特效配置创建（`Low` 档位或 `particles.enabled = false` 时处于关闭状态）
    pub fn from_config(config: &EffectsConfig) -> Self {
        let mut manager = Self::with_particle_config(config.particles.clone());
        manager.enabled = config.particles_enabled();
        manager
    }

    fn with_particle_config(config: ParticleConfig) -> Self {
        Self {
            emitters: Vec::new(),
            next_id: 0,
            enabled: config.enabled,
            elapsed: 0.0,
            config,
        }
    }

    /// 注册发射器
    ///
    /// 发射器的帧率归一化常数会被统一为管理器配置的值。
    pub fn add_emitter(&mut self, emitter: ParticleEmitter) -> EmitterId {
        self.register(emitter, None)
    }

    fn register(&mut self, mut emitter: ParticleEmitter, lifetime: Option<f32>) -> EmitterId {
        let id = EmitterId(self.next_id);
        self.next_id += 1;

        emitter.set_frame_rate_normalization(self.config.frame_rate_normalization);
        let deadline = lifetime.map(|secs| self.elapsed + f64::from(secs));
        debug!(%id, kind = %emitter.kind(), ?deadline, "注册发射器");

        self.emitters.push(ManagedEmitter {
            id,
            emitter,
            deadline,
        });
        id
    }

    /// 移除发射器，返回被移除的发射器
    pub fn remove_emitter(&mut self, id: EmitterId) -> Option<ParticleEmitter> {
        let index = self.emitters.iter().position(|m| m.id == id)?;
        Some(self.emitters.swap_remove(index).emitter)
    }

    pub fn emitter(&self, id: EmitterId) -> Option<&ParticleEmitter> {
        self.emitters
            .iter()
            .find(|m| m.id == id)
            .map(|m| &m.emitter)
    }

    pub fn emitter_mut(&mut self, id: EmitterId) -> Option<&mut ParticleEmitter> {
        self.emitters
            .iter_mut()
            .find(|m| m.id == id)
            .map(|m| &mut m.emitter)
    }

    /// 魔法尘埃（3 个/秒，上限 50）
    pub fn create_magic_dust_emitter(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> EmitterId {
        let region = Rect::new(x, y, width, height);
        let emitter = ParticleEmitter::new(region, ParticleKind::MagicDust)
            .with_rate(3.0)
            .with_capacity(50);
        self.add_emitter(emitter)
    }

    /// 火星（4 个/秒，上限 40）
    pub fn create_fire_emitters(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> EmitterId {
        let region = Rect::new(x, y, width, height);
        let emitter = ParticleEmitter::new(region, ParticleKind::FireEmbers)
            .with_rate(4.0)
            .with_capacity(40);
        self.add_emitter(emitter)
    }

    /// 雾气（2 个/秒，上限 30）
    pub fn create_mist_emitter(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> EmitterId {
        let region = Rect::new(x, y, width, height);
        let emitter = ParticleEmitter::new(region, ParticleKind::Mist)
            .with_rate(2.0)
            .with_capacity(30);
        self.add_emitter(emitter)
    }

    /// 以 (x, y) 为中心爆发 `count` 个金色火花
    ///
    /// 发射器不持续发射，粒子全部消失后由常规回收移除；
    /// 另有 `spark_burst_timeout` 秒的兜底截止时间。
    pub fn create_spark_burst(&mut self, x: f32, y: f32, count: usize) -> EmitterId {
        let timeout = self.config.spark_burst_timeout;
        self.create_burst(
            Rect::centered(x, y, 20.0),
            ParticleKind::GoldenSparks,
            count,
            timeout,
        )
    }

    /// 命中效果：伤害火花 + 冲击爆发，返回两个发射器的句柄
    pub fn spawn_hit_particles(&mut self, x: f32, y: f32, count: usize) -> [EmitterId; 2] {
        let timeout = self.config.hit_burst_timeout;
        let sparks = self.create_burst(
            Rect::centered(x, y, 30.0),
            ParticleKind::DamageSparks,
            count,
            timeout,
        );
        let impact = self.create_burst(
            Rect::centered(x, y, 20.0),
            ParticleKind::ImpactBurst,
            HIT_IMPACT_COUNT,
            timeout,
        );
        [sparks, impact]
    }

    fn create_burst(
        &mut self,
        region: Rect,
        kind: ParticleKind,
        count: usize,
        timeout: f32,
    ) -> EmitterId {
        let mut emitter = ParticleEmitter::new(region, kind)
            .with_rate(0.0)
            .with_capacity(count);
        emitter.set_active(false);
        if self.enabled {
            emitter.emit_burst(count);
        }
        self.register(emitter, Some(timeout))
    }

    /// 推进 `dt` 秒并回收结束的发射器
    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += f64::from(dt);
        }

        for managed in &mut self.emitters {
            managed.emitter.update(dt);
        }

        let now = self.elapsed;
        self.emitters.retain(|m| {
            let finished = !m.emitter.is_active() && m.emitter.is_empty();
            let expired = m.deadline.is_some_and(|deadline| now >= deadline);
            if finished || expired {
                debug!(id = %m.id, finished, expired, "回收发射器");
            }
            !(finished || expired)
        });
    }

    /// 绘制所有发射器
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.enabled {
            return;
        }
        for managed in &self.emitters {
            managed.emitter.draw(surface);
        }
    }

    /// 清空所有粒子和发射器
    pub fn clear_all(&mut self) {
        self.emitters.clear();
    }

    /// 全局开关；关闭时清空所有粒子和发射器
    pub fn set_particles_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            info!(enabled, "粒子系统开关切换");
        }
        self.enabled = enabled;
        if !enabled {
            self.clear_all();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// 所有发射器的存活粒子总数
    pub fn particle_count(&self) -> usize {
        self.emitters.iter().map(|m| m.emitter.particle_count()).sum()
    }

    /// 累计模拟时间（秒）
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
