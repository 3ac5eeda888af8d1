//! 预置特效场景
//!
//! 每个场景在开始时登记发射器，之后每帧按时间线触发动画与爆发。

use std::rc::Rc;

use anyhow::Result;
use clap::ValueEnum;
use tracing::debug;
use vfx_runtime::Rgba;
use vfx_runtime::animation::{AnimatableSprite, AnimationManager, EasingFunction, TweenOptions};
use vfx_runtime::geometry::Rect;
use vfx_runtime::particles::{ParticleEmitter, ParticleKind, ParticleManager};

/// 场景类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// 手牌悬停：卡牌轮流放大回弹，背景魔法尘埃
    Hover,
    /// 战斗：周期性命中火花、伤害数字淡出
    Combat,
    /// 环境：雾气、火星、雪花、落叶
    Ambient,
}

/// 运行中的场景
pub struct Scenario {
    kind: ScenarioKind,
    cards: Vec<Rc<AnimatableSprite>>,
    /// 正在淡出的伤害数字
    popups: Vec<Rc<AnimatableSprite>>,
    seed: Option<u64>,
    /// 下一次触发的时间（秒）
    next_beat: f64,
    beat: usize,
}

const CARD_COUNT: usize = 5;
const BEAT_INTERVAL: f64 = 0.5;

impl Scenario {
    pub fn new(kind: ScenarioKind, seed: Option<u64>) -> Self {
        let cards = (0..CARD_COUNT)
            .map(|_| Rc::new(AnimatableSprite::new()))
            .collect();
        Self {
            kind,
            cards,
            popups: Vec::new(),
            seed,
            next_beat: 0.0,
            beat: 0,
        }
    }

    /// 仍在淡出的伤害数字数量
    pub fn popup_count(&self) -> usize {
        self.popups.len()
    }

    fn emitter(&self, region: Rect, kind: ParticleKind) -> ParticleEmitter {
        let emitter = ParticleEmitter::new(region, kind);
        match self.seed {
            Some(seed) => emitter.with_seed(seed.wrapping_add(kind as u64)),
            None => emitter,
        }
    }

    /// 登记场景的常驻发射器与入场动画
    pub fn setup(
        &mut self,
        animations: &mut AnimationManager,
        particles: &mut ParticleManager,
    ) -> Result<()> {
        for (index, card) in self.cards.iter().enumerate() {
            let x = 200.0 + index as f64 * 180.0;
            animations.slide_in_from_bottom(card, 560.0, 0.4)?;
            animations.slide_in_from_left(card, x, 0.4)?;
        }

        match self.kind {
            ScenarioKind::Hover => {
                particles.create_magic_dust_emitter(0.0, 0.0, 1280.0, 720.0);
            }
            ScenarioKind::Combat => {
                particles.create_fire_emitters(0.0, 680.0, 1280.0, 40.0);
            }
            ScenarioKind::Ambient => {
                particles.create_mist_emitter(0.0, 400.0, 1280.0, 320.0);
                particles.create_fire_emitters(560.0, 600.0, 160.0, 40.0);
                let snow = self
                    .emitter(Rect::new(0.0, -10.0, 1280.0, 10.0), ParticleKind::Snow)
                    .with_rate(6.0)
                    .with_capacity(80);
                particles.add_emitter(snow);
                let leaves = self
                    .emitter(Rect::new(0.0, -10.0, 1280.0, 10.0), ParticleKind::Leaves)
                    .with_rate(1.5)
                    .with_capacity(20);
                particles.add_emitter(leaves);
            }
        }
        Ok(())
    }

    /// 按时间线触发事件
    pub fn tick(
        &mut self,
        now: f64,
        animations: &mut AnimationManager,
        particles: &mut ParticleManager,
    ) -> Result<()> {
        self.popups.retain(|popup| animations.is_animating(popup, None));

        while now >= self.next_beat {
            self.next_beat += BEAT_INTERVAL;
            self.beat += 1;
            self.on_beat(animations, particles)?;
        }
        Ok(())
    }

    fn on_beat(
        &mut self,
        animations: &mut AnimationManager,
        particles: &mut ParticleManager,
    ) -> Result<()> {
        let card = &self.cards[self.beat % self.cards.len()];
        let (x, y) = card.position();
        debug!(beat = self.beat, x, y, "场景节拍");

        match self.kind {
            ScenarioKind::Hover => {
                let settle = card.clone();
                animations.animate(
                    card,
                    "scale",
                    1.05,
                    TweenOptions::new(0.1)
                        .with_easing(EasingFunction::EaseOut)
                        .on_complete(move |manager| {
                            if let Err(e) = manager.scale_to(&settle, 1.0, 0.15) {
                                tracing::warn!(error = %e, "回弹动画启动失败");
                            }
                        }),
                )?;
                particles.create_spark_burst(x as f32, y as f32, 10);
            }
            ScenarioKind::Combat => {
                particles.spawn_hit_particles(x as f32, y as f32, 20);
                animations.animate(
                    card,
                    "tint",
                    Rgba::rgb(255, 80, 80),
                    TweenOptions::new(0.2).with_easing(EasingFunction::EaseOutQuad),
                )?;
                let popup = Rc::new(AnimatableSprite::new());
                animations.fade_out(&popup, 0.6)?;
                self.popups.push(popup);
            }
            ScenarioKind::Ambient => {
                animations.animate(
                    card,
                    "alpha",
                    if self.beat % 2 == 0 { 255 } else { 180 },
                    TweenOptions::new(BEAT_INTERVAL).with_easing(EasingFunction::EaseInOutSine),
                )?;
            }
        }
        Ok(())
    }
}
