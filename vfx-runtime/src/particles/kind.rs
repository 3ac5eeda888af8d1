//! # Kind 模块
//!
//! 粒子类型与各类型的生成参数。
//!
//! 速度按"每个 60fps 帧"的像素数编写，重力按 px/s² 编写。

use std::f32::consts::TAU;
use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{Rgba, palette};
use crate::geometry::Vec2;

/// 粒子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleKind {
    /// 魔法尘埃（蛇形上飘）
    MagicDust,
    /// 金色火花（径向散开并减速）
    GoldenSparks,
    /// 雾气（缓慢扩张）
    Mist,
    /// 火星（上飘并闪烁）
    FireEmbers,
    /// 雪花
    Snow,
    /// 落叶
    Leaves,
    /// 伤害火花（受重力下落并随机闪烁）
    DamageSparks,
    /// 冲击爆发
    ImpactBurst,
    /// 治疗光点（上浮并左右摇摆）
    HealGlow,
}

/// 初速度分布
#[derive(Debug, Clone, PartialEq)]
pub enum VelocityProfile {
    /// 各轴独立均匀分布
    Axis {
        x: RangeInclusive<f32>,
        y: RangeInclusive<f32>,
    },
    /// 随机方向 + 均匀分布的速率
    Radial { speed: RangeInclusive<f32> },
}

impl VelocityProfile {
    pub fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        match self {
            Self::Axis { x, y } => Vec2::new(
                rng.random_range(x.clone()),
                rng.random_range(y.clone()),
            ),
            Self::Radial { speed } => {
                let angle = rng.random_range(0.0..TAU);
                Vec2::from_angle(angle, rng.random_range(speed.clone()))
            }
        }
    }
}

/// 某类粒子的生成参数
#[derive(Debug, Clone, PartialEq)]
pub struct KindProfile {
    pub velocity: VelocityProfile,
    /// 初始半径（像素）
    pub size: RangeInclusive<f32>,
    /// 寿命（秒）
    pub lifetime: RangeInclusive<f32>,
    /// 候选颜色，生成时随机取一个；alpha 即初始透明度
    pub colors: &'static [Rgba],
    /// 重力（px/s²，负值向上）
    pub gravity: f32,
}

const MAGIC_DUST_COLORS: &[Rgba] = &[
    palette::PURPLE_LIGHT,
    palette::GOLD_LIGHT,
    Rgba::new(138, 43, 226, 180),
];
const GOLDEN_SPARK_COLORS: &[Rgba] = &[
    palette::GOLD_LIGHT,
    palette::GOLD_PRIMARY,
    Rgba::new(255, 215, 0, 200),
];
const MIST_COLORS: &[Rgba] = &[Rgba::new(128, 128, 128, 60)];
const FIRE_EMBER_COLORS: &[Rgba] = &[
    Rgba::new(255, 100, 0, 180),
    Rgba::new(255, 0, 0, 160),
    Rgba::new(255, 255, 0, 140),
];
const SNOW_COLORS: &[Rgba] = &[Rgba::new(255, 255, 255, 200)];
const LEAF_COLORS: &[Rgba] = &[
    Rgba::new(139, 69, 19, 180),
    Rgba::new(34, 139, 34, 160),
    Rgba::new(255, 165, 0, 170),
];
const DAMAGE_SPARK_COLORS: &[Rgba] = &[Rgba::new(255, 100, 50, 220)];
const IMPACT_BURST_COLORS: &[Rgba] = &[Rgba::new(255, 255, 100, 180)];
const HEAL_GLOW_COLORS: &[Rgba] = &[Rgba::new(100, 255, 100, 150)];

impl ParticleKind {
    pub const ALL: [ParticleKind; 9] = [
        Self::MagicDust,
        Self::GoldenSparks,
        Self::Mist,
        Self::FireEmbers,
        Self::Snow,
        Self::Leaves,
        Self::DamageSparks,
        Self::ImpactBurst,
        Self::HealGlow,
    ];

    /// 生成参数
    pub fn profile(self) -> KindProfile {
        use VelocityProfile::{Axis, Radial};

        let (velocity, size, lifetime, colors, gravity) = match self {
            Self::MagicDust => (
                Axis { x: -0.5..=0.5, y: -2.0..=-0.5 },
                1.0..=3.0,
                3.0..=6.0,
                MAGIC_DUST_COLORS,
                0.0,
            ),
            Self::GoldenSparks => (
                Radial { speed: 0.5..=2.0 },
                0.5..=2.0,
                1.0..=2.0,
                GOLDEN_SPARK_COLORS,
                0.0,
            ),
            Self::Mist => (
                Axis { x: -0.3..=0.3, y: -0.5..=0.1 },
                3.0..=8.0,
                4.0..=8.0,
                MIST_COLORS,
                0.0,
            ),
            Self::FireEmbers => (
                Axis { x: -0.3..=0.3, y: -1.5..=-0.5 },
                1.0..=2.0,
                2.0..=4.0,
                FIRE_EMBER_COLORS,
                0.0,
            ),
            Self::Snow => (
                Axis { x: -0.2..=0.2, y: 0.5..=1.5 },
                1.0..=3.0,
                5.0..=10.0,
                SNOW_COLORS,
                0.0,
            ),
            Self::Leaves => (
                Axis { x: -0.8..=0.8, y: 0.3..=1.0 },
                2.0..=4.0,
                3.0..=6.0,
                LEAF_COLORS,
                0.0,
            ),
            Self::DamageSparks => (
                Axis { x: -3.0..=3.0, y: -4.0..=1.0 },
                1.0..=3.0,
                0.8..=1.5,
                DAMAGE_SPARK_COLORS,
                200.0,
            ),
            Self::ImpactBurst => (
                Axis { x: -4.0..=4.0, y: -3.0..=3.0 },
                2.0..=5.0,
                0.5..=1.0,
                IMPACT_BURST_COLORS,
                50.0,
            ),
            Self::HealGlow => (
                Axis { x: -1.0..=1.0, y: -2.0..=0.0 },
                2.0..=4.0,
                2.0..=3.0,
                HEAL_GLOW_COLORS,
                -50.0,
            ),
        };

        KindProfile {
            velocity,
            size,
            lifetime,
            colors,
            gravity,
        }
    }

    /// 名称（snake_case）
    pub fn name(self) -> &'static str {
        match self {
            Self::MagicDust => "magic_dust",
            Self::GoldenSparks => "golden_sparks",
            Self::Mist => "mist",
            Self::FireEmbers => "fire_embers",
            Self::Snow => "snow",
            Self::Leaves => "leaves",
            Self::DamageSparks => "damage_sparks",
            Self::ImpactBurst => "impact_burst",
            Self::HealGlow => "heal_glow",
        }
    }

    /// 是否以柔边大圆绘制
    pub fn is_soft(self) -> bool {
        matches!(self, Self::Mist)
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_profiles_are_well_formed() {
        for kind in ParticleKind::ALL {
            let profile = kind.profile();
            assert!(!profile.colors.is_empty(), "{kind}");
            assert!(*profile.lifetime.start() > 0.0, "{kind}");
            assert!(profile.size.start() <= profile.size.end(), "{kind}");
        }
    }

    #[test]
    fn test_radial_speed_within_range() {
        let profile = ParticleKind::GoldenSparks.profile();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let speed = profile.velocity.sample(&mut rng).length();
            assert!((0.5 - 1e-4..=2.0 + 1e-4).contains(&speed), "speed = {speed}");
        }
    }

    #[test]
    fn test_axis_velocity_within_range() {
        let profile = ParticleKind::MagicDust.profile();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let v = profile.velocity.sample(&mut rng);
            assert!((-0.5..=0.5).contains(&v.x));
            assert!((-2.0..=-0.5).contains(&v.y));
        }
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&ParticleKind::FireEmbers).unwrap();
        assert_eq!(json, r#""fire_embers""#);
        let kind: ParticleKind = serde_json::from_str(r#""heal_glow""#).unwrap();
        assert_eq!(kind, ParticleKind::HealGlow);
        assert_eq!(kind.to_string(), "heal_glow");
    }
}
