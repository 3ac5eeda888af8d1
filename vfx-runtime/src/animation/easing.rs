//! # Easing 模块
//!
//! 缓动函数库，用于动画的时间插值。
//!
//! 所有曲线在端点处精确满足 `apply(0) == 0`、`apply(1) == 1`；
//! `BounceOut` / `ElasticOut` 在中途可能短暂越出 `[0, 1]`。

use std::f64::consts::PI;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 缓入（二次）
    EaseIn,
    /// 缓出（二次）
    #[default]
    EaseOut,
    /// 缓入缓出（二次，t = 0.5 处分段）
    EaseInOut,
    /// 二次缓入
    EaseInQuad,
    /// 二次缓出
    EaseOutQuad,
    /// 二次缓入缓出
    EaseInOutQuad,
    /// 三次缓入
    EaseInCubic,
    /// 三次缓出
    EaseOutCubic,
    /// 三次缓入缓出
    EaseInOutCubic,
    /// 正弦缓入
    EaseInSine,
    /// 正弦缓出
    EaseOutSine,
    /// 正弦缓入缓出
    EaseInOutSine,
    /// 弹跳缓出
    BounceOut,
    /// 弹性缓出
    ElasticOut,
}

impl EasingFunction {
    /// 全部曲线（用于遍历测试与调试面板）
    pub const ALL: [EasingFunction; 15] = [
        EasingFunction::Linear,
        EasingFunction::EaseIn,
        EasingFunction::EaseOut,
        EasingFunction::EaseInOut,
        EasingFunction::EaseInQuad,
        EasingFunction::EaseOutQuad,
        EasingFunction::EaseInOutQuad,
        EasingFunction::EaseInCubic,
        EasingFunction::EaseOutCubic,
        EasingFunction::EaseInOutCubic,
        EasingFunction::EaseInSine,
        EasingFunction::EaseOutSine,
        EasingFunction::EaseInOutSine,
        EasingFunction::BounceOut,
        EasingFunction::ElasticOut,
    ];

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度，超出 `[0, 1]` 会被限制
    ///
    /// # 返回
    /// - 缓动后的进度值，端点精确为 0 / 1
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return 0.0;
        }
        if t == 1.0 {
            return 1.0;
        }

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseIn | EasingFunction::EaseInQuad => t * t,
            EasingFunction::EaseOut | EasingFunction::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EasingFunction::EaseInOut | EasingFunction::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            EasingFunction::EaseInCubic => t * t * t,
            EasingFunction::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EasingFunction::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            EasingFunction::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EasingFunction::EaseOutSine => (t * PI / 2.0).sin(),
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingFunction::BounceOut => bounce_out(t),
            EasingFunction::ElasticOut => elastic_out(t),
        }
    }

    /// 曲线名称（snake_case，与配置文件一致）
    pub fn name(&self) -> &'static str {
        match self {
            EasingFunction::Linear => "linear",
            EasingFunction::EaseIn => "ease_in",
            EasingFunction::EaseOut => "ease_out",
            EasingFunction::EaseInOut => "ease_in_out",
            EasingFunction::EaseInQuad => "ease_in_quad",
            EasingFunction::EaseOutQuad => "ease_out_quad",
            EasingFunction::EaseInOutQuad => "ease_in_out_quad",
            EasingFunction::EaseInCubic => "ease_in_cubic",
            EasingFunction::EaseOutCubic => "ease_out_cubic",
            EasingFunction::EaseInOutCubic => "ease_in_out_cubic",
            EasingFunction::EaseInSine => "ease_in_sine",
            EasingFunction::EaseOutSine => "ease_out_sine",
            EasingFunction::EaseInOutSine => "ease_in_out_sine",
            EasingFunction::BounceOut => "bounce_out",
            EasingFunction::ElasticOut => "elastic_out",
        }
    }

    /// 按名称解析曲线（大小写不敏感）
    ///
    /// 未知名称降级为 `Linear`，不视为错误。
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        match Self::ALL.iter().find(|e| e.name() == lower) {
            Some(easing) => *easing,
            None => {
                tracing::debug!(name, "未知缓动函数，降级为 linear");
                EasingFunction::Linear
            }
        }
    }
}

impl std::fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for EasingFunction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EasingFunction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// 弹跳缓出（四段衰减抛物线）
fn bounce_out(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

/// 弹性缓出（指数衰减正弦）
fn elastic_out(t: f64) -> f64 {
    let c4 = (2.0 * PI) / 3.0;
    2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
}
