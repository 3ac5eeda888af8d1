//! # Config 模块
//!
//! 特效配置，集中管理所有可调项。
//!
//! ## 配置优先级
//!
//! 1. 宿主代码显式设置（最高）
//! 2. 配置文件 (JSON)
//! 3. 默认值（最低）

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::animation::EasingFunction;
use crate::error::ConfigError;
use crate::particles::DEFAULT_FRAME_RATE_NORMALIZATION;

/// 性能档位
///
/// `Low` 关闭粒子系统（低性能设备的降级方案）。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceMode {
    Low,
    Medium,
    #[default]
    High,
}

/// 特效配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EffectsConfig {
    /// 性能档位
    #[serde(default)]
    pub performance_mode: PerformanceMode,

    /// 粒子配置
    #[serde(default)]
    pub particles: ParticleConfig,

    /// 动画配置
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// 粒子配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticleConfig {
    /// 是否启用粒子
    #[serde(default = "default_particles_enabled")]
    pub enabled: bool,

    /// 火花爆发发射器的兜底移除时间（秒）
    #[serde(default = "default_spark_burst_timeout")]
    pub spark_burst_timeout: f32,

    /// 命中粒子发射器的兜底移除时间（秒）
    #[serde(default = "default_hit_burst_timeout")]
    pub hit_burst_timeout: f32,

    /// 帧率归一化常数
    ///
    /// 粒子速度按"每个 60fps 帧"编写，位移 = 速度 × dt × 该常数。
    #[serde(default = "default_frame_rate_normalization")]
    pub frame_rate_normalization: f32,
}

/// 动画配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationConfig {
    /// 默认时长（秒）
    #[serde(default = "default_animation_duration")]
    pub default_duration: f64,

    /// 默认缓动
    #[serde(default)]
    pub default_easing: EasingFunction,
}

// 默认值函数
fn default_particles_enabled() -> bool {
    true
}

fn default_spark_burst_timeout() -> f32 {
    3.0
}

fn default_hit_burst_timeout() -> f32 {
    2.0
}

fn default_frame_rate_normalization() -> f32 {
    DEFAULT_FRAME_RATE_NORMALIZATION
}

fn default_animation_duration() -> f64 {
    0.3
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            enabled: default_particles_enabled(),
            spark_burst_timeout: default_spark_burst_timeout(),
            hit_burst_timeout: default_hit_burst_timeout(),
            frame_rate_normalization: default_frame_rate_normalization(),
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_duration: default_animation_duration(),
            default_easing: EasingFunction::default(),
        }
    }
}

impl EffectsConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                tracing::warn!(error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载并验证配置文件，失败时返回错误
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json =
            serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::Io(e.to_string()))?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let normalization = self.particles.frame_rate_normalization;
        if normalization.is_nan() || normalization <= 0.0 {
            return Err(ConfigError::Validation(
                "frame_rate_normalization 必须大于 0".to_string(),
            ));
        }

        if self.particles.spark_burst_timeout < 0.0 || self.particles.hit_burst_timeout < 0.0 {
            return Err(ConfigError::Validation(
                "爆发发射器的移除时间不能为负".to_string(),
            ));
        }

        if self.animation.default_duration < 0.0 {
            return Err(ConfigError::Validation(
                "默认动画时长不能为负".to_string(),
            ));
        }

        Ok(())
    }

    /// 粒子是否实际启用（`Low` 档位强制关闭）
    pub fn particles_enabled(&self) -> bool {
        self.particles.enabled && self.performance_mode != PerformanceMode::Low
    }
}
