//! # Error 模块
//!
//! 定义 vfx-runtime 中使用的错误类型。
//!
//! 特效层不得让宿主崩溃：`update` / `draw` 路径从不返回错误，
//! 只有发起请求（`animate`）和加载配置时才可能失败。

use thiserror::Error;

/// 动画请求错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 目标对象没有该属性
    #[error("目标对象没有属性 '{property}'")]
    PropertyNotFound { property: String },

    /// 起止值形状不一致（标量 vs 元组，或元组长度不同）
    #[error("属性 '{property}' 的起止值形状不一致")]
    ShapeMismatch { property: String },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(String),

    /// 解析 / 序列化失败
    #[error("配置解析失败: {0}")]
    Parse(String),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    Validation(String),
}

/// vfx-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VfxError {
    /// 动画错误
    #[error("动画错误: {0}")]
    Animation(#[from] AnimationError),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type VfxResult<T> = Result<T, VfxError>;
