//! # Value 模块
//!
//! 可动画的值：标量或定长数值元组（位置、RGB/RGBA 颜色）。
//!
//! 插值只实现一次，逐分量进行；`integral` 标记表示原始分量是整数，
//! 插值结果会四舍五入到最近的整数。

use crate::color::Rgba;

/// 元组最多分量数
pub const MAX_COMPONENTS: usize = 4;

/// 可动画的值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatedValue {
    /// 标量
    Scalar { value: f64, integral: bool },
    /// 定长元组（`len` 个有效分量）
    Vector {
        components: [f64; MAX_COMPONENTS],
        len: usize,
        integral: bool,
    },
}

impl AnimatedValue {
    /// 浮点标量
    pub const fn float(value: f64) -> Self {
        Self::Scalar {
            value,
            integral: false,
        }
    }

    /// 整数标量
    pub const fn int(value: i64) -> Self {
        Self::Scalar {
            value: value as f64,
            integral: true,
        }
    }

    /// 二维浮点向量
    pub const fn vec2(x: f64, y: f64) -> Self {
        Self::Vector {
            components: [x, y, 0.0, 0.0],
            len: 2,
            integral: false,
        }
    }

    /// 不透明整数颜色（3 分量）
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Vector {
            components: [r as f64, g as f64, b as f64, 0.0],
            len: 3,
            integral: true,
        }
    }

    /// 整数颜色（4 分量）
    pub const fn rgba(color: Rgba) -> Self {
        Self::Vector {
            components: [color.r as f64, color.g as f64, color.b as f64, color.a as f64],
            len: 4,
            integral: true,
        }
    }

    /// 任意浮点元组（最多 4 分量，多余分量被忽略）
    pub fn tuple(values: &[f64]) -> Self {
        Self::from_slice(values, false)
    }

    /// 任意整数元组（最多 4 分量，多余分量被忽略）
    pub fn int_tuple(values: &[i64]) -> Self {
        let as_f64: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        Self::from_slice(&as_f64, true)
    }

    fn from_slice(values: &[f64], integral: bool) -> Self {
        debug_assert!(
            values.len() <= MAX_COMPONENTS,
            "元组最多 {MAX_COMPONENTS} 个分量"
        );
        let len = values.len().min(MAX_COMPONENTS);
        let mut components = [0.0; MAX_COMPONENTS];
        components[..len].copy_from_slice(&values[..len]);
        Self::Vector {
            components,
            len,
            integral,
        }
    }

    /// 分量切片（标量返回单元素切片）
    pub fn components(&self) -> &[f64] {
        match self {
            Self::Scalar { value, .. } => std::slice::from_ref(value),
            Self::Vector {
                components, len, ..
            } => &components[..*len],
        }
    }

    /// 标量值；元组返回 `None`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar { value, .. } => Some(*value),
            Self::Vector { .. } => None,
        }
    }

    /// 3/4 分量元组转颜色（3 分量时 alpha 为 255）
    pub fn to_rgba(&self) -> Option<Rgba> {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        match self.components() {
            [r, g, b] => Some(Rgba::rgb(channel(*r), channel(*g), channel(*b))),
            [r, g, b, a] => Some(Rgba::new(channel(*r), channel(*g), channel(*b), channel(*a))),
            _ => None,
        }
    }

    /// 是否为整数值
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Scalar { integral, .. } | Self::Vector { integral, .. } => *integral,
        }
    }

    /// 两个值是否同形（同为标量，或分量数相同的元组）
    pub fn same_shape(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar { .. }, Self::Scalar { .. }) => true,
            (Self::Vector { len: a, .. }, Self::Vector { len: b, .. }) => a == b,
            _ => false,
        }
    }

    /// 逐分量插值：`self + (end - self) * t`
    ///
    /// 结果的数值类型跟随 `self`（起始值）。形状不一致时返回 `None`。
    pub fn lerp(&self, end: &Self, t: f64) -> Option<Self> {
        if !self.same_shape(end) {
            return None;
        }

        let integral = self.is_integral();
        let mix = |a: f64, b: f64| {
            let v = a + (b - a) * t;
            if integral { v.round() } else { v }
        };

        Some(match (self, end) {
            (Self::Scalar { value: a, .. }, Self::Scalar { value: b, .. }) => Self::Scalar {
                value: mix(*a, *b),
                integral,
            },
            (
                Self::Vector {
                    components: a, len, ..
                },
                Self::Vector { components: b, .. },
            ) => {
                let mut components = [0.0; MAX_COMPONENTS];
                for i in 0..*len {
                    components[i] = mix(a[i], b[i]);
                }
                Self::Vector {
                    components,
                    len: *len,
                    integral,
                }
            }
            _ => return None,
        })
    }
}

impl From<f64> for AnimatedValue {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

impl From<f32> for AnimatedValue {
    fn from(value: f32) -> Self {
        Self::float(value as f64)
    }
}

impl From<i32> for AnimatedValue {
    fn from(value: i32) -> Self {
        Self::int(value as i64)
    }
}

impl From<(f64, f64)> for AnimatedValue {
    fn from((x, y): (f64, f64)) -> Self {
        Self::vec2(x, y)
    }
}

impl From<Rgba> for AnimatedValue {
    fn from(color: Rgba) -> Self {
        Self::rgba(color)
    }
}
