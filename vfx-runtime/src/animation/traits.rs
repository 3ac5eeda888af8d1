//! # Traits 模块
//!
//! 动画目标接口定义。
//!
//! ## 核心概念
//!
//! - `Animatable`: 可动画对象接口，按属性名读写 [`AnimatedValue`]
//! - `PropertyCell`: 只有一个 `"value"` 属性的共享值，适合临时目标

use std::cell::RefCell;
use std::rc::Rc;

use super::AnimatedValue;

/// 可动画对象接口
///
/// 对象通过实现此 trait 声明自己有哪些属性可以被动画。
/// 同一属性的形状（标量或 N 元组）必须保持稳定。
///
/// ## 设计说明
///
/// 方法取 `&self`，对象内部使用 `RefCell` 实现可变性；
/// 动画管理器只持有对象的 `Weak` 引用，不延长对象寿命。
///
/// ## 实现示例
///
/// ```rust,ignore
/// struct Button {
///     scale: RefCell<f64>,
/// }
///
/// impl Animatable for Button {
///     fn get_property(&self, property: &str) -> Option<AnimatedValue> {
///         match property {
///             "scale" => Some(AnimatedValue::float(*self.scale.borrow())),
///             _ => None,
///         }
///     }
///
///     fn set_property(&self, property: &str, value: AnimatedValue) -> bool {
///         match (property, value.as_f64()) {
///             ("scale", Some(v)) => { *self.scale.borrow_mut() = v; true }
///             _ => false,
///         }
///     }
///
///     fn property_list(&self) -> &'static [&'static str] {
///         &["scale"]
///     }
/// }
/// ```
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在
    /// - `None`: 属性不存在
    fn get_property(&self, property: &str) -> Option<AnimatedValue>;

    /// 设置属性的新值
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在或值的形状不匹配
    fn set_property(&self, property: &str, value: AnimatedValue) -> bool;

    /// 获取所有可动画属性的列表
    ///
    /// 用于调试和验证。
    fn property_list(&self) -> &'static [&'static str];
}

/// 单值属性容器
///
/// 使用 `Rc<RefCell<AnimatedValue>>` 包装一个值，克隆后共享同一份数据。
/// 唯一的属性名为 [`PropertyCell::PROPERTY`]。
#[derive(Debug, Clone)]
pub struct PropertyCell {
    value: Rc<RefCell<AnimatedValue>>,
}

impl PropertyCell {
    /// 属性名
    pub const PROPERTY: &'static str = "value";

    /// 创建新的属性容器
    pub fn new(initial: impl Into<AnimatedValue>) -> Self {
        Self {
            value: Rc::new(RefCell::new(initial.into())),
        }
    }

    /// 当前值
    pub fn get(&self) -> AnimatedValue {
        *self.value.borrow()
    }

    /// 直接设置值（不经过动画）
    pub fn set(&self, value: impl Into<AnimatedValue>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl Animatable for PropertyCell {
    fn get_property(&self, property: &str) -> Option<AnimatedValue> {
        (property == Self::PROPERTY).then(|| self.get())
    }

    fn set_property(&self, property: &str, value: AnimatedValue) -> bool {
        if property != Self::PROPERTY || !self.get().same_shape(&value) {
            return false;
        }
        self.set(value);
        true
    }

    fn property_list(&self) -> &'static [&'static str] {
        &[Self::PROPERTY]
    }
}
