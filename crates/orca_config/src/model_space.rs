// crates/orca_config/src/model_space.rs

//! NEMO 模型空间分类
//!
//! 变量的垂向范围：`surface` 只有一层，`volume` 与 `vertical` 都有
//! `number levels` 层。`vertical` 用于从一维数组读取三维深度数据。

use std::str::FromStr;

/// 模型空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelSpace {
    /// 表层变量
    Surface,
    /// 三维体变量
    Volume,
    /// 垂向坐标变量
    Vertical,
}

impl ModelSpace {
    /// 允许的配置取值
    pub const ALLOWED: [&'static str; 3] = ["surface", "volume", "vertical"];

    /// 配置中的标签
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Surface => "surface",
            Self::Volume => "volume",
            Self::Vertical => "vertical",
        }
    }

    /// 是否为表层
    #[inline]
    pub fn is_surface(&self) -> bool {
        matches!(self, Self::Surface)
    }
}

impl std::fmt::Display for ModelSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 模型空间解析错误
#[derive(Debug, Clone)]
pub struct ModelSpaceParseError(pub String);

impl FromStr for ModelSpace {
    type Err = ModelSpaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surface" => Ok(Self::Surface),
            "volume" => Ok(Self::Volume),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ModelSpaceParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ModelSpaceParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "无效的模型空间: '{}', 期望 {:?} 之一",
            self.0,
            ModelSpace::ALLOWED
        )
    }
}

impl std::error::Error for ModelSpaceParseError {}
