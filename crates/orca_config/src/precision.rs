// crates/orca_config/src/precision.rs

//! 场存储精度
//!
//! `field precision` 决定承载变量数据的场使用单精度还是双精度存储。

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 场存储精度
///
/// 配置中写作 `float`（别名 `single`、`f32`）或 `double`（别名 `f64`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldPrecision {
    /// 单精度 (f32)
    #[serde(alias = "single", alias = "f32")]
    Float,
    /// 双精度 (f64)
    #[serde(alias = "f64")]
    Double,
}

impl FieldPrecision {
    /// 配置中的规范名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    /// 每个标量占用的字节数
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Float => 4,
            Self::Double => 8,
        }
    }
}

impl Default for FieldPrecision {
    fn default() -> Self {
        Self::Double
    }
}

impl std::fmt::Display for FieldPrecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 精度解析错误
#[derive(Debug, Clone)]
pub struct PrecisionParseError(String);

impl FromStr for FieldPrecision {
    type Err = PrecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" | "single" | "f32" => Ok(Self::Float),
            "double" | "f64" => Ok(Self::Double),
            _ => Err(PrecisionParseError(s.to_string())),
        }
    }
}

impl std::fmt::Display for PrecisionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "无效的场精度: '{}', 期望 'float' 或 'double'", self.0)
    }
}

impl std::error::Error for PrecisionParseError {}
