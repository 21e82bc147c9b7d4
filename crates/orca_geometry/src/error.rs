// crates/orca_geometry/src/error.rs

//! 几何层错误类型
//!
//! 所有错误立即返回给调用方，不做内部重试；构造期间任何校验失败都不会
//! 产生部分构建的 [`Geometry`](crate::Geometry)。

use thiserror::Error;

use orca_config::ConfigError;
use orca_mesh::MeshError;

/// 几何层结果类型
pub type GeometryResult<T> = Result<T, GeometryError>;

/// 未知变量的补救提示
pub const UNKNOWN_VARIABLE_HINT: &str =
    "请将该状态变量加入模型配置, 或从观测过滤器配置中移除对应的观测变量.";

/// 几何层错误
#[derive(Error, Debug)]
pub enum GeometryError {
    /// 网格既不是合法命名网格也不是存在的描述文件
    #[error("网格 \"{spec}\" 既不是有效的命名网格, 也不是网格描述文件路径")]
    InvalidGrid {
        /// 配置的网格字符串
        spec: String,
    },

    /// 配置缺失或格式错误
    #[error("配置校验失败: {0}")]
    SchemaValidation(#[from] ConfigError),

    /// 变量不在目录中
    #[error("{context}: 变量 \"{name}\" 不在变量目录中.{}", .hint.map(|h| format!(" {}", h)).unwrap_or_default())]
    UnknownVariable {
        /// 触发查询的操作
        context: &'static str,
        /// 变量名
        name: String,
        /// 补救提示
        hint: Option<&'static str>,
    },

    /// 模型空间标签无效
    #[error("变量 \"{name}\" 的模型空间 \"{space}\" 无效, 期望 surface / volume / vertical")]
    InvalidModelSpace {
        /// 变量名
        name: String,
        /// 存储的标签
        space: String,
    },

    /// 网格引擎错误
    #[error("网格引擎错误: {0}")]
    Mesh(#[from] MeshError),
}

impl GeometryError {
    /// 构造未知变量错误
    pub fn unknown_variable(context: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownVariable {
            context,
            name: name.into(),
            hint: None,
        }
    }

    /// 构造带补救提示的未知变量错误
    pub fn unknown_variable_with_hint(context: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownVariable {
            context,
            name: name.into(),
            hint: Some(UNKNOWN_VARIABLE_HINT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variable_display() {
        let err = GeometryError::unknown_variable("internal_name", "sea_ice_area");
        let msg = err.to_string();
        assert!(msg.contains("internal_name"));
        assert!(msg.contains("sea_ice_area"));
        assert!(!msg.contains(UNKNOWN_VARIABLE_HINT));
    }

    #[test]
    fn test_unknown_variable_hint_display() {
        let err = GeometryError::unknown_variable_with_hint("variable_nemo_spaces", "unknown_var");
        let msg = err.to_string();
        assert!(msg.contains("unknown_var"));
        assert!(msg.contains(UNKNOWN_VARIABLE_HINT));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: GeometryError = ConfigError::Missing("grid name".into()).into();
        assert!(matches!(err, GeometryError::SchemaValidation(_)));
    }
}
