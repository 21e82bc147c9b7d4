// crates/orca_mesh/src/error.rs

//! 网格引擎错误类型
//!
//! 包含网格解析、网格描述文件、分区与函数空间构建的错误定义。

use std::path::PathBuf;
use thiserror::Error;

/// 网格引擎结果类型
pub type MeshResult<T> = Result<T, MeshError>;

/// 网格引擎错误枚举
#[derive(Error, Debug)]
pub enum MeshError {
    /// 未知的网格名
    #[error("未知网格名: \"{name}\"")]
    UnknownGrid {
        /// 请求的网格名
        name: String,
    },

    /// 网格描述文件读取或解析失败
    #[error("网格描述文件错误: {path}: {message}")]
    GridSpec {
        /// 文件路径
        path: PathBuf,
        /// 错误信息
        message: String,
    },

    /// 网格描述内容无效
    #[error("网格描述无效: {field} - {reason}")]
    InvalidGridSpec {
        /// 字段名
        field: &'static str,
        /// 原因
        reason: String,
    },

    /// 不支持的分区器类型
    #[error("不支持的分区器类型: \"{name}\" (支持: {supported:?})")]
    UnknownPartitioner {
        /// 请求的类型
        name: String,
        /// 支持的类型
        supported: Vec<&'static str>,
    },

    /// 分区失败
    #[error("分区失败 [{partitioner}]: {reason}")]
    Partition {
        /// 分区器类型
        partitioner: &'static str,
        /// 原因
        reason: String,
    },

    /// 通信器参数无效
    #[error("通信器无效: rank {rank}, size {size}")]
    InvalidCommunicator {
        /// 进程号
        rank: usize,
        /// 进程总数
        size: usize,
    },

    /// 函数空间 halo 超过网格 halo
    #[error("函数空间 halo {requested} 超过网格 halo {available}")]
    HaloExceedsMesh {
        /// 请求的 halo
        requested: usize,
        /// 网格生成时的 halo
        available: usize,
    },
}

impl MeshError {
    /// 构造网格描述文件错误
    pub fn grid_spec(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::GridSpec {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 构造网格描述无效错误
    pub fn invalid_grid_spec(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGridSpec {
            field,
            reason: reason.into(),
        }
    }

    /// 构造分区错误
    pub fn partition(partitioner: &'static str, reason: impl Into<String>) -> Self {
        Self::Partition {
            partitioner,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_partitioner_display() {
        let err = MeshError::UnknownPartitioner {
            name: "zoltan".into(),
            supported: vec!["serial", "equal_bands"],
        };
        let msg = err.to_string();
        assert!(msg.contains("zoltan"));
        assert!(msg.contains("equal_bands"));
    }

    #[test]
    fn test_grid_spec_display() {
        let err = MeshError::grid_spec("/data/grid.yaml", "缺少字段 nx");
        assert!(err.to_string().contains("/data/grid.yaml"));
    }
}
