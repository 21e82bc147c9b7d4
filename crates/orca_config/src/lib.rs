// crates/orca_config/src/lib.rs

//! ORCA Geometry Config Layer
//!
//! 配置层，提供几何配置参数、场精度与模型空间枚举。
//!
//! # 模块概览
//!
//! - [`params`]: GeometryParams / NemoFieldParams 几何配置
//! - [`precision`]: FieldPrecision 枚举（float/double）
//! - [`model_space`]: ModelSpace 枚举（surface/volume/vertical）
//! - [`error`]: 配置错误类型

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod model_space;
pub mod params;
pub mod precision;

// 重导出核心类型
pub use error::{ConfigError, ConfigResult};
pub use model_space::{ModelSpace, ModelSpaceParseError};
pub use params::{GeometryParams, NemoFieldParams};
pub use precision::{FieldPrecision, PrecisionParseError};
