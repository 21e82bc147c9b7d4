// crates/orca_geometry/src/lib.rs

//! ORCA 同化几何
//!
//! 为海洋模式数据同化接口提供几何抽象：解析命名网格或网格描述文件，
//! 在分布式进程间分区，生成带可选 halo 的网格，并根据配置给出每个变量的
//! 元数据（层数、存储精度、数据来源类别、模型空间）。
//!
//! # 模块结构
//!
//! - [`grid_resolver`]: 网格名/描述文件解析
//! - [`catalog`]: 变量目录与查询
//! - [`mesh_builder`]: halo 策略与网格、函数空间构建
//! - [`geometry`]: 几何门面
//! - [`diagnostics`]: 构造期诊断（耗时与峰值内存）
//! - [`variables`]: 有序去重的变量名列表
//! - [`logging`]: env_logger 初始化
//! - [`error`]: 几何层错误类型
//!
//! # 层级
//!
//! ```text
//! orca_geometry ─> orca_config (GeometryParams, FieldPrecision, ModelSpace)
//!               ─> orca_mesh   (Grid, Partitioner, MeshGenerator, NodeColumns, Communicator)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod grid_resolver;
pub mod logging;
pub mod mesh_builder;
pub mod variables;

// 重导出核心类型
pub use catalog::{distinct_variables, VariableCatalog};
pub use diagnostics::{Diagnostics, NoopDiagnostics, StatusTimer};
pub use error::{GeometryError, GeometryResult, UNKNOWN_VARIABLE_HINT};
pub use geometry::{Geometry, LatLon};
pub use grid_resolver::{is_orca_grid_name, orca_grid_names, resolve_grid};
pub use mesh_builder::{effective_halo, MeshBuilder, MeshState};
pub use variables::Variables;
