// crates/orca_mesh/src/lib.rs

//! ORCA 网格引擎
//!
//! 为几何层提供窄接口的参考实现：网格解析、分区、带 halo 的网格生成
//! 和节点函数空间。
//!
//! # 模块结构
//!
//! - [`grid`]: ORCA 命名网格与区域网格描述文件
//! - [`partitioner`]: serial / equal_bands / checkerboard 分区器
//! - [`generation`]: 局部网格生成（拥有点 + halo 圈）
//! - [`functionspace`]: NodeColumns 节点柱函数空间
//! - [`comm`]: 通信器抽象
//! - [`error`]: 网格引擎错误类型
//!
//! # 示例
//!
//! ```rust
//! use orca_mesh::{Grid, MeshGenerator, NodeColumns, Partitioner, SerialComm};
//!
//! let grid = Grid::from_name("ORCA2_T").unwrap();
//! let mut config = grid.default_partitioner();
//! config.set_type("serial");
//! let partitioner = Partitioner::new(&config, &SerialComm).unwrap();
//! let mesh = MeshGenerator::new(0).generate(&grid, &partitioner, &SerialComm).unwrap();
//! let fs = NodeColumns::new(&mesh, 0).unwrap();
//! assert_eq!(fs.size(), grid.size());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod comm;
pub mod error;
pub mod functionspace;
pub mod generation;
pub mod grid;
pub mod partitioner;

// 重新导出核心类型
pub use comm::{Communicator, LocalComm, SerialComm};
pub use error::{MeshError, MeshResult};
pub use functionspace::NodeColumns;
pub use generation::{Mesh, MeshGenerator, MeshNodes};
pub use grid::{Grid, GridKind, OrcaResolution, OrcaStagger};
pub use partitioner::{Distribution, Partitioner, PartitionerConfig, PartitionerKind};
