// crates/orca_geometry/src/mesh_builder.rs

//! 网格构建
//!
//! 组合已解析的网格、分区策略和 halo 策略，生成分布式网格及节点函数空间。
//! 网格生成是最耗资源的一步，每个几何实例只调用一次。

use orca_config::GeometryParams;
use orca_mesh::{Communicator, Grid, Mesh, MeshGenerator, NodeColumns, Partitioner};

use crate::diagnostics::Diagnostics;
use crate::error::GeometryResult;

/// 有效 halo 宽度
///
/// `serial` 分区或单进程时每个进程已持有全部数据，请求的 halo 强制为 0。
pub fn effective_halo(requested: usize, partitioner: &str, comm_size: usize) -> usize {
    if (partitioner == "serial" || comm_size == 1) && requested > 0 {
        log::warn!(
            "forcing halo = 0 (请求 {}), 当前设置下所有进程持有全部数据",
            requested
        );
        return 0;
    }
    requested
}

/// 网格与函数空间（构建后只读）
#[derive(Debug, Clone, PartialEq)]
pub struct MeshState {
    mesh: Mesh,
    function_space: NodeColumns,
    halo: usize,
}

impl MeshState {
    /// 局部网格
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// 节点函数空间
    pub fn function_space(&self) -> &NodeColumns {
        &self.function_space
    }

    /// 有效 halo 宽度
    pub fn halo(&self) -> usize {
        self.halo
    }
}

/// 网格构建器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshBuilder {
    requested_halo: usize,
    partitioner_type: String,
}

impl MeshBuilder {
    /// 指定请求的 halo 与分区器类型
    pub fn new(requested_halo: usize, partitioner_type: impl Into<String>) -> Self {
        Self {
            requested_halo,
            partitioner_type: partitioner_type.into(),
        }
    }

    /// 从几何配置读取 `source mesh halo` 与 `partitioner`
    pub fn from_params(params: &GeometryParams) -> Self {
        Self::new(params.source_mesh_halo, params.partitioner.clone())
    }

    /// 构建网格与函数空间（集合操作，各 rank 须以相同配置调用）
    pub fn build(
        &self,
        grid: &Grid,
        comm: &dyn Communicator,
        diagnostics: &dyn Diagnostics,
    ) -> GeometryResult<MeshState> {
        let halo = effective_halo(self.requested_halo, &self.partitioner_type, comm.size());
        let generator = MeshGenerator::new(halo);
        diagnostics.log_status("mesh generator");

        let mut partitioner_config = grid.default_partitioner();
        partitioner_config.set_type(self.partitioner_type.as_str());
        let partitioner = Partitioner::new(&partitioner_config, comm)?;
        diagnostics.log_status("partitioner");

        let mesh = generator.generate(grid, &partitioner, comm)?;
        diagnostics.log_status("mesh");

        let function_space = NodeColumns::new(&mesh, halo)?;
        diagnostics.log_status("function space");

        Ok(MeshState {
            mesh,
            function_space,
            halo,
        })
    }
}
