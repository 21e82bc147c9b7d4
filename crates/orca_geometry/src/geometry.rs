// crates/orca_geometry/src/geometry.rs

//! ORCA 几何门面
//!
//! 持有已解析的网格、局部网格、函数空间和变量目录，向状态/场构建器和
//! 观测算子提供只读查询。
//!
//! # 构造流程
//!
//! ```text
//! GeometryParams ─> Variables / VariableCatalog
//!                ─> resolve_grid("grid name")
//!                ─> MeshBuilder (effective halo, partitioner, mesh, NodeColumns)
//! ```
//!
//! 构造是全有或全无的：任一步失败都直接返回错误。
//!
//! # 示例
//!
//! ```rust
//! use orca_config::GeometryParams;
//! use orca_geometry::{Geometry, NoopDiagnostics};
//! use orca_mesh::SerialComm;
//!
//! let params = GeometryParams::from_yaml_str(r#"
//! number levels: 75
//! grid name: ORCA2_T
//! partitioner: serial
//! nemo fields:
//!   - name: sea_surface_height
//!     nemo name: sossheig
//!     model space: surface
//!     variable type: background
//!     field precision: double
//! "#).unwrap();
//!
//! let geometry = Geometry::with_diagnostics(&params, &SerialComm, Box::new(NoopDiagnostics)).unwrap();
//! assert_eq!(geometry.variable_sizes(&["sea_surface_height"]).unwrap(), vec![1]);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use orca_config::{FieldPrecision, GeometryParams, ModelSpace};
use orca_mesh::{Communicator, Grid, Mesh, NodeColumns};

use crate::catalog::{distinct_variables, VariableCatalog};
use crate::diagnostics::{Diagnostics, StatusTimer};
use crate::error::{GeometryError, GeometryResult};
use crate::grid_resolver::resolve_grid;
use crate::mesh_builder::{MeshBuilder, MeshState};
use crate::variables::Variables;

/// 节点经纬度（平行数组）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    /// 纬度 [deg]
    pub lats: Vec<f64>,
    /// 经度 [deg]
    pub lons: Vec<f64>,
}

impl LatLon {
    /// 点数
    pub fn len(&self) -> usize {
        self.lats.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }
}

/// ORCA 几何
///
/// 每次运行构造一次，之后不再修改。通信器由调用方持有。
pub struct Geometry<'c> {
    comm: &'c dyn Communicator,
    params: GeometryParams,
    vars: Variables,
    n_levels: usize,
    catalog: VariableCatalog,
    grid: Grid,
    mesh_state: MeshState,
    // 随几何实例一起释放，计时诊断在 drop 时输出总耗时
    _diagnostics: Box<dyn Diagnostics>,
}

impl<'c> Geometry<'c> {
    /// 使用默认计时诊断构造
    pub fn new(params: &GeometryParams, comm: &'c dyn Communicator) -> GeometryResult<Self> {
        Self::with_diagnostics(params, comm, Box::new(StatusTimer::start("Geometry(ORCA): ")))
    }

    /// 从配置文件构造
    pub fn from_file<P: AsRef<Path>>(path: P, comm: &'c dyn Communicator) -> GeometryResult<Self> {
        let params = GeometryParams::from_file(path)?;
        Self::new(&params, comm)
    }

    /// 注入诊断接收端构造
    pub fn with_diagnostics(
        params: &GeometryParams,
        comm: &'c dyn Communicator,
        diagnostics: Box<dyn Diagnostics>,
    ) -> GeometryResult<Self> {
        let vars = distinct_variables(params)?;
        let n_levels = params.n_levels;
        diagnostics.log_status("start");

        let catalog = VariableCatalog::parse(params)?;
        let grid = resolve_grid(&params.grid_name)?;
        let mesh_state = MeshBuilder::from_params(params).build(&grid, comm, diagnostics.as_ref())?;

        log::info!(
            "Geometry(ORCA): 网格 {} rank {}/{} 节点 {} halo {} 变量 {}",
            grid,
            comm.rank(),
            comm.size(),
            mesh_state.function_space().size(),
            mesh_state.halo(),
            vars.len()
        );

        Ok(Self {
            comm,
            params: params.clone(),
            vars,
            n_levels,
            catalog,
            grid,
            mesh_state,
            _diagnostics: diagnostics,
        })
    }

    // ========================================================================
    // 访问器
    // ========================================================================

    /// 通信器
    pub fn comm(&self) -> &'c dyn Communicator {
        self.comm
    }

    /// 几何配置
    pub fn params(&self) -> &GeometryParams {
        &self.params
    }

    /// 变量目录
    pub fn catalog(&self) -> &VariableCatalog {
        &self.catalog
    }

    /// 体变量层数
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// 有效 halo 宽度
    pub fn halo(&self) -> usize {
        self.mesh_state.halo()
    }

    /// 已解析的网格
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// 局部网格
    pub fn mesh(&self) -> &Mesh {
        self.mesh_state.mesh()
    }

    /// 节点函数空间
    pub fn function_space(&self) -> &NodeColumns {
        self.mesh_state.function_space()
    }

    // ========================================================================
    // 变量查询
    // ========================================================================

    /// 有序去重的变量名
    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    /// NEMO 内部变量名
    pub fn nemo_var_name(&self, name: &str) -> GeometryResult<&str> {
        self.catalog.internal_name(name)
    }

    /// 每个变量的层数：表层为 1，体变量为 `number levels`
    pub fn variable_sizes<S: AsRef<str>>(&self, vars: &[S]) -> GeometryResult<Vec<usize>> {
        vars.iter()
            .map(|var| {
                let name = var.as_ref();
                if !self.catalog.contains(name) {
                    return Err(GeometryError::unknown_variable_with_hint(
                        "variable_sizes",
                        name,
                    ));
                }
                self.catalog.level_count(name, self.n_levels)
            })
            .collect()
    }

    /// 每个变量的模型空间
    ///
    /// 未知变量的错误附带补救提示：把变量加入模型配置，或从依赖方
    /// （例如观测过滤器）配置中移除。
    pub fn variable_nemo_spaces<S: AsRef<str>>(&self, vars: &[S]) -> GeometryResult<Vec<ModelSpace>> {
        vars.iter()
            .map(|var| {
                let name = var.as_ref();
                if !self.catalog.contains(name) {
                    return Err(GeometryError::unknown_variable_with_hint(
                        "variable_nemo_spaces",
                        name,
                    ));
                }
                self.catalog.model_space(name)
            })
            .collect()
    }

    /// 变量的数据来源类别是否为 `variable_type`（背景场、方差场、MDT 等）
    pub fn variable_in_variable_type(
        &self,
        variable_name: &str,
        variable_type: &str,
    ) -> GeometryResult<bool> {
        self.catalog.is_member_of_type(variable_name, variable_type)
    }

    /// 承载变量数据的场精度
    pub fn field_precision(&self, variable_name: &str) -> GeometryResult<FieldPrecision> {
        self.catalog.precision(variable_name)
    }

    // ========================================================================
    // 坐标
    // ========================================================================

    /// 函数空间节点经纬度
    ///
    /// 非 ghost 节点总是包含；`include_halo` 为真时再加入 halo 距离大于 0 的
    /// ghost 节点。顺序与函数空间节点顺序一致。
    pub fn latlon(&self, include_halo: bool) -> LatLon {
        let fs = self.function_space();
        let nodes = self.mesh().nodes();
        let lonlat = fs.lonlat();

        let mut out = LatLon::default();
        for node in fs.nodes() {
            let required = !nodes.is_ghost(node) || (include_halo && nodes.halo_distance(node) > 0);
            if required {
                out.lons.push(lonlat[node][0]);
                out.lats.push(lonlat[node][1]);
            }
        }
        out
    }
}

impl std::fmt::Debug for Geometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geometry")
            .field("comm", &self.comm.name())
            .field("grid", &self.grid)
            .field("n_levels", &self.n_levels)
            .field("halo", &self.halo())
            .field("variables", &self.vars)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Display for Geometry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Geometry(ORCA):")?;
        writeln!(f, "  grid:        {}", self.grid)?;
        writeln!(f, "  levels:      {}", self.n_levels)?;
        writeln!(f, "  partitioner: {}", self.params.partitioner)?;
        writeln!(f, "  halo:        {}", self.halo())?;
        writeln!(
            f,
            "  nodes:       {} ({} owned) on rank {}/{}",
            self.function_space().size(),
            self.mesh().n_owned(),
            self.comm.rank(),
            self.comm.size()
        )?;
        write!(f, "  variables:   {}", self.vars)
    }
}
