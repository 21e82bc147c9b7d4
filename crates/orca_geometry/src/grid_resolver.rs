// crates/orca_geometry/src/grid_resolver.rs

//! 网格解析
//!
//! 把配置中的 `grid name` 解析为网格：
//!
//! 1. 与规范 ORCA 网格名精确匹配时按名称构建，不访问文件系统
//! 2. 否则若是存在的文件路径，从网格描述文件构建
//! 3. 否则返回 [`GeometryError::InvalidGrid`]

use std::path::Path;

use orca_mesh::{Grid, OrcaResolution, OrcaStagger};

use crate::error::{GeometryError, GeometryResult};

/// 规范 ORCA 网格名：`<ORCA|eORCA><1|2|025|12>_<F|T|U|V|W>`
pub fn orca_grid_names() -> Vec<String> {
    let mut names = Vec::with_capacity(OrcaStagger::ALL.len() * OrcaResolution::ALL.len() * 2);
    for stagger in OrcaStagger::ALL {
        for resolution in OrcaResolution::ALL {
            names.push(format!("ORCA{}_{}", resolution.tag(), stagger.tag()));
            names.push(format!("eORCA{}_{}", resolution.tag(), stagger.tag()));
        }
    }
    names
}

/// 是否为规范 ORCA 网格名（区分大小写的精确匹配）
pub fn is_orca_grid_name(spec: &str) -> bool {
    orca_grid_names().iter().any(|name| name == spec)
}

/// 解析网格名或网格描述文件路径
pub fn resolve_grid(spec: &str) -> GeometryResult<Grid> {
    if is_orca_grid_name(spec) {
        log::debug!("按名称解析网格: {}", spec);
        return Ok(Grid::from_name(spec)?);
    }
    let path = Path::new(spec);
    if !spec.is_empty() && path.is_file() {
        log::debug!("从网格描述文件解析网格: {}", path.display());
        return Ok(Grid::from_spec_file(path)?);
    }
    Err(GeometryError::InvalidGrid {
        spec: spec.to_string(),
    })
}
