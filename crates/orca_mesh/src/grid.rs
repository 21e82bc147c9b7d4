// crates/orca_mesh/src/grid.rs

//! 网格描述
//!
//! 提供两类网格：
//!
//! - ORCA 三极网格族，按名称构建，形如 `ORCA1_T`、`eORCA025_U`
//! - 区域经纬网格，从网格描述文件构建
//!
//! 参考引擎用规则经纬度近似 ORCA 网格坐标，仅保留维度、交错位置和东西向
//! 周期重复列等结构特征。真实的三极坐标由网格文件提供，不在本引擎范围内。
//!
//! # 网格描述文件
//!
//! `type` 可选，取 `regional`（缺省）或 `regular_lonlat`；`name` 缺省为文件名。
//!
//! ```yaml
//! type: regional
//! name: north_atlantic
//! nx: 40
//! ny: 30
//! west: -60.0
//! east: -10.0
//! south: 20.0
//! north: 60.0
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::{MeshError, MeshResult};
use crate::partitioner::PartitionerConfig;

/// ORCA 分辨率
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrcaResolution {
    /// 1°
    One,
    /// 2°
    Two,
    /// 1/4°
    Quarter,
    /// 1/12°
    Twelfth,
}

impl OrcaResolution {
    /// 全部分辨率
    pub const ALL: [OrcaResolution; 4] = [Self::One, Self::Two, Self::Quarter, Self::Twelfth];

    /// 名称中的分辨率标签
    pub fn tag(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Quarter => "025",
            Self::Twelfth => "12",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// 网格维度 (nx, ny)，含东西向两列周期重复
    ///
    /// 扩展网格 (eORCA) 向南极陆架增加若干行。
    pub fn dims(&self, extended: bool) -> (usize, usize) {
        match (self, extended) {
            (Self::Two, false) => (182, 149),
            (Self::Two, true) => (182, 165),
            (Self::One, false) => (362, 292),
            (Self::One, true) => (362, 332),
            (Self::Quarter, false) => (1442, 1021),
            (Self::Quarter, true) => (1442, 1207),
            (Self::Twelfth, false) => (4322, 3059),
            (Self::Twelfth, true) => (4322, 3606),
        }
    }
}

/// ORCA 交错网格位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrcaStagger {
    /// 涡度点
    F,
    /// 示踪点
    T,
    /// 纬向速度点
    U,
    /// 经向速度点
    V,
    /// 垂向速度点
    W,
}

impl OrcaStagger {
    /// 全部交错位置
    pub const ALL: [OrcaStagger; 5] = [Self::F, Self::T, Self::U, Self::V, Self::W];

    /// 名称中的类型标签
    pub fn tag(&self) -> &'static str {
        match self {
            Self::F => "F",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    /// 相对 T 点的 (i, j) 半格偏移
    fn offset(&self) -> (f64, f64) {
        match self {
            Self::T | Self::W => (0.0, 0.0),
            Self::U => (0.5, 0.0),
            Self::V => (0.0, 0.5),
            Self::F => (0.5, 0.5),
        }
    }
}

/// 网格类别
#[derive(Debug, Clone, PartialEq)]
pub enum GridKind {
    /// ORCA 全球网格
    Orca {
        /// 分辨率
        resolution: OrcaResolution,
        /// 交错位置
        stagger: OrcaStagger,
        /// 是否为扩展网格 (eORCA)
        extended: bool,
    },
    /// 区域规则经纬网格
    Regional {
        /// 西边界 [deg]
        west: f64,
        /// 东边界 [deg]
        east: f64,
        /// 南边界 [deg]
        south: f64,
        /// 北边界 [deg]
        north: f64,
    },
}

fn default_grid_type() -> String {
    "regional".to_string()
}

/// 网格描述文件内容
#[derive(Debug, Clone, Deserialize)]
struct GridSpecFile {
    #[serde(rename = "type", default = "default_grid_type")]
    grid_type: String,
    #[serde(default)]
    name: Option<String>,
    nx: usize,
    ny: usize,
    west: f64,
    east: f64,
    south: f64,
    north: f64,
}

/// 已解析的网格（不可变）
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    name: String,
    nx: usize,
    ny: usize,
    kind: GridKind,
}

const ORCA_SOUTH: f64 = -78.0;
const EORCA_SOUTH: f64 = -85.0;
const ORCA_NORTH: f64 = 90.0;

impl Grid {
    /// 按 ORCA 名称构建，形如 `<ORCA|eORCA><res>_<type>`
    ///
    /// 仅做名称解析，不分配坐标数组。
    pub fn from_name(name: &str) -> MeshResult<Self> {
        let unknown = || MeshError::UnknownGrid {
            name: name.to_string(),
        };
        let (extended, rest) = if let Some(rest) = name.strip_prefix("eORCA") {
            (true, rest)
        } else if let Some(rest) = name.strip_prefix("ORCA") {
            (false, rest)
        } else {
            return Err(unknown());
        };
        let (res_tag, type_tag) = rest.split_once('_').ok_or_else(unknown)?;
        let resolution = OrcaResolution::from_tag(res_tag).ok_or_else(unknown)?;
        let stagger = OrcaStagger::from_tag(type_tag).ok_or_else(unknown)?;
        let (nx, ny) = resolution.dims(extended);
        Ok(Self {
            name: name.to_string(),
            nx,
            ny,
            kind: GridKind::Orca {
                resolution,
                stagger,
                extended,
            },
        })
    }

    /// 从网格描述文件构建（`.json` 按 JSON 解析，其余按 YAML）
    pub fn from_spec_file<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| MeshError::grid_spec(path, e.to_string()))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let spec: GridSpecFile = if is_json {
            serde_json::from_str(&content).map_err(|e| MeshError::grid_spec(path, e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| MeshError::grid_spec(path, e.to_string()))?
        };
        let default_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("regional")
            .to_string();
        Self::regional(
            spec.name.unwrap_or(default_name),
            &spec.grid_type,
            spec.nx,
            spec.ny,
            [spec.west, spec.east, spec.south, spec.north],
        )
    }

    fn regional(
        name: String,
        grid_type: &str,
        nx: usize,
        ny: usize,
        [west, east, south, north]: [f64; 4],
    ) -> MeshResult<Self> {
        if grid_type != "regional" && grid_type != "regular_lonlat" {
            return Err(MeshError::invalid_grid_spec(
                "type",
                format!("不支持的网格类型 \"{}\"", grid_type),
            ));
        }
        if nx < 2 || ny < 2 {
            return Err(MeshError::invalid_grid_spec(
                "nx/ny",
                format!("每个方向至少 2 个点, 实际 {}x{}", nx, ny),
            ));
        }
        if !(west < east) || east - west > 360.0 {
            return Err(MeshError::invalid_grid_spec(
                "west/east",
                format!("经度范围无效 [{}, {}]", west, east),
            ));
        }
        if !(south < north) || south < -90.0 || north > 90.0 {
            return Err(MeshError::invalid_grid_spec(
                "south/north",
                format!("纬度范围无效 [{}, {}]", south, north),
            ));
        }
        Ok(Self {
            name,
            nx,
            ny,
            kind: GridKind::Regional {
                west,
                east,
                south,
                north,
            },
        })
    }

    /// 网格名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 网格类别
    pub fn kind(&self) -> &GridKind {
        &self.kind
    }

    /// x 方向点数
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// y 方向点数
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// 总点数
    pub fn size(&self) -> usize {
        self.nx * self.ny
    }

    /// 行主序全局索引
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        j * self.nx + i
    }

    /// 全局索引还原 (i, j)
    #[inline]
    pub fn ij(&self, index: usize) -> (usize, usize) {
        (index % self.nx, index / self.nx)
    }

    /// 东西向周期重复列（首列与末列）
    ///
    /// 这些点复制了对侧内部列，始终视为 ghost，halo 距离为 0。
    pub fn is_periodic_duplicate(&self, i: usize) -> bool {
        match self.kind {
            GridKind::Orca { .. } => i == 0 || i + 1 == self.nx,
            GridKind::Regional { .. } => false,
        }
    }

    /// 点 (i, j) 的经纬度 [lon, lat]
    pub fn lonlat(&self, i: usize, j: usize) -> [f64; 2] {
        match self.kind {
            GridKind::Orca {
                stagger, extended, ..
            } => {
                let (oi, oj) = stagger.offset();
                let south = if extended { EORCA_SOUTH } else { ORCA_SOUTH };
                let n_interior = self.nx - 2;
                let dlon = 360.0 / n_interior as f64;
                let dlat = (ORCA_NORTH - south) / self.ny as f64;
                // 周期列映射到对侧内部列
                let ii = (i + n_interior - 1) % n_interior;
                let lon = -180.0 + (ii as f64 + oi) * dlon;
                let lat = south + (j as f64 + 0.5 + oj) * dlat;
                [lon, lat.min(ORCA_NORTH)]
            }
            GridKind::Regional {
                west,
                east,
                south,
                north,
            } => {
                let lon = west + i as f64 * (east - west) / (self.nx - 1) as f64;
                let lat = south + j as f64 * (north - south) / (self.ny - 1) as f64;
                [lon, lat]
            }
        }
    }

    /// 网格默认分区配置
    pub fn default_partitioner(&self) -> PartitionerConfig {
        PartitionerConfig::new("equal_bands")
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.nx, self.ny)
    }
}
