// crates/orca_mesh/src/partitioner.rs

//! 网格分区器
//!
//! 支持的分区器类型：
//!
//! - `serial`: 每个 rank 持有整个网格，不产生 ghost 点
//! - `equal_bands`: 按行主序把网格点均分为连续纬向带
//! - `checkerboard`: 二维块分解，经向块数不少于纬向块数
//!
//! 分区是确定性的，各 rank 以相同配置独立计算得到一致的归属。

use serde::{Deserialize, Serialize};

use crate::comm::Communicator;
use crate::error::{MeshError, MeshResult};
use crate::grid::Grid;

/// 分区器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionerConfig {
    /// 分区器类型
    #[serde(rename = "type")]
    pub partitioner_type: String,
}

impl PartitionerConfig {
    /// 创建分区器配置
    pub fn new(partitioner_type: impl Into<String>) -> Self {
        Self {
            partitioner_type: partitioner_type.into(),
        }
    }

    /// 覆盖分区器类型
    pub fn set_type(&mut self, partitioner_type: impl Into<String>) {
        self.partitioner_type = partitioner_type.into();
    }
}

/// 分区器类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartitionerKind {
    /// 全复制
    Serial,
    /// 纬向带
    EqualBands,
    /// 二维块
    Checkerboard,
}

impl PartitionerKind {
    /// 支持的类型名称
    pub const SUPPORTED: [&'static str; 3] = ["serial", "equal_bands", "checkerboard"];

    /// 类型名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::EqualBands => "equal_bands",
            Self::Checkerboard => "checkerboard",
        }
    }

    /// 解析类型名称（精确匹配）
    pub fn parse(name: &str) -> MeshResult<Self> {
        match name {
            "serial" => Ok(Self::Serial),
            "equal_bands" => Ok(Self::EqualBands),
            "checkerboard" => Ok(Self::Checkerboard),
            _ => Err(MeshError::UnknownPartitioner {
                name: name.to_string(),
                supported: Self::SUPPORTED.to_vec(),
            }),
        }
    }
}

/// 网格点归属
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Distribution {
    /// 每个 rank 持有全部点
    Replicated,
    /// 每个点归属唯一分区
    Partitioned {
        /// 分区数
        n_parts: usize,
        /// 按全局索引的归属分区
        owners: Vec<usize>,
    },
}

/// 分区器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partitioner {
    kind: PartitionerKind,
    n_parts: usize,
}

impl Partitioner {
    /// 按配置和通信器创建，分区数等于通信器大小
    ///
    /// 通信器须满足 `size > 0` 且 `rank < size`。
    pub fn new(config: &PartitionerConfig, comm: &dyn Communicator) -> MeshResult<Self> {
        if comm.size() == 0 || comm.rank() >= comm.size() {
            return Err(MeshError::InvalidCommunicator {
                rank: comm.rank(),
                size: comm.size(),
            });
        }
        let kind = PartitionerKind::parse(&config.partitioner_type)?;
        Ok(Self {
            kind,
            n_parts: comm.size(),
        })
    }

    /// 分区器类型
    pub fn kind(&self) -> PartitionerKind {
        self.kind
    }

    /// 分区数
    pub fn n_parts(&self) -> usize {
        self.n_parts
    }

    /// 是否为全复制分区
    pub fn is_serial(&self) -> bool {
        self.kind == PartitionerKind::Serial
    }

    /// 计算网格点归属
    pub fn partition(&self, grid: &Grid) -> MeshResult<Distribution> {
        match self.kind {
            PartitionerKind::Serial => Ok(Distribution::Replicated),
            PartitionerKind::EqualBands => self.equal_bands(grid),
            PartitionerKind::Checkerboard => self.checkerboard(grid),
        }
    }

    fn equal_bands(&self, grid: &Grid) -> MeshResult<Distribution> {
        let n = grid.size();
        if self.n_parts > n {
            return Err(MeshError::partition(
                self.kind.name(),
                format!("{} 个点无法分给 {} 个分区", n, self.n_parts),
            ));
        }
        let owners = (0..n).map(|g| block_owner(g, n, self.n_parts)).collect();
        Ok(Distribution::Partitioned {
            n_parts: self.n_parts,
            owners,
        })
    }

    fn checkerboard(&self, grid: &Grid) -> MeshResult<Distribution> {
        let (nbx, nby) = block_shape(self.n_parts);
        if nbx > grid.nx() || nby > grid.ny() {
            return Err(MeshError::partition(
                self.kind.name(),
                format!(
                    "{}x{} 块超过网格维度 {}x{}",
                    nbx,
                    nby,
                    grid.nx(),
                    grid.ny()
                ),
            ));
        }
        let owners = (0..grid.size())
            .map(|g| {
                let (i, j) = grid.ij(g);
                let bx = block_owner(i, grid.nx(), nbx);
                let by = block_owner(j, grid.ny(), nby);
                by * nbx + bx
            })
            .collect();
        Ok(Distribution::Partitioned {
            n_parts: self.n_parts,
            owners,
        })
    }
}

/// 把 `0..n` 均分为 `parts` 段，前 `n % parts` 段多一个元素，返回 `index` 所在段
fn block_owner(index: usize, n: usize, parts: usize) -> usize {
    let base = n / parts;
    let rem = n % parts;
    let split = rem * (base + 1);
    if index < split {
        index / (base + 1)
    } else {
        rem + (index - split) / base
    }
}

/// 二维块形状 (nbx, nby)，nbx * nby == parts 且 nbx >= nby
fn block_shape(parts: usize) -> (usize, usize) {
    let mut nby = (parts as f64).sqrt() as usize;
    while nby > 1 && parts % nby != 0 {
        nby -= 1;
    }
    let nby = nby.max(1);
    (parts / nby, nby)
}
