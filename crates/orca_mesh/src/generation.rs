// crates/orca_mesh/src/generation.rs

//! 网格生成
//!
//! [`MeshGenerator`] 按分区结果为当前 rank 生成局部网格节点：
//!
//! 1. 本 rank 拥有的点，按全局索引排序
//! 2. 第 1..=halo 圈邻接点（Chebyshev 索引距离），每圈按全局索引排序
//!
//! ORCA 网格的 i 索引跨东西向接缝周期回绕：首列左侧接倒数第三列，
//! 末列右侧接第三列（首末两列本身是重复列）。区域网格不回绕。
//!
//! 每个节点记录经纬度、全局索引、归属分区、ghost 标志和 halo 距离。
//! 周期重复列始终为 ghost；拥有者不是本 rank 的 halo 点也是 ghost。

use crate::comm::Communicator;
use crate::error::MeshResult;
use crate::grid::{Grid, GridKind};
use crate::partitioner::{Distribution, Partitioner};

const UNREACHED: u32 = u32::MAX;

/// 网格节点（SoA 布局）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshNodes {
    /// 经纬度 [lon, lat]
    pub lonlat: Vec<[f64; 2]>,
    /// 全局索引
    pub global_index: Vec<usize>,
    /// 归属分区
    pub partition: Vec<usize>,
    /// ghost 标志
    pub ghost: Vec<bool>,
    /// halo 距离，拥有点为 0
    pub halo: Vec<u32>,
}

impl MeshNodes {
    fn with_capacity(n: usize) -> Self {
        Self {
            lonlat: Vec::with_capacity(n),
            global_index: Vec::with_capacity(n),
            partition: Vec::with_capacity(n),
            ghost: Vec::with_capacity(n),
            halo: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, lonlat: [f64; 2], global: usize, part: usize, ghost: bool, halo: u32) {
        self.lonlat.push(lonlat);
        self.global_index.push(global);
        self.partition.push(part);
        self.ghost.push(ghost);
        self.halo.push(halo);
    }

    /// 节点数
    pub fn size(&self) -> usize {
        self.lonlat.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.lonlat.is_empty()
    }

    /// 节点是否为 ghost
    #[inline]
    pub fn is_ghost(&self, node: usize) -> bool {
        self.ghost[node]
    }

    /// 节点 halo 距离
    #[inline]
    pub fn halo_distance(&self, node: usize) -> u32 {
        self.halo[node]
    }
}

/// 分布式局部网格（生成后只读）
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    grid_name: String,
    halo: usize,
    part: usize,
    n_parts: usize,
    nodes: MeshNodes,
}

impl Mesh {
    /// 源网格名
    pub fn grid_name(&self) -> &str {
        &self.grid_name
    }

    /// 生成时使用的 halo 宽度
    pub fn halo(&self) -> usize {
        self.halo
    }

    /// 本 rank 的分区号
    pub fn part(&self) -> usize {
        self.part
    }

    /// 分区总数
    pub fn n_parts(&self) -> usize {
        self.n_parts
    }

    /// 节点数据
    pub fn nodes(&self) -> &MeshNodes {
        &self.nodes
    }

    /// 非 ghost 节点数
    pub fn n_owned(&self) -> usize {
        self.nodes.ghost.iter().filter(|&&g| !g).count()
    }
}

/// 网格生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshGenerator {
    halo: usize,
}

impl MeshGenerator {
    /// 创建指定 halo 宽度的生成器
    pub fn new(halo: usize) -> Self {
        Self { halo }
    }

    /// halo 宽度
    pub fn halo(&self) -> usize {
        self.halo
    }

    /// 生成本 rank 的局部网格（集合操作）
    pub fn generate(
        &self,
        grid: &Grid,
        partitioner: &Partitioner,
        comm: &dyn Communicator,
    ) -> MeshResult<Mesh> {
        let rank = comm.rank();
        let distribution = partitioner.partition(grid)?;

        let (nodes, n_parts) = match distribution {
            Distribution::Replicated => (self.replicated_nodes(grid, rank), 1),
            Distribution::Partitioned { n_parts, owners } => {
                (self.partitioned_nodes(grid, &owners, rank), n_parts)
            }
        };
        comm.barrier();

        log::debug!(
            "网格生成完成: {} rank {}/{} 节点 {} (halo {})",
            grid.name(),
            rank,
            comm.size(),
            nodes.size(),
            self.halo
        );

        Ok(Mesh {
            grid_name: grid.name().to_string(),
            halo: self.halo,
            part: rank,
            n_parts,
            nodes,
        })
    }

    fn replicated_nodes(&self, grid: &Grid, rank: usize) -> MeshNodes {
        let mut nodes = MeshNodes::with_capacity(grid.size());
        for g in 0..grid.size() {
            let (i, j) = grid.ij(g);
            nodes.push(grid.lonlat(i, j), g, rank, grid.is_periodic_duplicate(i), 0);
        }
        nodes
    }

    fn partitioned_nodes(&self, grid: &Grid, owners: &[usize], rank: usize) -> MeshNodes {
        let mut distance = vec![UNREACHED; grid.size()];
        let owned: Vec<usize> = (0..grid.size()).filter(|&g| owners[g] == rank).collect();
        for &g in &owned {
            distance[g] = 0;
        }

        let mut rings: Vec<Vec<usize>> = Vec::with_capacity(self.halo);
        let mut frontier = owned.clone();
        for ring in 1..=self.halo {
            let mut next = Vec::new();
            for &g in &frontier {
                for q in neighbours(grid, g) {
                    if distance[q] == UNREACHED {
                        distance[q] = ring as u32;
                        next.push(q);
                    }
                }
            }
            next.sort_unstable();
            frontier = next.clone();
            rings.push(next);
        }

        let n_local = owned.len() + rings.iter().map(Vec::len).sum::<usize>();
        let mut nodes = MeshNodes::with_capacity(n_local);
        for g in owned.into_iter().chain(rings.into_iter().flatten()) {
            let (i, j) = grid.ij(g);
            let ghost = owners[g] != rank || grid.is_periodic_duplicate(i);
            nodes.push(grid.lonlat(i, j), g, owners[g], ghost, distance[g]);
        }
        nodes
    }
}

/// 8 邻域内的有效点
fn neighbours(grid: &Grid, g: usize) -> impl Iterator<Item = usize> + '_ {
    let (i, j) = grid.ij(g);
    let (nx, ny) = (grid.nx() as isize, grid.ny() as isize);
    // 东西向周期：内部列数
    let period = match grid.kind() {
        GridKind::Orca { .. } => Some(nx - 2),
        GridKind::Regional { .. } => None,
    };
    (-1isize..=1)
        .flat_map(|dj| (-1isize..=1).map(move |di| (di, dj)))
        .filter(|&(di, dj)| di != 0 || dj != 0)
        .filter_map(move |(di, dj)| {
            let nj = j as isize + dj;
            if nj < 0 || nj >= ny {
                return None;
            }
            let mut ni = i as isize + di;
            if ni < 0 {
                ni += period?;
            } else if ni >= nx {
                ni -= period?;
            }
            Some(grid.index(ni as usize, nj as usize))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::{LocalComm, SerialComm};
    use crate::partitioner::PartitionerConfig;

    fn orca2() -> Grid {
        Grid::from_name("ORCA2_T").unwrap()
    }

    #[test]
    fn test_serial_mesh_has_all_points() {
        let grid = orca2();
        let partitioner = Partitioner::new(&PartitionerConfig::new("serial"), &SerialComm).unwrap();
        let mesh = MeshGenerator::new(0).generate(&grid, &partitioner, &SerialComm).unwrap();
        assert_eq!(mesh.nodes().size(), grid.size());
        // 只有周期重复列是 ghost
        assert_eq!(mesh.n_owned(), (grid.nx() - 2) * grid.ny());
        assert!(mesh.nodes().halo.iter().all(|&h| h == 0));
    }

    #[test]
    fn test_partitioned_mesh_halo_rings() {
        let grid = orca2();
        let comm = LocalComm::new(1, 3).unwrap();
        let partitioner = Partitioner::new(&PartitionerConfig::new("equal_bands"), &comm).unwrap();
        let mesh = MeshGenerator::new(2).generate(&grid, &partitioner, &comm).unwrap();
        let nodes = mesh.nodes();

        assert_eq!(mesh.part(), 1);
        assert_eq!(mesh.n_parts(), 3);
        assert!(nodes.halo.iter().any(|&h| h == 1));
        assert!(nodes.halo.iter().any(|&h| h == 2));
        assert!(nodes.halo.iter().all(|&h| h <= 2));
        // halo 点都属于其他分区
        for n in 0..nodes.size() {
            if nodes.halo_distance(n) > 0 {
                assert!(nodes.is_ghost(n));
                assert_ne!(nodes.partition[n], 1);
            }
        }
        // 圈序非降
        assert!(nodes.halo.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_partitions_cover_grid_once() {
        let grid = orca2();
        let mut owned_total = 0;
        for comm in LocalComm::group(4).unwrap() {
            let partitioner =
                Partitioner::new(&PartitionerConfig::new("checkerboard"), &comm).unwrap();
            let mesh = MeshGenerator::new(1).generate(&grid, &partitioner, &comm).unwrap();
            owned_total += mesh
                .nodes()
                .partition
                .iter()
                .zip(&mesh.nodes().halo)
                .filter(|&(&p, &h)| p == comm.rank() && h == 0)
                .count();
        }
        assert_eq!(owned_total, grid.size());
    }

    #[test]
    fn test_halo_wraps_across_periodic_seam() {
        let grid = orca2();
        let nx = grid.nx();
        let config = PartitionerConfig::new("checkerboard");

        // 西侧块的 halo 含东侧块的倒数第三列
        let west = LocalComm::new(0, 4).unwrap();
        let partitioner = Partitioner::new(&config, &west).unwrap();
        let mesh = MeshGenerator::new(1).generate(&grid, &partitioner, &west).unwrap();
        let nodes = mesh.nodes();
        let wrapped = (0..nodes.size()).find(|&n| {
            nodes.halo_distance(n) == 1 && grid.ij(nodes.global_index[n]).0 == nx - 3
        });
        let n = wrapped.expect("west block should see the east edge");
        assert_eq!(nodes.partition[n], 1);
        assert!(nodes.is_ghost(n));

        // 东侧块的 halo 含西侧块的第三列
        let east = LocalComm::new(1, 4).unwrap();
        let partitioner = Partitioner::new(&config, &east).unwrap();
        let mesh = MeshGenerator::new(1).generate(&grid, &partitioner, &east).unwrap();
        let nodes = mesh.nodes();
        assert!((0..nodes.size()).any(|n| {
            nodes.halo_distance(n) == 1
                && grid.ij(nodes.global_index[n]).0 == 2
                && nodes.partition[n] == 0
        }));
    }

    #[test]
    fn test_regional_grid_does_not_wrap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strip.yaml");
        std::fs::write(
            &path,
            "nx: 8\nny: 4\nwest: 0.0\neast: 70.0\nsouth: 0.0\nnorth: 30.0\n",
        )
        .unwrap();
        let grid = Grid::from_spec_file(&path).unwrap();

        let comm = LocalComm::new(0, 2).unwrap();
        let partitioner = Partitioner::new(&PartitionerConfig::new("checkerboard"), &comm).unwrap();
        let mesh = MeshGenerator::new(1).generate(&grid, &partitioner, &comm).unwrap();
        let nodes = mesh.nodes();
        let halo_columns: Vec<usize> = (0..nodes.size())
            .filter(|&n| nodes.halo_distance(n) == 1)
            .map(|n| grid.ij(nodes.global_index[n]).0)
            .collect();
        assert_eq!(halo_columns, vec![4; 4]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let grid = orca2();
        let comm = LocalComm::new(0, 2).unwrap();
        let partitioner = Partitioner::new(&PartitionerConfig::new("equal_bands"), &comm).unwrap();
        let generator = MeshGenerator::new(1);
        let a = generator.generate(&grid, &partitioner, &comm).unwrap();
        let b = generator.generate(&grid, &partitioner, &comm).unwrap();
        assert_eq!(a, b);
    }
}
