// crates/orca_mesh/src/functionspace.rs

//! 节点柱函数空间
//!
//! 把网格节点映射到场存储位置。节点按生成顺序排列，halo 圈号非降，
//! 因此 halo 不超过 `h` 的节点恰好构成前缀。

use std::ops::Range;

use crate::error::{MeshError, MeshResult};
use crate::generation::Mesh;

/// 节点柱函数空间
#[derive(Debug, Clone, PartialEq)]
pub struct NodeColumns {
    halo: usize,
    size: usize,
    lonlat: Vec<[f64; 2]>,
}

impl NodeColumns {
    /// 以指定 halo 宽度从网格派生函数空间
    pub fn new(mesh: &Mesh, halo: usize) -> MeshResult<Self> {
        if halo > mesh.halo() {
            return Err(MeshError::HaloExceedsMesh {
                requested: halo,
                available: mesh.halo(),
            });
        }
        let nodes = mesh.nodes();
        let size = nodes
            .halo
            .iter()
            .take_while(|&&h| h as usize <= halo)
            .count();
        Ok(Self {
            halo,
            size,
            lonlat: nodes.lonlat[..size].to_vec(),
        })
    }

    /// halo 宽度
    pub fn halo(&self) -> usize {
        self.halo
    }

    /// 节点数（含 ghost）
    pub fn size(&self) -> usize {
        self.size
    }

    /// 节点经纬度 [lon, lat]
    pub fn lonlat(&self) -> &[[f64; 2]] {
        &self.lonlat
    }

    /// 节点索引范围
    pub fn nodes(&self) -> Range<usize> {
        0..self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::LocalComm;
    use crate::generation::MeshGenerator;
    use crate::grid::Grid;
    use crate::partitioner::{Partitioner, PartitionerConfig};

    fn mesh(halo: usize) -> Mesh {
        let grid = Grid::from_name("ORCA2_V").unwrap();
        let comm = LocalComm::new(0, 2).unwrap();
        let partitioner = Partitioner::new(&PartitionerConfig::new("equal_bands"), &comm).unwrap();
        MeshGenerator::new(halo).generate(&grid, &partitioner, &comm).unwrap()
    }

    #[test]
    fn test_full_halo_covers_mesh() {
        let mesh = mesh(1);
        let fs = NodeColumns::new(&mesh, 1).unwrap();
        assert_eq!(fs.size(), mesh.nodes().size());
        assert_eq!(fs.lonlat().len(), fs.size());
    }

    #[test]
    fn test_smaller_halo_is_prefix() {
        let mesh = mesh(2);
        let fs = NodeColumns::new(&mesh, 1).unwrap();
        assert!(fs.size() < mesh.nodes().size());
        assert!(fs.nodes().all(|n| mesh.nodes().halo_distance(n) <= 1));
    }

    #[test]
    fn test_halo_exceeds_mesh() {
        let mesh = mesh(0);
        assert!(matches!(
            NodeColumns::new(&mesh, 1),
            Err(MeshError::HaloExceedsMesh { requested: 1, available: 0 })
        ));
    }
}
