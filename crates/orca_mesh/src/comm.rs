// crates/orca_mesh/src/comm.rs

//! 通信器抽象
//!
//! 网格生成与分区是集合操作：同一进程组内的每个 rank 必须以相同配置调用。
//! 本模块只暴露引擎需要的窄接口（rank、size、barrier）。
//!
//! - [`SerialComm`]: 单进程通信器
//! - [`LocalComm`]: 指定 rank/size 的本地视图，各 rank 独立构建，无实际传输

use crate::error::{MeshError, MeshResult};

/// 通信器接口
pub trait Communicator {
    /// 通信器名称
    fn name(&self) -> &str;

    /// 当前进程号
    fn rank(&self) -> usize;

    /// 进程总数
    fn size(&self) -> usize;

    /// 同步屏障
    ///
    /// 参考引擎的分区是确定性的，各 rank 可独立计算，因此默认无操作。
    fn barrier(&self) {}
}

/// 单进程通信器
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialComm;

impl Communicator for SerialComm {
    fn name(&self) -> &str {
        "self"
    }

    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }
}

/// 本地 rank 视图
#[derive(Debug, Clone)]
pub struct LocalComm {
    name: String,
    rank: usize,
    size: usize,
}

impl LocalComm {
    /// 创建 rank 视图，要求 `rank < size`
    pub fn new(rank: usize, size: usize) -> MeshResult<Self> {
        if size == 0 || rank >= size {
            return Err(MeshError::InvalidCommunicator { rank, size });
        }
        Ok(Self {
            name: "world".to_string(),
            rank,
            size,
        })
    }

    /// 设置通信器名称
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 为进程组内每个 rank 创建视图
    pub fn group(size: usize) -> MeshResult<Vec<Self>> {
        (0..size).map(|rank| Self::new(rank, size)).collect()
    }
}

impl Communicator for LocalComm {
    fn name(&self) -> &str {
        &self.name
    }

    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_comm() {
        let comm = SerialComm;
        assert_eq!(comm.rank(), 0);
        assert_eq!(comm.size(), 1);
    }

    #[test]
    fn test_local_comm_bounds() {
        assert!(LocalComm::new(2, 2).is_err());
        assert!(LocalComm::new(0, 0).is_err());
        let comm = LocalComm::new(1, 4).unwrap().with_name("ocean");
        assert_eq!(comm.rank(), 1);
        assert_eq!(comm.size(), 4);
        assert_eq!(comm.name(), "ocean");
    }

    #[test]
    fn test_group() {
        let group = LocalComm::group(3).unwrap();
        let ranks: Vec<_> = group.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
    }
}
