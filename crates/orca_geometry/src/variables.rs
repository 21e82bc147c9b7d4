// crates/orca_geometry/src/variables.rs

//! 有序去重的变量名列表

use orca_config::GeometryParams;

/// 变量名列表
///
/// 保持首次出现的顺序，同名变量只保留一次。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    names: Vec<String>,
}

impl Variables {
    /// 创建空列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从几何配置的变量目录构建
    pub fn from_params(params: &GeometryParams) -> Self {
        params.nemo_fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// 追加变量，已存在时忽略；返回是否新增
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    /// 是否包含变量
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// 变量数
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// 变量名切片
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 迭代变量名
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Variables {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut vars = Self::new();
        for name in iter {
            vars.push(name);
        }
        vars
    }
}

impl AsRef<[String]> for Variables {
    fn as_ref(&self) -> &[String] {
        &self.names
    }
}

impl std::fmt::Display for Variables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}
