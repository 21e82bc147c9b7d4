// crates/orca_config/src/params.rs

//! 几何配置参数
//!
//! 对应配置中的几何段：
//!
//! ```yaml
//! number levels: 75
//! grid name: ORCA1_T
//! source mesh halo: 1
//! partitioner: equal_bands
//! nemo fields:
//!   - name: sea_surface_height
//!     nemo name: sossheig
//!     model space: surface
//!     variable type: background
//!     field precision: double
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};
use crate::model_space::ModelSpace;
use crate::precision::FieldPrecision;

/// 单个 NEMO 变量的配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NemoFieldParams {
    /// 同化侧使用的规范变量名
    pub name: String,

    /// NEMO 内部变量名
    #[serde(rename = "nemo name")]
    pub nemo_name: String,

    /// 模型空间标签（surface / volume / vertical）
    ///
    /// 保留原始字符串，查询时再次校验。
    #[serde(rename = "model space")]
    pub model_space: String,

    /// 数据来源类别（背景场、方差场、MDT 等）
    #[serde(rename = "variable type")]
    pub variable_type: String,

    /// 场存储精度
    #[serde(rename = "field precision")]
    pub field_precision: FieldPrecision,
}

impl NemoFieldParams {
    /// 创建变量配置
    pub fn new(
        name: impl Into<String>,
        nemo_name: impl Into<String>,
        model_space: ModelSpace,
        variable_type: impl Into<String>,
        field_precision: FieldPrecision,
    ) -> Self {
        Self {
            name: name.into(),
            nemo_name: nemo_name.into(),
            model_space: model_space.as_str().to_string(),
            variable_type: variable_type.into(),
            field_precision,
        }
    }

    /// 校验单个变量配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.is_empty() {
            return Err(ConfigError::invalid_value(
                "nemo fields.name",
                "",
                "变量名不能为空",
            ));
        }
        if self.nemo_name.is_empty() {
            return Err(ConfigError::invalid_value(
                format!("nemo fields[{}].nemo name", self.name),
                "",
                "NEMO 变量名不能为空",
            ));
        }
        if self.model_space.parse::<ModelSpace>().is_err() {
            return Err(ConfigError::invalid_value(
                format!("nemo fields[{}].model space", self.name),
                &self.model_space,
                format!("必须为 {:?} 之一", ModelSpace::ALLOWED),
            ));
        }
        Ok(())
    }
}

fn default_source_mesh_halo() -> usize {
    0
}

/// 几何配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryParams {
    /// 体变量的垂向层数
    #[serde(rename = "number levels")]
    pub n_levels: usize,

    /// 网格名或网格描述文件路径
    #[serde(rename = "grid name")]
    pub grid_name: String,

    /// 请求的网格 halo 宽度
    #[serde(rename = "source mesh halo", default = "default_source_mesh_halo")]
    pub source_mesh_halo: usize,

    /// 分区器类型
    pub partitioner: String,

    /// 变量目录
    #[serde(rename = "nemo fields")]
    pub nemo_fields: Vec<NemoFieldParams>,
}

impl GeometryParams {
    /// 从 YAML 字符串解析并校验
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let params: GeometryParams =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let params: GeometryParams =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// 从已解析的 JSON 值构建
    pub fn from_value(value: serde_json::Value) -> ConfigResult<Self> {
        let params: GeometryParams =
            serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// 从文件加载（`.json` 按 JSON 解析，其余按 YAML）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        log::debug!("加载几何配置: {}", path.display());
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        if self.n_levels == 0 {
            return Err(ConfigError::invalid_value(
                "number levels",
                self.n_levels,
                "必须为正整数",
            ));
        }
        if self.grid_name.is_empty() {
            return Err(ConfigError::Missing("grid name".to_string()));
        }
        if self.partitioner.is_empty() {
            return Err(ConfigError::Missing("partitioner".to_string()));
        }
        for field in &self.nemo_fields {
            field.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
number levels: 75
grid name: ORCA2_T
partitioner: serial
nemo fields:
  - name: sea_surface_height
    nemo name: sossheig
    model space: surface
    variable type: background
    field precision: double
  - name: sea_water_temperature
    nemo name: votemper
    model space: volume
    variable type: background
    field precision: float
"#;

    #[test]
    fn test_parse_yaml() {
        let params = GeometryParams::from_yaml_str(YAML).unwrap();
        assert_eq!(params.n_levels, 75);
        assert_eq!(params.grid_name, "ORCA2_T");
        assert_eq!(params.source_mesh_halo, 0);
        assert_eq!(params.partitioner, "serial");
        assert_eq!(params.nemo_fields.len(), 2);
        assert_eq!(params.nemo_fields[1].nemo_name, "votemper");
        assert_eq!(params.nemo_fields[1].field_precision, FieldPrecision::Float);
    }

    #[test]
    fn test_missing_required_key() {
        let yaml = YAML.replace("grid name: ORCA2_T\n", "");
        let err = GeometryParams::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("grid name"));
    }

    #[test]
    fn test_missing_field_entry_key() {
        let yaml = YAML.replace("    variable type: background\n    field precision: float\n", "    field precision: float\n");
        assert!(GeometryParams::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_invalid_model_space() {
        let yaml = YAML.replace("model space: volume", "model space: column");
        let err = GeometryParams::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("column"));
    }

    #[test]
    fn test_zero_levels_rejected() {
        let yaml = YAML.replace("number levels: 75", "number levels: 0");
        let err = GeometryParams::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("number levels"));
    }

    #[test]
    fn test_negative_halo_rejected() {
        let yaml = YAML.replace("partitioner: serial", "partitioner: serial\nsource mesh halo: -1");
        assert!(GeometryParams::from_yaml_str(&yaml).is_err());
    }

    #[test]
    fn test_json_and_file() {
        let params = GeometryParams::from_yaml_str(YAML).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"nemo fields\""));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geometry.json");
        std::fs::write(&path, &json).unwrap();
        let loaded = GeometryParams::from_file(&path).unwrap();
        assert_eq!(loaded, params);

        let path = dir.path().join("geometry.yaml");
        std::fs::write(&path, YAML).unwrap();
        assert_eq!(GeometryParams::from_file(&path).unwrap(), params);
    }
}
