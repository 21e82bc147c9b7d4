// crates/orca_geometry/src/catalog.rs

//! 变量目录
//!
//! 保存配置中 `nemo fields` 声明的模型变量，回答其余组件的查询：
//! NEMO 内部名、层数、模型空间、数据来源类别和存储精度。
//!
//! # 约定
//!
//! - 查询不到的变量一律返回 [`GeometryError::UnknownVariable`]，不回退为默认值
//! - 模型空间在解析时校验一次，每次查询时再次校验
//! - 同名变量重复声明时，所有查询都以第一条为准

use std::collections::HashMap;

use orca_config::{FieldPrecision, GeometryParams, ModelSpace, NemoFieldParams};

use crate::error::{GeometryError, GeometryResult};
use crate::variables::Variables;

/// 变量目录
#[derive(Debug, Clone, PartialEq)]
pub struct VariableCatalog {
    fields: Vec<NemoFieldParams>,
    index: HashMap<String, usize>,
}

impl VariableCatalog {
    /// 从几何配置解析
    pub fn parse(params: &GeometryParams) -> GeometryResult<Self> {
        Self::from_fields(params.nemo_fields.clone())
    }

    /// 从变量配置列表构建并校验
    pub fn from_fields(fields: Vec<NemoFieldParams>) -> GeometryResult<Self> {
        let mut index = HashMap::with_capacity(fields.len());
        for (pos, field) in fields.iter().enumerate() {
            field.validate()?;
            if index.contains_key(&field.name) {
                log::warn!("变量 \"{}\" 重复声明, 以第一条为准", field.name);
                continue;
            }
            index.insert(field.name.clone(), pos);
        }
        Ok(Self { fields, index })
    }

    fn entry(&self, context: &'static str, name: &str) -> GeometryResult<&NemoFieldParams> {
        self.index
            .get(name)
            .map(|&pos| &self.fields[pos])
            .ok_or_else(|| GeometryError::unknown_variable(context, name))
    }

    fn space_of(field: &NemoFieldParams) -> GeometryResult<ModelSpace> {
        field
            .model_space
            .parse()
            .map_err(|_| GeometryError::InvalidModelSpace {
                name: field.name.clone(),
                space: field.model_space.clone(),
            })
    }

    /// 是否包含变量
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 声明的条目数（含重复）
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 全部条目，按声明顺序
    pub fn fields(&self) -> &[NemoFieldParams] {
        &self.fields
    }

    /// NEMO 内部变量名
    pub fn internal_name(&self, name: &str) -> GeometryResult<&str> {
        Ok(&self.entry("internal_name", name)?.nemo_name)
    }

    /// 变量层数：表层为 1，其余为 `n_levels`
    pub fn level_count(&self, name: &str, n_levels: usize) -> GeometryResult<usize> {
        let field = self.entry("level_count", name)?;
        Ok(if Self::space_of(field)?.is_surface() {
            1
        } else {
            n_levels
        })
    }

    /// 变量的模型空间
    pub fn model_space(&self, name: &str) -> GeometryResult<ModelSpace> {
        Self::space_of(self.entry("model_space", name)?)
    }

    /// 变量的数据来源类别是否为 `variable_type`
    pub fn is_member_of_type(&self, name: &str, variable_type: &str) -> GeometryResult<bool> {
        Ok(self.entry("is_member_of_type", name)?.variable_type == variable_type)
    }

    /// 变量的存储精度
    pub fn precision(&self, name: &str) -> GeometryResult<FieldPrecision> {
        Ok(self.entry("precision", name)?.field_precision)
    }
}

/// 校验几何配置并返回有序去重的变量名
pub fn distinct_variables(params: &GeometryParams) -> GeometryResult<Variables> {
    params.validate()?;
    Ok(Variables::from_params(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, space: ModelSpace, vtype: &str) -> NemoFieldParams {
        NemoFieldParams::new(name, format!("nemo_{name}"), space, vtype, FieldPrecision::Double)
    }

    fn catalog() -> VariableCatalog {
        VariableCatalog::from_fields(vec![
            field("sea_surface_height", ModelSpace::Surface, "background"),
            field("sea_water_temperature", ModelSpace::Volume, "background"),
            field("depth", ModelSpace::Vertical, "background"),
            NemoFieldParams::new(
                "sea_surface_height_variance",
                "ssh_var",
                ModelSpace::Surface,
                "variance",
                FieldPrecision::Float,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_internal_name() {
        let catalog = catalog();
        assert_eq!(catalog.internal_name("depth").unwrap(), "nemo_depth");
        let err = catalog.internal_name("salinity").unwrap_err();
        assert!(matches!(err, GeometryError::UnknownVariable { ref name, .. } if name == "salinity"));
    }

    #[test]
    fn test_level_count() {
        let catalog = catalog();
        for n in [1, 2, 75] {
            assert_eq!(catalog.level_count("sea_surface_height", n).unwrap(), 1);
            assert_eq!(catalog.level_count("sea_water_temperature", n).unwrap(), n);
            assert_eq!(catalog.level_count("depth", n).unwrap(), n);
        }
        assert!(catalog.level_count("salinity", 75).is_err());
    }

    #[test]
    fn test_model_space() {
        let catalog = catalog();
        assert_eq!(catalog.model_space("depth").unwrap(), ModelSpace::Vertical);
        assert_eq!(catalog.model_space("sea_surface_height").unwrap(), ModelSpace::Surface);
    }

    #[test]
    fn test_member_of_type() {
        let catalog = catalog();
        assert!(catalog.is_member_of_type("sea_surface_height", "background").unwrap());
        assert!(!catalog.is_member_of_type("sea_surface_height", "variance").unwrap());
        assert!(catalog.is_member_of_type("sea_surface_height_variance", "variance").unwrap());
        // 未知变量是错误而不是 false
        assert!(matches!(
            catalog.is_member_of_type("salinity", "background"),
            Err(GeometryError::UnknownVariable { .. })
        ));
    }

    #[test]
    fn test_precision() {
        let catalog = catalog();
        assert_eq!(catalog.precision("sea_surface_height").unwrap(), FieldPrecision::Double);
        assert_eq!(catalog.precision("sea_surface_height_variance").unwrap(), FieldPrecision::Float);
        assert!(catalog.precision("salinity").is_err());
    }

    #[test]
    fn test_duplicates_first_wins() {
        let catalog = VariableCatalog::from_fields(vec![
            field("a", ModelSpace::Surface, "background"),
            field("b", ModelSpace::Volume, "background"),
            field("a", ModelSpace::Volume, "variance"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("a") && catalog.contains("b"));
        assert_eq!(catalog.level_count("a", 10).unwrap(), 1);
        assert!(catalog.is_member_of_type("a", "background").unwrap());
    }

    #[test]
    fn test_invalid_model_space_at_parse() {
        let mut bad = field("a", ModelSpace::Surface, "background");
        bad.model_space = "column".to_string();
        assert!(matches!(
            VariableCatalog::from_fields(vec![bad]),
            Err(GeometryError::SchemaValidation(_))
        ));
    }

    #[test]
    fn test_invalid_model_space_at_query() {
        let mut bad = field("a", ModelSpace::Surface, "background");
        bad.model_space = "column".to_string();
        let catalog = VariableCatalog {
            index: HashMap::from([("a".to_string(), 0)]),
            fields: vec![bad],
        };
        assert!(matches!(
            catalog.model_space("a"),
            Err(GeometryError::InvalidModelSpace { ref space, .. }) if space == "column"
        ));
        assert!(matches!(
            catalog.level_count("a", 5),
            Err(GeometryError::InvalidModelSpace { .. })
        ));
    }
}
