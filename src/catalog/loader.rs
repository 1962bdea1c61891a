//! 教练数据文件加载器实现
//!
//! 提供YAML数据文件的读取、解析和错误处理功能

use crate::catalog::types::CoachRecord;
use crate::error::{CatalogError, Result};
use async_trait::async_trait;
use std::path::Path;

/// 默认数据文件路径（与站点仓库的目录布局一致）
pub const DEFAULT_CATALOG_PATH: &str = "src/coaches/coaches.yaml";

/// 数据加载器trait，定义教练数据加载接口
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    /// 从文件加载教练记录
    ///
    /// # 参数
    /// * `path` - 数据文件路径
    ///
    /// # 返回
    /// * `Result<Vec<CoachRecord>>` - 教练记录列表或错误
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Vec<CoachRecord>>;

    /// 从字符串加载教练记录
    ///
    /// # 参数
    /// * `content` - 数据文件内容
    ///
    /// # 返回
    /// * `Result<Vec<CoachRecord>>` - 教练记录列表或错误
    async fn load_from_string(&self, content: &str) -> Result<Vec<CoachRecord>>;
}

/// YAML数据加载器实现
#[derive(Debug, Clone, Default)]
pub struct YamlCatalogLoader;

impl YamlCatalogLoader {
    /// 创建新的YAML数据加载器
    pub fn new() -> Self {
        Self
    }

    /// 解析YAML内容
    ///
    /// # 参数
    /// * `content` - YAML内容
    ///
    /// # 返回
    /// * `Result<Vec<CoachRecord>>` - 解析的教练记录或错误
    fn parse_yaml(&self, content: &str) -> Result<Vec<CoachRecord>> {
        let records: Vec<CoachRecord> = serde_yaml::from_str(content)
            .map_err(|e| CatalogError::ParseError(format!("YAML解析失败: {}", e)))?;

        Ok(records)
    }
}

#[async_trait]
impl CatalogLoader for YamlCatalogLoader {
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Vec<CoachRecord>> {
        let path = path.as_ref();

        // 检查文件是否存在
        if !path.exists() {
            return Err(CatalogError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        // 读取文件内容
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::ReadError(format!("读取文件失败: {}", e)))?;

        let records = self.parse_yaml(&content)?;

        log::info!(
            "成功加载数据文件: {} ({} 条教练记录)",
            path.display(),
            records.len()
        );

        Ok(records)
    }

    async fn load_from_string(&self, content: &str) -> Result<Vec<CoachRecord>> {
        let records = self.parse_yaml(content)?;

        log::debug!("成功解析数据内容 ({} 条教练记录)", records.len());

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::ContactInfo;
    use crate::error::LinkVitalsError;
    use std::io::Write;

    const TEST_CATALOG_YAML: &str = r#"
- name: 张伟
  title: 职业发展教练
  contact:
    email: zhang.wei@example.com
    website: https://zhangwei.example.com
    linkedin: https://www.linkedin.com/in/zhangwei
    calendly: https://calendly.com/zhangwei
  location:
    timezone: Asia/Shanghai
- name: 李娜
  contact:
    email: li.na@example.com
    website: ""
    calendly: https://calendly.com/lina
- name: 王强
"#;

    #[tokio::test]
    async fn test_yaml_parsing() {
        let loader = YamlCatalogLoader::new();
        let records = loader.load_from_string(TEST_CATALOG_YAML).await.unwrap();

        // title、email、location等未知字段不影响解析
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "张伟");
        assert_eq!(
            records[0].contact.website,
            Some("https://zhangwei.example.com".to_string())
        );
        assert_eq!(
            records[0].contact.linkedin,
            Some("https://www.linkedin.com/in/zhangwei".to_string())
        );
        assert_eq!(records[1].contact.website, Some(String::new()));
        assert_eq!(records[1].contact.linkedin, None);
    }

    #[tokio::test]
    async fn test_missing_contact_defaults_empty() {
        let loader = YamlCatalogLoader::new();
        let records = loader.load_from_string(TEST_CATALOG_YAML).await.unwrap();

        assert_eq!(records[2].name, "王强");
        assert_eq!(records[2].contact, ContactInfo::default());
    }

    #[tokio::test]
    async fn test_null_contact_tolerated() {
        let loader = YamlCatalogLoader::new();
        let records = loader
            .load_from_string("- name: 测试教练\n  contact:\n")
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].contact, ContactInfo::default());
    }

    #[tokio::test]
    async fn test_empty_list() {
        let loader = YamlCatalogLoader::new();
        let records = loader.load_from_string("[]").await.unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_yaml_returns_parse_error() {
        let loader = YamlCatalogLoader::new();
        let result = loader.load_from_string("[unclosed").await;

        assert!(matches!(
            result,
            Err(LinkVitalsError::Catalog(CatalogError::ParseError(_)))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TEST_CATALOG_YAML.as_bytes()).unwrap();

        let loader = YamlCatalogLoader::new();
        let records = loader.load_from_file(file.path()).await.unwrap();

        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = YamlCatalogLoader::new();
        let result = loader.load_from_file("definitely/not/here.yaml").await;

        assert!(matches!(
            result,
            Err(LinkVitalsError::Catalog(CatalogError::FileNotFound { .. }))
        ));
    }
}
