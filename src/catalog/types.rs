//! 教练数据类型定义

use serde::{Deserialize, Deserializer, Serialize};

/// 教练联系方式
///
/// 只建模链接检测涉及的字段，数据文件中的其他联系信息（如邮箱）解析时忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// 个人网站链接
    pub website: Option<String>,

    /// LinkedIn主页链接
    pub linkedin: Option<String>,

    /// Calendly预约链接
    pub calendly: Option<String>,
}

/// 教练记录
///
/// 数据文件中的未知字段会被忽略，缺失或为null的字段按未填写处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachRecord {
    /// 教练姓名
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// 联系方式
    #[serde(default, deserialize_with = "null_as_default")]
    pub contact: ContactInfo,
}

/// 将显式的null值当作字段缺失处理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
