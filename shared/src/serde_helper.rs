//! 序列化辅助函数

use serde::{Deserialize, Deserializer};

/// 将 JSON `null` 视为该类型的默认值
///
/// 后端对未初始化的字段（如 `likes`、`comments`）会返回 `null`，
/// 与 `#[serde(default)]` 搭配使用时可同时覆盖“字段缺失”和“字段为 null”。
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
