use std::path::Path;

use crate::game::constants::MAX_MELD_SUPPLEMENTS;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("读取配置文件失败：{0}")]
    Io(#[from] std::io::Error),
    #[error("配置格式错误：{0}")]
    Parse(#[from] serde_json::Error),
    #[error("meld_supplements 必须在 0..={max} 之间，实际为 {actual}")]
    InvalidSupplements { actual: u8, max: usize },
}

/// 引擎配置
///
/// 各版本规则在两处存在分歧，这里做成可配置项
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// 提交吃牌时必须亮出的补充牌数（0-2）
    ///
    /// 默认 2：被吃的牌加两张补充牌组成完整的一组
    pub meld_supplements: u8,
    /// 被吃走的牌是否仍算作现物（安全牌）
    pub eaten_tiles_safe: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            meld_supplements: MAX_MELD_SUPPLEMENTS as u8,
            eaten_tiles_safe: false,
        }
    }
}

impl EngineConfig {
    /// 从 JSON 字符串解析，缺省字段取默认值
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.meld_supplements as usize > MAX_MELD_SUPPLEMENTS {
            return Err(ConfigError::InvalidSupplements {
                actual: self.meld_supplements,
                max: MAX_MELD_SUPPLEMENTS,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.meld_supplements, 2);
        assert!(!config.eaten_tiles_safe);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "meld_supplements": 0 }"#).unwrap();
        assert_eq!(config.meld_supplements, 0);
        assert!(!config.eaten_tiles_safe);

        let config = EngineConfig::from_json_str(r#"{ "eaten_tiles_safe": true }"#).unwrap();
        assert_eq!(config.meld_supplements, 2);
        assert!(config.eaten_tiles_safe);
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "meld_supplements": 3 }"#),
            Err(ConfigError::InvalidSupplements { actual: 3, .. })
        ));
        assert!(matches!(
            EngineConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
