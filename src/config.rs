//! 입력기 기본 설정 로드/저장 (JSON)
//!
//! 여기서 다루는 값은 호스트 애플리케이션이 `InputContext`를 새로 만들
//! 때 적용할 기본값일 뿐이다. 한 번 만들어진 컨텍스트의 실시간 옵션은
//! `InputContext::set_option`으로 바뀐다.

use crate::error::HangulIcError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 입력기 기본 설정
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct HangulIcConfig {
    /// 새 컨텍스트가 기본으로 선택할 키보드 레이아웃 id
    #[serde(default = "default_keyboard_id")]
    pub default_keyboard_id: String,
    /// 도깨비불 현상을 막는 재배열 허용 여부
    #[serde(default)]
    pub auto_reorder: bool,
    /// 두벌식 자판에서 동일 키 연타로 된소리를 조합할지 여부
    #[serde(default)]
    pub combi_on_double_stroke: bool,
    /// 초성이 아닌 자모끼리도 종성 조합을 허용할지 여부
    #[serde(default = "default_non_choseong_combi")]
    pub non_choseong_combi: bool,
}

fn default_keyboard_id() -> String {
    "2".to_string()
}

fn default_non_choseong_combi() -> bool {
    true
}

impl Default for HangulIcConfig {
    fn default() -> Self {
        Self {
            default_keyboard_id: default_keyboard_id(),
            auto_reorder: false,
            combi_on_double_stroke: false,
            non_choseong_combi: default_non_choseong_combi(),
        }
    }
}

/// 설정 파일 경로: ~/.config/hangulic/config.json
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME")
        .ok()
        .map(PathBuf::from)
        .filter(|p| p.is_absolute() && p.is_dir())
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));
    home.join(".config").join("hangulic").join("config.json")
}

/// 설정 파일 로드. 파일이 없거나 파싱에 실패하면 기본값으로 돌아간다.
pub fn load_config() -> HangulIcConfig {
    let path = config_path();
    match fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("config at {:?} is invalid, using defaults: {e}", path);
            HangulIcConfig::default()
        }),
        Err(_) => HangulIcConfig::default(),
    }
}

/// 설정 파일 저장
pub fn save_config(config: &HangulIcConfig) -> Result<(), HangulIcError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HangulIcConfig::default();
        assert_eq!(config.default_keyboard_id, "2");
        assert!(!config.auto_reorder);
        assert!(config.non_choseong_combi);
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = HangulIcConfig {
            default_keyboard_id: "ro".to_string(),
            auto_reorder: true,
            combi_on_double_stroke: true,
            non_choseong_combi: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: HangulIcConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.default_keyboard_id, "ro");
        assert!(parsed.auto_reorder);
    }

    #[test]
    fn test_backward_compat_missing_fields() {
        let json = r#"{"auto_reorder": true}"#;
        let config: HangulIcConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.default_keyboard_id, "2");
        assert!(config.auto_reorder);
        assert!(config.non_choseong_combi);
    }
}
