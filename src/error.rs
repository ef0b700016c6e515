//! 생성/설정 단계에서 발생하는 오류
//!
//! 키보드 전환 실패, 설정 파일 읽기/파싱 실패처럼 호출자가 복구 경로를
//! 선택해야 하는 경우에만 쓰인다. 키 입력 한 번에 대응하는 `process`/
//! `backspace` 같은 호출은 "소비하지 못했음"을 뜻하는 `bool`만 돌려주며
//! 이 타입을 거치지 않는다.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HangulIcError {
    #[error("unknown keyboard layout id: {0}")]
    UnknownKeyboard(String),

    #[error("failed to read config file: {0}")]
    Config(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
