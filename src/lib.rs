//! 한글 입력기의 조합 핵심부
//!
//! 아스키 키 입력을 preedit/commit 문자열로 바꾸는 상태 기계와, 그
//! 상태 기계가 기대는 유니코드 자모 계층 및 키보드 레이아웃 저장소를
//! 제공한다. 자판 파일 포맷이나 렌더링, 클립보드/창 통합, 사전 기반
//! 단어 변환은 이 크레이트의 범위 밖이다.

pub mod buffer;
pub mod config;
pub mod context;
pub mod error;
pub mod hangul;
pub mod keyboard;

pub use buffer::OutputMode;
pub use config::HangulIcConfig;
pub use context::{Callback, ContextOption, InputContext, TransitionCallback, TranslateCallback};
pub use error::HangulIcError;
pub use keyboard::{Keyboard, KeyboardRegistry, KeyboardType};
