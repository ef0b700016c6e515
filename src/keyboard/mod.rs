//! 키보드 레이아웃 서술자 및 레지스트리
//!
//! 자판 파일(.yaml/.ini) 포맷과 그 파서는 다루지 않는다 — 여기서는 이미
//! 메모리에 적재된 레이아웃을 표현하는 자료구조와, id로 레이아웃을 찾는
//! 프로세스 전역 레지스트리만 제공한다. 호스트 프로그램은
//! [`KeyboardRegistry::register`]로 직접 만든 레이아웃을 추가할 수 있다.

mod layout_2;
mod layout_ro;

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// 레이아웃이 어떤 처리 규율(discipline)을 따르는지 구분한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardType {
    /// 자모 단위 입력, 아스키가 합쳐진 자모 하나로 사상됨
    Jamo,
    /// [`Jamo`](Self::Jamo)의 옛한글 허용 변종
    JamoYet,
    /// 자모 단위 입력, 아스키가 역할이 붙은 자모로 직접 사상됨
    Jaso,
    /// [`Jaso`](Self::Jaso)의 옛한글 허용 변종
    JasoYet,
    /// 로마자 전사 입력
    Romaja,
}

/// 메모리에 적재된 하나의 키보드 레이아웃
pub struct Keyboard {
    id: String,
    name: String,
    layout_type: KeyboardType,
    /// table_id로 색인되는 아스키 -> 자모 사상 테이블들
    tables: Vec<HashMap<u8, char>>,
    /// (첫 자모, 둘째 자모) -> 조합된 자모
    combine: HashMap<(char, char), char>,
}

impl Keyboard {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        layout_type: KeyboardType,
        tables: Vec<HashMap<u8, char>>,
        combine: HashMap<(char, char), char>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            layout_type,
            tables,
            combine,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout_type(&self) -> KeyboardType {
        self.layout_type
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// 주어진 아스키 입력을 자모로 사상한다. 사상이 없으면 아스키 바이트
    /// 자체를 문자로 돌려준다 (구두점, 숫자 등 통과 입력을 위함).
    pub fn map_to_char(&self, table_id: usize, ascii: u8) -> char {
        self.tables
            .get(table_id)
            .and_then(|t| t.get(&ascii))
            .copied()
            .unwrap_or(ascii as char)
    }

    /// 두 자모를 조합한다. `table_id`는 받지만 실제 조합 테이블은 항상
    /// 레이아웃당 하나뿐이다 — 원본 라이브러리도 조합 단계에서는
    /// table_id를 무시하고 0번 테이블만 쓴다.
    pub fn combine(&self, _table_id: usize, first: char, second: char) -> Option<char> {
        self.combine.get(&(first, second)).copied()
    }
}

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, Arc<Keyboard>>> = {
        let mut m = HashMap::new();
        let two = Arc::new(layout_2::build());
        let ro = Arc::new(layout_ro::build());
        m.insert(two.id().to_string(), two);
        m.insert(ro.id().to_string(), ro);
        RwLock::new(m)
    };
}

/// 프로세스 전역 키보드 레지스트리
pub struct KeyboardRegistry;

impl KeyboardRegistry {
    /// id로 레이아웃을 찾는다.
    pub fn get(id: &str) -> Option<Arc<Keyboard>> {
        REGISTRY.read().unwrap().get(id).cloned()
    }

    /// 레이아웃을 등록(또는 교체)한다.
    pub fn register(keyboard: Keyboard) {
        let id = keyboard.id().to_string();
        REGISTRY.write().unwrap().insert(id, Arc::new(keyboard));
    }

    /// 등록된 레이아웃 id 목록
    pub fn ids() -> Vec<String> {
        REGISTRY.read().unwrap().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_layouts_are_registered() {
        assert!(KeyboardRegistry::get("2").is_some());
        assert!(KeyboardRegistry::get("ro").is_some());
        assert!(KeyboardRegistry::get("nonexistent").is_none());
    }

    #[test]
    fn register_adds_custom_layout() {
        let kb = Keyboard::new(
            "test-custom",
            "Test Custom",
            KeyboardType::Jamo,
            vec![HashMap::new()],
            HashMap::new(),
        );
        KeyboardRegistry::register(kb);
        let found = KeyboardRegistry::get("test-custom").unwrap();
        assert_eq!(found.name(), "Test Custom");
    }

    #[test]
    fn unmapped_ascii_passes_through() {
        let kb = KeyboardRegistry::get("2").unwrap();
        assert_eq!(kb.map_to_char(0, b'1'), '1');
        assert_eq!(kb.map_to_char(0, b' '), ' ');
    }
}
