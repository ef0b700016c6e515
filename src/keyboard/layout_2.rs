//! 두벌식(2-beolsik) 내장 레이아웃
//!
//! 아스키 키 배정은 [`crate::hangul`]의 초성/중성 유니코드 스칼라로
//! 직접 표현한다 (호환 자모가 아니라 조합용 자모).

use super::{Keyboard, KeyboardType};
use std::collections::HashMap;

fn ascii_table() -> HashMap<u8, char> {
    let mut m = HashMap::new();
    // 자음
    m.insert(b'r', '\u{1100}'); // ㄱ
    m.insert(b'R', '\u{1101}'); // ㄲ
    m.insert(b's', '\u{1102}'); // ㄴ
    m.insert(b'e', '\u{1103}'); // ㄷ
    m.insert(b'E', '\u{1104}'); // ㄸ
    m.insert(b'f', '\u{1105}'); // ㄹ
    m.insert(b'a', '\u{1106}'); // ㅁ
    m.insert(b'q', '\u{1107}'); // ㅂ
    m.insert(b'Q', '\u{1108}'); // ㅃ
    m.insert(b't', '\u{1109}'); // ㅅ
    m.insert(b'T', '\u{110A}'); // ㅆ
    m.insert(b'd', '\u{110B}'); // ㅇ
    m.insert(b'w', '\u{110C}'); // ㅈ
    m.insert(b'W', '\u{110D}'); // ㅉ
    m.insert(b'c', '\u{110E}'); // ㅊ
    m.insert(b'z', '\u{110F}'); // ㅋ
    m.insert(b'x', '\u{1110}'); // ㅌ
    m.insert(b'v', '\u{1111}'); // ㅍ
    m.insert(b'g', '\u{1112}'); // ㅎ
    // 모음
    m.insert(b'k', '\u{1161}'); // ㅏ
    m.insert(b'o', '\u{1162}'); // ㅐ
    m.insert(b'i', '\u{1163}'); // ㅑ
    m.insert(b'O', '\u{1164}'); // ㅒ
    m.insert(b'j', '\u{1165}'); // ㅓ
    m.insert(b'p', '\u{1166}'); // ㅔ
    m.insert(b'u', '\u{1167}'); // ㅕ
    m.insert(b'P', '\u{1168}'); // ㅖ
    m.insert(b'h', '\u{1169}'); // ㅗ
    m.insert(b'y', '\u{116D}'); // ㅛ
    m.insert(b'n', '\u{116E}'); // ㅜ
    m.insert(b'b', '\u{1172}'); // ㅠ
    m.insert(b'm', '\u{1173}'); // ㅡ
    m.insert(b'l', '\u{1175}'); // ㅣ
    m
}

/// 초성 둘을 이어 쳤을 때 MS-IME 방식으로 종성 복합자음을 만드는 단축 표
fn choseong_pair_shortcuts() -> Vec<(char, char, char)> {
    vec![
        ('\u{1100}', '\u{1109}', '\u{11AA}'), // ㄱ+ㅅ=ㄳ
        ('\u{1102}', '\u{110C}', '\u{11AC}'), // ㄴ+ㅈ=ㄵ
        ('\u{1102}', '\u{1112}', '\u{11AD}'), // ㄴ+ㅎ=ㄶ
        ('\u{1105}', '\u{1100}', '\u{11B0}'), // ㄹ+ㄱ=ㄺ
        ('\u{1105}', '\u{1106}', '\u{11B1}'), // ㄹ+ㅁ=ㄻ
        ('\u{1105}', '\u{1107}', '\u{11B2}'), // ㄹ+ㅂ=ㄼ
        ('\u{1105}', '\u{1109}', '\u{11B3}'), // ㄹ+ㅅ=ㄽ
        ('\u{1105}', '\u{1110}', '\u{11B4}'), // ㄹ+ㅌ=ㄾ
        ('\u{1105}', '\u{1111}', '\u{11B5}'), // ㄹ+ㅍ=ㄿ
        ('\u{1105}', '\u{1112}', '\u{11B6}'), // ㄹ+ㅎ=ㅀ
        ('\u{1107}', '\u{1109}', '\u{11B9}'), // ㅂ+ㅅ=ㅄ
    ]
}

pub(super) fn build() -> Keyboard {
    let mut combine = HashMap::new();
    for (a, b, c) in crate::hangul::jungseong_combine_pairs().iter() {
        combine.insert((*a, *b), *c);
    }
    for (a, b, c) in crate::hangul::jongseong_combine_pairs().iter() {
        combine.insert((*a, *b), *c);
    }
    for (a, b, c) in choseong_pair_shortcuts() {
        combine.insert((a, b), c);
    }

    Keyboard::new(
        "2",
        "두벌식 표준",
        KeyboardType::Jamo,
        vec![ascii_table()],
        combine,
    )
}
