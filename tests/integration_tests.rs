use hangulic::{ContextOption, InputContext, Keyboard, KeyboardRegistry, KeyboardType, OutputMode};
use std::collections::HashMap;

fn type_ascii(ic: &mut InputContext, input: &str) -> String {
    let mut out = String::new();
    for b in input.bytes() {
        ic.process(b);
        out.push_str(ic.commit());
    }
    out.push_str(ic.flush());
    out
}

/// 역할이 태그된 채 들어오는 간단한 3벌식류(jaso) 시험용 자판.
/// 실제 제품 자판은 아니며, `process_jaso` 규율을 연습하기 위한 최소 표다.
fn register_test_jaso_keyboard() {
    let mut table = HashMap::new();
    table.insert(b'g', '\u{1100}'); // ㄱ 초성
    table.insert(b'n', '\u{1102}'); // ㄴ 초성
    table.insert(b'a', '\u{1161}'); // ㅏ 중성
    table.insert(b'f', '\u{11A8}'); // ㄱ 종성
    KeyboardRegistry::register(Keyboard::new(
        "test-jaso",
        "Test Jaso",
        KeyboardType::Jaso,
        vec![table],
        HashMap::new(),
    ));
}

#[test]
fn basic_syllables() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rk"), "가");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "sk"), "나");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "ek"), "다");
}

#[test]
fn syllables_with_jongseong() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rkr"), "각");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "gksrmf"), "한글");
}

#[test]
fn jongseong_moves_to_next_choseong() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rksk"), "가나");
}

#[test]
fn compound_jungseong() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "dhk"), "와");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "dnj"), "워");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "dml"), "의");
}

#[test]
fn compound_jongseong_splits_on_next_vowel() {
    // d=ㅇ, k=ㅏ, f=ㄹ, r=ㄱ -> ㄹ+ㄱ = ㄺ 복합 종성 -> 앍
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "dkfr"), "앍");
}

#[test]
fn double_consonants() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "Rk"), "까");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "Tks"), "싼");
}

#[test]
fn passthrough_of_non_jamo_ascii() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "123"), "123");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rk!sk"), "가!나");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rk sk"), "가 나");
}

#[test]
fn lone_jamo_renders_as_compatibility_form() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "r"), "ㄱ");
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "k"), "ㅏ");
}

#[test]
fn second_uncombinable_choseong_replaces_the_first_without_committing_it() {
    // ㄱ 다음에 ㄴ이 와도 둘을 묶는 조합표가 없으면 초성이 소리 없이
    // 바뀐다 — 앞서 쌓인 초성은 커밋되지 않고 사라진다. 원본 라이브러리의
    // 동작을 그대로 따른 것으로, 직관적이진 않지만 의도된 동작이다.
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, "rs"), "ㄴ");
}

#[test]
fn empty_input_produces_nothing() {
    let mut ic = InputContext::new(Some("2"));
    assert_eq!(type_ascii(&mut ic, ""), "");
}

#[test]
fn backspace_walks_back_through_a_syllable() {
    let mut ic = InputContext::new(Some("2"));
    ic.process(b'r'); // ㄱ
    ic.process(b'k'); // ㅏ -> 가
    ic.process(b'r'); // 종성 ㄱ -> 각
    assert_eq!(ic.preedit(), "각");
    assert!(ic.backspace());
    assert_eq!(ic.preedit(), "가");
    assert!(ic.backspace());
    assert_eq!(ic.preedit(), "ㄱ");
    assert!(ic.backspace());
    assert!(ic.is_empty());
    assert!(!ic.backspace());
}

#[test]
fn romaja_layout_composes_gho_to_a_single_syllable() {
    let mut ic = InputContext::new(Some("ro"));
    assert_eq!(type_ascii(&mut ic, "gho"), "호");
}

#[test]
fn romaja_forces_x_to_jieut() {
    let mut ic = InputContext::new(Some("ro"));
    ic.process(b'x');
    assert_eq!(ic.preedit(), "ㅈ");
}

#[test]
fn jamo_output_mode_shows_raw_jamo_without_composing() {
    let mut ic = InputContext::new(Some("2"));
    ic.set_output_mode(OutputMode::Jamo);
    ic.process(b'r');
    ic.process(b'k');
    assert_eq!(ic.preedit(), "\u{1100}\u{1161}");
}

#[test]
fn auto_reorder_option_lets_a_stray_vowel_attach_to_a_later_choseong() {
    let mut without_reorder = InputContext::new(Some("2"));
    without_reorder.process(b'k'); // ㅏ 단독
    without_reorder.process(b'r'); // ㄱ: 재배치 꺼짐 -> 커밋 후 새 초성
    assert_eq!(without_reorder.commit(), "ㅏ");

    let mut with_reorder = InputContext::new(Some("2"));
    with_reorder.set_option(ContextOption::AutoReorder, true);
    with_reorder.process(b'k');
    with_reorder.process(b'r');
    assert!(with_reorder.commit().is_empty());
}

#[test]
fn unknown_keyboard_id_falls_back_to_default_layout() {
    let _ = env_logger::try_init();
    let mut ic = InputContext::new(Some("3"));
    assert_eq!(ic.keyboard_id(), "2");
    assert_eq!(type_ascii(&mut ic, "rk"), "가");
}

#[test]
fn flush_returns_current_syllable_and_empties_the_context() {
    let mut ic = InputContext::new(Some("2"));
    ic.process(b'r');
    ic.process(b'k');
    assert_eq!(ic.flush(), "가");
    assert!(ic.is_empty());
    assert!(ic.preedit().is_empty());
}

#[test]
fn jaso_layout_composes_role_tagged_jamo() {
    register_test_jaso_keyboard();
    let mut ic = InputContext::new(Some("test-jaso"));
    ic.process(b'g'); // ㄱ 초성
    ic.process(b'a'); // ㅏ 중성
    assert_eq!(ic.preedit(), "가");
    ic.process(b'f'); // ㄱ 종성
    assert_eq!(ic.preedit(), "각");
    assert!(ic.commit().is_empty());
}

#[test]
fn jaso_layout_starts_a_new_syllable_when_choseong_arrives_after_jongseong() {
    register_test_jaso_keyboard();
    let mut ic = InputContext::new(Some("test-jaso"));
    ic.process(b'g');
    ic.process(b'a');
    ic.process(b'f');
    assert_eq!(ic.preedit(), "각");
    ic.process(b'n'); // 다음 음절의 초성: 현재 음절이 커밋되어야 한다
    assert_eq!(ic.commit(), "각");
    assert_eq!(ic.preedit(), "\u{3134}"); // ㄴ 호환 자모
}
