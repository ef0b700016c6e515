//! 조합 상태 기계: 자판에서 받은 아스키를 preedit/commit 스트림으로 바꾼다
//!
//! 키 입력 하나에 대응하는 [`InputContext::process`]/[`InputContext::backspace`]는
//! 성공/소비 여부를 뜻하는 `bool`만 돌려준다 — 이 경로에서는 패닉도, `Result`도
//! 쓰지 않는다. 생성이나 자판 전환처럼 실패가 곧 호출자의 실수인 연산만
//! [`HangulIcError`]를 거친다.

use crate::buffer::{HangulBuffer, OutputMode};
use crate::config::HangulIcConfig;
use crate::error::HangulIcError;
use crate::hangul;
use crate::keyboard::{Keyboard, KeyboardRegistry, KeyboardType};
use std::sync::Arc;

/// 커밋 문자열이 넘지 않아야 하는 최대 글자 수 (원본 구현의 고정 64칸 버퍼를 반영)
const COMMIT_CAPACITY: usize = 63;

/// 실시간으로 켜고 끌 수 있는 조합 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextOption {
    /// 도깨비불 현상을 피하기 위해 중성이 재배치되도록 허용
    AutoReorder,
    /// 같은 키를 두 번 눌러 된소리를 직접 조합할지
    CombiOnDoubleStroke,
    /// 초성이 아닌 자모끼리의 조합도 종성 결합으로 인정할지
    NonChoseongCombi,
}

/// 자모가 해석된 뒤 호출되는 콜백. 아스키 원본과 해석된 자모를 받아
/// 자모를 덮어쓸 수 있다.
pub type TranslateCallback = Box<dyn FnMut(u8, &mut char)>;

/// 자모가 버퍼에 실제로 쌓이기 전에 호출되는 콜백. 들어올 자모와 쌓였을
/// 때의 미리보기 문자열을 받아, `false`를 돌려주면 입력을 거부한다.
pub type TransitionCallback = Box<dyn FnMut(char, &str) -> bool>;

/// [`InputContext::connect_callback`]에 넘기는 콜백 묶음
pub enum Callback {
    Translate(TranslateCallback),
    Transition(TransitionCallback),
}

/// 한 입력 맥락(캐럿 하나)의 조합 상태
pub struct InputContext {
    buffer: HangulBuffer,
    keyboard: Arc<Keyboard>,
    table_id: usize,
    output_mode: OutputMode,
    preedit: String,
    commit: String,
    flushed: String,
    on_translate: Option<TranslateCallback>,
    on_transition: Option<TransitionCallback>,
    use_jamo_mode_only: bool,
    option_auto_reorder: bool,
    option_combi_on_double_stroke: bool,
    option_non_choseong_combi: bool,
}

/// id가 비었거나 등록되지 않았을 때 돌아가는 기본 키보드
const DEFAULT_KEYBOARD_ID: &str = "2";

impl InputContext {
    /// id로 등록된 키보드 레이아웃을 골라 새 컨텍스트를 만든다.
    ///
    /// `None`이거나 등록되지 않은 id는 `"2"`로 대체된다 — 실패할 수 없는
    /// 생성자이므로, 알 수 없는 id는 오류가 아니라 경고 로그와 함께
    /// 조용히 기본 레이아웃으로 떨어진다.
    pub fn new(keyboard_id: Option<&str>) -> Self {
        let requested = keyboard_id.filter(|id| !id.is_empty());
        let keyboard = requested
            .and_then(KeyboardRegistry::get)
            .or_else(|| {
                if let Some(id) = requested {
                    log::warn!("unknown keyboard layout {id:?}, falling back to {DEFAULT_KEYBOARD_ID:?}");
                }
                KeyboardRegistry::get(DEFAULT_KEYBOARD_ID)
            })
            .expect("default keyboard layout must always be registered");
        Self {
            buffer: HangulBuffer::new(),
            keyboard,
            table_id: 0,
            output_mode: OutputMode::Syllable,
            preedit: String::new(),
            commit: String::new(),
            flushed: String::new(),
            on_translate: None,
            on_transition: None,
            use_jamo_mode_only: false,
            option_auto_reorder: false,
            option_combi_on_double_stroke: false,
            option_non_choseong_combi: true,
        }
    }

    /// 설정값으로부터 새 컨텍스트를 만든다.
    pub fn from_config(config: &HangulIcConfig) -> Self {
        let mut ctx = Self::new(Some(&config.default_keyboard_id));
        ctx.option_auto_reorder = config.auto_reorder;
        ctx.option_combi_on_double_stroke = config.combi_on_double_stroke;
        ctx.option_non_choseong_combi = config.non_choseong_combi;
        ctx
    }

    /// 키 입력 하나를 처리한다. 백스페이스(0x08)는 `backspace`로 넘긴다.
    pub fn process(&mut self, ascii: u8) -> bool {
        if ascii == 0x08 {
            return self.backspace();
        }

        self.preedit.clear();
        self.commit.clear();

        let mut jamo = self.keyboard.map_to_char(self.table_id, ascii);
        if let Some(cb) = self.on_translate.as_mut() {
            cb(ascii, &mut jamo);
        }

        match self.keyboard.layout_type() {
            KeyboardType::Jaso | KeyboardType::JasoYet => self.process_jaso(jamo),
            KeyboardType::Romaja => self.process_romaja(ascii, jamo),
            KeyboardType::Jamo | KeyboardType::JamoYet => self.process_jamo(jamo),
        }
    }

    pub fn backspace(&mut self) -> bool {
        self.preedit.clear();
        self.commit.clear();
        let ok = self.buffer.backspace();
        if ok {
            self.save_preedit_string();
        }
        ok
    }

    /// 조합 중이던 내용을 강제로 내보내고 버퍼를 비운다.
    pub fn flush(&mut self) -> &str {
        self.preedit.clear();
        self.commit.clear();
        self.flushed = self.buffer.render(self.effective_output_mode());
        self.buffer.clear();
        &self.flushed
    }

    /// 모든 출력 버퍼와 조합 상태를 비운다 (영어 전환과는 무관).
    pub fn reset(&mut self) {
        self.preedit.clear();
        self.commit.clear();
        self.flushed.clear();
        self.buffer.clear();
    }

    pub fn preedit(&self) -> &str {
        &self.preedit
    }

    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn has_choseong(&self) -> bool {
        self.buffer.has_choseong()
    }

    pub fn has_jungseong(&self) -> bool {
        self.buffer.has_jungseong()
    }

    pub fn has_jongseong(&self) -> bool {
        self.buffer.has_jongseong()
    }

    pub fn get_option(&self, option: ContextOption) -> bool {
        match option {
            ContextOption::AutoReorder => self.option_auto_reorder,
            ContextOption::CombiOnDoubleStroke => self.option_combi_on_double_stroke,
            ContextOption::NonChoseongCombi => self.option_non_choseong_combi,
        }
    }

    pub fn set_option(&mut self, option: ContextOption, value: bool) {
        match option {
            ContextOption::AutoReorder => self.option_auto_reorder = value,
            ContextOption::CombiOnDoubleStroke => self.option_combi_on_double_stroke = value,
            ContextOption::NonChoseongCombi => self.option_non_choseong_combi = value,
        }
    }

    /// 표시 방식을 바꾼다. `use_jamo_mode_only`가 켜져 있으면 무시된다.
    pub fn set_output_mode(&mut self, mode: OutputMode) {
        if !self.use_jamo_mode_only {
            self.output_mode = mode;
        }
    }

    pub fn set_jamo_mode_only(&mut self, only: bool) {
        self.use_jamo_mode_only = only;
    }

    /// id로 키보드 레이아웃을 바꾼다. `None`은 `"2"`를 뜻한다. 모르는 id가
    /// 오면 기존 레이아웃을 그대로 둔 채 경고 로그를 남기고 오류를 돌려준다.
    pub fn select_keyboard(&mut self, keyboard_id: Option<&str>) -> Result<(), HangulIcError> {
        let id = keyboard_id.filter(|id| !id.is_empty()).unwrap_or(DEFAULT_KEYBOARD_ID);
        match KeyboardRegistry::get(id) {
            Some(keyboard) => {
                self.set_keyboard(keyboard);
                Ok(())
            }
            None => {
                log::warn!("unknown keyboard layout {id:?}, keeping current layout");
                Err(HangulIcError::UnknownKeyboard(id.to_string()))
            }
        }
    }

    /// 현재 선택된 키보드 레이아웃의 id
    pub fn keyboard_id(&self) -> &str {
        self.keyboard.id()
    }

    pub fn set_keyboard(&mut self, keyboard: Arc<Keyboard>) {
        self.keyboard = keyboard;
        self.table_id = 0;
    }

    pub fn switch_keyboard_table(&mut self, table_id: usize) {
        if table_id < self.keyboard.table_count() {
            self.table_id = table_id;
        } else {
            log::warn!(
                "keyboard {:?} has no table {table_id}, keeping table {}",
                self.keyboard.id(),
                self.table_id
            );
        }
    }

    pub fn connect_translate(&mut self, callback: impl FnMut(u8, &mut char) + 'static) {
        self.on_translate = Some(Box::new(callback));
    }

    pub fn connect_transition(&mut self, callback: impl FnMut(char, &str) -> bool + 'static) {
        self.on_transition = Some(Box::new(callback));
    }

    pub fn connect_callback(&mut self, name: &str, callback: Callback) {
        match (name.to_ascii_lowercase().as_str(), callback) {
            ("translate", Callback::Translate(cb)) => self.on_translate = Some(cb),
            ("transition", Callback::Transition(cb)) => self.on_transition = Some(cb),
            (other, _) => log::warn!("unknown or mismatched callback name: {other}"),
        }
    }

    pub fn is_transliteration(&self) -> bool {
        self.keyboard.layout_type() == KeyboardType::Romaja
    }

    fn effective_output_mode(&self) -> OutputMode {
        if self.use_jamo_mode_only {
            OutputMode::Jamo
        } else {
            self.output_mode
        }
    }

    /// 버퍼에 자모를 넣기 전에 전환 콜백에게 미리보기를 보여주고, 거부되지
    /// 않으면 실제로 쌓는다.
    fn push_jamo(&mut self, c: char) -> bool {
        if !hangul::is_jamo(c) {
            return false;
        }
        if let Some(cb) = self.on_transition.as_mut() {
            let mut preview = self.buffer.clone();
            preview.push(c);
            let rendered = preview.render(self.output_mode);
            if !cb(c, &rendered) {
                return false;
            }
        }
        self.buffer.push(c);
        true
    }

    fn save_preedit_string(&mut self) {
        self.preedit = self.buffer.render(self.effective_output_mode());
    }

    fn append_commit_string(&mut self, s: &str) {
        let current_len = self.commit.chars().count();
        if current_len >= COMMIT_CAPACITY {
            return;
        }
        let remaining = COMMIT_CAPACITY - current_len;
        self.commit.extend(s.chars().take(remaining));
    }

    fn save_commit_string(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let rendered = self.buffer.render(self.effective_output_mode());
        self.append_commit_string(&rendered);
        self.buffer.clear();
    }

    fn flush_internal(&mut self) {
        self.preedit.clear();
        self.save_commit_string();
    }

    /// 두 자모를 조합한다. 이중 입력 조합 옵션과 비초성 조합 옵션을 적용한다.
    ///
    /// 조합 테이블은 항상 0번 테이블만 쓴다 — 원본 구현도 조합 단계에서는
    /// 현재 선택된 자판 테이블 번호를 무시하고 0번으로 고정한다.
    fn combine(&self, first: char, second: char) -> Option<char> {
        if !self.option_combi_on_double_stroke
            && self.keyboard.layout_type() == KeyboardType::Jamo
            && first == second
            && hangul::is_jamo_conjoinable(first)
        {
            return None;
        }

        let combined = self.keyboard.combine(0, first, second)?;

        if !self.option_non_choseong_combi
            && hangul::is_choseong(first)
            && hangul::is_choseong(second)
            && hangul::is_jongseong(combined)
        {
            return None;
        }

        Some(combined)
    }

    /// 초성을 종성 역할로 바꾼다. 변환 결과가 완성형에 바로 조합되지 않는
    /// 옛한글 자모라면, 옛한글 전용 자판에서만 그대로 받아들인다.
    fn choseong_to_jongseong(&self, cho: char) -> Option<char> {
        match hangul::choseong_to_jongseong(cho) {
            Some(jong) if hangul::is_jongseong_conjoinable(jong) => Some(jong),
            other => match self.keyboard.layout_type() {
                KeyboardType::JamoYet | KeyboardType::JasoYet => other,
                _ => None,
            },
        }
    }

    /// 두벌식류 자판: 아스키가 합쳐진 자모(주로 초성 형태)로 사상되고,
    /// 종성이 필요한 자리에서는 `choseong_to_jongseong`으로 변환한다.
    fn process_jamo(&mut self, ch: char) -> bool {
        if !hangul::is_jamo(ch) && (ch as u32) > 0 {
            self.save_commit_string();
            self.append_commit_string(&ch.to_string());
            self.save_preedit_string();
            return true;
        }

        if let Some(jongseong) = self.buffer.jongseong() {
            if hangul::is_choseong(ch) {
                let jong = self.choseong_to_jongseong(ch);
                let combined = jong.and_then(|j| self.combine(jongseong, j));
                match combined.filter(|c| hangul::is_jongseong(*c)) {
                    Some(combined) => {
                        if !self.push_jamo(combined) && !self.push_jamo(ch) {
                            return false;
                        }
                    }
                    None => {
                        self.save_commit_string();
                        if !self.push_jamo(ch) {
                            return false;
                        }
                    }
                }
            } else if hangul::is_jungseong(ch) {
                if !self.recover_jongseong_then_push_jungseong(jongseong, ch) {
                    return false;
                }
            } else {
                self.flush_internal();
                return false;
            }
        } else if let Some(jungseong) = self.buffer.jungseong() {
            if hangul::is_choseong(ch) {
                if self.buffer.choseong().is_some() {
                    match self
                        .choseong_to_jongseong(ch)
                        .filter(|j| hangul::is_jongseong(*j))
                    {
                        Some(jong) => {
                            if !self.push_jamo(jong) && !self.push_jamo(ch) {
                                return false;
                            }
                        }
                        None => {
                            self.save_commit_string();
                            if !self.push_jamo(ch) {
                                return false;
                            }
                        }
                    }
                } else if self.option_auto_reorder {
                    if !self.push_jamo(ch) {
                        return false;
                    }
                } else {
                    self.save_commit_string();
                    if !self.push_jamo(ch) {
                        return false;
                    }
                }
            } else if hangul::is_jungseong(ch) {
                match self.combine(jungseong, ch).filter(|c| hangul::is_jungseong(*c)) {
                    Some(combined) => {
                        if !self.push_jamo(combined) {
                            return false;
                        }
                    }
                    None => {
                        self.save_commit_string();
                        if !self.push_jamo(ch) {
                            return false;
                        }
                    }
                }
            } else {
                self.flush_internal();
                return false;
            }
        } else if let Some(choseong) = self.buffer.choseong() {
            if hangul::is_choseong(ch) {
                if !self.combine_choseong_pair(choseong, ch) {
                    return false;
                }
            } else if !self.push_jamo(ch) {
                return false;
            }
        } else if !self.push_jamo(ch) {
            return false;
        }

        self.save_preedit_string();
        true
    }

    /// 종성이 있는 상태에서 중성이 도착했을 때: 기존 종성을 다음 음절의
    /// 초성으로 되돌리거나(단일 종성), 복합 종성을 분해해 남는 쪽을
    /// 종성으로 유지하고 나머지를 초성으로 되돌린다.
    fn recover_jongseong_then_push_jungseong(&mut self, jongseong: char, ch: char) -> bool {
        let popped = self.buffer.pop();
        let peek = self.buffer.peek().filter(|p| hangul::is_jongseong(*p));
        match peek {
            Some(peek) => match hangul::jongseong_get_diff(peek, jongseong) {
                Some(carried) => {
                    self.buffer.set_jongseong(Some(peek));
                    self.save_commit_string();
                    self.push_jamo(carried);
                    self.push_jamo(ch)
                }
                None => {
                    self.save_commit_string();
                    self.push_jamo(ch)
                }
            },
            None => {
                self.buffer.set_jongseong(None);
                self.save_commit_string();
                if let Some(popped) = popped {
                    if let Some(cho) = hangul::jongseong_to_choseong(popped) {
                        self.push_jamo(cho);
                    }
                }
                self.push_jamo(ch)
            }
        }
    }

    /// 초성만 있는 상태에서 초성이 또 도착했을 때: MS-IME 스타일로 둘을
    /// 종성 복합자음으로 묶을 수 있으면 기존 초성을 종성으로 돌려보낸다.
    fn combine_choseong_pair(&mut self, choseong: char, ch: char) -> bool {
        let combined = self.combine(choseong, ch);
        match combined {
            Some(c) if hangul::is_jongseong(c) => {
                self.buffer.set_choseong(None);
                if let Some(popped) = self.buffer.pop() {
                    if let Some(jong) = hangul::choseong_to_jongseong(popped) {
                        self.push_jamo(jong);
                    }
                }
                self.push_jamo(c) || self.push_jamo(ch)
            }
            Some(c) => self.push_jamo(c) || self.push_jamo(ch),
            None => self.push_jamo(ch),
        }
    }

    /// 역할이 이미 태그된 자모가 직접 들어오는 자판(자소류)을 처리한다.
    ///
    /// 자소류 자판은 아스키가 이미 초/중/종성 중 하나로 태그돼 들어오므로,
    /// 두벌식류처럼 버퍼 점유 상태가 아니라 들어온 자모 자신의 역할을 기준으로
    /// 갈래를 나눈다. 각 역할은 "해당 슬롯이 비었을 때의 재배치/커밋 여부"와
    /// "이미 차 있을 때 스택 맨 위와 조합을 시도할지"를 대칭적으로 따른다.
    fn process_jaso(&mut self, ch: char) -> bool {
        if !hangul::is_jamo(ch) {
            self.save_commit_string();
            if (ch as u32) > 0 {
                self.append_commit_string(&ch.to_string());
                self.save_preedit_string();
                return true;
            }
            return false;
        }

        if hangul::is_choseong(ch) {
            match self.buffer.choseong() {
                None => {
                    let commit_first = !self.option_auto_reorder
                        && (self.buffer.has_jungseong() || self.buffer.has_jongseong());
                    if commit_first {
                        self.save_commit_string();
                    }
                    if !self.push_jamo(ch) {
                        return false;
                    }
                }
                Some(choseong) => {
                    let top_is_choseong = self.buffer.peek().map_or(false, hangul::is_choseong);
                    let combined = top_is_choseong
                        .then(|| self.combine(choseong, ch))
                        .flatten()
                        .filter(|c| hangul::is_choseong(*c));
                    match combined {
                        Some(combined) => {
                            if !self.push_jamo(combined) && !self.push_jamo(ch) {
                                return false;
                            }
                        }
                        None => {
                            self.save_commit_string();
                            if !self.push_jamo(ch) {
                                return false;
                            }
                        }
                    }
                }
            }
        } else if hangul::is_jungseong(ch) {
            match self.buffer.jungseong() {
                None => {
                    let commit_first = !self.option_auto_reorder && self.buffer.has_jongseong();
                    if commit_first {
                        self.save_commit_string();
                    }
                    if !self.push_jamo(ch) {
                        return false;
                    }
                }
                Some(jungseong) => {
                    let top_is_jungseong = self.buffer.peek().map_or(false, hangul::is_jungseong);
                    let combined = top_is_jungseong
                        .then(|| self.combine(jungseong, ch))
                        .flatten()
                        .filter(|c| hangul::is_jungseong(*c));
                    match combined {
                        Some(combined) => {
                            if !self.push_jamo(combined) {
                                return false;
                            }
                        }
                        None => {
                            self.save_commit_string();
                            if !self.push_jamo(ch) {
                                return false;
                            }
                        }
                    }
                }
            }
        } else {
            debug_assert!(hangul::is_jongseong(ch));
            match self.buffer.jongseong() {
                None => {
                    if !self.push_jamo(ch) {
                        return false;
                    }
                }
                Some(jongseong) => {
                    let top_is_jongseong = self.buffer.peek().map_or(false, hangul::is_jongseong);
                    let combined = top_is_jongseong
                        .then(|| self.combine(jongseong, ch))
                        .flatten()
                        .filter(|c| hangul::is_jongseong(*c));
                    match combined {
                        Some(combined) => {
                            if !self.push_jamo(combined) && !self.push_jamo(ch) {
                                return false;
                            }
                        }
                        None => {
                            self.save_commit_string();
                            if !self.push_jamo(ch) {
                                return false;
                            }
                        }
                    }
                }
            }
        }

        self.save_preedit_string();
        true
    }

    /// 로마자 전사 자판을 처리한다. 글자 x/X는 ㅈ으로 강제되고, 빈 버퍼에
    /// 모음이 먼저 오면 ㅇ 초성이 자동으로 채워진다.
    fn process_romaja(&mut self, ascii: u8, mut ch: char) -> bool {
        if ascii == b'x' || ascii == b'X' {
            ch = '\u{110C}'; // ㅈ
        }

        if !hangul::is_jamo(ch) && (ch as u32) > 0 {
            self.save_commit_string();
            self.append_commit_string(&ch.to_string());
            self.save_preedit_string();
            return true;
        }

        if let Some(jongseong) = self.buffer.jongseong() {
            if hangul::is_choseong(ch) {
                let jong = self.choseong_to_jongseong(ch);
                let combined = jong.and_then(|j| self.combine(jongseong, j));
                match combined.filter(|c| hangul::is_jongseong(*c)) {
                    Some(combined) => {
                        if !self.push_jamo(combined) && !self.push_jamo(ch) {
                            return false;
                        }
                    }
                    None => {
                        self.save_commit_string();
                        if !self.push_jamo(ch) {
                            return false;
                        }
                    }
                }
            } else if hangul::is_jungseong(ch) {
                if jongseong == '\u{11BC}' {
                    // ㅇ 종성 뒤에 모음이 오면 다음 음절은 ㅇ을 초성으로 시작한다
                    self.buffer.set_jongseong(None);
                    self.save_commit_string();
                    self.push_jamo('\u{110B}');
                    if !self.push_jamo(ch) {
                        return false;
                    }
                } else if !self.recover_jongseong_then_push_jungseong(jongseong, ch) {
                    return false;
                }
            } else {
                self.flush_internal();
                return false;
            }
        } else if let Some(jungseong) = self.buffer.jungseong() {
            if hangul::is_choseong(ch) {
                self.save_commit_string();
                if !self.push_jamo(ch) {
                    return false;
                }
            } else if hangul::is_jungseong(ch) {
                match self.combine(jungseong, ch).filter(|c| hangul::is_jungseong(*c)) {
                    Some(combined) => {
                        if !self.push_jamo(combined) {
                            return false;
                        }
                    }
                    None => {
                        self.save_commit_string();
                        if !self.push_jamo(ch) {
                            return false;
                        }
                    }
                }
            } else {
                self.flush_internal();
                return false;
            }
        } else if let Some(choseong) = self.buffer.choseong() {
            if hangul::is_choseong(ch) {
                if !self.combine_choseong_pair(choseong, ch) {
                    return false;
                }
            } else if hangul::is_jongseong(ch) {
                // 모음 없이 종성이 먼저 오면 ㅡ를 채워 음절을 완성한다
                self.push_jamo('\u{1173}'); // ㅡ
                if !self.push_jamo(ch) {
                    return false;
                }
            } else if !self.push_jamo(ch) {
                return false;
            }
        } else if hangul::is_jungseong(ch) {
            if !self.push_jamo(ch) {
                return false;
            }
            self.buffer.set_choseong(Some('\u{110B}')); // ㅇ 자동 보강
        } else if !self.push_jamo(ch) {
            return false;
        }

        self.save_preedit_string();
        true
    }
}
