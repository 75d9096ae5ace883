use serde::Serialize;

/// Page strings for one locale. `{n}`, `{total}` and `{card}` are filled in by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub html_lang: &'static str,
    pub title: &'static str,
    pub timers: &'static str,
    pub previous: &'static str,
    pub next: &'static str,
    pub position: &'static str,
    pub question: &'static str,
    pub correct: &'static str,
    pub wrong: &'static str,
    pub check: &'static str,
    pub restart: &'static str,
    pub toggle_music: &'static str,
    pub skip_music: &'static str,
    pub now_playing: &'static str,
}

const EN_US: Labels = Labels {
    html_lang: "en",
    title: "Sakura Memory",
    timers: "Round {round} / Total {total}",
    previous: "⏪ Previous",
    next: "Next ⏩",
    position: "Card {n} / {total}",
    question: "Card #{n} was:",
    correct: "✅ Correct",
    wrong: "❌ Wrong (it was: {card})",
    check: "Check answers",
    restart: "Restart",
    toggle_music: "Play / Pause",
    skip_music: "Next track",
    now_playing: "Now playing: {name}",
};

const TH: Labels = Labels {
    html_lang: "th",
    title: "Sakura Memory: ทดสอบความจำไพ่",
    timers: "เวลาในรอบปัจจุบัน: {round} / เวลาเล่นทั้งหมด: {total}",
    previous: "⏪ ก่อนหน้า",
    next: "ถัดไป ⏩",
    position: "ใบที่ {n} / {total}",
    question: "ไพ่ใบที่ {n} คือ:",
    correct: "✅ ถูกต้อง",
    wrong: "❌ ผิด (คำตอบที่ถูกคือ: {card})",
    check: "ตรวจคำตอบ",
    restart: "เริ่มใหม่",
    toggle_music: "เล่น/หยุดเพลง",
    skip_music: "เพลงถัดไป",
    now_playing: "ตอนนี้กำลังเล่น: {name}",
};

/// Label table for a normalized locale code; anything but Thai falls back to English.
pub fn labels_for(locale: &str) -> &'static Labels {
    if locale.starts_with("th") {
        &TH
    } else {
        &EN_US
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thai_locale_gets_thai_strings() {
        let labels = labels_for("th_TH");
        assert_eq!(labels.html_lang, "th");
        assert_eq!(labels.check, "ตรวจคำตอบ");
        assert_eq!(labels.position, "ใบที่ {n} / {total}");
    }

    #[test]
    fn unknown_locales_fall_back_to_english() {
        assert_eq!(labels_for("en_US"), &EN_US);
        assert_eq!(labels_for("fr_FR").restart, "Restart");
    }
}
