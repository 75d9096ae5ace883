use std::fs;
use std::io::{self, Write};
#[cfg(unix)]
use std::io::Read;
#[cfg(unix)]
use std::os::fd::AsRawFd;
use std::path::PathBuf;

const HISTORY_LIMIT: usize = 200;

pub const COMMAND_WORDS: &[&str] = &[
    "?", "answer", "check", "exit", "help", "music", "next", "prev", "quit", "restart", "skip",
    "state", "time",
];

/// Prompt reader with history and first-word completion on a raw tty.
#[derive(Default)]
pub struct LineEditor {
    history: Vec<String>,
    history_path: Option<PathBuf>,
    history_index: Option<usize>,
    draft: Option<String>,
}

impl LineEditor {
    pub fn new() -> Self {
        let mut editor = Self {
            history_path: default_history_path(),
            ..Self::default()
        };
        editor.load_history();
        editor
    }

    #[cfg(unix)]
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        let stdin = io::stdin();
        let fd = stdin.as_raw_fd();
        if unsafe { libc::isatty(fd) } != 1 {
            return self.read_line_basic(prompt);
        }
        let _raw = match RawMode::new(fd) {
            Ok(raw) => raw,
            Err(err) => {
                log::debug!("raw mode unavailable: {err}");
                return self.read_line_basic(prompt);
            }
        };
        let mut input = stdin.lock();
        self.edit_line(&mut input, prompt)
    }

    /// Raw-mode key loop over `input`; bytes are decoded as UTF-8.
    #[cfg(unix)]
    fn edit_line(&mut self, input: &mut impl Read, prompt: &str) -> Option<String> {
        let mut buffer = String::new();
        self.history_index = None;
        self.draft = None;
        redraw(prompt, &buffer);
        loop {
            let mut byte = [0u8; 1];
            if input.read_exact(&mut byte).is_err() {
                return None;
            }
            match byte[0] {
                b'\n' | b'\r' => {
                    println!();
                    self.push_history(&buffer);
                    return Some(buffer);
                }
                3 => {
                    println!();
                    return Some(String::new());
                }
                4 if buffer.is_empty() => {
                    println!();
                    return None;
                }
                9 => {
                    let (updated, suggestions) = complete_word(&buffer);
                    if let Some(updated) = updated {
                        buffer = updated;
                    }
                    if !suggestions.is_empty() {
                        println!();
                        println!("{}", suggestions.join("  "));
                    }
                }
                127 | 8 => {
                    buffer.pop();
                    self.history_index = None;
                }
                b'\x1b' => match read_arrow(input) {
                    Some(Arrow::Up) => self.history_prev(&mut buffer),
                    Some(Arrow::Down) => self.history_next(&mut buffer),
                    None => {}
                },
                byte if byte.is_ascii_control() => {}
                lead => {
                    if let Some(ch) = read_char(lead, input) {
                        buffer.push(ch);
                        self.history_index = None;
                    }
                }
            }
            redraw(prompt, &buffer);
        }
    }

    #[cfg(not(unix))]
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.read_line_basic(prompt)
    }

    fn read_line_basic(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        if io::stdin().read_line(&mut line).ok()? == 0 {
            return None;
        }
        let line = line.trim_end_matches(&['\n', '\r'][..]).to_string();
        self.push_history(&line);
        Some(line)
    }

    fn history_prev(&mut self, buffer: &mut String) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            Some(index) => index.saturating_sub(1),
            None => {
                self.draft = Some(buffer.clone());
                self.history.len() - 1
            }
        };
        self.history_index = Some(index);
        *buffer = self.history[index].clone();
    }

    fn history_next(&mut self, buffer: &mut String) {
        let Some(index) = self.history_index else {
            return;
        };
        if index + 1 < self.history.len() {
            self.history_index = Some(index + 1);
            *buffer = self.history[index + 1].clone();
        } else {
            self.history_index = None;
            *buffer = self.draft.take().unwrap_or_default();
        }
    }

    fn push_history(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || self.history.last().is_some_and(|last| last == line) {
            return;
        }
        self.history.push(line.to_string());
        if self.history.len() > HISTORY_LIMIT {
            let drop = self.history.len() - HISTORY_LIMIT;
            self.history.drain(0..drop);
        }
    }

    fn load_history(&mut self) {
        let Some(path) = self.history_path.as_ref() else {
            return;
        };
        let Ok(contents) = fs::read_to_string(path) else {
            return;
        };
        self.history = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
    }

    pub fn save_history(&self) {
        let Some(path) = self.history_path.as_ref() else {
            return;
        };
        let mut contents = self.history.join("\n");
        if !contents.is_empty() {
            contents.push('\n');
        }
        if let Err(err) = fs::write(path, contents) {
            log::warn!("history not saved to {}: {err}", path.display());
        }
    }
}

fn default_history_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SAKURA_HISTORY") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".sakura_history"))
}

/// Completes the command word; arguments are left alone.
pub fn complete_word(line: &str) -> (Option<String>, Vec<String>) {
    if line.contains(' ') {
        return (None, Vec::new());
    }
    let matches: Vec<&str> = COMMAND_WORDS
        .iter()
        .copied()
        .filter(|word| word.starts_with(line))
        .collect();
    match matches.as_slice() {
        [] => (None, Vec::new()),
        [only] => (Some(format!("{only} ")), Vec::new()),
        many => {
            let common = longest_common_prefix(many);
            let updated = (common.len() > line.len()).then_some(common);
            (updated, many.iter().map(|word| word.to_string()).collect())
        }
    }
}

fn longest_common_prefix(matches: &[&str]) -> String {
    let Some(first) = matches.first() else {
        return String::new();
    };
    let mut prefix = (*first).to_string();
    for entry in &matches[1..] {
        while !entry.starts_with(&prefix) {
            prefix.pop();
        }
    }
    prefix
}

fn redraw(prompt: &str, line: &str) {
    print!("\r\x1b[2K{prompt}{line}");
    let _ = io::stdout().flush();
}

/// Completes a UTF-8 sequence from its lead byte; invalid input is dropped.
#[cfg(unix)]
fn read_char(lead: u8, input: &mut impl Read) -> Option<char> {
    let width = match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return None,
    };
    let mut bytes = [lead, 0, 0, 0];
    input.read_exact(&mut bytes[1..width]).ok()?;
    std::str::from_utf8(&bytes[..width]).ok()?.chars().next()
}

#[cfg(unix)]
enum Arrow {
    Up,
    Down,
}

#[cfg(unix)]
fn read_arrow(input: &mut impl Read) -> Option<Arrow> {
    let mut seq = [0u8; 2];
    input.read_exact(&mut seq).ok()?;
    match seq {
        [b'[', b'A'] | [b'O', b'A'] => Some(Arrow::Up),
        [b'[', b'B'] | [b'O', b'B'] => Some(Arrow::Down),
        _ => None,
    }
}

#[cfg(unix)]
struct RawMode {
    fd: i32,
    original: libc::termios,
}

#[cfg(unix)]
impl RawMode {
    fn new(fd: i32) -> io::Result<Self> {
        let mut original = unsafe { std::mem::zeroed::<libc::termios>() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }
        let mut raw = original;
        raw.c_lflag &= !(libc::ICANON | libc::ECHO);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL);
        raw.c_cc[libc::VMIN] = 1;
        raw.c_cc[libc::VTIME] = 0;
        if unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(Self { fd, original })
    }
}

#[cfg(unix)]
impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = unsafe { libc::tcsetattr(self.fd, libc::TCSAFLUSH, &self.original) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_unique_command_words() {
        assert_eq!(complete_word("ch"), (Some("check ".to_string()), Vec::new()));
        assert_eq!(complete_word("answer 1 AS"), (None, Vec::new()));
        assert_eq!(complete_word("zz"), (None, Vec::new()));
    }

    #[test]
    fn lists_ambiguous_matches() {
        let (updated, suggestions) = complete_word("s");
        assert_eq!(updated, None);
        assert_eq!(suggestions, vec!["skip", "state"]);
        let (updated, suggestions) = complete_word("re");
        assert_eq!(updated, Some("restart ".to_string()));
        assert!(suggestions.is_empty());
    }

    #[test]
    fn history_skips_blank_and_repeated_lines() {
        let mut editor = LineEditor::default();
        editor.push_history("next");
        editor.push_history("next");
        editor.push_history("   ");
        editor.push_history("check");
        assert_eq!(editor.history, vec!["next", "check"]);

        let mut buffer = "ans".to_string();
        editor.history_prev(&mut buffer);
        assert_eq!(buffer, "check");
        editor.history_prev(&mut buffer);
        assert_eq!(buffer, "next");
        editor.history_next(&mut buffer);
        editor.history_next(&mut buffer);
        assert_eq!(buffer, "ans");
    }

    #[cfg(unix)]
    #[test]
    fn multibyte_input_is_decoded_whole() {
        let mut editor = LineEditor::default();
        let mut input = io::Cursor::new("answer 1 A♠\r".as_bytes().to_vec());
        let line = editor.edit_line(&mut input, "> ");
        assert_eq!(line.as_deref(), Some("answer 1 A♠"));

        let mut input = io::Cursor::new("ใบ\x7f\r".as_bytes().to_vec());
        assert_eq!(editor.edit_line(&mut input, "> ").as_deref(), Some("ใ"));
    }

    #[cfg(unix)]
    #[test]
    fn stray_continuation_bytes_are_dropped() {
        let mut input = io::Cursor::new(vec![0x99, b'K']);
        assert_eq!(read_char(0xa0, &mut input), None);
        let mut input = io::Cursor::new(vec![0x99, 0xa0]);
        assert_eq!(read_char(0xe2, &mut input), Some('♠'));
    }
}
