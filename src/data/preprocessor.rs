// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Turns the raw bytes of the corpus file into the single
// corpus string every later stage works on.
//
// Cleaning steps (applied per line, in order):
//   1. Trim surrounding ASCII whitespace
//   2. Lower-case ASCII letters
//   3. Drop every non-ASCII byte (permissive decode: invalid
//      or multi-byte sequences vanish instead of failing)
//   4. Skip lines left empty
// The surviving lines are joined with single spaces.
//
// Example:
//   b"  Alice WAS\r\n\r\n\xe2\x80\x9cbeginning\xe2\x80\x9d\n"
//     → "alice was beginning"
//
// Trimming happens before the non-ASCII bytes are dropped, so
// a line like b"end \xe2\x80\x94" keeps its inner space: "end ".
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a whole file's bytes into one corpus string
    pub fn clean(&self, raw: &[u8]) -> String {
        raw.split(|&b| b == b'\n')
            .filter_map(|line| self.clean_line(line))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clean one line; None when nothing usable remains
    pub fn clean_line(&self, line: &[u8]) -> Option<String> {
        let trimmed = trim_ascii_whitespace(line);

        let cleaned: String = trimmed
            .iter()
            .filter(|b| b.is_ascii())
            .map(|&b| b.to_ascii_lowercase() as char)
            .collect();

        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// Vertical tab counts as whitespace here even though
// u8::is_ascii_whitespace does not treat it as such.
fn is_strippable(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

fn trim_ascii_whitespace(line: &[u8]) -> &[u8] {
    let start = line.iter().position(|&b| !is_strippable(b));
    let end   = line.iter().rposition(|&b| !is_strippable(b));
    match (start, end) {
        (Some(s), Some(e)) => &line[s..=e],
        _ => &[],
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_joins_lines() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(b"Down The\nRabbit-Hole"), "down the rabbit-hole");
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(b"one\n\n   \r\ntwo\n"), "one two");
    }

    #[test]
    fn test_non_ascii_bytes_are_dropped() {
        let p = Preprocessor::new();
        let raw = "\u{201c}Curiouser\u{201d} caf\u{e9}".as_bytes();
        assert_eq!(p.clean(raw), "curiouser caf");
    }

    #[test]
    fn test_line_of_only_non_ascii_is_skipped() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("a\n\u{2014}\u{2014}\nb".as_bytes()), "a b");
    }

    #[test]
    fn test_trim_happens_before_decode() {
        let p = Preprocessor::new();
        assert_eq!(p.clean_line("end \u{2014}".as_bytes()), Some("end ".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(b""), "");
        assert_eq!(p.clean_line(b" \t\x0b "), None);
    }
}
