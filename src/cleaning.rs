//! Heuristic cleanup of scraped news article bodies.
//!
//! Scraped articles arrive interleaved with site furniture: share buttons,
//! category labels, publisher bylines with clock times, and a promotional
//! sign-off. [`TextCleaner::clean`] is the deterministic, I/O-free transform
//! that strips all of it and joins the surviving lines into one string.
//!
//! The heuristics are corpus-specific tuning, so every literal (denylist,
//! footer sentence, trailing-trim width) is a public field with defaults
//! rather than a hard-coded invariant.
//!
//! A malformed line must never abort a corpus load: every fallible sub-step
//! degrades to a placeholder or drops the line, which is why the per-line
//! helpers return `Option` and the caller filters the gaps.

/// Configurable line-level cleaner for raw article bodies.
#[derive(Debug, Clone)]
pub struct TextCleaner {
    /// Lines matching any of these literals exactly are dropped outright.
    pub stop_lines: Vec<String>,
    /// Promotional sign-off removed when it is the final line of a multi-line body.
    pub footer: String,
    /// Relative-date marker stripped from line ends instead of the byline heuristic.
    pub yesterday_marker: String,
    /// Characters removed from a line that ends in a four-digit clock time.
    pub timestamp_trim: usize,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self {
            stop_lines: [
                "",
                " ",
                "Share",
                "Repeat",
                "1.7%No",
                "Siberia",
                "Guests",
                "InfographicSee",
                "27 Maay",
                "Culture",
            ]
            .into_iter()
            .map(str::to_owned)
            .collect(),
            footer: "No Telegram channel like ours exists. It is for those who want to draw conclusions"
                .to_owned(),
            yesterday_marker: "Yesterday".to_owned(),
            timestamp_trim: 6,
        }
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cleans one raw article body.
    ///
    /// Steps, in order: character normalization, line split, denylist filter,
    /// headline-prefix strip on the first line, per-line trim and trailing-period
    /// drop, trailing-timestamp strip, per-line byline strip (which may drop the
    /// line), footer removal, and a final `". "` join.
    pub fn clean(&self, raw: &str) -> String {
        let normalized: String = raw
            .chars()
            .filter_map(|c| match c {
                '\u{AD}' | '\u{A0}' | ':' => None,
                '\u{2D7}' => Some('-'),
                other => Some(other),
            })
            .collect();

        let mut lines: Vec<String> = normalized
            .trim()
            .split('\n')
            .filter(|line| !self.stop_lines.iter().any(|stop| stop.as_str() == *line))
            .map(str::to_owned)
            .collect();

        if lines.is_empty() {
            return String::new();
        }

        lines[0] = strip_headline_prefix(&lines[0]);

        let lines: Vec<String> = lines
            .iter()
            .map(|line| {
                let line = line.trim();
                line.strip_suffix('.').unwrap_or(line).to_owned()
            })
            .map(|line| strip_trailing_timestamp(&line, self.timestamp_trim))
            .collect();

        let mut kept: Vec<String> = lines.iter().filter_map(|line| self.filter_end(line)).collect();

        if kept.len() >= 2 && kept.last().map(String::as_str) == Some(self.footer.as_str()) {
            kept.pop();
        }

        kept.join(". ")
    }

    /// Strips trailing technical text from one line.
    ///
    /// A line ending in the relative-date marker loses just that suffix.
    /// Any other line loses its last space-delimited token and then any run of
    /// trailing digits, which removes a `"<publisher> <HHMM>"`-style byline.
    /// Returns `None` when the line is consumed entirely, so the caller drops it.
    fn filter_end(&self, line: &str) -> Option<String> {
        if let Some(prefix) = line.strip_suffix(self.yesterday_marker.as_str()) {
            return Some(prefix.to_owned());
        }

        let mut tokens: Vec<&str> = line.split(' ').collect();
        tokens.pop();
        let mut rest = tokens.join(" ");

        loop {
            match rest.chars().last() {
                Some(c) if c.is_numeric() => {
                    rest.pop();
                }
                Some(_) => break,
                None => return None,
            }
        }

        Some(rest.trim().to_owned())
    }
}

/// Drops a leading `"<number>."`-style prefix from the headline line.
///
/// The prefix is everything up to and including the first period, unless the
/// line holds only a single trailing period (two split pieces, second empty),
/// in which case it is kept as-is.
fn strip_headline_prefix(line: &str) -> String {
    let pieces: Vec<&str> = line.split('.').collect();
    if pieces.len() > 1 && !(pieces.len() == 2 && pieces[1].is_empty()) {
        pieces[1..].join(".")
    } else {
        pieces.join(".")
    }
}

/// Removes a trailing clock-time suffix.
///
/// When the last four characters are all digits the line loses `trim`
/// characters (the digits plus their separator). An empty line degrades to a
/// single space so the later byline pass can discard it.
fn strip_trailing_timestamp(line: &str, trim: usize) -> String {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return " ".to_owned();
    }
    if chars.len() >= 4 && chars[chars.len() - 4..].iter().all(|c| c.is_numeric()) {
        let keep = chars.len().saturating_sub(trim);
        return chars[..keep].iter().collect();
    }
    line.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaner() -> TextCleaner {
        TextCleaner::default()
    }

    #[test]
    fn denylisted_line_is_removed_and_headline_prefix_stripped() {
        let raw = "Share\n1. Real headline text.\nMore body.";
        assert_eq!(cleaner().clean(raw), "Real headline. More");
    }

    #[test]
    fn denylist_is_exact_match_not_trimmed() {
        // "Share " with a trailing space is not in the stop list, so it survives
        // the filter and is treated as an ordinary line.
        let raw = "Share \nFirst headline here.\nSecond line of body text.";
        let cleaned = cleaner().clean(raw);
        assert!(!cleaned.contains("Share"));
        assert!(cleaned.contains("Second line of body"));
    }

    #[test]
    fn character_normalization_strips_artifacts() {
        let raw = "1. Head\u{AD}line with\u{A0}noise stays here.\nTime was 18:30 exactly written.";
        let cleaned = cleaner().clean(raw);
        assert!(cleaned.contains("Headline withnoise stays"));
        assert!(!cleaned.contains(':'));
        assert!(!cleaned.contains('\u{AD}'));
    }

    #[test]
    fn modifier_minus_becomes_hyphen() {
        let raw = "2. Temperature fell to ˗5 degrees overnight.\nCold snap continues today everywhere.";
        let cleaned = cleaner().clean(raw);
        assert!(cleaned.contains("-5 degrees"));
    }

    #[test]
    fn headline_with_single_trailing_period_kept_whole() {
        // Two split pieces with an empty second piece: no real prefix to strip.
        let raw = "Plain headline.\nFollow-up sentence with detail.";
        let cleaned = cleaner().clean(raw);
        assert!(cleaned.starts_with("Plain"));
    }

    #[test]
    fn trailing_clock_time_strips_six_chars() {
        // After colon removal "12:45" reads "1245"; the strip also eats the
        // separator and the publisher's last character, and the byline pass
        // then removes the rest of the token.
        let raw = "3. Markets opened higher today.\nIndex climbed steadily RIA 12:45";
        let cleaned = cleaner().clean(raw);
        assert!(cleaned.contains("Index climbed"));
        assert!(!cleaned.contains("1245"));
        assert!(!cleaned.contains("RIA"));
    }

    #[test]
    fn yesterday_suffix_is_stripped_without_byline_pass() {
        let raw = "4. Weather report issued.\nStorm warnings were liftedYesterday";
        let cleaned = cleaner().clean(raw);
        assert!(cleaned.ends_with("Storm warnings were lifted"));
    }

    #[test]
    fn byline_pass_drops_last_token_and_trailing_digits() {
        let c = cleaner();
        assert_eq!(c.filter_end("quake hit region99 overnight"), Some("quake hit region".to_owned()));
        assert_eq!(c.filter_end("single"), None);
        assert_eq!(c.filter_end(""), None);
        assert_eq!(c.filter_end(" "), None);
        assert_eq!(c.filter_end("1234 5678"), None);
    }

    #[test]
    fn footer_removed_only_as_final_line_of_multi_line_body() {
        let c = cleaner();
        let footer = c.footer.clone();
        let raw = format!("5. Big announcement made.\nDetails follow in the report.\n{footer} extra");
        // The footer line itself ends without digits, so the byline pass leaves
        // "... conclusions" intact once the trailing token is gone.
        let cleaned = c.clean(&raw);
        assert!(!cleaned.contains("Telegram channel like ours"));
    }

    #[test]
    fn clean_is_deterministic() {
        let raw = "Share\n6. Some headline text.\nBody continues here today.";
        let c = cleaner();
        assert_eq!(c.clean(raw), c.clean(raw));
    }

    #[test]
    fn empty_body_yields_empty_string() {
        assert_eq!(cleaner().clean(""), "");
        assert_eq!(cleaner().clean("\n\n"), "");
        assert_eq!(cleaner().clean("Share\nRepeat"), "");
    }

    #[test]
    fn short_and_empty_lines_never_panic() {
        let raw = "7. A.\n.\n \nx\n1234";
        // Nothing here survives the byline pass; the point is graceful decay.
        let _ = cleaner().clean(raw);
    }

    #[test]
    fn custom_stop_lines_are_honored() {
        let mut c = cleaner();
        c.stop_lines.push("Advertisement".to_owned());
        let raw = "Advertisement\n8. Custom headline text.\nRemaining body text here.";
        let cleaned = c.clean(raw);
        assert!(!cleaned.contains("Advertisement"));
        assert!(cleaned.contains("Custom headline"));
    }
}
