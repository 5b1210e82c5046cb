//! Line normalization for exported chat transcripts.
//!
//! Chat exports sprinkle invisible direction marks around names and
//! timestamps, and some locales write the AM/PM separator as a narrow
//! no-break space. Both break pattern matching, so every line goes through
//! [`normalize_line`] before the grammar sees it.

/// Left-to-right mark. Exporters put it in front of system notices.
pub const LEFT_TO_RIGHT_MARK: char = '\u{200E}';

/// Returns true for bidi/direction-control code points that carry no text.
pub fn is_direction_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}'              // LRM
            | '\u{200F}'        // RLM
            | '\u{061C}'        // Arabic letter mark
            | '\u{202A}'..='\u{202E}' // LRE, RLE, PDF, LRO, RLO
            | '\u{2066}'..='\u{2069}' // LRI, RLI, FSI, PDI
            | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

/// Remove direction marks only. Used on captured author/text groups.
pub fn strip_direction_marks(s: &str) -> String {
    s.chars().filter(|c| !is_direction_mark(*c)).collect()
}

/// Strip direction marks and fold exotic spaces into ASCII space.
pub fn normalize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '\u{202F}' | '\u{00A0}' => out.push(' '),
            c if is_direction_mark(c) => {}
            c => out.push(c),
        }
    }
    out
}

/// A system notice is a line the exporter prefixed with a left-to-right mark
/// (joins, leaves, encryption banners).
pub fn is_system_notice(raw_line: &str) -> bool {
    raw_line.starts_with(LEFT_TO_RIGHT_MARK)
}
