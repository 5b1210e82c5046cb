//! Header line grammar.
//!
//! A message starts with a timestamp+author header. Three dialects are
//! recognized, tried in this order (first match wins):
//!
//! ```text
//! [15/01/2024, 21:05:33] Alice: hello          <- Bracketed
//! 15/01/2024, 21:05 - Alice: hello             <- Dashed
//! 2024-01-15 21:05:33 - Alice: hello           <- IsoDashed
//! ```
//!
//! Each dialect is a [`LineShape`] variant with its own pattern. Adding a
//! dialect means adding a variant and appending it to [`LineShape::ALL`].

use regex::{Captures, Regex};

use super::normalize::strip_direction_marks;

const SLASH_DATE: &str = r"\d{1,2}/\d{1,2}/\d{1,4}";
const CLOCK: &str = r"\d{1,2}:\d{2}(?::\d{2})?(?:\s*[AaPp]\.?[Mm]\.?)?";

/// Supported header dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineShape {
    Bracketed,
    Dashed,
    IsoDashed,
}

impl LineShape {
    /// Declared match order.
    pub const ALL: [LineShape; 3] = [LineShape::Bracketed, LineShape::Dashed, LineShape::IsoDashed];

    fn pattern(self) -> String {
        match self {
            LineShape::Bracketed => format!(
                r"^\[({SLASH_DATE}),?\s*({CLOCK})\]\s*([^:]+?):\s?(.*)$"
            ),
            LineShape::Dashed => {
                format!(r"^({SLASH_DATE}),\s*({CLOCK})\s+-\s+([^:]+?):\s?(.*)$")
            }
            LineShape::IsoDashed => {
                r"^(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\s+-\s+([^:]+?):\s?(.*)$".to_string()
            }
        }
    }

    /// Pull (timestamp text, author, text) out of a successful match.
    fn fields<'h>(self, caps: &Captures<'h>) -> (String, &'h str, &'h str) {
        match self {
            LineShape::Bracketed | LineShape::Dashed => (
                format!("{}, {}", &caps[1], &caps[2]),
                caps.get(3).map_or("", |m| m.as_str()),
                caps.get(4).map_or("", |m| m.as_str()),
            ),
            LineShape::IsoDashed => (
                caps[1].to_string(),
                caps.get(2).map_or("", |m| m.as_str()),
                caps.get(3).map_or("", |m| m.as_str()),
            ),
        }
    }
}

/// A header line broken into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub shape: LineShape,
    /// Date and time as written, ready for the timestamp resolver
    pub timestamp_text: String,
    pub author: String,
    pub text: String,
    pub attachments: Vec<String>,
}

/// Ordered set of compiled header matchers.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    matchers: Vec<(LineShape, Regex)>,
    attachment: Regex,
}

impl LineGrammar {
    pub fn new() -> Self {
        let matchers = LineShape::ALL
            .iter()
            .map(|shape| {
                let re = Regex::new(&shape.pattern()).expect("header line regex");
                (*shape, re)
            })
            .collect();
        let attachment = Regex::new(r"<attached:\s*([^>]+)>").expect("attachment regex");
        Self {
            matchers,
            attachment,
        }
    }

    /// Match a normalized line against each dialect in order.
    pub fn match_line(&self, line: &str) -> Option<HeaderMatch> {
        self.matchers.iter().find_map(|(shape, re)| {
            let caps = re.captures(line)?;
            let (timestamp_text, author, text) = shape.fields(&caps);
            let author = strip_direction_marks(author);
            let text = strip_direction_marks(text);
            let attachments = self.attachments(&text);
            Some(HeaderMatch {
                shape: *shape,
                timestamp_text,
                author,
                text,
                attachments,
            })
        })
    }

    /// Every `<attached: name>` marker in `text`, in order.
    ///
    /// The markers are reported, not removed; callers keep them in the text.
    pub fn attachments(&self, text: &str) -> Vec<String> {
        self.attachment
            .captures_iter(text)
            .map(|c| c[1].trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }
}

impl Default for LineGrammar {
    fn default() -> Self {
        Self::new()
    }
}
