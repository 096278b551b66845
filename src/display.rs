use std::collections::{HashMap, HashSet};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Inclusive token range of a displayed span.
pub type TokenRange = (usize, usize);

/// Convert a zero-based index to a base-26 label: A, B, ..., Z, AA, AB, ..., AZ, BA, ...
/// Similar to Excel column naming.
fn index_to_base26_label(mut n: usize) -> String {
    let mut result = String::new();
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

/// Where a link arrow points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// A span in the same display.
    Span(TokenRange),
    /// Something outside the displayed tokens, rendered verbatim.
    External(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLink {
    pub label: String,
    pub target: LinkTarget,
}

struct IncludedSpan {
    range: TokenRange,
    label: String,
    links: Vec<DisplayLink>,
}

/// Renders tokens with underlined, labelled spans and optional link arrows.
pub struct SpanDisplay {
    tokens: Vec<String>,
    spans: Vec<IncludedSpan>,
}

// Jan  zag  de  minister  .
// ╰─╯#0
//           ╰──────────╯[A] #2
//           ╰──────────╯#3
//             └─strict_head_match─>[A]
impl std::fmt::Display for SpanDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut start_cols = Vec::with_capacity(self.tokens.len());
        let mut end_cols = Vec::with_capacity(self.tokens.len());

        let mut opening_line = String::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }
            start_cols.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(token);
            end_cols.push(UnicodeWidthStr::width(&*opening_line));
        }
        f.write_str(&opening_line)?;

        let span_labels = self.build_span_labels();

        for span in &self.spans {
            let (first, last) = span.range;
            let (start_col, end_col) = match (start_cols.get(first), end_cols.get(last)) {
                (Some(&start), Some(&end)) if start < end => (start, end),
                _ => continue,
            };
            f.write_char('\n')?;
            for _ in 0..start_col {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end_col - start_col > 1 {
                f.write_char('╯')?;
            }
            if let Some(label) = span_labels.get(&span.range) {
                write!(f, "{} ", label)?;
            }
            f.write_str(&span.label)?;

            for link in &span.links {
                f.write_char('\n')?;
                for _ in 0..start_col + 2 {
                    f.write_char(' ')?;
                }
                let target = match &link.target {
                    LinkTarget::Span(range) => span_labels
                        .get(range)
                        .cloned()
                        .unwrap_or_else(|| format!("[{}..{}]", range.0, range.1)),
                    LinkTarget::External(text) => text.clone(),
                };
                write!(f, "└─{}─>{}", link.label, target)?;
            }
        }

        Ok(())
    }
}

impl SpanDisplay {
    pub fn new<T: Into<String>>(tokens: impl IntoIterator<Item = T>) -> Self {
        SpanDisplay {
            tokens: tokens.into_iter().map(Into::into).collect(),
            spans: Vec::new(),
        }
    }

    /// Map link targets that are displayed spans to "[A]", "[B]", ...
    fn build_span_labels(&self) -> HashMap<TokenRange, String> {
        let included: HashSet<TokenRange> = self.spans.iter().map(|s| s.range).collect();
        let mut targets: Vec<TokenRange> = self
            .spans
            .iter()
            .flat_map(|s| &s.links)
            .filter_map(|link| match link.target {
                LinkTarget::Span(range) if included.contains(&range) => Some(range),
                _ => None,
            })
            .collect();
        targets.sort();
        targets.dedup();

        targets
            .into_iter()
            .enumerate()
            .map(|(i, range)| (range, format!("[{}]", index_to_base26_label(i))))
            .collect()
    }

    pub fn include(&mut self, range: TokenRange, label: impl Into<String>) {
        self.include_linked(range, label, Vec::new());
    }

    pub fn include_linked(&mut self, range: TokenRange, label: impl Into<String>, links: Vec<DisplayLink>) {
        self.spans.push(IncludedSpan {
            range,
            label: label.into(),
            links,
        });
    }

    /// Takes self
    pub fn with(mut self, range: TokenRange, label: impl Into<String>) -> Self {
        self.include(range, label);
        self
    }
}
