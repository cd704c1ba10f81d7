//! Anchor-driven text insertion
//!
//! An [`InsertionPlan`] is an ordered table of anchor rules plus a fallback.
//! The first rule whose anchor is found decides the insertion point; the
//! remaining rules are not consulted. All anchors resolve to a line start so
//! fragments (which are whole lines) never split an existing line.

use once_cell::sync::Lazy;
use regex::Regex;

/// Where a fragment goes relative to the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    After,
    Before,
}

/// Any line that starts a new top-level YAML key (no indent, not a comment).
static TOP_LEVEL_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[^\s#]").expect("valid regex"));

#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// First match of the pattern. A named group `at` narrows the anchor to
    /// that group's span.
    Pattern {
        regex: &'static Lazy<Regex>,
        placement: Placement,
    },
    /// The end of a top-level section: just before the next top-level key
    /// following `header`, or end of file when the section is last.
    SectionEnd { header: &'static Lazy<Regex> },
}

#[derive(Debug, Clone, Copy)]
pub struct AnchorRule {
    pub name: &'static str,
    pub anchor: Anchor,
}

impl AnchorRule {
    pub const fn after(name: &'static str, regex: &'static Lazy<Regex>) -> Self {
        Self {
            name,
            anchor: Anchor::Pattern {
                regex,
                placement: Placement::After,
            },
        }
    }

    pub const fn before(name: &'static str, regex: &'static Lazy<Regex>) -> Self {
        Self {
            name,
            anchor: Anchor::Pattern {
                regex,
                placement: Placement::Before,
            },
        }
    }

    pub const fn section_end(name: &'static str, header: &'static Lazy<Regex>) -> Self {
        Self {
            name,
            anchor: Anchor::SectionEnd { header },
        }
    }

    /// Byte offset for insertion, if the anchor is present.
    fn locate(&self, content: &str) -> Option<(usize, Placement)> {
        match self.anchor {
            Anchor::Pattern { regex, placement } => {
                let caps = regex.captures(content)?;
                let span = caps.name("at").or_else(|| caps.get(0))?;
                let offset = match placement {
                    Placement::After => span.end(),
                    Placement::Before => span.start(),
                };
                Some((offset, placement))
            }
            Anchor::SectionEnd { header } => {
                let start = header.find(content)?.end();
                let offset = TOP_LEVEL_LINE
                    .find(&content[start..])
                    .map_or(content.len(), |m| start + m.start());
                Some((offset, Placement::Before))
            }
        }
    }
}

/// What to do when no rule's anchor is found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    AppendToEnd,
    Skip,
}

/// How a fragment ended up in (or out of) the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    Anchor(&'static str),
    Appended,
    Skipped,
}

#[derive(Debug, Clone)]
pub struct InsertionPlan {
    pub rules: Vec<AnchorRule>,
    pub fallback: Fallback,
}

impl InsertionPlan {
    pub fn new(rules: Vec<AnchorRule>, fallback: Fallback) -> Self {
        Self { rules, fallback }
    }

    /// Inserts the fragment produced by `render` and returns the new content,
    /// or `None` when the plan skipped. `render` receives the placement so
    /// blocks can put their blank-line separator on the correct side.
    pub fn apply<R>(&self, content: &str, render: R) -> (Option<String>, Via)
    where
        R: Fn(Placement) -> String,
    {
        for rule in &self.rules {
            if let Some((offset, placement)) = rule.locate(content) {
                let fragment = render(placement);
                let mut out = String::with_capacity(content.len() + fragment.len());
                out.push_str(&content[..offset]);
                out.push_str(&fragment);
                out.push_str(&content[offset..]);
                return (Some(out), Via::Anchor(rule.name));
            }
        }

        match self.fallback {
            Fallback::AppendToEnd => {
                let mut out = content.to_string();
                out.push_str(&render(Placement::After));
                (Some(out), Via::Appended)
            }
            Fallback::Skip => (None, Via::Skipped),
        }
    }
}
