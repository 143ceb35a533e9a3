//! Heading classification of page text.
//!
//! [`PageClassifier`] walks the non-empty lines of a page once, in order,
//! and freezes the first chapter heading and the first subsection heading
//! it meets. Everything else is body text. Pages without recognizable
//! headings fall back to their first and second body lines, and pages with
//! too few lines fall back to fixed labels, so every page always gets a
//! chapter and a subsection.

use std::sync::LazyLock;

use regex::Regex;

static CHAPTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Chapter [0-9]+: (.+)$").expect("chapter pattern is valid")
});

static SUBSECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)+ .+$").expect("subsection pattern is valid")
});

const SECTION_PREFIX: &str = "Section";

/// Decides whether a single trimmed line is a heading.
///
/// Each method returns the heading value to record when the line matches,
/// which is not necessarily the whole line (the pattern rule keeps only
/// the title of `Chapter 3: Title`).
pub trait HeadingMatcher: Send + Sync {
    /// Returns the chapter title if `line` is a chapter heading.
    fn match_chapter(&self, line: &str) -> Option<String>;

    /// Returns the subsection title if `line` is a subsection heading.
    fn match_subsection(&self, line: &str) -> Option<String>;
}

/// `Chapter <n>: <title>` chapters and numbered (`1.2 Title`) or
/// `Section ...` subsections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

impl HeadingMatcher for PatternMatcher {
    fn match_chapter(&self, line: &str) -> Option<String> {
        CHAPTER_RE
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|title| title.as_str().trim().to_string())
    }

    fn match_subsection(&self, line: &str) -> Option<String> {
        if SUBSECTION_RE.is_match(line) || line.starts_with(SECTION_PREFIX) {
            Some(line.to_string())
        } else {
            None
        }
    }
}

/// All-capitals chapters and `Section ...` subsections.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperCaseMatcher;

impl HeadingMatcher for UpperCaseMatcher {
    fn match_chapter(&self, line: &str) -> Option<String> {
        let mut has_upper = false;
        for c in line.chars().filter(|c| c.is_alphabetic()) {
            if c.is_lowercase() {
                return None;
            }
            has_upper |= c.is_uppercase();
        }
        has_upper.then(|| line.to_string())
    }

    fn match_subsection(&self, line: &str) -> Option<String> {
        line.starts_with(SECTION_PREFIX).then(|| line.to_string())
    }
}

/// Built-in heading detection rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum HeadingStrategy {
    /// See [`PatternMatcher`].
    #[default]
    Pattern,
    /// See [`UpperCaseMatcher`].
    UpperCase,
}

impl HeadingStrategy {
    /// The matcher implementing this strategy.
    pub fn matcher(self) -> Box<dyn HeadingMatcher> {
        match self {
            HeadingStrategy::Pattern => Box::new(PatternMatcher),
            HeadingStrategy::UpperCase => Box::new(UpperCaseMatcher),
        }
    }
}

/// Labels used when a page has no line to fall back on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FallbackLabels {
    /// Chapter label for pages without any body line.
    pub chapter: String,
    /// Subsection label for pages with fewer than two body lines.
    pub subsection: String,
}

impl FallbackLabels {
    /// "Untitled Chapter" / "Untitled Subsection".
    pub fn untitled() -> Self {
        Self {
            chapter: "Untitled Chapter".to_string(),
            subsection: "Untitled Subsection".to_string(),
        }
    }
}

impl Default for FallbackLabels {
    fn default() -> Self {
        Self {
            chapter: "Unknown Chapter".to_string(),
            subsection: "Unknown Subsection".to_string(),
        }
    }
}

/// Result of classifying one page of text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Classification {
    /// Detected or fallback chapter. Never empty.
    pub chapter: String,
    /// Detected or fallback subsection. Never empty.
    pub subsection: String,
    /// Trimmed non-empty lines that were not consumed as headings.
    pub body_lines: Vec<String>,
}

impl Classification {
    /// Body lines joined with `\n`.
    pub fn body_text(&self) -> String {
        self.body_lines.join("\n")
    }
}

/// Splits page text into chapter, subsection and body lines.
///
/// # Example
///
/// ```
/// use pdfharvest_core::PageClassifier;
///
/// let c = PageClassifier::default().classify("Chapter 1: Intro\n1.1 Overview\nHello world");
/// assert_eq!(c.chapter, "Intro");
/// assert_eq!(c.subsection, "1.1 Overview");
/// assert_eq!(c.body_lines, vec!["Hello world"]);
/// ```
pub struct PageClassifier {
    matcher: Box<dyn HeadingMatcher>,
    labels: FallbackLabels,
}

impl PageClassifier {
    /// Create a classifier for one of the built-in strategies.
    pub fn new(strategy: HeadingStrategy) -> Self {
        Self::with_matcher(strategy.matcher())
    }

    /// Create a classifier around a custom matcher.
    pub fn with_matcher(matcher: Box<dyn HeadingMatcher>) -> Self {
        Self {
            matcher,
            labels: FallbackLabels::default(),
        }
    }

    /// Replace the fallback labels (builder pattern).
    pub fn with_fallback_labels(mut self, labels: FallbackLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Classify the lines of one page.
    pub fn classify(&self, raw_text: &str) -> Classification {
        let mut chapter: Option<String> = None;
        let mut subsection: Option<String> = None;
        let mut body_lines = Vec::new();

        for line in raw_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if chapter.is_none() {
                if let Some(title) = self.matcher.match_chapter(line) {
                    chapter = Some(title);
                    continue;
                }
            }
            if subsection.is_none() {
                if let Some(title) = self.matcher.match_subsection(line) {
                    subsection = Some(title);
                    continue;
                }
            }
            body_lines.push(line.to_string());
        }

        let chapter = chapter.unwrap_or_else(|| {
            body_lines
                .first()
                .cloned()
                .unwrap_or_else(|| self.labels.chapter.clone())
        });
        let subsection = subsection.unwrap_or_else(|| {
            body_lines
                .get(1)
                .cloned()
                .unwrap_or_else(|| self.labels.subsection.clone())
        });

        Classification {
            chapter,
            subsection,
            body_lines,
        }
    }
}

impl Default for PageClassifier {
    fn default() -> Self {
        Self::new(HeadingStrategy::default())
    }
}

impl std::fmt::Debug for PageClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageClassifier")
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}
