/// Fixed set of badge categories a backend source tag can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceCategory {
    PdfContext,
    Wikipedia,
    DuckDuckGo,
    ArXiv,
    AiBackend,
    Other,
}

impl SourceCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            SourceCategory::PdfContext => "PDF Context",
            SourceCategory::Wikipedia => "Wikipedia",
            SourceCategory::DuckDuckGo => "DuckDuckGo",
            SourceCategory::ArXiv => "arXiv",
            SourceCategory::AiBackend => "Groq AI",
            SourceCategory::Other => "Other",
        }
    }

    /// Icon identifier (Font Awesome class names, as the backend's web
    /// client uses them).
    pub fn icon(self) -> &'static str {
        match self {
            SourceCategory::PdfContext => "fa-file-pdf",
            SourceCategory::Wikipedia => "fa-brands fa-wikipedia-w",
            SourceCategory::DuckDuckGo => "fa-globe",
            SourceCategory::ArXiv => "fa-graduation-cap",
            SourceCategory::AiBackend => "fa-solid fa-bolt",
            SourceCategory::Other => "fa-info-circle",
        }
    }
}

/// Ordered (prefix, category) table. First match wins; anything unmatched is
/// [`SourceCategory::Other`]. Matching is case-sensitive.
pub const SOURCE_RULES: &[(&str, SourceCategory)] = &[
    ("PDF", SourceCategory::PdfContext),
    ("Wikipedia", SourceCategory::Wikipedia),
    ("DuckDuckGo", SourceCategory::DuckDuckGo),
    ("arXiv", SourceCategory::ArXiv),
    ("ChatGPT", SourceCategory::AiBackend),
];

pub fn classify(tag: &str) -> SourceCategory {
    SOURCE_RULES
        .iter()
        .find(|(prefix, _)| tag.starts_with(prefix))
        .map(|(_, category)| *category)
        .unwrap_or(SourceCategory::Other)
}

/// Classifies every tag and keeps the first occurrence of each category.
pub fn unique_categories<I, S>(tags: I) -> Vec<SourceCategory>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for tag in tags {
        let category = classify(tag.as_ref());
        if !seen.contains(&category) {
            seen.push(category);
        }
    }
    seen
}
