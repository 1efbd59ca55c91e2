//! Case-insensitive keyword containment over field names.
//!
//! @module trace/matcher

/// Ordered keyword set; earlier keywords take priority when several match
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keywords: Vec<Keyword>,
}

#[derive(Debug, Clone)]
struct Keyword {
    original: String,
    folded: String,
}

impl KeywordMatcher {
    /// Blank keywords are dropped; they would match every field
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_string())
            .filter(|k| !k.is_empty())
            .map(|original| Keyword {
                folded: original.to_lowercase(),
                original,
            })
            .collect();
        Self { keywords }
    }

    /// First keyword contained in `field_name`, ignoring case
    pub fn find(&self, field_name: &str) -> Option<&str> {
        let folded = field_name.to_lowercase();
        self.keywords
            .iter()
            .find(|k| folded.contains(k.folded.as_str()))
            .map(|k| k.original.as_str())
    }

    pub fn keywords(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.original.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
