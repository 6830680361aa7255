//! Family selection predicate
//!
//! An algorithm is active when its name contains any include substring (or
//! no includes were given) and contains none of the exclude substrings.
//! Exclusion always wins.

/// Include/exclude family filter over canonical (uppercase) algorithm names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlgorithmFilter {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl AlgorithmFilter {
    /// Build a filter, normalizing every family string to uppercase
    pub fn new<I, E, S, T>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Self {
            includes: includes
                .into_iter()
                .map(|s| s.as_ref().to_uppercase())
                .collect(),
            excludes: excludes
                .into_iter()
                .map(|s| s.as_ref().to_uppercase())
                .collect(),
        }
    }

    /// A filter accepting every algorithm
    pub fn accept_all() -> Self {
        Self::default()
    }

    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Decide whether `name` is active
    ///
    /// # Panics
    ///
    /// Panics when `name` is not canonical uppercase.
    pub fn accepts(&self, name: &str) -> bool {
        assert_canonical(name);

        let included =
            self.includes.is_empty() || self.includes.iter().any(|f| name.contains(f.as_str()));
        let excluded = self.excludes.iter().any(|f| name.contains(f.as_str()));

        included && !excluded
    }
}

/// Algorithm names are registry keys and must already be uppercase
pub(crate) fn assert_canonical(name: &str) {
    assert!(
        name == name.to_uppercase(),
        "algorithm name must be uppercase: {name}"
    );
}
