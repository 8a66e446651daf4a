use regex::Regex;

use crate::options::OptionsError;

/// Ordered whitelist of host patterns, each anchored on both ends.
#[derive(Debug, Clone, Default)]
pub struct TrustedHosts {
    patterns: Vec<Regex>,
}

impl TrustedHosts {
    pub fn new<I, S>(patterns: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|err| {
                OptionsError::InvalidTrustedHost {
                    pattern: pattern.to_string(),
                    error: err.to_string(),
                }
            })?;
            compiled.push(regex);
        }
        Ok(Self { patterns: compiled })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_trusted(&self, host: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.is_match(host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_are_anchored() {
        let trusted = TrustedHosts::new([r"example\.com", r".*\.example\.org"])
            .expect("patterns should compile");
        assert!(trusted.is_trusted("example.com"));
        assert!(trusted.is_trusted("api.example.org"));
        assert!(!trusted.is_trusted("example.com.evil.net"));
        assert!(!trusted.is_trusted("notexample.com"));
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = TrustedHosts::new(["("]).expect_err("pattern should fail");
        assert!(matches!(err, OptionsError::InvalidTrustedHost { .. }));
    }
}
