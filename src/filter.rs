use crate::config::ScrapeConfig;
use regex::Regex;

/// Decides which discovered product links are fetched
#[derive(Debug, Default)]
pub struct LinkFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from include and exclude patterns
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut include_regexes = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Result<Self, regex::Error> {
        Self::new(&config.link_include_patterns, &config.link_exclude_patterns)
    }

    /// Determine if a link should be fetched
    pub fn should_fetch(&self, link: &str) -> bool {
        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|re| re.is_match(link)) {
            return false;
        }

        // If include patterns are specified, at least one must match
        self.include_regexes.is_empty() || self.include_regexes.iter().any(|re| re.is_match(link))
    }

    /// Links that pass the patterns, in the order given. Repeated links are
    /// kept; each occurrence is fetched.
    pub fn select(&self, links: Vec<String>) -> Vec<String> {
        links
            .into_iter()
            .filter(|link| {
                let keep = self.should_fetch(link);
                if !keep {
                    ::log::debug!("Link filter rejected: {}", link);
                }
                keep
            })
            .collect()
    }
}
