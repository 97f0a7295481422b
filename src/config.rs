use serde::Deserialize;

pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Unset fields stay `None` so that merging several files only overrides
/// what a later file actually sets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Suggestions returned per query.
    #[serde(default)]
    pub num_results: Option<usize>,

    /// Word list, one word per line, most popular first. Empty uses the
    /// list bundled into the binary.
    #[serde(default)]
    pub corpus: String,

    /// Abort the load on the first word that can't be stored.
    #[serde(default)]
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<Format>,
}

impl Config {
    pub fn num_results(&self) -> usize {
        self.app.num_results.unwrap_or(DEFAULT_NUM_RESULTS)
    }

    pub fn strict(&self) -> bool {
        self.app.strict.unwrap_or(false)
    }

    pub fn format(&self) -> Format {
        self.output.format.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(DEFAULT_NUM_RESULTS, cfg.num_results());
        assert!(cfg.app.corpus.is_empty());
        assert!(!cfg.strict());
        assert_eq!(Format::Text, cfg.format());
    }

    #[test]
    fn parse() {
        let cfg: Config = toml::from_str(
            r#"
            [app]
            num_results = 3
            corpus = "words.txt"
            strict = true

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(3, cfg.num_results());
        assert_eq!("words.txt", cfg.app.corpus);
        assert!(cfg.strict());
        assert_eq!(Format::Json, cfg.format());
    }

    #[test]
    fn bad_format() {
        assert!(toml::from_str::<Config>("[output]\nformat = \"xml\"").is_err());
    }
}
