use std::path::{Path, PathBuf};

use crate::{
    config::Config,
    corpus::{self, LoadError, Summary},
    trie::T9Trie,
};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config file '{0}' already exists")]
    Exists(PathBuf),
}

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge zero or more config files in order. No files yields the
/// built-in defaults.
pub fn init_config(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        let c = read_config(path)?;
        match config {
            Some(ref mut existing) => merge_config(existing, c),
            None => config = Some(c),
        }
    }

    Ok(config.unwrap_or_else(|| {
        log::info!("no config files specified, using defaults");
        Config::default()
    }))
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists(path.to_path_buf()));
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Merge the given src config into the dest config struct.
fn merge_config(dest: &mut Config, src: Config) {
    if src.app.num_results.is_some() {
        dest.app.num_results = src.app.num_results;
    }
    if !src.app.corpus.is_empty() {
        dest.app.corpus = src.app.corpus;
    }
    if src.app.strict.is_some() {
        dest.app.strict = src.app.strict;
    }

    if src.output.format.is_some() {
        dest.output.format = src.output.format;
    }
}

/// Build the trie from the configured corpus, or the bundled list.
pub fn init_trie(config: &Config) -> Result<(T9Trie, Summary), LoadError> {
    if config.app.corpus.is_empty() {
        corpus::load_bundled(config.strict())
    } else {
        corpus::load_file(Path::new(&config.app.corpus), config.strict())
    }
}
