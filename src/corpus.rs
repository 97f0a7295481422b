use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor},
    path::Path,
    time::Instant,
};

use regex::Regex;
use rust_embed::Embed;

use crate::trie::{self, T9Trie, Word};

/// Name of the word list bundled into the binary.
pub const BUNDLED_LIST: &str = "words.txt";

/// Word lists bundled into the binary.
#[derive(Embed)]
#[folder = "corpus/"]
struct Bundled;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: '{word}': {source}")]
    Word {
        line: usize,
        word: String,
        source: trie::Error,
    },
    #[error("extra word '{word}': {source}")]
    Extra { word: String, source: trie::Error },
    #[error("line {line}: not valid UTF-8")]
    Utf8 { line: usize },
    #[error("bundled word list '{0}' not found")]
    MissingEmbedded(String),
}

/// Outcome of a corpus load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub inserted: usize,
    pub skipped: usize,
    /// First rank after the last line read.
    pub next_rank: usize,
}

/// Build a trie from a word list on disk.
pub fn load_file(path: &Path, strict: bool) -> Result<(T9Trie, Summary), LoadError> {
    log::info!("loading corpus from {} ...", path.display());

    let file = File::open(path)?;
    build(BufReader::new(file), strict)
}

/// Build a trie from the word list compiled into the binary.
pub fn load_bundled(strict: bool) -> Result<(T9Trie, Summary), LoadError> {
    let file = Bundled::get(BUNDLED_LIST)
        .ok_or_else(|| LoadError::MissingEmbedded(BUNDLED_LIST.to_string()))?;

    log::info!("loading bundled corpus ({} bytes) ...", file.data.len());
    build(Cursor::new(file.data), strict)
}

/// Build a trie from one word per line, most popular first. A word's rank
/// is its 0-based line number. Blank lines are skipped.
pub fn build<R: BufRead>(reader: R, strict: bool) -> Result<(T9Trie, Summary), LoadError> {
    let start = Instant::now();
    let re_spaces = Regex::new(r"\s+").expect("valid regex");

    let mut trie = T9Trie::new();
    let mut summary = Summary::default();

    for (line, raw) in reader.split(b'\n').enumerate() {
        summary.next_rank = line + 1;

        let raw = raw?;
        let Ok(text) = std::str::from_utf8(&raw) else {
            if strict {
                return Err(LoadError::Utf8 { line: line + 1 });
            }
            log::warn!("line {}: skipping line that isn't valid UTF-8", line + 1);
            summary.skipped += 1;
            continue;
        };

        // Trimming also drops the '\r' of CRLF files.
        let text = clean_string(text, &re_spaces);
        if text.is_empty() {
            continue;
        }

        match trie.insert(Word::new(text.as_str(), line)) {
            Ok(()) => summary.inserted += 1,
            Err(e) if strict => {
                return Err(LoadError::Word {
                    line: line + 1,
                    word: text,
                    source: e,
                })
            }
            Err(e) => {
                log::warn!("line {}: skipping '{}': {}", line + 1, text, e);
                summary.skipped += 1;
            }
        }
    }

    trie.recompute_search_order();

    log::info!(
        "loaded {} words in {:?} (skipped {})",
        summary.inserted,
        start.elapsed(),
        summary.skipped
    );

    Ok((trie, summary))
}

/// Add words on top of a loaded corpus, ranked after it in the given order.
/// Each insert refreshes the visit order along its own path, so the trie
/// doesn't need another full sort pass.
pub fn add_words(
    trie: &mut T9Trie,
    words: &[String],
    summary: &mut Summary,
    strict: bool,
) -> Result<(), LoadError> {
    let re_spaces = Regex::new(r"\s+").expect("valid regex");

    for text in words {
        let text = clean_string(text, &re_spaces);
        let rank = summary.next_rank;
        summary.next_rank += 1;

        match trie.insert_ordered(Word::new(text.as_str(), rank)) {
            Ok(()) => summary.inserted += 1,
            Err(e) if strict => return Err(LoadError::Extra { word: text, source: e }),
            Err(e) => {
                log::warn!("skipping extra word '{}': {}", text, e);
                summary.skipped += 1;
            }
        }
    }

    Ok(())
}

/// Trim a string and collapse internal whitespace.
fn clean_string(s: &str, re_spaces: &Regex) -> String {
    re_spaces.replace_all(s.trim(), " ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(input: &str, strict: bool) -> Result<(T9Trie, Summary), LoadError> {
        build(Cursor::new(input), strict)
    }

    #[test]
    fn ranks_follow_lines() {
        let (trie, summary) = load("the\n\nof\nand\n", false).unwrap();
        assert_eq!(
            Summary {
                inserted: 3,
                skipped: 0,
                next_rank: 4
            },
            summary
        );
        assert!(!trie.is_stale());

        // "of" is 63 and sits on line 2 (0-based), after the blank line.
        let words = trie.query(5, "6").unwrap();
        assert_eq!(1, words.len());
        assert_eq!("of", words[0].text);
        assert_eq!(2, words[0].rank);
    }

    #[test]
    fn cleans_lines() {
        let (trie, summary) = load("  good \t\n\r\nhome\r\n", false).unwrap();
        assert_eq!(2, summary.inserted);
        assert_eq!(vec!["good", "home"], trie.get_word_list(10, "4663").unwrap());
    }

    #[test]
    fn lenient_skips() {
        let (trie, summary) = load("can't\nwell\nice cream\ncat\n", false).unwrap();
        assert_eq!(2, summary.inserted);
        assert_eq!(2, summary.skipped);
        assert_eq!(2, trie.count_words());
        assert_eq!(vec!["cat"], trie.get_word_list(10, "2").unwrap());
    }

    #[test]
    fn strict_aborts() {
        let err = load("well\ncan't\ncat\n", true).unwrap_err();
        match err {
            LoadError::Word { line, word, .. } => {
                assert_eq!(2, line);
                assert_eq!("can't", word);
            }
            e => panic!("unexpected error: {}", e),
        }
    }

    #[test]
    fn bad_utf8() {
        let input: &[u8] = b"the\ncaf\xe9\nof\n";

        let (trie, summary) = build(Cursor::new(input), false).unwrap();
        assert_eq!(2, summary.inserted);
        assert_eq!(1, summary.skipped);
        // "of" keeps its line number.
        assert_eq!(2, trie.query(1, "63").unwrap()[0].rank);

        let err = build(Cursor::new(input), true).unwrap_err();
        assert!(matches!(err, LoadError::Utf8 { line: 2 }));
    }

    #[test]
    fn extra_words() {
        let (mut trie, mut summary) = load("good\nhome\n", false).unwrap();
        let extra = vec!["gone".to_string(), "hi!".to_string(), "in".to_string()];

        add_words(&mut trie, &extra, &mut summary, false).unwrap();
        assert_eq!(4, summary.inserted);
        assert_eq!(1, summary.skipped);
        assert_eq!(5, summary.next_rank);
        assert!(!trie.is_stale());

        // Ranked after the corpus: "gone" is 2, "in" is 4.
        let top = trie.query(5, "46").unwrap();
        let ranks: Vec<_> = top.iter().map(|w| w.rank).collect();
        assert_eq!(vec![0, 1, 2, 4], ranks);

        let err = add_words(&mut trie, &["hi!".to_string()], &mut summary, true).unwrap_err();
        assert!(matches!(err, LoadError::Extra { .. }));
    }

    #[test]
    fn bundled() {
        let (trie, summary) = load_bundled(true).unwrap();
        assert_eq!(0, summary.skipped);
        assert!(summary.inserted > 100);
        assert_eq!(summary.inserted, trie.count_words());

        // "the" is the first line of the list.
        let top = trie.query(1, "843").unwrap();
        assert_eq!("the", top[0].text);
        assert_eq!(0, top[0].rank);
    }
}
