use std::io::{self, BufRead, Write};

use crate::{
    config::Format,
    keypad,
    trie::{self, T9Trie, Word},
};

const PROMPT: &str = "digits> ";
const QUIT: &str = "q";

/// Interactive lookup loop. Reads one key sequence per line until EOF or `q`.
/// Bad queries are reported on `out` and the loop carries on.
pub fn run<R: BufRead, W: Write>(
    trie: &T9Trie,
    num: usize,
    format: Format,
    mut input: R,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "type a key sequence (2-9), '{}' to quit", QUIT)?;
    for d in '2'..='9' {
        write!(out, "{}:{} ", d, keypad::letters(d))?;
    }
    writeln!(out)?;

    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let digits = line.trim();
        if digits == QUIT {
            return Ok(());
        }

        match trie.query(num, digits) {
            Ok(words) => print_words(&mut out, &words, format)?,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
}

/// Write a result list, `rank  word` per line or a JSON array.
pub fn print_words<W: Write>(out: &mut W, words: &[&Word], format: Format) -> io::Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, words)?;
            writeln!(out)
        }
        Format::Text if words.is_empty() => writeln!(out, "no matches"),
        Format::Text => {
            for w in words {
                writeln!(out, "{:>6}  {}", w.rank, w.text)?;
            }
            Ok(())
        }
    }
}

/// Write bare texts, one per line. Used for one-shot queries so the output
/// can be piped.
pub fn print_texts<W: Write>(out: &mut W, texts: &[String]) -> io::Result<()> {
    if texts.is_empty() {
        return writeln!(out, "no matches");
    }
    for t in texts {
        writeln!(out, "{}", t)?;
    }
    Ok(())
}

/// Resolve a one-shot query argument, encoding it first if it is a word.
pub fn to_digits(arg: &str, letters: bool) -> Result<String, trie::Error> {
    if letters {
        return Ok(keypad::encode(arg)?);
    }
    Ok(arg.to_string())
}
