mod cli;
mod config;
mod corpus;
mod init;
mod keypad;
mod repl;
mod trie;

use std::io;

use clap::Parser;

use cli::Commands;
use config::{Config, Format};

fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Generating a config needs neither a config nor a corpus.
    if let Some(Commands::NewConfig { path }) = &cli.command {
        match init::generate_config(path) {
            Ok(_) => {
                log::info!("config file generated: {}", path.display());
            }
            Err(e) => {
                log::error!("error generating config: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let mut cfg = match init::init_config(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            log::error!("error loading config: {}", e);
            std::process::exit(1);
        }
    };
    apply_flags(&mut cfg, &cli);

    let (mut trie, mut summary) = match init::init_trie(&cfg) {
        Ok(t) => t,
        Err(e) => {
            log::error!("error loading corpus: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = corpus::add_words(&mut trie, &cli.add, &mut summary, cfg.strict()) {
        log::error!("error adding words: {}", e);
        std::process::exit(1);
    }

    let num = cfg.num_results();
    let format = cfg.format();
    let mut stdout = io::stdout().lock();

    let res = match cli.command {
        Some(Commands::Query { digits, letters }) => {
            let digits = match repl::to_digits(&digits, letters) {
                Ok(d) => d,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            };

            let res = match format {
                Format::Json => trie
                    .query(num, &digits)
                    .map(|words| repl::print_words(&mut stdout, &words, format)),
                Format::Text => trie
                    .get_word_list(num, &digits)
                    .map(|texts| repl::print_texts(&mut stdout, &texts)),
            };

            match res {
                Ok(written) => written,
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }

        Some(Commands::Stats) => print_stats(&mut stdout, &trie, summary, format),

        Some(Commands::Graph) => {
            use std::io::Write;
            write!(stdout, "{}", trie.graph())
        }

        Some(Commands::NewConfig { .. }) => Ok(()),

        None => repl::run(&trie, num, format, io::stdin().lock(), &mut stdout),
    };

    if let Err(e) = res {
        log::error!("error writing output: {}", e);
        std::process::exit(1);
    }
}

/// Command line flags take precedence over config files.
fn apply_flags(cfg: &mut Config, cli: &cli::Cli) {
    if let Some(path) = &cli.corpus {
        cfg.app.corpus = path.to_string_lossy().to_string();
    }
    if let Some(n) = cli.num {
        cfg.app.num_results = Some(n);
    }
    if cli.strict {
        cfg.app.strict = Some(true);
    }
    if cli.json {
        cfg.output.format = Some(Format::Json);
    }
}

fn print_stats<W: io::Write>(
    out: &mut W,
    trie: &trie::T9Trie,
    summary: corpus::Summary,
    format: Format,
) -> io::Result<()> {
    let (words, nodes, height) = (trie.count_words(), trie.count_nodes(), trie.height());

    match format {
        Format::Json => {
            let stats = serde_json::json!({
                "words": words,
                "skipped": summary.skipped,
                "nodes": nodes,
                "height": height,
                "stale": trie.is_stale(),
            });
            writeln!(out, "{}", stats)
        }
        Format::Text => {
            writeln!(out, "words:   {}", words)?;
            writeln!(out, "skipped: {}", summary.skipped)?;
            writeln!(out, "nodes:   {}", nodes)?;
            writeln!(out, "height:  {}", height)?;
            writeln!(out, "stale:   {}", trie.is_stale())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats() {
        let (trie, summary) = corpus::build(io::Cursor::new("a\nbe\n"), false).unwrap();

        let mut out = Vec::new();
        print_stats(&mut out, &trie, summary, Format::Text).unwrap();
        assert_eq!(
            "words:   2\nskipped: 0\nnodes:   17\nheight:  2\nstale:   false\n",
            String::from_utf8(out).unwrap()
        );

        let mut out = Vec::new();
        print_stats(&mut out, &trie, summary, Format::Json).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(17, v["nodes"]);
        assert_eq!(false, v["stale"]);
    }
}
