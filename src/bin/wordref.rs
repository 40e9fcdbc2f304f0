//! wordref: query WordReference from the command line and dump the parsed
//! entry, plus the embed the bot would send.

use tracing::info;

use rabot::cogs::wordref::{EntryFormat, Wordref};
use rabot::error::RabotError;
use rabot::fetch::Fetcher;
use rabot::{config, logger};

const FORMAT: EntryFormat = EntryFormat { hide_words: false, min_sentences_shown: 1, max_sentences_shown: 3 };

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), RabotError> {
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();
    let config = config::load(None)?;
    logger::init(args.log_level.unwrap_or("warn"), args.log_level.is_some(), None)?;

    let wordref = Wordref::new(args.word.as_deref(), args.gr_en, FORMAT, config.wordref.max_random_iterations);
    let url = wordref.url(&config.sites.wordref_url)?;
    info!(%url, "querying");

    let fetcher = Fetcher::new(&config.http, &config.sites)?;
    let entry = wordref.try_fetch_entry(&fetcher).await?;
    print!("{entry}");

    if entry.is_valid(FORMAT.min_sentences_shown) {
        println!();
        println!("{}", entry.to_embed(&FORMAT));
    } else {
        println!();
        println!("(entry would not be sent)");
    }
    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    gr_en: bool,
    word: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut gr_en = true;
    let mut words = Vec::new();

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: wordref [OPTIONS] [WORD]");
                println!();
                println!("Without WORD a random Greek word is fetched.");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("      --en                   Treat the entry as English-first");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "--en" => gr_en = false,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => words.push(arg),
        }
    }

    let word = (!words.is_empty()).then(|| words.join(" "));
    CliArgs { log_level: logger::level_for_verbosity(verbosity), gr_en, word }
}
