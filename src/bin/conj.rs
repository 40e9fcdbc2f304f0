//! conj: print the Wiktionary conjugation table of a Greek verb.

use rabot::cogs::wiktionary::WiktionaryQuery;
use rabot::cogs::wiktionary::conjugation::{conjugation_pages, fetch_conjugation};
use rabot::error::RabotError;
use rabot::fetch::Fetcher;
use rabot::text::Language;
use rabot::{config, logger};

#[tokio::main(flavor = "current_thread")]
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

    let fetcher = Fetcher::new(&config.http, &config.sites)?;
    let Some(conjugation) = fetch_conjugation(&fetcher, &args.verb).await? else {
        return Err(RabotError::NotFound(format!("no conjugation for {}", args.verb)));
    };

    if args.json {
        let json = serde_json::to_string_pretty(&conjugation)
            .map_err(|e| RabotError::Parse(format!("serialising conjugation: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    let url = WiktionaryQuery::url(&args.verb, Language::Greek)?;
    for page in conjugation_pages(&args.verb, &url, &conjugation) {
        println!("{page}");
        println!();
    }
    Ok(())
}

struct CliArgs {
    log_level: Option<&'static str>,
    json: bool,
    verb: String,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut json = false;
    let mut verb = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                std::process::exit(0);
            }
            "--json" => json = true,
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => verb = Some(arg),
        }
    }

    let Some(verb) = verb else {
        print_usage();
        eprintln!("error: missing VERB");
        std::process::exit(1);
    };
    CliArgs { log_level: logger::level_for_verbosity(verbosity), json, verb }
}

fn print_usage() {
    println!("Usage: conj [OPTIONS] VERB");
    println!();
    println!("Options:");
    println!("  -h, --help                 Print help");
    println!("      --json                 Print the table as JSON");
    println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
}
