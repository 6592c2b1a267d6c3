use clap::{Parser, Subcommand, ValueEnum};
use crossterm::style::Stylize;
use std::fs::File;
use std::io::{self, stdin, stdout, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use taphone_core::persistence::{load_from_disk, save_to_disk};
use taphone_core::{KeyLevel, PhoneticIndex, PhoneticKey, Result, TaPhone};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "taphone")]
#[command(about = "Phonetic keys for Tamil words", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the three keys of each word
    Encode {
        /// Words to encode; read one per line from stdin when omitted
        words: Vec<String>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Build and query phonetic indexes
    Index {
        #[command(subcommand)]
        command: IndexCommand,
    },
    /// Type words and see their keys. 'exit' to quit.
    Interactive,
}

#[derive(Subcommand, Debug)]
enum IndexCommand {
    /// Index a word list (one word per line)
    Build {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// List indexed words that sound like the given words
    Query {
        #[arg(short, long)]
        index: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Level::Key1)]
        level: Level,

        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Report keys shared by several indexed words
    Groups {
        #[arg(short, long)]
        index: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Level::Key1)]
        level: Level,

        #[arg(long, default_value_t = 2)]
        min_size: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Level {
    Key0,
    Key1,
    Key2,
}

impl From<Level> for KeyLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Key0 => KeyLevel::Key0,
            Level::Key1 => KeyLevel::Key1,
            Level::Key2 => KeyLevel::Key2,
        }
    }
}

#[derive(serde::Serialize)]
struct EncodedWord<'a> {
    word: &'a str,
    #[serde(flatten)]
    key: &'a PhoneticKey,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "taphone_core=debug,taphone=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("[ERROR] {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    let phone = TaPhone::new();
    match command {
        Command::Encode { words, format } => {
            let words = if words.is_empty() { read_words(stdin().lock())? } else { words };
            let mut out = stdout().lock();
            encode_words(&phone, &words, format, &mut out)?;
            out.flush()?;
            Ok(())
        }
        Command::Index { command } => run_index(&phone, command),
        Command::Interactive => run_interactive(&phone),
    }
}

fn encode_words(phone: &TaPhone, words: &[String], format: Format, out: &mut impl Write) -> Result<()> {
    for word in words {
        let key = phone.encode(word);
        match format {
            Format::Text => {
                writeln!(out, "{}\t{}\t{}\t{}", word, key.key0, key.key1, key.key2)?
            }
            Format::Json => {
                let line = serde_json::to_string(&EncodedWord { word, key: &key })?;
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

fn run_index(phone: &TaPhone, command: IndexCommand) -> Result<()> {
    match command {
        IndexCommand::Build { input, output } => {
            let words = read_words(BufReader::new(File::open(&input)?))?;
            let (index, skipped) = build_index(phone, &words);
            if skipped > 0 {
                warn!(skipped, "words without Tamil content were not indexed");
            }
            save_to_disk(&index, &output)?;
            info!(words = index.len(), output = %output.display(), "index built");
            println!("Indexed {} words into '{}'", index.len(), output.display());
        }
        IndexCommand::Query { index, level, words } => {
            let index = load_from_disk(&index)?;
            let mut out = stdout().lock();
            write_matches(&index, phone, &words, level.into(), &mut out)?;
        }
        IndexCommand::Groups { index, level, min_size } => {
            let index = load_from_disk(&index)?;
            let mut out = stdout().lock();
            write_groups(&index, level.into(), min_size, &mut out)?;
        }
    }
    Ok(())
}

/// Returns the index and how many words were left out for lacking Tamil.
fn build_index(phone: &TaPhone, words: &[String]) -> (PhoneticIndex, usize) {
    let mut index = PhoneticIndex::new();
    let mut skipped = 0usize;
    for word in words {
        if index.insert(phone, word).is_none() {
            skipped += 1;
        }
    }
    (index, skipped)
}

fn write_matches(
    index: &PhoneticIndex,
    phone: &TaPhone,
    words: &[String],
    level: KeyLevel,
    out: &mut impl Write,
) -> Result<()> {
    for word in words {
        let matches = index.lookup(phone, word, level);
        writeln!(out, "{}\t{}", word, matches.join(" "))?;
    }
    Ok(())
}

fn write_groups(index: &PhoneticIndex, level: KeyLevel, min_size: usize, out: &mut impl Write) -> Result<()> {
    for (key, words) in index.groups(level, min_size) {
        writeln!(out, "{}\t{}", key, words.join(" "))?;
    }
    Ok(())
}

/// One word per line, trimmed, blank lines skipped.
fn read_words(reader: impl BufRead) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.push(word.to_string());
        }
    }
    Ok(words)
}

fn run_interactive(phone: &TaPhone) -> Result<()> {
    println!("Tamil phonetic keys. Type a word and press [Enter]. 'exit' to quit.");
    println!("---------------------------------------------------------------");

    loop {
        print!("\n> ");
        stdout().flush()?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        match input.trim() {
            "exit" => break,
            "" => continue,
            word => print_keys(word, &phone.encode(word)),
        }
    }
    Ok(())
}

fn print_keys(word: &str, key: &PhoneticKey) {
    if key.is_empty() {
        println!("{}", format!("No Tamil letters in '{}'", word).yellow());
        return;
    }
    println!("{}", word.bold());
    println!("  key0: {}", key.key0.as_str().green());
    println!("  key1: {}", key.key1.as_str().cyan());
    println!("  key2: {}", key.key2.as_str().magenta());
}
