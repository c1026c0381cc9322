use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use gt::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    corpus::Corpus,
    runtime,
    sentence::{self, Sentence},
    terminal::FdTerminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// minimal typing speed test: type the sentence, get your WPM
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to use in test
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// newline-delimited word list to sample from
    #[clap(short = 'c', long)]
    corpus: Option<PathBuf>,

    /// seed for the sentence generator, for repeatable tests
    #[clap(short = 's', long)]
    seed: Option<u64>,
}

impl Cli {
    fn settings(&self, stored: Config) -> Config {
        stored.with_overrides(self.words, self.corpus.clone())
    }
}

/// Send logs to a file; the terminal is in raw mode while typing.
fn init_logging() {
    let Some(log_path) = AppDirs::log_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let settings = cli.settings(FileConfigStore::new().load());
    info!(?settings, seed = ?cli.seed, "starting");

    let corpus = match Corpus::load(&settings.corpus_path) {
        Ok(corpus) => corpus,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            return;
        }
    };

    let mut rng = sentence::session_rng(cli.seed);
    let sentence = match Sentence::generate(corpus.len(), settings.number_of_words, &mut rng) {
        Ok(sentence) => sentence,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            return;
        }
    };

    let interrupt = runtime::register_interrupt_signal();
    let port = FdTerminal::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = runtime::run(
        &port,
        sentence.resolve(&corpus),
        io::stdin().lock(),
        &mut out,
        &interrupt,
    ) {
        error!("{err}");
        eprintln!("\n{err}");
    }
}
