//! Command line front-end of the JARViS assistant.
//!
//! ```text
//! jarvis --train "Olá mundo" "Como vai?" --prompt "olá"
//! jarvis --interactive
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, info};

use jarvis_core::ChatConfig;
use jarvis_core::io::read_lines;
use jarvis_core::model::assistant::{Assistant, is_exit_command};
use jarvis_core::model::selector::{RandomSelector, Selector};

#[derive(Parser, Debug)]
#[command(name = "jarvis", version, about = "Chatbot simples com Markov chain.")]
struct Cli {
	/// Frases para treinar o modelo.
	#[arg(long, num_args = 0.., value_name = "SENTENCE")]
	train: Vec<String>,

	/// Arquivo de texto com uma frase de treino por linha.
	#[arg(long, value_name = "PATH")]
	corpus_file: Option<PathBuf>,

	/// Arquivo de configuração TOML.
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Inicia o modo interativo.
	#[arg(long)]
	interactive: bool,

	/// Gera uma resposta única para o prompt fornecido.
	#[arg(long)]
	prompt: Option<String>,

	/// Número máximo de tokens gerados por resposta.
	#[arg(long, value_name = "N")]
	max_tokens: Option<usize>,

	/// Semente do gerador aleatório, para respostas reproduzíveis.
	#[arg(long, value_name = "U64")]
	rng_seed: Option<u64>,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q, -qq)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	let mut config = match &cli.config {
		Some(path) => ChatConfig::from_file(path)
			.with_context(|| format!("failed to load configuration {}", path.display()))?,
		None => ChatConfig::default(),
	};
	if let Some(max_tokens) = cli.max_tokens {
		config.max_tokens = max_tokens;
	}

	let mut samples = cli.train.clone();
	if let Some(path) = &cli.corpus_file {
		let lines = read_lines(path).with_context(|| format!("failed to read corpus {}", path.display()))?;
		info!("read {} lines from {}", lines.len(), path.display());
		samples.extend(lines);
	}

	let assistant = Assistant::from_config(&config, &samples).context("invalid configuration")?;

	let mut selector: Box<dyn Selector> = match cli.rng_seed {
		Some(seed) => Box::new(RandomSelector::seeded(seed)),
		None => Box::new(RandomSelector::thread()),
	};

	let stdout = io::stdout();
	let mut out = stdout.lock();

	if let Some(prompt) = &cli.prompt {
		writeln!(out, "{}", assistant.respond_with(prompt, selector.as_mut()))?;
		return Ok(());
	}

	if cli.interactive {
		let stdin = io::stdin();
		interactive_loop(&assistant, selector.as_mut(), stdin.lock(), &mut out)?;
		return Ok(());
	}

	writeln!(out, "Nada a fazer. Use --interactive ou --prompt.")?;
	Ok(())
}

/// Reads one message per line until an exit command or end of input.
///
/// Blank lines are ignored.
fn interactive_loop<R, W>(assistant: &Assistant, selector: &mut dyn Selector, input: R, out: &mut W) -> Result<()>
where
	R: BufRead,
	W: Write,
{
	writeln!(out, "Digite algo (ou 'sair' para encerrar):")?;
	let mut lines = input.lines();
	loop {
		write!(out, "> ")?;
		out.flush()?;

		let line = match lines.next() {
			Some(line) => line.context("failed to read input")?,
			None => {
				writeln!(out)?;
				break;
			}
		};
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		if is_exit_command(line) {
			writeln!(out, "Encerrando. Até logo!")?;
			break;
		}
		writeln!(out, "{}", assistant.respond_with(line, &mut *selector))?;
	}
	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	let level = if quiet > 0 {
		match quiet {
			1 => LevelFilter::Error,
			_ => LevelFilter::Off,
		}
	} else {
		match verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		}
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.format_timestamp_millis();
	builder.filter_level(level);
	let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;
	use jarvis_core::model::markov_chain::{MarkovChain, Token};
	use jarvis_core::model::rules::Rules;

	struct First;

	impl Selector for First {
		fn select<'a>(&mut self, options: &'a [Token]) -> &'a Token {
			&options[0]
		}
	}

	fn run(input: &str) -> String {
		let assistant = Assistant::new(MarkovChain::from_corpus(["eu sou o jarvis."]), Rules::default());
		let mut out = Vec::new();
		interactive_loop(&assistant, &mut First, input.as_bytes(), &mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn answers_until_exit_command() {
		let output = run("oi\n\n   \neu\nsair\neu\n");
		assert_eq!(
			output,
			"Digite algo (ou 'sair' para encerrar):\n\
			 > Olá, eu sou o JARViS. Em que posso ajudar?\n\
			 > > > sou o jarvis.\n\
			 > Encerrando. Até logo!\n"
		);
	}

	#[test]
	fn end_of_input_closes_the_session() {
		let output = run("eu\n");
		assert!(output.ends_with("> sou o jarvis.\n> \n"));
	}
}
