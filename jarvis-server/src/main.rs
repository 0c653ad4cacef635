use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use clap::Parser;
use env_logger::Env;
use serde::{Deserialize, Serialize};

use jarvis_core::ChatConfig;
use jarvis_core::io::read_lines;
use jarvis_core::model::assistant::Assistant;

/// Reply sent once the chain has been rebuilt.
const TRAINED_REPLY: &str = "Treino atualizado. JARViS pronto.";

#[derive(Parser, Debug)]
#[command(name = "jarvis-server", version, about = "HTTP front-end of the JARViS assistant")]
struct Args {
	/// Address to bind.
	#[arg(long, default_value = "127.0.0.1")]
	bind: String,

	/// Port to listen on.
	#[arg(long, default_value_t = 5000)]
	port: u16,

	/// TOML configuration file.
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Initial training file, one sentence per line.
	#[arg(long, value_name = "PATH")]
	corpus_file: Option<PathBuf>,
}

/// Query parameters for the `/v1/respond` endpoint
#[derive(Deserialize)]
struct RespondParams {
	prompt: Option<String>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>,
	max_tokens: Option<usize>,
}

/// Body of `/v1/stats`
#[derive(Serialize)]
struct Stats {
	contexts: usize,
	observations: usize,
	sentences: usize,
}

struct SharedData {
	assistant: Assistant,
}

/// HTTP GET endpoint `/v1/respond`
///
/// Answers the prompt with a keyword rule or a generated continuation.
#[get("/v1/respond")]
async fn get_respond(data: web::Data<Mutex<SharedData>>, query: web::Query<RespondParams>) -> impl Responder {
	let prompt = match &query.prompt {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty prompt"),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().body(shared_data.assistant.respond(prompt).text().to_owned())
}

/// HTTP GET endpoint `/v1/generate`
///
/// Continues the seed with the Markov chain only, ignoring rules.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let seed = query.seed.as_deref().unwrap_or_default();

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let max_tokens = query.max_tokens.unwrap_or(shared_data.assistant.max_tokens());

	HttpResponse::Ok().body(shared_data.assistant.chain().generate(seed, max_tokens))
}

/// HTTP PUT endpoint `/v1/train`
///
/// The body holds one training sentence per line. A new chain replaces the
/// current one; a blank body trains on the default corpus.
#[put("/v1/train")]
async fn put_train(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	shared_data.assistant.retrain(body.lines());
	log::info!("retrained on {} sentences", shared_data.assistant.chain().sentence_count());
	HttpResponse::Ok().body(TRAINED_REPLY)
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let chain = shared_data.assistant.chain();
	HttpResponse::Ok().json(Stats {
		contexts: chain.len(),
		observations: chain.observation_count(),
		sentences: chain.sentence_count(),
	})
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_respond)
		.service(get_generated)
		.service(put_train)
		.service(get_stats);
}

/// Builds the initial assistant from the command line arguments.
fn build_assistant(args: &Args) -> Result<Assistant, Box<dyn std::error::Error>> {
	let config = match &args.config {
		Some(path) => ChatConfig::from_file(path)?,
		None => ChatConfig::default(),
	};
	let samples = match &args.corpus_file {
		Some(path) => read_lines(path)?,
		None => Vec::new(),
	};
	Ok(Assistant::from_config(&config, &samples)?)
}

/// Main entry point for the server.
///
/// Trains the assistant, wraps it in a `Mutex` and starts an Actix-web
/// HTTP server. CORS is permissive so a browser chat page can call it.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	let assistant = build_assistant(&args).map_err(|e| std::io::Error::other(e.to_string()))?;
	log::info!(
		"assistant ready: {} contexts, listening on {}:{}",
		assistant.chain().len(),
		args.bind,
		args.port
	);

	let shared_data = web::Data::new(Mutex::new(SharedData { assistant }));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(configure)
	})
		.bind((args.bind.as_str(), args.port))?
		.run()
		.await
}
