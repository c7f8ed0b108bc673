use albumscout::{AlbumScout, HttpFetcher, Query, ScoutOptions, SearchResponse, Session};
use clap::Parser;
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "albumscout", about = "Search the forum for album download links")]
struct Cli {
    /// Text to search for
    query: String,

    /// Cookie to send, as NAME=VALUE (repeatable)
    #[arg(long = "cookie", value_name = "NAME=VALUE")]
    cookies: Vec<String>,

    /// JSON file holding a {"name": "value"} cookie map
    #[arg(long)]
    cookie_file: Option<PathBuf>,

    /// Forum origin
    #[arg(long)]
    base_url: Option<String>,

    /// Host fragment download links must contain
    #[arg(long)]
    download_host: Option<String>,

    /// Pause between post fetches, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// HTTP timeout, in seconds
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn options(&self) -> ScoutOptions {
        let mut builder = ScoutOptions::builder()
            .post_delay(Duration::from_millis(self.delay_ms))
            .timeout(Duration::from_secs(self.timeout_secs));
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(host) = &self.download_host {
            builder = builder.download_host(host);
        }
        builder.build()
    }

    fn session(&self) -> albumscout::Result<Session> {
        let mut session = match &self.cookie_file {
            Some(path) => Session::load(path)?,
            None => Session::new(),
        };
        session.merge(Session::parse_header(&self.cookies.join("; ")));
        Ok(session)
    }
}

fn search(cli: &Cli) -> albumscout::Result<SearchResponse> {
    let query = Query::new(&cli.query)?;
    let session = cli.session()?;
    let options = cli.options();
    let scout = AlbumScout::new(HttpFetcher::new(&options)?, options)?;
    scout.run(&query, &session)
}

fn print(value: &serde_json::Value, pretty: bool) {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("failed to render output: {e}"),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match search(&cli) {
        Ok(response) => {
            let value = serde_json::to_value(&response).unwrap_or_else(|_| json!({}));
            print(&value, cli.pretty);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "search failed");
            print(
                &json!({ "results": [], "requiresAuth": false, "error": e.to_string() }),
                cli.pretty,
            );
            ExitCode::FAILURE
        }
    }
}
