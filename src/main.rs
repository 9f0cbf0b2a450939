use anyhow::Result;
use civic_intake::audio::CaptureSource;
use civic_intake::{ChatEntry, Config, HttpUploadClient, IntakeSession, Role, SessionConfig};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

/// Console front end for the citizen service-request intake dialogue
#[derive(Debug, Parser)]
#[command(name = "civic-intake")]
struct Cli {
    /// Configuration file (config-crate style, extension optional)
    #[arg(long, default_value = "config/civic-intake")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("Transcription endpoint: {}", cfg.upload.transcribe_url);
    if let Some(submit_url) = &cfg.upload.submit_url {
        info!("Submit endpoint: {}", submit_url);
    }

    let session_config = SessionConfig {
        recordings_path: PathBuf::from(&cfg.audio.recordings_path),
        sample_rate: cfg.audio.sample_rate,
        capture_chunk_bytes: cfg.audio.capture_chunk_bytes,
        ..SessionConfig::default()
    };

    let uploader = HttpUploadClient::new(
        cfg.upload.transcribe_url.clone(),
        cfg.upload.submit_url.clone(),
    );
    let mut session = IntakeSession::new(session_config, Box::new(uploader));

    println!("Describe your issue. Commands: /record <audio-file>, /transcript, /quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if line == "/quit" {
            break;
        }

        if line == "/transcript" {
            println!("{}", serde_json::to_string_pretty(session.transcript())?);
            continue;
        }

        let entries = if let Some(path) = line.strip_prefix("/record ") {
            let source = CaptureSource::File(PathBuf::from(path.trim()));
            let mut entries = session.start_recording(source).await;
            entries.extend(session.stop_recording().await);
            entries
        } else {
            session.handle_input(line).await
        };

        render(&entries);
    }

    Ok(())
}

fn render(entries: &[ChatEntry]) {
    for entry in entries {
        if entry.alert {
            eprintln!("[ALERT] {}", entry.text);
            continue;
        }

        match entry.role {
            Role::Citizen => println!("you: {}", entry.text),
            Role::Service => println!("service: {}", entry.text),
        }
    }
}
