//! Nailstudio - nail-art content studio CLI.

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nailstudio::cli::Cli;
use nailstudio::codec::load_reference_image;
use nailstudio::config::{self, Config, GEMINI_KEY_ENV};
use nailstudio::context::ServiceContext;
use nailstudio::model::ModelSet;
use nailstudio::output::{output_path, save_caption, save_image};
use nailstudio::params::{validate_format, validate_variation_count};
use nailstudio::{AiGateway, Session, StudioError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "nailstudio=debug" } else { "nailstudio=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything `drive` needs besides the session.
struct Plan {
    edits: Vec<String>,
    enhance_only: bool,
    variations: bool,
    format: String,
    output_dir: PathBuf,
}

async fn run(cli: Cli) -> Result<(), StudioError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(StudioError::Config)?;

    // Validate before touching the network or a cassette
    let format = cli.format.clone().unwrap_or_else(|| config.defaults.format.clone());
    validate_format(&format).map_err(StudioError::InvalidArgument)?;
    let count = cli.count.unwrap_or(config.defaults.variation_count);
    validate_variation_count(count).map_err(StudioError::InvalidArgument)?;
    let models = ModelSet::new(
        cli.text_model.as_deref().unwrap_or(&config.models.text),
        cli.image_model.as_deref().unwrap_or(&config.models.image),
    )
    .map_err(StudioError::InvalidArgument)?;
    tracing::debug!(text = %models.text, image = %models.image, "Resolved models");

    let prompt = cli.resolve_prompt()?;
    let reference = cli.reference.as_deref().map(load_reference_image).transpose()?;

    let key = config.gemini_key().ok_or_else(|| StudioError::MissingApiKey {
        provider: "Gemini".into(),
        env_var: GEMINI_KEY_ENV.into(),
    })?;

    let replay_path = std::env::var("NAILSTUDIO_REPLAY").ok();
    let is_recording = std::env::var("NAILSTUDIO_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        tracing::debug!(cassette = %cassette_path, "Replaying");
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else if is_recording {
        tracing::debug!("Recording mode enabled");
        let (ctx, session) = ServiceContext::recording(&config);
        (ctx, Some(session))
    } else {
        (ServiceContext::live(&config), None)
    };

    let gateway =
        AiGateway::new(ctx.model, models).with_variation_delay(config.defaults.variation_delay());
    let mut session = Session::new(gateway);
    session.submit_credential(&key)?;
    session.set_variation_count(count)?;
    session.replace_reference_image(reference);
    session.set_prompt(prompt);

    let abort = session.abort_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() && abort.abort() {
            tracing::warn!("Interrupted, aborting the current request");
        }
    });

    let plan = Plan {
        edits: cli.edits,
        enhance_only: cli.enhance_only,
        variations: !cli.no_variations,
        format,
        output_dir: PathBuf::from(cli.output_dir),
    };
    // Consumes the session so the recorder is released before finishing
    let result = drive(session, &plan).await;

    if let Some(recording) = recording_session {
        match recording.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    result
}

async fn drive(mut session: Session, plan: &Plan) -> Result<(), StudioError> {
    if plan.enhance_only {
        session.enhance_prompt().await?;
        println!("{}", session.prompt());
        return Ok(());
    }

    let had_prompt = !session.prompt().trim().is_empty();
    session.primary_action().await?;
    if !had_prompt {
        eprintln!("Enhanced prompt: {}", session.prompt());
    }

    for edit in &plan.edits {
        tracing::info!(instruction = %edit, "Updating master image");
        session.set_prompt(edit.as_str());
        session.primary_action().await?;
    }

    std::fs::create_dir_all(&plan.output_dir)?;
    if let Some(master) = session.master_image() {
        let path = output_path(&plan.output_dir, &master.id, &plan.format);
        save_image(&master.image, &plan.format, &path)?;
        eprintln!("Saved: {}", path.display());
    }

    if !plan.variations {
        return Ok(());
    }

    session.generate_variations_and_caption().await?;
    for variation in session.variations() {
        let path = output_path(&plan.output_dir, &variation.id, &plan.format);
        save_image(&variation.image, &plan.format, &path)?;
        eprintln!("Saved: {}", path.display());
    }
    let caption_path = save_caption(&plan.output_dir, session.caption())?;
    eprintln!("Saved: {}", caption_path.display());
    println!("{}", session.caption());

    Ok(())
}
