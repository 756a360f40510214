use imagen_studio::{
    logger::{self, LoggerConfig},
    CatalogOutcome, GenerateOutcome, Studio, StudioConfig,
};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::development())?;

    if dotenv_loaded {
        log::info!(".env file loaded");
    } else {
        log::warn!("No .env file found, using process environment");
    }

    let config = StudioConfig::from_env();
    log::info!(
        "Using API at {} (timeout {}s)",
        config.base_url,
        config.request_timeout.as_secs()
    );
    let studio = Studio::new(config)?;

    let api_key = env::var("STUDIO_API_KEY").unwrap_or_default();
    match studio.set_credential(&api_key).await {
        Ok(CatalogOutcome::Loaded {
            base_models,
            lora_models,
        }) => log::info!(
            "{} base model(s), {} LoRA model(s) available",
            base_models,
            lora_models
        ),
        Ok(CatalogOutcome::AwaitingCredential) => {
            log::error!("Set STUDIO_API_KEY to load the model catalog");
            return Ok(());
        }
        Ok(other) => log::warn!("Catalog load ended with {:?}", other),
        Err(err) => {
            log::error!("{}", err.user_message());
            println!("{}", serde_json::to_string_pretty(&studio.view())?);
            return Ok(());
        }
    }

    let prompt = env::args()
        .skip(1)
        .collect::<Vec<_>>()
        .join(" ");
    let prompt = if prompt.trim().is_empty() {
        env::var("STUDIO_PROMPT").unwrap_or_default()
    } else {
        prompt
    };
    studio.update_form(|form| form.prompt = prompt);

    match studio.generate().await {
        Ok(GenerateOutcome::Rendered(images)) => {
            for image in &images {
                println!("{}", image.url);
            }
        }
        Ok(GenerateOutcome::Superseded) => log::warn!("Generation was superseded"),
        Err(err) => log::error!("{}", err.user_message()),
    }

    println!("{}", serde_json::to_string_pretty(&studio.view())?);
    Ok(())
}
