use chartstudio::app;
use chartstudio::service::Studio;
use chartstudio::settings::StudioSettings;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut settings = StudioSettings::load()?;

    // Optional positional override of the listen address
    let args: Vec<String> = env::args().collect();
    if args.len() >= 2 {
        settings.bind_addr = args[1].clone();
    }

    let studio = Studio::open(settings)?;
    app::run(studio).await
}
