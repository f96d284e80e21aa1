mod config;

use clap::Parser;
use restful_objects_client::LogLevel;
use restful_objects_client::objects::serviceclient::ServiceClient;
use restful_objects_client::scenario::{self, InputSource, ScenarioOptions};
use tokio::io::BufReader;

use config::{Cli, RunConfig, SourceKind, load_settings};

fn init_logging(level: LogLevel) {
    env_logger::Builder::new()
        .filter_level(level.into())
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn input_source(config: &RunConfig) -> Result<InputSource, String> {
    let source = match config.source {
        SourceKind::Excel => {
            let folder = std::env::current_dir().map_err(|e| e.to_string())?;
            println!("Using folder path: {}", folder.display());
            InputSource::Excel(folder.join(&config.excel_file))
        }
        SourceKind::Paste => InputSource::Pasted(Box::new(BufReader::new(tokio::io::stdin()))),
        SourceKind::Literal => InputSource::literal_default(),
    };
    Ok(source)
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let settings = load_settings(cli.settings.as_deref())?;
    let config = RunConfig::resolve(cli, settings);

    init_logging(config.log_level);
    log::debug!("Configuration: {:?}", config);

    let client = ServiceClient::new(&config.base_url)?;
    let source = input_source(&config)?;
    let options = ScenarioOptions {
        sample_id: config.sample_id.clone(),
        select_name: config.select_name.clone(),
    };

    match scenario::run(&client, source, &options).await {
        Ok(report) => log::info!(
            "Run finished: {} candidate(s), {} created, {} processed.",
            report.candidates,
            report.created.len(),
            report.outcomes.len()
        ),
        Err(e) => println!("Unexpected error: {e}"),
    }

    Ok(())
}
