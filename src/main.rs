use clap::Parser;
use std::process::ExitCode;

mod args;
use args::{Args, into_builder};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    ::log::info!("Starting crawl of {} seed URLs", args.urls.len());

    let builder = match into_builder(&args) {
        Ok(builder) => builder,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let start_time = std::time::Instant::now();
    let records = match builder.crawl_all(&args.urls).await {
        Ok(records) => records,
        Err(e) => {
            ::log::error!("Failed to start crawler: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Crawling complete - {} of {} seeds in {:.2} seconds",
        records.len(),
        args.urls.len(),
        start_time.elapsed().as_secs_f64()
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&records)
    } else {
        serde_json::to_string(&records)
    };

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize results: {}", e);
            ExitCode::FAILURE
        }
    }
}
