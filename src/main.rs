mod config;
mod error;
mod gamepad;
mod packet;
mod sampler;
mod transport;

use std::process;
use std::time::Duration;

use clap::{CommandFactory, Parser};

use config::{Config, Sink};
use error::Error;
use gamepad::Gamepad;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) => {
            // Unknown flags and stray positional arguments land here
            let _ = e.print();
            process::exit(1);
        }
    };
    if config.help {
        let _ = Config::command().print_help();
        process::exit(1);
    }

    if let Err(e) = run(config).await {
        log::error!("{e}");
        if matches!(e, Error::NoSink) {
            let _ = Config::command().print_help();
        }
        process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Error> {
    let sink = config.sink()?;
    let pad = Gamepad::open(config.gamepad_index)?;
    let link = transport::open(&sink).await?;
    // A zero period would make the timer panic
    let period = Duration::from_millis(config.rate_ms.max(1));

    log::info!("sampling every {}ms -> {:?}", period.as_millis(), sink);

    let stream = async {
        match sink {
            // stdout already is the console; nothing to echo back
            Sink::Console => sampler::run(&pad, link, period).await,
            _ => {
                let (reader, writer) = tokio::io::split(link);
                transport::spawn_echo(reader);
                sampler::run(&pad, writer, period).await
            }
        }
    };

    tokio::select! {
        res = stream => res,
        _ = tokio::signal::ctrl_c() => {
            log::info!("shutting down");
            Ok(())
        }
    }
}
