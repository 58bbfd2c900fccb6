use anyhow::Result;
use log::info;
use tokio::{
    io::{self, BufReader},
    signal,
};

use trainer::{PlaygroundConfig, Session, TrainingController, console};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = PlaygroundConfig::locate()?;
    info!("target line {}", config.boundary()?);

    let controller = TrainingController::from_config(&config)?;
    let mut session = Session::spawn(controller, config.round_interval());

    if config.autostart {
        session.handle().start(None).await?;
    }

    let input = BufReader::new(io::stdin());
    let mut stdout = io::stdout();

    tokio::select! {
        res = console::drive(&mut session, input, &mut stdout) => res?,
        _ = signal::ctrl_c() => info!("received SIGINT"),
    }

    info!("wrapping up");
    session.shutdown().await?;
    Ok(())
}
