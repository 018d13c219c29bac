use anyhow::Context;
use clap::{ArgAction, Parser};
use log::{info, warn};
use nmproxy::types::constants::property;
use nmproxy::util::utils::decode_ssid_or_hidden;
use nmproxy::{Session, listener};

#[derive(Parser, Debug)]
#[command(name = "nmproxy")]
#[command(about = "Show NetworkManager devices and access points")]
#[command(version)]
struct Args {
    /// Keep running and log property changes of the manager and its devices.
    #[arg(short, long, action = ArgAction::SetTrue)]
    watch: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();
    let args = Args::parse();

    let session = Session::system()
        .await
        .context("failed to connect to the system bus")?;
    let manager = session
        .manager()
        .await
        .context("failed to load the NetworkManager root object")?;
    println!("{manager}");

    let devices = manager.devices(&session).await?;
    for device in &devices {
        println!("  {device} {}", device.device_type());

        let Some(wifi) = device.wifi() else {
            continue;
        };
        for ap in wifi.access_points(&session).await? {
            // Access points come and go between listing and reading them.
            match ap.proxy().property_as::<Vec<u8>>(property::SSID).await {
                Ok(ssid) => println!("    {ap} {}", decode_ssid_or_hidden(&ssid)),
                Err(e) => warn!("Skipping {ap}: failed to read SSID: {e}"),
            }
        }
    }

    if !args.watch {
        return Ok(());
    }

    let on_change = listener(|proxy, name, value| {
        println!("{proxy} {} {name} = {value:?}", proxy.path().as_str());
    });
    manager
        .proxy()
        .register_change_listener(on_change.clone())
        .await?;
    for device in &devices {
        device
            .proxy()
            .register_change_listener(on_change.clone())
            .await?;
    }

    info!("Watching {} devices, press Ctrl-C to stop", devices.len());
    tokio::signal::ctrl_c().await?;
    Ok(())
}
