//! Audio output device listing.

use clap::{Args, Subcommand};
use mechvibe_io::{default_output_device, find_output_device, list_devices};

#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all output devices
    List,

    /// Show the default output device
    Info,

    /// Check which device a name or index selects
    Find {
        /// Device index, exact name, or partial name
        query: String,
    },
}

pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_devices()?;
            if devices.is_empty() {
                println!("No audio output devices found.");
                return Ok(());
            }

            println!("Output Devices:");
            for device in &devices {
                let marker = if device.is_default { " (default)" } else { "" };
                println!(
                    "  [{}] {} ({} Hz){}",
                    device.index, device.name, device.default_sample_rate, marker
                );
            }
            println!();
            println!("Tip: set engine.output_device to an index or partial name in the config:");
            println!("  mechvibe config show");
        }

        DevicesCommand::Info => match default_output_device()? {
            Some(device) => {
                println!("Default Output:");
                println!("  Name: {}", device.name);
                println!("  Sample Rate: {} Hz", device.default_sample_rate);
            }
            None => println!("Default Output: None"),
        },

        DevicesCommand::Find { query } => {
            let device = find_output_device(&query)?;
            println!("[{}] {} ({} Hz)", device.index, device.name, device.default_sample_rate);
        }
    }

    Ok(())
}
