//! Command-line control of a Bravia display over its serial port.
//!
//! ```bash
//! bravia power            # prints "on" or "off"
//! bravia power on
//! bravia input hdmi_2
//! bravia picture-mode cinema_pro
//! RUST_LOG=debug bravia --port /dev/ttyUSB1 input
//! ```

mod serial;

use std::time::Duration;

use anyhow::Context;
use bravia_serial::{BraviaDisplay, InputMode, PictureMode};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use serial::{DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT_MS, SerialConfig, SerialTransport};

/// Control a Sony Bravia display over RS-232
#[derive(Parser, Debug)]
#[command(name = "bravia", author, version, about, long_about = None)]
struct Cli {
    /// Serial device the display is connected to
    #[arg(long, env = "BRAVIA_PORT", default_value = DEFAULT_PORT)]
    port: String,

    /// Baud rate of the serial link
    #[arg(long, env = "BRAVIA_BAUD", default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Read timeout in milliseconds
    #[arg(long, env = "BRAVIA_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Log every frame sent and received
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Print the power state, or switch the display on or off
    Power {
        #[arg(value_enum)]
        state: Option<PowerArg>,
    },

    /// Select a picture mode (the display cannot report the current one)
    PictureMode { mode: PictureMode },

    /// Print the selected input, or select another one
    Input { mode: Option<InputMode> },

    /// List the known picture modes and inputs
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PowerArg {
    On,
    Off,
}

impl Cli {
    fn serial_config(&self) -> SerialConfig {
        SerialConfig {
            path: self.port.clone(),
            baud_rate: self.baud,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

fn power_str(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.command == Commands::List {
        println!("Picture modes:");
        for mode in PictureMode::ALL {
            println!("  {mode}");
        }
        println!("\nInputs:");
        for mode in InputMode::ALL {
            println!("  {mode}");
        }
        return Ok(());
    }

    let transport = SerialTransport::open(&cli.serial_config())?;
    let mut display = BraviaDisplay::new(transport);

    match cli.command {
        Commands::Power { state: None } => {
            let on = display
                .power_state()
                .context("failed to read power state")?;
            println!("{}", power_str(on));
        }
        Commands::Power { state: Some(state) } => {
            let on = state == PowerArg::On;
            info!("switching display {}", power_str(on));
            display
                .set_power_state(on)
                .context("failed to set power state")?;
        }
        Commands::PictureMode { mode } => {
            info!("selecting picture mode {mode}");
            display
                .set_picture_mode(mode)
                .context("failed to set picture mode")?;
        }
        Commands::Input { mode: None } => {
            let mode = display
                .input_mode()
                .context("failed to read input mode")?;
            println!("{mode}");
        }
        Commands::Input { mode: Some(mode) } => {
            info!("selecting input {mode}");
            display
                .set_input_mode(mode)
                .context("failed to set input mode")?;
        }
        Commands::List => unreachable!("handled before opening the port"),
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["bravia", "power"]).unwrap();
        assert_eq!(cli.command, Commands::Power { state: None });
        assert_eq!(cli.serial_config(), SerialConfig::default());
    }

    #[test]
    fn serial_options() {
        let cli = Cli::try_parse_from([
            "bravia",
            "--port",
            "/dev/ttyS1",
            "--baud",
            "19200",
            "--timeout-ms",
            "250",
            "input",
        ])
        .unwrap();
        assert_eq!(
            cli.serial_config(),
            SerialConfig {
                path: "/dev/ttyS1".to_owned(),
                baud_rate: 19200,
                timeout: Duration::from_millis(250),
            }
        );
        assert_eq!(cli.command, Commands::Input { mode: None });
    }

    #[test]
    fn mode_arguments() {
        let cli = Cli::try_parse_from(["bravia", "input", "HDMI_2"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Input {
                mode: Some(InputMode::Hdmi2)
            }
        );

        let cli = Cli::try_parse_from(["bravia", "picture-mode", "cinema_home"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::PictureMode {
                mode: PictureMode::CinemaHome
            }
        );

        let cli = Cli::try_parse_from(["bravia", "power", "off"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Power {
                state: Some(PowerArg::Off)
            }
        );
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Cli::try_parse_from(["bravia", "input", "hdmi_9"]).is_err());
        assert!(Cli::try_parse_from(["bravia", "picture-mode", "cinema"]).is_err());
        assert!(Cli::try_parse_from(["bravia", "power", "standby"]).is_err());
        assert!(Cli::try_parse_from(["bravia", "picture-mode"]).is_err());
    }
}
