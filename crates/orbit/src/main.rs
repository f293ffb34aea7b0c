use clap::{Parser, Subcommand};
use orbit::config::{self, DrawerStyle};
use orbit::gui::app::AppModel;
use orbit::sys::{client, runtime};
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about = "Rotary app drawer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Show the drawer
    Show,
    /// Hide the drawer
    Hide,
    /// Turn the bezel by a number of detents (negative turns back)
    Rotate {
        #[arg(allow_hyphen_values = true)]
        steps: i32,
    },
    /// Switch between the list and bubble drawer
    Style { style: DrawerStyle },
    /// Reload the configuration file
    Reload,
    /// Show every app hidden from the drawer again
    Unhide,
    /// Write the default configuration file if none exists and print its path
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Show) => client::send_command("show")?,
        Some(Commands::Hide) => client::send_command("hide")?,
        Some(Commands::Rotate { steps }) => client::send_command(&format!("rotate {steps}"))?,
        Some(Commands::Style { style }) => client::send_command(&format!("style {style}"))?,
        Some(Commands::Reload) => client::send_command("reload")?,
        Some(Commands::Unhide) => client::send_command("unhide")?,
        Some(Commands::InitConfig) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
        }
        None => run_launcher(),
    }
    Ok(())
}

fn run_launcher() {
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.orbit");
    app.run::<AppModel>((config, rx));
}
