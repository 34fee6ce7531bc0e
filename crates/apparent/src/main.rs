use apparent::config;
use apparent::gui::app::AppModel;
use apparent::sys::runtime;
use clap::Parser;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "apparent", version, about = "Interactive apparent wind diagram", long_about = None)]
struct Cli {
    /// Write the default config file (if missing), print its path and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.init_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.telltale.apparent").with_args(Vec::new());

    app.run::<AppModel>((config, rx));
    Ok(())
}
