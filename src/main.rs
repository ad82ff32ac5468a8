use cladeview::app::{AppConfig, CladeviewApp};
use clap::Parser;

fn main() {
    let _ = env_logger::builder().format_timestamp(None).try_init();

    let config = AppConfig::parse();
    if let Err(err) = CladeviewApp::run(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
