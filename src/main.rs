use log::LevelFilter;
use simple_logger::SimpleLogger;

use rmdl_convert::app;

fn main() {
    if let Err(error) = SimpleLogger::new().with_level(LevelFilter::Info).init() {
        eprintln!("Failed to initialize logger: {}", error);
    }

    if let Err(error) = app::run_from_env() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
