//! HtmlBox shell entry point.
//!
//! Usage: `htmlbox [SCRIPT.json] [CONFIG.json]`. Without a script, a built-in
//! demo session is replayed. The resulting document is printed as JSON.

mod replay;

use htmlbox_core::ExtensionConfig;
use replay::{ReplayError, Session};

fn run() -> Result<(), ReplayError> {
    let mut args = std::env::args().skip(1);
    let script = args.next();
    let config = match args.next() {
        Some(path) => ExtensionConfig::load(path)?,
        None => ExtensionConfig::default(),
    };

    let events = match script {
        Some(path) => replay::load_script(path)?,
        None => replay::demo_script(),
    };

    let mut session = Session::new(config)?;
    session.run(&events);
    log::info!("Live editors: {:?}", session.extension.registry());

    match session.canvas.document.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize document: {}", e),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Starting HtmlBox");

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
