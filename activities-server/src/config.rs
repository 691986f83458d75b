use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Runtime settings. Every flag can also come from the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "activities-server", about = "Extracurricular activity sign-up server")]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory holding the web page served under /static
    #[arg(long, env = "STATIC_DIR", default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/static"))]
    pub static_dir: PathBuf,

    /// Print a startup banner
    #[arg(long, env = "BANNER")]
    pub banner: bool,
}
