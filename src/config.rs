use std::{net, path};

use serde::Deserialize;

#[derive(Deserialize)]
pub struct Config {
    pub http: Http,
    pub render: Render,
}

#[derive(Deserialize)]
pub struct Http {
    pub server: Server,
    pub cors: Cors,
}

#[derive(Deserialize)]
pub struct Server {
    pub addr: net::SocketAddr,
}

#[derive(Deserialize)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
}

#[derive(Deserialize)]
pub struct Render {
    pub templates_dir: path::PathBuf,
    pub static_dir: path::PathBuf,
}
