use std::path::PathBuf;

use ticket_renderer::{config, server, Config};

pub struct Client {
    inner: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Spawns the app on an ephemeral port with the repository's own
    /// template directory.
    pub async fn spawn() -> Self {
        Self::spawn_with("templates", "static").await
    }

    pub async fn spawn_with(templates_dir: &str, static_dir: &str) -> Self {
        let config = Config {
            http: config::Http {
                server: config::Server {
                    addr: "127.0.0.1:0".parse().expect("bad addr"),
                },
                cors: config::Cors {
                    allowed_origins: Vec::new(),
                },
            },
            render: config::Render {
                templates_dir: PathBuf::from(templates_dir),
                static_dir: PathBuf::from(static_dir),
            },
        };

        let app = server::app(&config).expect("failed to build the app");
        let listener = tokio::net::TcpListener::bind(config.http.server.addr)
            .await
            .expect("failed to bind a port");
        let addr = listener.local_addr().expect("failed to get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server error");
        });

        Self {
            inner: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    pub async fn health(&self) -> reqwest::Response {
        self.get("/health").await
    }

    pub async fn generate_ticket(
        &self,
        payload: &serde_json::Value,
    ) -> reqwest::Response {
        self.inner
            .post(format!("{}/generate-ticket", self.base_url))
            .json(payload)
            .send()
            .await
            .expect("failed to send a request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.inner
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("failed to send a request")
    }
}
