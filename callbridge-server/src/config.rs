use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "callbridge-server")]
#[command(about = "Pairs two browser clients for a call and relays their signaling")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "CALLBRIDGE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Origin allowed by CORS, or `*` for any.
    #[arg(long, env = "CALLBRIDGE_ALLOWED_ORIGIN", default_value = "*")]
    pub allowed_origin: String,

    /// Capacity of the switchboard command queue.
    #[arg(long, env = "CALLBRIDGE_COMMAND_BUFFER", default_value_t = 100)]
    pub command_buffer: usize,

    /// Log filter used when RUST_LOG is unset, e.g. `info` or `callbridge_server=debug`.
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origin: "*".to_string(),
            command_buffer: 100,
            log: "info".to_string(),
        }
    }
}
