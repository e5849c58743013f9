use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    // --- Store Args ---
    /// Backing store type (redis, memory)
    #[arg(long, env = "STORE_TYPE", default_value = "redis")]
    pub store_type: String,

    /// Store connection URL (e.g., redis://127.0.0.1:6379)
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Name of the list key holding the messages.
    #[arg(long, env = "MESSAGE_KEY", default_value = "message")]
    pub message_key: String,

    // --- Server Args ---
    /// Address the HTTP server binds to.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "3001")]
    pub port: u16,

    // --- General App Args ---
    /// Environment name reported by /api/version (e.g., production)
    #[arg(long, env = "NODE_ENV")]
    pub node_env: Option<String>,

    /// Version string reported by /api/version
    #[arg(long = "app-version", env = "VERSION")]
    pub app_version: Option<String>,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    pub debug: bool,
}

impl Args {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_original_service() {
        let args = Args::try_parse_from(["message-board"]).unwrap();
        assert_eq!(args.port, 3001);
        assert_eq!(args.message_key, "message");
        assert_eq!(args.store_type, "redis");
        assert_eq!(args.server_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "message-board",
            "--port",
            "8080",
            "--store-type",
            "memory",
            "--app-version",
            "1.2.3",
        ]).unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.store_type, "memory");
        assert_eq!(args.app_version.as_deref(), Some("1.2.3"));
    }
}
