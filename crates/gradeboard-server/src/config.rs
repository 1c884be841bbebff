use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub listen: String,
    pub evaluator_url: String,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("gradeboard.db"),
            listen: "127.0.0.1:5000".to_string(),
            evaluator_url: "http://localhost:8000".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = env::var("DATABASE_URL") {
            cfg.db_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("GRADEBOARD_LISTEN") {
            cfg.listen = v;
        }
        if let Ok(v) = env::var("EVALUATOR_URL") {
            cfg.evaluator_url = v;
        }
        if let Ok(v) = env::var("GRADEBOARD_LOG") {
            cfg.log_level = v;
        }
        cfg
    }
}
