use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// 抽奖会话默认参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 默认总轮次
    #[serde(default = "default_total_rounds")]
    pub total_rounds: i64,
    /// 是否允许同一人多次中奖
    #[serde(default = "default_allow_duplicate_winners")]
    pub allow_duplicate_winners: bool,
    /// 固定随机种子 (None 时使用系统熵)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_total_rounds() -> i64 {
    10
}

fn default_allow_duplicate_winners() -> bool {
    true
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            total_rounds: default_total_rounds(),
            allow_duplicate_winners: default_allow_duplicate_winners(),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: get_env("DATABASE_URL")
                            .unwrap_or_else(|| "sqlite://lottery.db?mode=rwc".to_string()),
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 5u32),
                    },
                    draw: DrawConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: Config =
            toml::from_str(config_str).map_err(|e| format!("解析配置文件失败: {e}"))?;
        Ok(config)
    }

    // 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT") {
            if let Ok(p) = v.parse() {
                self.server.port = p;
            }
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS") {
            if let Ok(mc) = v.parse() {
                self.database.max_connections = mc;
            }
        }
        if let Ok(v) = env::var("DRAW_TOTAL_ROUNDS") {
            if let Ok(n) = v.parse() {
                self.draw.total_rounds = n;
            }
        }
        if let Ok(v) = env::var("DRAW_ALLOW_DUPLICATE_WINNERS") {
            if let Ok(b) = v.parse() {
                self.draw.allow_duplicate_winners = b;
            }
        }
        if let Ok(v) = env::var("DRAW_SEED") {
            if let Ok(s) = v.parse() {
                self.draw.seed = Some(s);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_draw_defaults() {
        let config = Config::parse(
            r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "sqlite::memory:"
max_connections = 1
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.draw.total_rounds, 10);
        assert!(config.draw.allow_duplicate_winners);
        assert_eq!(config.draw.seed, None);
    }

    #[test]
    fn test_parse_draw_section() {
        let config = Config::parse(
            r#"
[server]
host = "127.0.0.1"
port = 9000

[database]
url = "sqlite::memory:"
max_connections = 1

[draw]
total_rounds = 3
allow_duplicate_winners = false
seed = 42
"#,
        )
        .unwrap();
        assert_eq!(config.draw.total_rounds, 3);
        assert!(!config.draw.allow_duplicate_winners);
        assert_eq!(config.draw.seed, Some(42));
    }

    #[test]
    fn test_parse_rejects_missing_sections() {
        assert!(Config::parse("[server]\nhost = \"x\"\nport = 1\n").is_err());
    }
}
