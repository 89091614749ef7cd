/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Fixed simulation step rate; the broadcast timer fires at the same
    /// nominal rate and the accumulator reconciles any drift.
    pub tick_rate_hz: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".to_string(),
            tick_rate_hz: 60,
        }
    }
}

impl ServerConfig {
    /// Defaults with the `PORT` environment override applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("PORT") {
            config.listen_addr = format!("0.0.0.0:{}", port);
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_rate_is_invalid() {
        let config = ServerConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_listen_addr_is_invalid() {
        let config = ServerConfig {
            listen_addr: "not-an-address".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
