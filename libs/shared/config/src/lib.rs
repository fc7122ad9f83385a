use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_host: IpAddr,
    pub api_port: u16,
    pub appointment_service_url: String,
    pub appointment_service_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_host: env::var("API_HOST")
                .ok()
                .and_then(|raw| match raw.parse::<IpAddr>() {
                    Ok(host) => Some(host),
                    Err(_) => {
                        warn!("API_HOST '{}' is not an IP address, using 0.0.0.0", raw);
                        None
                    }
                })
                .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            api_port: env::var("API_PORT")
                .ok()
                .and_then(|raw| match raw.parse::<u16>() {
                    Ok(port) => Some(port),
                    Err(_) => {
                        warn!("API_PORT '{}' is not a port number, using {}", raw, DEFAULT_PORT);
                        None
                    }
                })
                .unwrap_or(DEFAULT_PORT),
            appointment_service_url: env::var("APPOINTMENT_SERVICE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("APPOINTMENT_SERVICE_URL not set, using empty value");
                    String::new()
                }),
            appointment_service_token: env::var("APPOINTMENT_SERVICE_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        };

        if !config.is_configured() {
            warn!("Appointment service not configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.appointment_service_url.is_empty()
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.api_host, self.api_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            api_port: DEFAULT_PORT,
            appointment_service_url: String::new(),
            appointment_service_token: None,
        }
    }
}
