pub mod chart;
pub mod domain;
pub mod pipeline;
pub mod query;
pub mod report;

pub mod config {
    use anyhow::Context;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    const DEFAULT_PORT: u16 = 8000;

    // Local dev front end, deployed front end, platform preview.
    pub const DEFAULT_CORS_ALLOW_ORIGINS: [&str; 3] = [
        "http://localhost:3000",
        "https://holistica-quant.vercel.app",
        "https://holistica-quant.preview.example.com",
    ];

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub host: IpAddr,
        pub port: u16,
        pub cors: CorsSettings,
        pub simulate_latency: bool,
        pub sentry_dsn: Option<String>,
    }

    /// Cross-origin allow-list. Methods and headers are always unrestricted.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CorsSettings {
        pub allow_origins: Vec<String>,
        pub allow_credentials: bool,
    }

    impl Default for CorsSettings {
        fn default() -> Self {
            Self {
                allow_origins: DEFAULT_CORS_ALLOW_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                allow_credentials: true,
            }
        }
    }

    impl CorsSettings {
        pub fn is_enabled(&self) -> bool {
            !self.allow_origins.is_empty()
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let host = match std::env::var("HOST") {
                Ok(s) if !s.trim().is_empty() => s
                    .trim()
                    .parse::<IpAddr>()
                    .with_context(|| format!("HOST is not a valid IP address: {s}"))?,
                _ => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            };

            let port = std::env::var("PORT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT);

            let mut cors = CorsSettings::default();
            if let Ok(s) = std::env::var("CORS_ALLOW_ORIGINS") {
                cors.allow_origins = parse_origin_list(&s);
            }
            if let Ok(s) = std::env::var("CORS_ALLOW_CREDENTIALS") {
                cors.allow_credentials = parse_flag(&s)
                    .with_context(|| format!("CORS_ALLOW_CREDENTIALS must be a boolean: {s}"))?;
            }

            let simulate_latency = match std::env::var("ANALYZE_SIMULATE_LATENCY") {
                Ok(s) => parse_flag(&s)
                    .with_context(|| format!("ANALYZE_SIMULATE_LATENCY must be a boolean: {s}"))?,
                Err(_) => true,
            };

            Ok(Self {
                host,
                port,
                cors,
                simulate_latency,
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }

        pub fn bind_addr(&self) -> SocketAddr {
            SocketAddr::new(self.host, self.port)
        }
    }

    pub fn parse_origin_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(|part| part.trim().trim_end_matches('/'))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn parse_flag(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn origin_list_skips_blanks_and_trailing_slashes() {
            let origins = parse_origin_list(" http://localhost:3000/ ,, https://a.example.com ");
            assert_eq!(
                origins,
                vec![
                    "http://localhost:3000".to_string(),
                    "https://a.example.com".to_string()
                ]
            );
        }

        #[test]
        fn empty_origin_list_disables_cors() {
            let cors = CorsSettings {
                allow_origins: parse_origin_list(""),
                allow_credentials: true,
            };
            assert!(!cors.is_enabled());
            assert!(CorsSettings::default().is_enabled());
        }

        #[test]
        fn flags_accept_common_spellings() {
            assert_eq!(parse_flag("OFF"), Some(false));
            assert_eq!(parse_flag(" true "), Some(true));
            assert_eq!(parse_flag("0"), Some(false));
            assert_eq!(parse_flag("maybe"), None);
        }
    }
}
