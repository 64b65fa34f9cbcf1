use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct Args {
    #[serde(default = "default_port")]
    pub(crate) port: u16,
    #[serde(default = "default_log_level")]
    pub(crate) log_level: String,
    /// comma-separated, an `Origin` must end with one of these
    #[serde(default = "default_allowed_origins")]
    pub(crate) allowed_origins: String,
    #[serde(default = "default_allowed_methods")]
    pub(crate) allowed_methods: String,
    #[serde(default = "default_cors_max_age")]
    pub(crate) cors_max_age: u64,
    #[serde(default = "default_remote_user_header")]
    pub(crate) remote_user_header: String,
    /// seconds between background sweeps, 0 disables the sweeper
    #[serde(default)]
    pub(crate) sweep_interval: u64,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".into()
}

fn default_allowed_origins() -> String {
    "dsv.su.se".into()
}

fn default_allowed_methods() -> String {
    "GET".into()
}

fn default_cors_max_age() -> u64 {
    60 * 60 * 24
}

fn default_remote_user_header() -> String {
    "x-remote-user".into()
}

pub(crate) fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(" dsv.su.se, su.se ,,"),
            vec!["dsv.su.se".to_string(), "su.se".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_defaults() {
        let args = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize::<Args>()
            .unwrap();

        assert_eq!(args.port, 8080);
        assert_eq!(args.allowed_origins, "dsv.su.se");
        assert_eq!(args.allowed_methods, "GET");
        assert_eq!(args.cors_max_age, 86400);
        assert_eq!(args.remote_user_header, "x-remote-user");
        assert_eq!(args.sweep_interval, 0);
    }
}
