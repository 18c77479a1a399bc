//! Default value functions for configuration.

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_ident() -> String {
    String::new()
}

pub fn default_host() -> String {
    String::new()
}

pub fn default_realname() -> String {
    String::new()
}
