#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_file: Box<str>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_file: "quiz_kit.log".into(),
        }
    }
}
