#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GoogleConfig {
    /// OAuth client secret downloaded from the Cloud console
    pub client_secret: Box<str>,
    /// Where refreshed tokens are persisted between runs
    pub token_cache: Box<str>,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            client_secret: "credentials.json".into(),
            token_cache: "token.json".into(),
        }
    }
}
