use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("BNET_CLIENT_ID")
            && !id.is_empty()
        {
            self.battlenet.client_id = Some(id);
        }

        if let Ok(secret) = std::env::var("BNET_CLIENT_SECRET")
            && !secret.is_empty()
        {
            self.battlenet.client_secret = Some(secret);
        }

        if let Ok(broker) = std::env::var("REALMSCRIBE_BROKER_URL")
            && !broker.is_empty()
        {
            self.battlenet.broker_url = Some(broker);
        }

        if let Ok(key) = std::env::var("GEMINI_API_KEY")
            && !key.is_empty()
        {
            self.gemini.api_key = Some(key);
        }

        if let Ok(locale) = std::env::var("REALMSCRIBE_LOCALE")
            && !locale.is_empty()
        {
            self.battlenet.locale = locale;
        }

        if let Ok(timeout_str) = std::env::var("REALMSCRIBE_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.parse::<u64>()
            && timeout > 0
        {
            self.battlenet.request_timeout_secs = timeout;
        }

        if let Ok(dir) = std::env::var("REALMSCRIBE_CACHE_DIR")
            && !dir.is_empty()
        {
            self.cache.directory = dir;
        }
    }
}
