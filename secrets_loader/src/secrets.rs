use std::collections::BTreeMap;

/// The four keys every firmware build receives a definition for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretKey {
    /// SSID of the Wi-Fi network.
    WifiSsid,
    /// Password of the Wi-Fi network.
    WifiPassword,
    /// API key for the weather service.
    WeatherApiKey,
    /// Location the weather is fetched for.
    WeatherLocation,
}

impl SecretKey {
    /// All keys, in the order their definitions are emitted.
    pub const ALL: [SecretKey; 4] = [
        SecretKey::WifiSsid,
        SecretKey::WifiPassword,
        SecretKey::WeatherApiKey,
        SecretKey::WeatherLocation,
    ];

    /// The key as written in `secrets.env`.
    pub fn as_str(self) -> &'static str {
        match self {
            SecretKey::WifiSsid => "WIFI_SSID",
            SecretKey::WifiPassword => "WIFI_PASSWORD",
            SecretKey::WeatherApiKey => "WEATHER_API_KEY",
            SecretKey::WeatherLocation => "WEATHER_LOCATION",
        }
    }

    /// The name of the definition handed to the compiler.
    pub fn define_name(self) -> &'static str {
        match self {
            SecretKey::WifiSsid => "DEFAULT_WIFI_SSID",
            SecretKey::WifiPassword => "DEFAULT_WIFI_PASSWORD",
            SecretKey::WeatherApiKey => "DEFAULT_WEATHER_API_KEY",
            SecretKey::WeatherLocation => "DEFAULT_WEATHER_LOCATION",
        }
    }

    /// Value used when the secrets file is missing or does not set the key.
    pub fn default_value(self) -> &'static str {
        match self {
            SecretKey::WeatherLocation => "Delhi",
            _ => "",
        }
    }
}

/// Key/value pairs read from `secrets.env`, layered over the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretsMap {
    entries: BTreeMap<String, String>,
}

impl Default for SecretsMap {
    fn default() -> Self {
        let entries = SecretKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), key.default_value().to_string()))
            .collect();
        Self { entries }
    }
}

impl SecretsMap {
    /// Applies the contents of a secrets file on top of the current entries.
    ///
    /// Lines are applied in order, so a key set twice keeps its last value.
    /// Returns the number of lines that produced an entry.
    pub fn merge_str(&mut self, text: &str) -> usize {
        self.merge_bytes(text.as_bytes())
    }

    /// Like [`merge_str`](Self::merge_str), for raw file contents. Lines that
    /// are not valid UTF-8 are skipped; the rest of the file still applies.
    pub fn merge_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut applied = 0;
        for line in bytes.split(|b| *b == b'\n') {
            let Ok(line) = std::str::from_utf8(line) else {
                continue;
            };
            if let Some((key, value)) = parse_line(line) {
                self.entries.insert(key, value);
                applied += 1;
            }
        }
        applied
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value for one of the required keys, falling back to its default.
    pub fn value(&self, key: SecretKey) -> &str {
        self.get(key.as_str()).unwrap_or(key.default_value())
    }
}

/// Parses one line of a secrets file.
///
/// Blank lines, `#` comments and lines without `=` yield `None`. The line is
/// split on the first `=`; both halves are trimmed and the value loses one
/// layer of surrounding quotes.
pub fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, value) = line.split_once('=')?;
    Some((key.trim().to_string(), strip_quotes(value.trim()).to_string()))
}

// Double quotes come off first, then single quotes.
fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    let value = value.strip_prefix('\'').unwrap_or(value);
    value.strip_suffix('\'').unwrap_or(value)
}

/// Shortens a secret for log output: the first three characters, then `***`.
pub fn redact(value: &str) -> String {
    let mut shown: String = value.chars().take(3).collect();
    shown.push_str("***");
    shown
}
