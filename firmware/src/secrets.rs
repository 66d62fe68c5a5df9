// Injected by build.rs from firmware/secrets.env (or the built-in defaults)
const WIFI_SSID: &str = env!("DEFAULT_WIFI_SSID");
const WIFI_PASSWORD: &str = env!("DEFAULT_WIFI_PASSWORD");
const WEATHER_API_KEY: &str = env!("DEFAULT_WEATHER_API_KEY");
const WEATHER_LOCATION: &str = env!("DEFAULT_WEATHER_LOCATION");

/// Defines the structure for the secrets.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Wi-Fi configuration.
    pub wifi: WiFiConfig,
    /// Weather API configuration.
    pub weather: WeatherConfig,
}

/// Defines the structure for the Wi-Fi configuration.
#[derive(Debug, Clone)]
pub struct WiFiConfig {
    /// The SSID of the Wi-Fi network.
    pub ssid: &'static str,
    /// The password of the Wi-Fi network.
    pub password: &'static str,
}

/// Defines the structure for the weather API configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    /// The API key for weatherapi.com.
    pub api_key: String,
    /// The location for which the weather should be fetched.
    pub location: String,
}

impl Secrets {
    /// Loads the secrets that were embedded at compile time.
    pub fn load() -> Self {
        Secrets {
            wifi: WiFiConfig {
                ssid: WIFI_SSID,
                password: WIFI_PASSWORD,
            },
            weather: WeatherConfig {
                api_key: WEATHER_API_KEY.to_string(),
                location: WEATHER_LOCATION.to_string(),
            },
        }
    }
}
