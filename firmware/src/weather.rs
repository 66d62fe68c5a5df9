use embedded_svc::http::client::Client;
use esp_idf_svc::http::client::{Configuration as HttpConfiguration, EspHttpConnection};
use log::*;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

use crate::secrets::WeatherConfig;

// === WEATHERAPI DATA STRUCTURES ===
#[derive(Deserialize, Debug)]
pub struct WeatherResponse {
    pub location: Location,
    pub current: Current,
}

#[derive(Deserialize, Debug)]
pub struct Location {
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct Current {
    pub temp_c: f32,
    pub temp_f: f32,
    pub condition: Condition,
}

#[derive(Deserialize, Debug)]
pub struct Condition {
    pub text: String,
}

const CURRENT_WEATHER_URL: &str = "https://api.weatherapi.com/v1/current.json";

/// Both query values are percent-encoded; locations may contain spaces,
/// `&` or non-ASCII names.
fn request_url(config: &WeatherConfig) -> String {
    format!(
        "{}?key={}&q={}",
        CURRENT_WEATHER_URL,
        utf8_percent_encode(&config.api_key, NON_ALPHANUMERIC),
        utf8_percent_encode(&config.location, NON_ALPHANUMERIC)
    )
}

// === WEATHER FETCH FUNCTION ===
pub fn get_weather(config: &WeatherConfig) -> anyhow::Result<WeatherResponse> {
    if config.api_key.is_empty() {
        anyhow::bail!("No weather API key configured");
    }

    let url = request_url(config);

    let connection = EspHttpConnection::new(&HttpConfiguration {
        use_global_ca_store: true,
        crt_bundle_attach: Some(esp_idf_sys::esp_crt_bundle_attach),
        timeout: Some(core::time::Duration::from_secs(30)),
        ..Default::default()
    })?;
    let mut client = Client::wrap(connection);

    let request = client.get(&url)?;
    let mut response = request.submit()?;

    let status = response.status();
    info!("Weather API response status: {}", status);
    if status != 200 {
        anyhow::bail!("Weather API returned status {}", status);
    }

    let mut body = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let bytes_read = response.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..bytes_read]);
    }

    let weather: WeatherResponse = serde_json::from_slice(&body)?;
    Ok(weather)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(location: &str) -> WeatherConfig {
        WeatherConfig {
            api_key: "abc123".to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn plain_location_is_unchanged() {
        assert_eq!(
            request_url(&config("Delhi")),
            "https://api.weatherapi.com/v1/current.json?key=abc123&q=Delhi"
        );
    }

    #[test]
    fn reserved_characters_are_encoded() {
        assert_eq!(
            request_url(&config("New York&units=f#x")),
            "https://api.weatherapi.com/v1/current.json?key=abc123&q=New%20York%26units%3Df%23x"
        );
    }

    #[test]
    fn non_ascii_location_is_utf8_encoded() {
        assert_eq!(
            request_url(&config("Zürich")),
            "https://api.weatherapi.com/v1/current.json?key=abc123&q=Z%C3%BCrich"
        );
    }
}
