// === IMPORTS ===
use crate::config_store::ConfigStore;
use crate::secrets::Secrets;
use anyhow::anyhow;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
use esp_idf_svc::{eventloop::EspSystemEventLoop, nvs::EspDefaultNvsPartition};
use log::*;

mod config_store;
mod secrets;
mod weather;

/// Time between two weather updates.
const UPDATE_INTERVAL_MS: u32 = 15 * 60 * 1000;

// === MAIN PROGRAM ===
fn main() -> anyhow::Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    info!("=== Starting WiFi + Weather Station ===");

    let secrets = Secrets::load();
    if secrets.wifi.ssid.is_empty() {
        return Err(anyhow!(
            "No WiFi SSID compiled in; create firmware/secrets.env and rebuild"
        ));
    }
    info!("WiFi SSID: {}", secrets.wifi.ssid);

    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    // Stored settings override the build-time defaults
    let weather_config = ConfigStore::open(nvs.clone())?.weather(&secrets.weather);
    info!("Weather location: {}", weather_config.location);

    // === WiFi Setup ===
    info!("Starting WiFi...");
    let mut wifi = BlockingWifi::wrap(
        EspWifi::new(peripherals.modem, sys_loop.clone(), Some(nvs))?,
        sys_loop,
    )?;
    let wifi_config = Configuration::Client(ClientConfiguration {
        ssid: secrets
            .wifi
            .ssid
            .try_into()
            .map_err(|_| anyhow!("WiFi SSID is too long"))?,
        password: secrets
            .wifi
            .password
            .try_into()
            .map_err(|_| anyhow!("WiFi password is too long"))?,
        auth_method: if secrets.wifi.password.is_empty() {
            AuthMethod::None
        } else {
            AuthMethod::WPA2Personal
        },
        ..Default::default()
    });
    wifi.set_configuration(&wifi_config)?;
    wifi.start()?;
    info!("WiFi started");
    wifi.connect()?;
    info!("WiFi connected!");
    wifi.wait_netif_up()?;
    let ip_info = wifi.wifi().sta_netif().get_ip_info()?;
    info!("IP address: {:?}", ip_info.ip);

    // ==================== MAIN LOOP ====================
    loop {
        // Reconnect Wi-Fi if disconnected
        if !wifi.is_connected()? {
            warn!("WiFi disconnected, reconnecting...");
            wifi.connect()?;
            wifi.wait_netif_up()?;
        }

        info!("Fetching weather data...");
        match weather::get_weather(&weather_config) {
            Ok(weather) => info!(
                "{}: {:.1}°C / {:.1}°F, {}",
                weather.location.name,
                weather.current.temp_c,
                weather.current.temp_f,
                weather.current.condition.text
            ),
            Err(e) => error!("Failed to fetch weather: {}", e),
        }

        info!("Waiting for next update (15 minutes)...");
        FreeRtos::delay_ms(UPDATE_INTERVAL_MS);
    }
}
