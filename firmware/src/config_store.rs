use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use log::*;

use crate::secrets::WeatherConfig;

/// NVS namespace holding the weather settings.
const NAMESPACE: &str = "weather";
const KEY_API_KEY: &str = "api_key";
const KEY_LOCATION: &str = "location";

/// Longest value read back from NVS, including the terminating NUL.
const MAX_VALUE_LEN: usize = 65;

/// Weather settings stored in flash. Whatever is set here wins over the
/// values baked in at build time.
///
/// The firmware only reads the namespace. It is written from the host, so a
/// device can be pointed at another location without rebuilding:
///
/// ```text
/// python $IDF_PATH/components/nvs_flash/nvs_partition_generator/nvs_partition_gen.py \
///     generate firmware/nvs_weather.csv nvs.bin 0x6000
/// espflash write-bin 0x9000 nvs.bin
/// ```
///
/// See `nvs_weather.csv.example` for the layout.
pub struct ConfigStore {
    nvs: EspNvs<NvsDefault>,
}

impl ConfigStore {
    /// Opens (and if needed creates) the `weather` namespace.
    pub fn open(partition: EspDefaultNvsPartition) -> anyhow::Result<Self> {
        let nvs = EspNvs::new(partition, NAMESPACE, true)?;
        Ok(Self { nvs })
    }

    /// The weather settings, each field falling back to `defaults` when it
    /// is not stored or empty.
    pub fn weather(&self, defaults: &WeatherConfig) -> WeatherConfig {
        WeatherConfig {
            api_key: self
                .read(KEY_API_KEY)
                .unwrap_or_else(|| defaults.api_key.clone()),
            location: self
                .read(KEY_LOCATION)
                .unwrap_or_else(|| defaults.location.clone()),
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        let mut buf = [0u8; MAX_VALUE_LEN];
        match self.nvs.get_str(key, &mut buf) {
            Ok(Some(value)) if !value.is_empty() => {
                info!("Using stored weather {}", key);
                Some(value.to_string())
            }
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read weather {} from NVS: {}", key, e);
                None
            }
        }
    }
}
