//! Weather provider seam.

use crate::types::WeatherInfo;

/// Source of current weather for a location.
///
/// `None` means the provider could not answer; callers treat that as
/// unknown weather rather than an error.
pub trait WeatherSource: Send + Sync {
    fn current(&self, city: &str, country: &str) -> Option<WeatherInfo>;
}

/// Fixed answer, regardless of location. Used by the CLI (weather comes
/// from flags) and by tests.
#[derive(Debug, Clone, Default)]
pub struct StaticWeather {
    weather: Option<WeatherInfo>,
}

impl StaticWeather {
    pub const fn new(weather: Option<WeatherInfo>) -> Self {
        Self { weather }
    }

    pub const fn unknown() -> Self {
        Self { weather: None }
    }
}

impl WeatherSource for StaticWeather {
    fn current(&self, city: &str, country: &str) -> Option<WeatherInfo> {
        self.weather.clone().map(|mut w| {
            if w.city.is_empty() {
                w.city = city.to_string();
            }
            if w.country.is_empty() {
                w.country = country.to_string();
            }
            w
        })
    }
}
