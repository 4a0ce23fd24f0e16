//! City weather lookup
//!
//! Validates the city name, geocodes it, then fetches current conditions for
//! the resolved coordinates. The two requests are strictly sequential and the
//! first failure ends the lookup.

use crate::api::WeatherApiClient;
use crate::config::ApiConfig;
use crate::models::WeatherReport;
use crate::LookupError;
use tracing::{debug, error, info, instrument};

/// Progress of a single lookup invocation
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Validating,
    GeocodingInFlight,
    WeatherInFlight,
    Done(Result<(), String>),
}

/// Resolves city names to current weather reports
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    client: WeatherApiClient,
}

impl WeatherLookup {
    /// Create a lookup over an existing API client
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self { client }
    }

    /// Build the API client from configuration
    pub fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        Ok(Self::new(WeatherApiClient::new(config)?))
    }

    /// Look up the current weather for a city name
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport, LookupError> {
        self.lookup_with_progress(city, |_| {}).await
    }

    /// Look up the current weather, reporting every state transition
    #[instrument(skip(self, observer))]
    pub async fn lookup_with_progress<F>(
        &self,
        city: &str,
        mut observer: F,
    ) -> Result<WeatherReport, LookupError>
    where
        F: FnMut(&LookupState),
    {
        observer(&LookupState::Idle);

        let result = self.run(city, &mut observer).await;

        match &result {
            Ok(report) => {
                info!(
                    "Lookup for '{}' finished: {} {}",
                    city.trim(),
                    report.display_name(),
                    report.format_condition()
                );
                observer(&LookupState::Done(Ok(())));
            }
            Err(err) => {
                if let LookupError::UnexpectedFailure { detail } = err {
                    error!("Lookup for '{}' failed unexpectedly: {}", city.trim(), detail);
                } else {
                    debug!("Lookup for '{}' failed: {:?}", city.trim(), err);
                }
                observer(&LookupState::Done(Err(err.user_message())));
            }
        }

        result
    }

    async fn run<F>(&self, city: &str, observer: &mut F) -> Result<WeatherReport, LookupError>
    where
        F: FnMut(&LookupState),
    {
        observer(&LookupState::Validating);
        let city = city.trim();
        if city.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        observer(&LookupState::GeocodingInFlight);
        let location = self.client.geocode(city).await?;

        observer(&LookupState::WeatherInFlight);
        let weather = self.client.current_weather(&location).await?;

        Ok(WeatherReport::new(location, weather))
    }
}
