//! Single-shot position requests against a device location provider.

use crate::error::{provider_codes, GeolocationError};
use campus_nav_geo::Coordinate;
use campus_nav_telemetry::{metrics, names, Timer};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Options sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest cached fix the provider may return
    pub maximum_age: Duration,
}

impl PositionOptions {
    /// Fresh high-accuracy fix within ten seconds. Not user-adjustable.
    pub const FRESH_HIGH_ACCURACY: Self = Self {
        high_accuracy: true,
        timeout: Duration::from_secs(10),
        maximum_age: Duration::ZERO,
    };
}

/// Failure as reported by the provider, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub code: u16,
    pub message: String,
}

impl ProviderError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A device location capability.
///
/// The provider enforces the timeout itself; the bridge never cancels a
/// request.
pub trait LocationProvider {
    /// False when the host has no location capability at all.
    fn is_supported(&self) -> bool {
        true
    }

    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Coordinate, ProviderError>> + Send;
}

/// A provider with a canned answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimulatedProvider {
    Fix(Coordinate),
    /// Fails with this provider status code
    Error(u16),
    Unsupported,
}

impl LocationProvider for SimulatedProvider {
    fn is_supported(&self) -> bool {
        !matches!(self, SimulatedProvider::Unsupported)
    }

    async fn current_position(&self, _options: &PositionOptions) -> Result<Coordinate, ProviderError> {
        match *self {
            SimulatedProvider::Fix(coord) => Ok(coord),
            SimulatedProvider::Error(code) => Err(ProviderError::new(code, "simulated failure")),
            SimulatedProvider::Unsupported => Err(ProviderError::new(
                provider_codes::POSITION_UNAVAILABLE,
                "no location capability",
            )),
        }
    }
}

/// Wraps a [`LocationProvider`] with the fixed request options and error
/// classification.
///
/// The bridge does not touch selection state and never retries; each call
/// to [`request_position`](Self::request_position) makes exactly one
/// provider request.
#[derive(Debug)]
pub struct GeolocationBridge<P> {
    provider: P,
    in_flight: AtomicUsize,
}

impl<P: LocationProvider> GeolocationBridge<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// True while a request is outstanding. Callers use this to block re-entry.
    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire) > 0
    }

    pub async fn request_position(&self) -> Result<Coordinate, GeolocationError> {
        metrics().increment(names::GEOLOCATION_REQUESTS);

        if !self.provider.is_supported() {
            return Err(self.fail(GeolocationError::Unavailable, None));
        }

        let _pending = PendingGuard::enter(&self.in_flight);
        let timer = Timer::start(names::GEOLOCATION_LATENCY_MS);
        let result = self
            .provider
            .current_position(&PositionOptions::FRESH_HIGH_ACCURACY)
            .await;
        timer.stop();

        match result {
            Ok(coord) if coord.is_valid() => {
                tracing::debug!(position = %coord, "Position acquired");
                Ok(coord)
            }
            Ok(coord) => {
                tracing::debug!(position = %coord, "Provider returned an invalid fix");
                Err(self.fail(GeolocationError::PositionUnavailable, None))
            }
            Err(err) => Err(self.fail(GeolocationError::from_provider_code(err.code), Some(&err))),
        }
    }

    fn fail(&self, error: GeolocationError, cause: Option<&ProviderError>) -> GeolocationError {
        metrics().increment(names::GEOLOCATION_FAILURES);
        tracing::warn!(
            kind = ?error,
            provider_code = cause.map(|c| c.code),
            provider_message = cause.map(|c| c.message.as_str()),
            "Geolocation failed"
        );
        error
    }
}

struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
