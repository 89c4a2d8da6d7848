//! Exchange rate lookup
//!
//! Converts ledger amounts into the foreign display currency. Rates come from
//! a [`RateSource`] and are cached on disk; a failed fetch falls back to the
//! last cached rate however old it is. Nothing here ever fails loudly: no
//! rate simply means no foreign figure is shown.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::Money;
use crate::storage::file_io::{read_json, write_json_atomic};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can quote a conversion rate
pub trait RateSource {
    /// Units of `target` per one unit of `base`
    fn fetch_rate(&self, base: &str, target: &str) -> LedgerResult<f64>;
}

/// Rate source backed by an open.er-api.com style endpoint
///
/// Requests `{base_url}/{BASE}` and reads `rates[TARGET]` from the response.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    result: String,
    #[serde(default)]
    base_code: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl HttpRateSource {
    pub fn new(base_url: impl Into<String>) -> LedgerResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pocketbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LedgerError::ExchangeRate(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl RateSource for HttpRateSource {
    fn fetch_rate(&self, base: &str, target: &str) -> LedgerResult<f64> {
        let url = format!("{}/{}", self.base_url, base.to_uppercase());
        tracing::debug!("Fetching exchange rate from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LedgerError::ExchangeRate(format!("API error: {}", e)))?;

        let body: LatestRatesResponse = response
            .json()
            .map_err(|e| LedgerError::ExchangeRate(format!("Invalid API response: {}", e)))?;

        if body.result != "success" {
            return Err(LedgerError::ExchangeRate(format!(
                "API returned '{}' for {}",
                body.result, body.base_code
            )));
        }

        body.rates
            .get(&target.to_uppercase())
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| LedgerError::ExchangeRate(format!("No rate for {}", target)))
    }
}

/// A rate as stored in `rate_cache.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCache {
    pub base: String,
    pub target: String,
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
}

impl RateCache {
    fn is_for(&self, base: &str, target: &str) -> bool {
        self.base.eq_ignore_ascii_case(base) && self.target.eq_ignore_ascii_case(target)
    }

    fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        now - self.fetched_at < ttl
    }
}

/// A usable rate and where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    pub rate: f64,
    pub fetched_at: DateTime<Utc>,
    /// Served from an expired cache entry after a failed fetch
    pub stale: bool,
}

impl RateQuote {
    /// Convert a ledger amount into the foreign currency
    pub fn convert(&self, amount: Money) -> f64 {
        amount.to_f64() * self.rate
    }
}

/// Cached conversion from the ledger currency to the display currency
pub struct ExchangeRateService<S: RateSource> {
    source: S,
    cache_path: PathBuf,
    ttl: chrono::Duration,
    base: String,
    target: String,
}

impl ExchangeRateService<HttpRateSource> {
    /// Service configured from user settings
    pub fn from_settings(settings: &Settings, cache_path: PathBuf) -> LedgerResult<Self> {
        let source = HttpRateSource::new(&settings.exchange_rate_url)?;
        Ok(Self::new(
            source,
            cache_path,
            &settings.locale_config().currency,
            &settings.display_currency,
        )
        .with_ttl_secs(settings.cache_ttl_secs))
    }
}

impl<S: RateSource> ExchangeRateService<S> {
    pub fn new(source: S, cache_path: PathBuf, base: &str, target: &str) -> Self {
        Self {
            source,
            cache_path,
            ttl: chrono::Duration::minutes(5),
            base: base.to_uppercase(),
            target: target.to_uppercase(),
        }
    }

    pub fn with_ttl_secs(mut self, secs: u64) -> Self {
        self.ttl = chrono::Duration::seconds(i64::from(u32::try_from(secs).unwrap_or(u32::MAX)));
        self
    }

    /// Currency the quoted rate converts into
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Last cached rate for this currency pair, however old
    pub fn cached(&self) -> Option<RateCache> {
        match read_json::<RateCache, _>(&self.cache_path) {
            Ok(Some(cache)) if cache.is_for(&self.base, &self.target) => Some(cache),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("Ignoring unreadable rate cache: {}", e);
                None
            }
        }
    }

    /// Cached rate only, never touching the network
    pub fn lookup_cached(&self) -> Option<RateQuote> {
        let now = Utc::now();
        self.cached().map(|cache| RateQuote {
            rate: cache.rate,
            fetched_at: cache.fetched_at,
            stale: !cache.is_fresh(now, self.ttl),
        })
    }

    /// Current rate: fresh cache, else live fetch, else stale cache
    pub fn lookup(&self) -> Option<RateQuote> {
        self.lookup_at(Utc::now())
    }

    fn lookup_at(&self, now: DateTime<Utc>) -> Option<RateQuote> {
        let cached = self.cached();

        if let Some(cache) = cached.as_ref().filter(|c| c.is_fresh(now, self.ttl)) {
            return Some(RateQuote {
                rate: cache.rate,
                fetched_at: cache.fetched_at,
                stale: false,
            });
        }

        match self.source.fetch_rate(&self.base, &self.target) {
            Ok(rate) => {
                let entry = RateCache {
                    base: self.base.clone(),
                    target: self.target.clone(),
                    rate,
                    fetched_at: now,
                };
                if let Err(e) = write_json_atomic(&self.cache_path, &entry) {
                    tracing::warn!("Failed to cache exchange rate: {}", e);
                }
                Some(RateQuote {
                    rate,
                    fetched_at: now,
                    stale: false,
                })
            }
            Err(e) => {
                tracing::warn!("Exchange rate unavailable: {}", e);
                cached.map(|cache| RateQuote {
                    rate: cache.rate,
                    fetched_at: cache.fetched_at,
                    stale: true,
                })
            }
        }
    }

    /// Convert an amount, or `None` when no rate is available
    pub fn convert(&self, amount: Money) -> Option<f64> {
        self.lookup().map(|quote| quote.convert(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    struct FixedSource {
        rate: Option<f64>,
        calls: Cell<usize>,
    }

    impl FixedSource {
        fn ok(rate: f64) -> Self {
            Self {
                rate: Some(rate),
                calls: Cell::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                rate: None,
                calls: Cell::new(0),
            }
        }
    }

    impl RateSource for FixedSource {
        fn fetch_rate(&self, _base: &str, _target: &str) -> LedgerResult<f64> {
            self.calls.set(self.calls.get() + 1);
            self.rate
                .ok_or_else(|| LedgerError::ExchangeRate("offline".into()))
        }
    }

    fn service(dir: &TempDir, source: FixedSource) -> ExchangeRateService<FixedSource> {
        ExchangeRateService::new(source, dir.path().join("rate_cache.json"), "eur", "kes")
    }

    #[test]
    fn test_fetch_then_cache() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir, FixedSource::ok(151.25));

        let quote = svc.lookup().unwrap();
        assert_eq!(quote.rate, 151.25);
        assert!(!quote.stale);
        assert_eq!(svc.source.calls.get(), 1);

        // second lookup is served from the fresh cache
        svc.lookup().unwrap();
        assert_eq!(svc.source.calls.get(), 1);

        let cached = svc.cached().unwrap();
        assert_eq!(cached.base, "EUR");
        assert_eq!(cached.target, "KES");
    }

    #[test]
    fn test_expired_cache_refetches() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir, FixedSource::ok(150.0));
        svc.lookup().unwrap();

        let later = Utc::now() + chrono::Duration::minutes(6);
        let quote = svc.lookup_at(later).unwrap();
        assert!(!quote.stale);
        assert_eq!(svc.source.calls.get(), 2);
    }

    #[test]
    fn test_stale_fallback_when_offline() {
        let dir = TempDir::new().unwrap();
        let old = RateCache {
            base: "EUR".into(),
            target: "KES".into(),
            rate: 140.0,
            fetched_at: Utc::now() - chrono::Duration::days(2),
        };
        write_json_atomic(dir.path().join("rate_cache.json"), &old).unwrap();

        let svc = service(&dir, FixedSource::failing());
        let quote = svc.lookup().unwrap();
        assert!(quote.stale);
        assert_eq!(quote.rate, 140.0);

        assert_eq!(svc.lookup_cached(), Some(quote));
        assert_eq!(svc.source.calls.get(), 1);
    }

    #[test]
    fn test_nothing_available() {
        let dir = TempDir::new().unwrap();
        let svc = service(&dir, FixedSource::failing());

        assert!(svc.lookup().is_none());
        assert!(svc.convert(Money::from_cents(100)).is_none());
    }

    #[test]
    fn test_cache_for_other_pair_is_ignored() {
        let dir = TempDir::new().unwrap();
        let other = RateCache {
            base: "USD".into(),
            target: "KES".into(),
            rate: 129.0,
            fetched_at: Utc::now(),
        };
        write_json_atomic(dir.path().join("rate_cache.json"), &other).unwrap();

        let svc = service(&dir, FixedSource::ok(151.0));
        assert_eq!(svc.lookup().unwrap().rate, 151.0);
    }

    #[test]
    fn test_convert() {
        let quote = RateQuote {
            rate: 150.0,
            fetched_at: Utc::now(),
            stale: false,
        };
        assert_eq!(quote.convert(Money::from_cents(1_050)), 1_575.0);
    }
}
