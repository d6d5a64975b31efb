//! gRPC client for the currency service

use crate::error::{HarnessError, Result};
use crate::models::Currency;
use crate::proto::niffler_currency_service_client::NifflerCurrencyServiceClient;
use crate::proto::{CalculateRequest, CurrencyValues};
use tonic::transport::Channel;
use tracing::{debug, instrument};

impl From<Currency> for CurrencyValues {
    fn from(currency: Currency) -> Self {
        match currency {
            Currency::Rub => CurrencyValues::Rub,
            Currency::Usd => CurrencyValues::Usd,
            Currency::Eur => CurrencyValues::Eur,
            Currency::Kzt => CurrencyValues::Kzt,
        }
    }
}

impl TryFrom<CurrencyValues> for Currency {
    type Error = HarnessError;

    fn try_from(value: CurrencyValues) -> Result<Self> {
        match value {
            CurrencyValues::Rub => Ok(Currency::Rub),
            CurrencyValues::Usd => Ok(Currency::Usd),
            CurrencyValues::Eur => Ok(Currency::Eur),
            CurrencyValues::Kzt => Ok(Currency::Kzt),
            CurrencyValues::Unspecified => Err(HarnessError::NotFound(
                "Currency value is UNSPECIFIED".to_string(),
            )),
        }
    }
}

/// One entry of the currency list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyRate {
    pub currency: Currency,
    pub rate: f64,
}

impl CalculateRequest {
    pub fn between(spend: Currency, desired: Currency, amount: f64) -> Self {
        Self {
            spend_currency: CurrencyValues::from(spend) as i32,
            desired_currency: CurrencyValues::from(desired) as i32,
            amount,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurrencyClient {
    inner: NifflerCurrencyServiceClient<Channel>,
}

impl CurrencyClient {
    pub async fn connect(url: &str) -> Result<Self> {
        let inner = NifflerCurrencyServiceClient::connect(url.to_string()).await?;
        debug!("Connected to currency service at {}", url);
        Ok(Self { inner })
    }

    #[instrument(name = "grpc get all currencies", skip(self))]
    pub async fn get_all_currencies(&self) -> Result<Vec<CurrencyRate>> {
        debug!(method = "GetAllCurrencies", "gRPC request");
        let response = self.inner.clone().get_all_currencies(()).await?.into_inner();
        debug!(method = "GetAllCurrencies", response = ?response, "gRPC response");

        response
            .all_currencies
            .into_iter()
            .map(|entry| {
                let value = CurrencyValues::try_from(entry.currency).map_err(|_| {
                    HarnessError::NotFound(format!("Unknown currency value {}", entry.currency))
                })?;
                Ok(CurrencyRate {
                    currency: Currency::try_from(value)?,
                    rate: entry.currency_rate,
                })
            })
            .collect()
    }

    #[instrument(name = "grpc calculate rate", skip(self))]
    pub async fn calculate_rate(&self, request: CalculateRequest) -> Result<f64> {
        debug!(method = "CalculateRate", request = ?request, "gRPC request");
        let response = self.inner.clone().calculate_rate(request).await?.into_inner();
        debug!(method = "CalculateRate", response = ?response, "gRPC response");

        Ok(response.calculated_amount)
    }

    pub async fn convert(&self, spend: Currency, desired: Currency, amount: f64) -> Result<f64> {
        self.calculate_rate(CalculateRequest::between(spend, desired, amount))
            .await
    }
}
