//! gRPC currency service

use super::{assert_close, Stand};
use niffler_e2e::models::Currency;

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_all_currencies_and_rates() {
    let stand = Stand::start().await;

    let currencies = stand.ctx.currency.get_all_currencies().await.unwrap();
    assert_eq!(currencies.len(), 4);

    let rate = |currency: Currency| {
        currencies
            .iter()
            .find(|c| c.currency == currency)
            .map(|c| c.rate)
            .unwrap()
    };
    for (currency, expected) in [
        (Currency::Eur, 1.08),
        (Currency::Rub, 0.015),
        (Currency::Usd, 1.0),
        (Currency::Kzt, 0.0021),
    ] {
        assert!(
            (rate(currency) - expected).abs() < 1e-9,
            "{} rate is {}",
            currency,
            rate(currency)
        );
    }
    stand.finish().await;
}

#[tokio::test]
#[ignore = "requires a running Niffler stand"]
async fn test_conversions() {
    let stand = Stand::start().await;
    let currency = &stand.ctx.currency;

    let cases = [
        (Currency::Eur, Currency::Rub, 100.0, 7200.0),
        (Currency::Usd, Currency::Rub, 100.0, 6666.67),
        (Currency::Rub, Currency::Usd, 100.0, 1.5),
        (Currency::Kzt, Currency::Kzt, 100.0, 100.0),
        (Currency::Eur, Currency::Usd, 0.0, 0.0),
    ];
    for (spend, desired, amount, expected) in cases {
        let converted = currency.convert(spend, desired, amount).await.unwrap();
        assert_close(converted, expected);
    }
    stand.finish().await;
}
