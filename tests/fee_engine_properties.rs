use resale_pricing::domain::errors::PricingError;
use resale_pricing::domain::pricing::{
    FeeEngine, FeeRule, FeeSchedule, FeeScheduleOverrides, Platform,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Prices covering zero, sub-flat-fee amounts, both sides of the tier
/// threshold, half-cent rounding cases and large values.
fn sample_prices() -> Vec<Decimal> {
    let mut prices = vec![
        dec!(0),
        dec!(0.01),
        dec!(0.99),
        dec!(1.00),
        dec!(2.94),
        dec!(2.95),
        dec!(2.96),
        dec!(14.99),
        dec!(15.00),
        dec!(15.01),
        dec!(19.99),
        dec!(33.33),
        dec!(100.00),
        dec!(999.99),
        dec!(12345.67),
    ];
    // Every cent from 0 to 20
    prices.extend((0..=2000).map(|cents| Decimal::new(cents, 2)));
    prices
}

#[test]
fn test_fee_bounds_and_net_identity_hold_everywhere() {
    let engine = FeeEngine::default();

    for price in sample_prices() {
        for platform in Platform::ALL {
            let quote = engine.compute_quote(platform, price).unwrap();
            assert!(quote.fee >= Decimal::ZERO, "{platform} fee negative at {price}");
            assert!(quote.fee <= price, "{platform} fee above price at {price}");
            assert_eq!(quote.net_proceeds, price - quote.fee);
            assert!(quote.fee.scale() <= 2, "{platform} fee not in cents at {price}");
            assert!(!quote.below_floor);
        }
    }
}

#[test]
fn test_bounds_hold_for_payment_processing_schedule() {
    let mut overrides = FeeScheduleOverrides::default();
    overrides.platforms.insert(
        "depop".to_string(),
        FeeRule::percent(dec!(0.10)).with_payment_processing(dec!(0.029), dec!(0.30)),
    );
    let engine = FeeEngine::new(FeeSchedule::default().with_overrides(overrides).unwrap());

    for price in sample_prices() {
        let quote = engine.compute_quote(Platform::Depop, price).unwrap();
        assert!(quote.fee >= Decimal::ZERO && quote.fee <= price);
        assert_eq!(quote.net_proceeds, price - quote.fee);
    }
}

#[test]
fn test_tier_threshold_is_inclusive_to_percentage() {
    let engine = FeeEngine::default();
    assert_eq!(
        engine.compute_quote(Platform::Poshmark, dec!(15.00)).unwrap().fee,
        dec!(3.00)
    );
    assert_eq!(
        engine.compute_quote(Platform::Poshmark, dec!(14.99)).unwrap().fee,
        dec!(2.95)
    );
}

#[test]
fn test_negative_price_fails_for_every_platform() {
    let engine = FeeEngine::default();
    for platform in Platform::ALL {
        assert!(matches!(
            engine.compute_quote(platform, dec!(-1)),
            Err(PricingError::InvalidInput { .. })
        ));
    }
}

#[test]
fn test_all_quotes_are_repeatable() {
    let engine = FeeEngine::default();
    for price in sample_prices() {
        let first = engine.compute_all_quotes(price).unwrap();
        let second = engine.compute_all_quotes(price).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_recommendation_ordering_properties() {
    let engine = FeeEngine::default();
    let costs = [None, Some(dec!(0)), Some(dec!(5)), Some(dec!(12.50)), Some(dec!(90))];

    for price in sample_prices() {
        for cost in costs {
            let rec = engine.recommend_best(price, cost).unwrap();
            assert_eq!(rec.quotes.len(), Platform::ALL.len());

            // Clearing quotes always precede below-floor quotes
            let first_loss = rec
                .quotes
                .iter()
                .position(|q| q.below_floor)
                .unwrap_or(rec.quotes.len());
            assert!(rec.quotes[first_loss..].iter().all(|q| q.below_floor));

            // Within each group: net descending, ties in enumeration order
            for group in [&rec.quotes[..first_loss], &rec.quotes[first_loss..]] {
                for pair in group.windows(2) {
                    assert!(pair[0].net_proceeds >= pair[1].net_proceeds);
                    if pair[0].net_proceeds == pair[1].net_proceeds {
                        assert!(pair[0].platform < pair[1].platform);
                    }
                }
            }

            let expect_all_below = cost.is_some() && first_loss == 0;
            assert_eq!(rec.all_below_floor, expect_all_below);
        }
    }
}

#[test]
fn test_hundred_dollar_sale_with_ninety_cost() {
    let rec = FeeEngine::default()
        .recommend_best(dec!(100.00), Some(dec!(90.00)))
        .unwrap();

    let clearing: Vec<_> = rec.viable().map(|q| q.platform).collect();
    assert_eq!(
        clearing,
        vec![Platform::Xiaohongshu, Platform::Depop, Platform::Mercari]
    );

    let losing: Vec<_> = rec
        .quotes
        .iter()
        .filter(|q| q.below_floor)
        .map(|q| (q.platform, q.net_proceeds))
        .collect();
    assert_eq!(
        losing,
        vec![(Platform::Ebay, dec!(86.85)), (Platform::Poshmark, dec!(80.00))]
    );
}
