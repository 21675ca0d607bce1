//! Exercises the `testkit` feature's scripted venue adapter end to end
//! through the same `VenueAdapter` trait a real venue implements.

#![cfg(feature = "testkit")]

use boxspread_scanner::core::domain::{OptionType, Order, VenueId};
use boxspread_scanner::core::exchange::{DiscoveredInstrument, VenueAdapter};
use boxspread_scanner::core::store::OrderbookStore;
use boxspread_scanner::testkit::{ScriptedUpdate, ScriptedVenue};

fn order(price: f64, strike: f64, ot: OptionType) -> Order {
    Order::new(price, 1.0, 0.5, strike, ot, VenueId::from("scripted"))
}

#[tokio::test]
async fn scripted_venue_discovers_and_streams_into_the_store() {
    let expiry = 1_700_000_000 + 7 * 86_400;
    let discovered = vec![DiscoveredInstrument {
        name: "ETH-TEST-3000-C".to_string(),
        expiry,
        strike: 3000.0,
        option_type: OptionType::Call,
    }];

    let venue = ScriptedVenue::new(
        "scripted",
        discovered.clone(),
        vec![ScriptedUpdate {
            expiry,
            bids: vec![order(50.0, 3000.0, OptionType::Call)],
            asks: vec![order(60.0, 3000.0, OptionType::Call)],
        }],
    );

    let instruments = venue.discover("ETH").await.unwrap();
    assert_eq!(instruments, discovered);

    let store = OrderbookStore::new();
    venue.stream("ETH", &instruments, &store).await.unwrap();

    store.with_read(|books| {
        let book = books[&expiry].iter().find(|b| b.strike() == 3000.0).unwrap();
        assert_eq!(book.call_bids()[&VenueId::from("scripted")][0].price(), 50.0);
    });
}
