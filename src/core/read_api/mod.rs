//! The read API: a ranked, formatted snapshot of `Boxes`, served as HTML
//! fragment rows by `http::update_table`.

use chrono::{TimeZone, Utc};

use crate::core::domain::BoxSpread;
use crate::core::scanner::BoxStore;

/// One formatted row of the table. Three-decimal float formatting and
/// `02Jan06 15:04:05` UTC expiry formatting, as rendered by [`TableRow::to_html`].
#[derive(Debug, Clone)]
pub struct TableRow {
    pub expiry_formatted: String,
    pub k1: f64,
    pub k2: f64,
    pub short_call_venue: String,
    pub short_call_price: f64,
    pub long_call_venue: String,
    pub long_call_price: f64,
    pub short_put_venue: String,
    pub short_put_price: f64,
    pub long_put_venue: String,
    pub long_put_price: f64,
    pub cost: f64,
    pub payoff: f64,
    pub amount: f64,
    pub profit: f64,
    pub rel_profit_pct: f64,
    pub apy: f64,
}

impl TableRow {
    fn from_box(b: &BoxSpread) -> Self {
        let dt = Utc.timestamp_opt(b.key().expiry(), 0).single().unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
        Self {
            expiry_formatted: dt.format("%d%b%y %H:%M:%S").to_string(),
            k1: b.key().k1(),
            k2: b.key().k2(),
            short_call_venue: b.short_call_bid().venue().as_str().to_string(),
            short_call_price: b.short_call_bid().price(),
            long_call_venue: b.long_call_ask().venue().as_str().to_string(),
            long_call_price: b.long_call_ask().price(),
            short_put_venue: b.short_put_bid().venue().as_str().to_string(),
            short_put_price: b.short_put_bid().price(),
            long_put_venue: b.long_put_ask().venue().as_str().to_string(),
            long_put_price: b.long_put_ask().price(),
            cost: b.cost(),
            payoff: b.payoff(),
            amount: b.amount(),
            profit: b.profit(),
            rel_profit_pct: b.rel_profit() * 100.0,
            apy: b.apy(),
        }
    }

    /// Renders this row as a single `<tr>` fragment.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<tr><td>{}</td><td>{:.3}</td><td>{:.3}</td><td>{} {:.3}</td><td>{} {:.3}</td><td>{} {:.3}</td><td>{} {:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>",
            self.expiry_formatted,
            self.k1,
            self.k2,
            self.short_call_venue, self.short_call_price,
            self.long_call_venue, self.long_call_price,
            self.short_put_venue, self.short_put_price,
            self.long_put_venue, self.long_put_price,
            self.cost,
            self.payoff,
            self.amount,
            self.profit,
            self.rel_profit_pct,
            self.apy,
        )
    }
}

/// Snapshots `boxes` under its mutex and ranks the result by descending
/// APY. Stateless: no pagination, no filtering.
#[must_use]
pub fn snapshot(boxes: &BoxStore) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = boxes.snapshot().iter().map(TableRow::from_box).collect();
    rows.sort_by(|a, b| b.apy.partial_cmp(&a.apy).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Renders a full snapshot as the concatenated `<tr>` fragment served by
/// `GET /update-table`.
#[must_use]
pub fn render_fragment(boxes: &BoxStore) -> String {
    snapshot(boxes).iter().map(TableRow::to_html).collect()
}
