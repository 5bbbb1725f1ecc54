pub mod scored_trade;
pub mod trade_record;
