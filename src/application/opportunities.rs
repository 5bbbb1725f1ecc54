//! Top actionable opportunities, one per ticker.

use crate::domain::entities::scored_trade::BacktestedTrade;

/// STRONG BUY and BUY trades ranked by politician skill, keeping the first
/// (best) trade per ticker, at most `limit` of them.
pub fn top_opportunities(trades: &[BacktestedTrade], limit: usize) -> Vec<BacktestedTrade> {
    let mut actionable: Vec<&BacktestedTrade> = trades
        .iter()
        .filter(|t| t.final_signal.is_actionable())
        .collect();
    actionable.sort_by(|a, b| b.skill_score.total_cmp(&a.skill_score));

    let mut seen: Vec<&str> = Vec::new();
    let mut picked = Vec::new();
    for trade in actionable {
        if picked.len() >= limit {
            break;
        }
        if seen.contains(&trade.trade.ticker.as_str()) {
            continue;
        }
        seen.push(trade.trade.ticker.as_str());
        picked.push(trade.clone());
    }
    picked
}
