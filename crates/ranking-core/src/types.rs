use serde::{Deserialize, Serialize};

/// Snapshot of one tradable instrument with derived risk/trend metrics.
///
/// The derived fields are computed once at construction and never change;
/// build instruments through [`Instrument::new`] so they stay consistent
/// with the price history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instrument {
    /// Exchange ticker, unique within a loaded set
    pub ticker: String,
    /// Company or product name
    pub brand_name: String,
    /// Free-text industry label from the upstream data source
    pub industry_tag: String,
    /// Latest price, positive
    pub current_price: f64,
    /// Chronological price history, oldest first, at least two points
    pub historical_data: Vec<f64>,
    /// Day-over-day move as a percentage of the previous close
    percent_change: f64,
    /// Absolute price change versus 365 trading days ago
    year_change: f64,
}

impl Instrument {
    pub fn new(
        ticker: impl Into<String>,
        brand_name: impl Into<String>,
        industry_tag: impl Into<String>,
        current_price: f64,
        historical_data: Vec<f64>,
    ) -> Self {
        let percent_change = calculate_percent_change(current_price, &historical_data);
        let year_change = calculate_year_change(current_price, &historical_data);

        Self {
            ticker: ticker.into(),
            brand_name: brand_name.into(),
            industry_tag: industry_tag.into(),
            current_price,
            historical_data,
            percent_change,
            year_change,
        }
    }

    /// Day-over-day percent change, used for risk scoring
    pub fn percent_change(&self) -> f64 {
        self.percent_change
    }

    /// Price difference versus one year ago, used for horizon scoring
    pub fn year_change(&self) -> f64 {
        self.year_change
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - ${:.2}",
            self.brand_name, self.ticker, self.current_price
        )
    }
}

fn calculate_percent_change(current_price: f64, historical_data: &[f64]) -> f64 {
    if historical_data.len() < 2 {
        return 0.0;
    }

    let previous_price = historical_data[historical_data.len() - 2];
    if previous_price == 0.0 {
        return 0.0;
    }

    ((current_price - previous_price) / previous_price) * 100.0
}

fn calculate_year_change(current_price: f64, historical_data: &[f64]) -> f64 {
    if historical_data.len() < 365 {
        return 0.0;
    }

    let price_1_year_ago = historical_data[historical_data.len() - 365];
    current_price - price_1_year_ago
}

/// An instrument paired with its preference score.
///
/// Ordering is by score only; ties keep whatever relative order the
/// surrounding collection gave them (stable sorts, strict heap
/// comparisons), never a secondary key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredInstrument {
    /// Preference score in [0, 100]
    pub score: f64,
    pub instrument: Instrument,
}

impl ScoredInstrument {
    pub fn new(score: f64, instrument: Instrument) -> Self {
        Self { score, instrument }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_change_two_points() {
        let inst = Instrument::new("TST", "Test Corp", "technology", 55.0, vec![50.0, 55.0]);

        assert!((inst.percent_change() - 10.0).abs() < 1e-9);
        assert_eq!(inst.year_change(), 0.0);
    }

    #[test]
    fn test_percent_change_guards() {
        let single = Instrument::new("ONE", "One Inc", "energy", 10.0, vec![10.0]);
        assert_eq!(single.percent_change(), 0.0);

        let zero_prev = Instrument::new("ZRO", "Zero Inc", "energy", 10.0, vec![0.0, 10.0]);
        assert_eq!(zero_prev.percent_change(), 0.0);
    }

    #[test]
    fn test_year_change_needs_full_year() {
        let mut history: Vec<f64> = (0..365).map(|i| 100.0 + i as f64 * 0.1).collect();
        let inst = Instrument::new("YRC", "Yearly Corp", "finance", 150.0, history.clone());

        // 365 points: index len-365 is the first element
        assert!((inst.year_change() - (150.0 - 100.0)).abs() < 1e-9);

        history.pop();
        let short = Instrument::new("YRC", "Yearly Corp", "finance", 150.0, history);
        assert_eq!(short.year_change(), 0.0);
    }

    #[test]
    fn test_display_format() {
        let inst = Instrument::new("AAPL", "Apple", "technology", 150.5, vec![148.0, 150.5]);
        assert_eq!(inst.to_string(), "Apple (AAPL) - $150.50");
    }

    #[test]
    fn test_serialize_round_trip() {
        let inst = Instrument::new("NKE", "Nike", "footwear", 90.0, vec![88.0, 90.0]);
        let json = serde_json::to_string(&inst).unwrap();
        let back: Instrument = serde_json::from_str(&json).unwrap();

        assert_eq!(back.ticker, "NKE");
        assert!((back.percent_change() - inst.percent_change()).abs() < 1e-9);
    }
}
