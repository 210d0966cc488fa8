//! User-editable filter criteria shared by every listing tab.

use serde::{Deserialize, Serialize};

/// Sparse set of filters coming from the dashboard filter panel.
///
/// Every field is optional. Empty strings, whitespace-only strings and empty
/// lists are treated exactly like absent fields: they never constrain a query.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Free-text search across the fields a human would expect.
    pub global: Option<String>,
    pub statuses: Vec<String>,
    pub service_providers: Vec<String>,
    pub account_types: Vec<String>,
    pub source: Vec<String>,
    pub resident: Option<String>,
    pub address: Option<String>,
    pub account_name: Option<String>,
    pub quote_number: Option<String>,
    pub invoice_number: Option<String>,
    pub recommendation: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Inclusive lower date bound, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Inclusive upper date bound, `YYYY-MM-DD`.
    pub date_to: Option<String>,
}

/// Returns the trimmed text when it carries any content.
pub fn text_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Returns the trimmed, non-empty entries or `None` when nothing remains.
pub fn list_values(values: &[String]) -> Option<Vec<String>> {
    let cleaned: Vec<String> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

/// Returns the bound when it is a usable number.
pub fn number_value(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn global(mut self, term: impl Into<String>) -> Self {
        self.global = Some(term.into());
        self
    }

    pub fn statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn resident(mut self, resident: impl Into<String>) -> Self {
        self.resident = Some(resident.into());
        self
    }

    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn date_range(mut self, from: Option<&str>, to: Option<&str>) -> Self {
        self.date_from = from.map(str::to_string);
        self.date_to = to.map(str::to_string);
        self
    }

    /// True when no field would contribute a predicate.
    pub fn is_empty(&self) -> bool {
        [
            &self.global,
            &self.resident,
            &self.address,
            &self.account_name,
            &self.quote_number,
            &self.invoice_number,
            &self.recommendation,
            &self.date_from,
            &self.date_to,
        ]
        .into_iter()
        .all(|v| text_value(v).is_none())
            && [
                &self.statuses,
                &self.service_providers,
                &self.account_types,
                &self.source,
            ]
            .into_iter()
            .all(|v| list_values(v).is_none())
            && number_value(self.price_min).is_none()
            && number_value(self.price_max).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_absent() {
        let filters = FilterCriteria {
            global: Some("   ".into()),
            statuses: vec!["".into(), " ".into()],
            price_min: Some(f64::NAN),
            ..FilterCriteria::default()
        };
        assert!(filters.is_empty());
        assert_eq!(text_value(&filters.global), None);
        assert_eq!(list_values(&filters.statuses), None);
    }

    #[test]
    fn deserializes_camel_case_payload() {
        let filters: FilterCriteria = serde_json::from_str(
            r#"{"serviceProviders": ["12"], "priceMin": 100, "dateTo": "2024-03-01"}"#,
        )
        .unwrap();
        assert_eq!(filters.service_providers, vec!["12".to_string()]);
        assert_eq!(filters.price_min, Some(100.0));
        assert_eq!(filters.date_to.as_deref(), Some("2024-03-01"));
        assert!(!filters.is_empty());
    }

    #[test]
    fn list_values_trims_entries() {
        let values = vec![" New ".to_string(), String::new(), "Won".to_string()];
        assert_eq!(
            list_values(&values),
            Some(vec!["New".to_string(), "Won".to_string()])
        );
    }
}
