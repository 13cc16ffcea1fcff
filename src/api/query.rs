use anyhow::{Context, Result};
use reqwest::Url;

use crate::catalog::types::fmt_num;
use crate::filters::{normalize_brand, Mode};

pub const RECOMMENDATIONS_PATH: &str = "api/recommendations/";

/// Parameters of one recommendation request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    pub mode: Mode,
    pub brand: Option<String>,
    pub min_ram: Option<f64>,
    pub max_price: Option<u32>,
}

impl RecommendationQuery {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Query pairs in wire order. `mode` is always sent; the rest only
    /// when set ("Any" brand counts as unset).
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("mode", self.mode.as_str().to_string())];
        if let Some(brand) = self.brand.as_deref().and_then(normalize_brand) {
            params.push(("brand", brand));
        }
        if let Some(min_ram) = self.min_ram.filter(|r| r.is_finite() && *r > 0.0) {
            params.push(("min_ram", fmt_num(min_ram)));
        }
        if let Some(max_price) = self.max_price {
            params.push(("max_price", max_price.to_string()));
        }
        params
    }

    /// Full request URL against the service base URL
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)
            .and_then(|b| b.join(RECOMMENDATIONS_PATH))
            .with_context(|| format!("Invalid API URL: {}", base_url))?;
        Url::parse_with_params(endpoint.as_str(), self.params())
            .with_context(|| format!("Invalid API URL: {}", base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_only() {
        let q = RecommendationQuery::new(Mode::Budget);
        let url = q.url("http://localhost:8000").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/recommendations/?mode=budget"
        );
    }

    #[test]
    fn test_all_params() {
        let q = RecommendationQuery {
            mode: Mode::Flagship,
            brand: Some("Samsung".to_string()),
            min_ram: Some(8.0),
            max_price: Some(1500),
        };
        let url = q.url("http://localhost:8000/").unwrap();
        assert_eq!(url.path(), "/api/recommendations/");
        assert_eq!(
            url.query(),
            Some("mode=flagship&brand=Samsung&min_ram=8&max_price=1500")
        );
    }

    #[test]
    fn test_any_brand_omitted() {
        let q = RecommendationQuery {
            brand: Some("Any".to_string()),
            ..RecommendationQuery::new(Mode::Midrange)
        };
        assert_eq!(q.params(), vec![("mode", "midrange".to_string())]);
    }

    #[test]
    fn test_base_path_kept() {
        let q = RecommendationQuery::new(Mode::Budget);
        let url = q.url("https://example.com/smartbuy").unwrap();
        assert_eq!(url.path(), "/smartbuy/api/recommendations/");
    }

    #[test]
    fn test_brand_encoded() {
        let q = RecommendationQuery {
            brand: Some("One Plus".to_string()),
            ..RecommendationQuery::new(Mode::Budget)
        };
        let url = q.url("http://localhost:8000").unwrap();
        assert_eq!(url.query(), Some("mode=budget&brand=One+Plus"));
    }

    #[test]
    fn test_invalid_base_url() {
        let q = RecommendationQuery::new(Mode::Budget);
        assert!(q.url("not a url").is_err());
    }
}
