use serde::{Deserialize, Serialize};

/// Punto di un grafico (torta o barre)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
}

impl ChartPoint {
    fn colored(name: &str, fill: &str) -> Self {
        Self {
            name: name.to_string(),
            value: 0.0,
            fill: Some(fill.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryHealth {
    #[serde(default)]
    pub fresh: f64,
    #[serde(default)]
    pub warning: f64,
    #[serde(default)]
    pub expired: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VendorAnalytics {
    #[serde(default)]
    pub inventory_health: Option<InventoryHealth>,
    #[serde(default)]
    pub expiry_risk: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub top_sales: Vec<ChartPoint>,
}

impl VendorAnalytics {
    pub fn health(&self) -> InventoryHealth {
        self.inventory_health.unwrap_or_default()
    }

    /// Rischio scadenza; tre fasce a zero se il backend non lo fornisce
    pub fn expiry_risk(&self) -> Vec<ChartPoint> {
        match &self.expiry_risk {
            Some(points) => points.clone(),
            None => vec![
                ChartPoint::colored("Aman", "#10B981"),
                ChartPoint::colored("Peringatan", "#F59E0B"),
                ChartPoint::colored("Kadaluwarsa", "#EF4444"),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KitchenMetrics {
    #[serde(default)]
    pub total_items: f64,
    #[serde(default)]
    pub total_qty: f64,
    #[serde(default)]
    pub warning_count: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitchenAnalytics {
    #[serde(default)]
    pub composition: Vec<ChartPoint>,
    #[serde(default)]
    pub quality: Vec<ChartPoint>,
    #[serde(default)]
    pub metrics: KitchenMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_vendor_analytics_defaults() {
        let analytics: VendorAnalytics = serde_json::from_value(json!({})).unwrap();
        assert_eq!(analytics.health(), InventoryHealth::default());

        let risk = analytics.expiry_risk();
        assert_eq!(risk.len(), 3);
        assert_eq!(risk[2].name, "Kadaluwarsa");
        assert!(risk.iter().all(|p| p.value == 0.0));
    }

    #[test]
    fn test_kitchen_analytics_partial_payload() {
        let analytics: KitchenAnalytics = serde_json::from_value(json!({
            "composition": [{"name": "Sayur", "value": 12}],
            "metrics": {"total_items": 4}
        }))
        .unwrap();
        assert_eq!(analytics.composition[0].value, 12.0);
        assert!(analytics.quality.is_empty());
        assert_eq!(analytics.metrics.total_items, 4.0);
        assert_eq!(analytics.metrics.warning_count, 0.0);
    }
}
