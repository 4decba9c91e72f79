use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Completed,
    /// Stato non previsto dal client
    #[default]
    #[serde(other)]
    Unknown,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(format!(
                "stato ordine non valido: {} (ammessi: pending, confirmed, completed)",
                other
            )),
        }
    }
}

/// Fornitura collegata a un ordine (storico kitchen)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSupply {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub supply_name: Option<String>,
    #[serde(default)]
    pub qty_ordered: Option<f64>,
    #[serde(default)]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplies: Option<OrderSupply>,
}

impl Order {
    /// `created_at` interpretato come RFC 3339 o come ISO senza fuso (UTC)
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn item_name(&self) -> &str {
        self.supply_name
            .as_deref()
            .or_else(|| self.supplies.as_ref().and_then(|s| s.item_name.as_deref()))
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateOrderRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_tolerated() {
        let order: Order =
            serde_json::from_value(json!({"id": 1, "status": "shipped"})).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);

        let order: Order = serde_json::from_value(json!({"id": 2})).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Confirmed".parse::<OrderStatus>().unwrap(), OrderStatus::Confirmed);
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_created_at_formats() {
        let mut order: Order = serde_json::from_value(json!({"id": 1})).unwrap();
        assert!(order.created_at_utc().is_none());

        order.created_at = Some("2025-01-10T08:30:00+07:00".to_string());
        assert_eq!(
            order.created_at_utc().unwrap().to_rfc3339(),
            "2025-01-10T01:30:00+00:00"
        );

        order.created_at = Some("2025-01-10T08:30:00.123456".to_string());
        assert!(order.created_at_utc().is_some());

        order.created_at = Some("kemarin".to_string());
        assert!(order.created_at_utc().is_none());
    }

    #[test]
    fn test_item_name_fallback() {
        let order: Order = serde_json::from_value(json!({
            "id": 9,
            "supplies": {"item_name": "Tahu", "unit": "kg", "price_per_unit": 12000}
        }))
        .unwrap();
        assert_eq!(order.item_name(), "Tahu");
    }
}
