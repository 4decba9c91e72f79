use serde::{Deserialize, Serialize};

fn default_owner() -> String {
    "Pedagang Pasar".to_string()
}

fn default_location() -> String {
    "Pasar Tradisional".to_string()
}

/// Soglia sotto cui un articolo viene segnalato come in scadenza
pub const EXPIRY_WARNING_DAYS: i64 = 3;

/// Articolo di inventario (rilevato dall'AI o salvato)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub unit: String,
    /// Giudizio di freschezza dell'AI (es. "Sangat Segar")
    #[serde(default)]
    pub freshness: String,
    #[serde(default)]
    pub expiry_days: i64,
    /// Motivazione dell'AI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default = "default_owner")]
    pub owner_name: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl SupplyItem {
    /// Scade entro `days` giorni
    pub fn expires_within(&self, days: i64) -> bool {
        self.expiry_days <= days
    }
}

/// Risposta di `/upload`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub url: Option<String>,
}

/// Risposta di `/analyze`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub items: Vec<SupplyItem>,
}
