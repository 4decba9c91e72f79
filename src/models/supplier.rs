use serde::{Deserialize, Serialize};

/// Fornitore restituito dalla ricerca
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Cucina SPPG vicina
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SppgLocation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub long: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl SppgLocation {
    /// Link di navigazione Google Maps
    pub fn directions_url(&self) -> Option<String> {
        match (self.lat, self.long) {
            (Some(lat), Some(long)) => Some(format!(
                "https://www.google.com/maps/dir/?api=1&destination={},{}",
                lat, long
            )),
            _ => None,
        }
    }
}
