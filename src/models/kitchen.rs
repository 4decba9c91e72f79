use serde::{Deserialize, Serialize};

pub const CHAT_FALLBACK_REPLY: &str = "Spiacente, l'assistente non è disponibile al momento.";

#[derive(Debug, Clone, Serialize)]
pub struct CookRequest {
    pub menu_name: String,
    pub qty_produced: u32,
    pub ingredients_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuRequest {
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub reply: Option<String>,
}

impl ChatReply {
    pub fn text(&self) -> &str {
        self.reply
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(CHAT_FALLBACK_REPLY)
    }
}

/// Lettura dei sensori di conservazione
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IotLog {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}
