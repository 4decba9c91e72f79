use crate::client::{ApiClient, Envelope};
use crate::models::{KitchenAnalytics, VendorAnalytics};

pub async fn vendor_analytics(client: &ApiClient) -> Envelope<VendorAnalytics> {
    client.get("/analytics/vendor").await
}

pub async fn kitchen_analytics(client: &ApiClient) -> Envelope<KitchenAnalytics> {
    client.get("/analytics/kitchen").await
}
