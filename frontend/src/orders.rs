use serde::{Deserialize, Deserializer, Serialize};

use crate::analytics::bucket::parse_timestamp;
use crate::backend::{null_as_default, BackendClient, BackendError, Query};
use crate::money::Money;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Shipped,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "pending" => OrderStatus::Pending,
            "completed" => OrderStatus::Completed,
            "shipped" => OrderStatus::Shipped,
            "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Other(value) => value,
        }
    }

    /// CSS modifier for the status badge.
    pub fn tone(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "success",
            OrderStatus::Shipped => "info",
            OrderStatus::Pending => "warning",
            OrderStatus::Cancelled => "danger",
            OrderStatus::Other(_) => "muted",
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| OrderStatus::parse(&s)).unwrap_or_default())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub unit_price: Option<Money>,
}

impl OrderItem {
    pub fn name(&self) -> &str {
        self.product_name.as_deref().unwrap_or("Product")
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price.unwrap_or(Money::ZERO)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "items_or_empty")]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// First eight characters of the id, as shown in tables.
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect()
    }

    pub fn placed_on(&self) -> String {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|at| at.format("%d/%m/%Y %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn customer(&self) -> &str {
        self.user_name
            .as_deref()
            .or(self.user_email.as_deref())
            .unwrap_or("Unknown customer")
    }
}

/// `items` is a JSON array when present; anything else reads as no items.
fn items_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<OrderItem>, D::Error> {
    let raw = serde_json::Value::deserialize(deserializer)?;
    match raw {
        serde_json::Value::Array(values) => Ok(values
            .into_iter()
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Every order with customer details, for the admin dashboard.
pub async fn list_all(client: &BackendClient) -> Result<Vec<Order>, BackendError> {
    let orders: Option<Vec<Order>> = client
        .rpc("get_all_orders", &serde_json::json!({}))
        .await?;
    Ok(orders.unwrap_or_default())
}

pub async fn list_for_user(client: &BackendClient, user_id: &str) -> Result<Vec<Order>, BackendError> {
    client
        .select(
            "orders",
            &Query::new()
                .select("*,items:order_items(product_name,quantity,unit_price)")
                .eq("user_id", user_id)
                .order("created_at", false),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_admin_order_rows() {
        let raw = r#"[
            {"id":"0f3a9c2e-1111","user_id":"u1","total":"150.00","status":"shipped",
             "created_at":"2024-02-03T14:05:00Z","user_name":"Ana","user_email":"ana@x.com",
             "items":[{"product_name":"Cable","quantity":2,"unit_price":"25.00"},{"product_name":null}]},
            {"id":"77","total":null,"status":"refunded","items":"not-a-list"},
            {"id":"78","total":10,"status":null}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(raw).unwrap();

        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert_eq!(orders[0].short_id(), "0f3a9c2e");
        assert_eq!(orders[0].placed_on(), "03/02/2024 14:05");
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[1].name(), "Product");
        assert_eq!(orders[0].items[1].quantity(), 1);
        assert_eq!(orders[0].items[1].unit_price(), Money::ZERO);

        assert_eq!(orders[1].total, Money::ZERO);
        assert_eq!(orders[1].status.label(), "refunded");
        assert!(orders[1].items.is_empty());
        assert_eq!(orders[1].placed_on(), "-");
        assert_eq!(orders[1].customer(), "Unknown customer");

        assert_eq!(orders[2].status, OrderStatus::Pending);
    }

    #[test]
    fn status_labels() {
        for (raw, label) in [
            ("pending", "Pending"),
            ("completed", "Completed"),
            ("shipped", "Shipped"),
            ("cancelled", "Cancelled"),
        ] {
            let status = OrderStatus::parse(raw);
            assert_eq!(status.label(), label);
            assert_eq!(status.as_str(), raw);
        }
    }
}
