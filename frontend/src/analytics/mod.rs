pub mod bucket;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

use crate::auth::Role;
use crate::backend::{lenient_count, BackendClient, BackendError, Count, Query};
use crate::money::Money;
use crate::orders::Order;

pub use bucket::{bucket_by_month, BucketMode, MonthBucket, TimestampedRecord};

pub const NO_PLAN: &str = "Sem Plano";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UserTypeCount {
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(deserialize_with = "lenient_count")]
    pub count: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PlanClientCount {
    pub plan_name: String,
    #[serde(deserialize_with = "lenient_count")]
    pub client_count: u64,
}

type Fetched<T> = Result<Option<T>, BackendError>;

/// Read-only source of every dashboard aggregate. A `None` result means the
/// backend had nothing to report.
#[async_trait(?Send)]
pub trait ReportingPort {
    async fn total_users(&self) -> Fetched<u64>;
    async fn total_orders(&self) -> Fetched<u64>;
    async fn total_revenue(&self) -> Fetched<Money>;
    async fn active_subscriptions(&self) -> Fetched<u64>;
    async fn order_history(&self) -> Fetched<Vec<TimestampedRecord>>;
    async fn signup_history(&self) -> Fetched<Vec<TimestampedRecord>>;
    async fn user_types(&self) -> Fetched<Vec<UserTypeCount>>;
    async fn clients_by_plan(&self) -> Fetched<Vec<PlanClientCount>>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: u64,
    pub muted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_users: u64,
    pub total_orders: u64,
    pub total_revenue: Money,
    pub active_subscriptions: u64,
    pub monthly_orders: Vec<MonthBucket>,
    pub monthly_revenue: Vec<MonthBucket>,
    pub monthly_users: Vec<MonthBucket>,
    pub user_types: Vec<Slice>,
    pub clients_by_plan: Vec<Slice>,
    /// Aggregates that could not be fetched and were shown as empty.
    pub failed: Vec<&'static str>,
}

impl AnalyticsSnapshot {
    pub fn average_order_value(&self) -> Money {
        if self.total_orders == 0 {
            return Money::ZERO;
        }
        Money::new(self.total_revenue.amount() / Decimal::from(self.total_orders))
    }
}

fn settle<T: Default>(name: &'static str, result: Fetched<T>, failed: &mut Vec<&'static str>) -> T {
    match result {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            warn!(aggregate = name, %err, "aggregate unavailable, showing default");
            failed.push(name);
            T::default()
        }
    }
}

pub fn user_type_slices(rows: &[UserTypeCount]) -> Vec<Slice> {
    rows.iter()
        .map(|row| Slice {
            label: match row.role {
                Role::Admin => "Admins".to_string(),
                Role::Customer => "Customers".to_string(),
            },
            value: row.count,
            muted: false,
        })
        .collect()
}

pub fn plan_slices(rows: &[PlanClientCount]) -> Vec<Slice> {
    rows.iter()
        .map(|row| Slice {
            label: row.plan_name.clone(),
            value: row.client_count,
            muted: row.plan_name == NO_PLAN,
        })
        .collect()
}

pub async fn load_snapshot(port: &dyn ReportingPort) -> AnalyticsSnapshot {
    let mut failed = Vec::new();
    let total_users = settle("total_users", port.total_users().await, &mut failed);
    let total_orders = settle("total_orders", port.total_orders().await, &mut failed);
    let total_revenue = settle("total_revenue", port.total_revenue().await, &mut failed);
    let active_subscriptions = settle(
        "active_subscriptions",
        port.active_subscriptions().await,
        &mut failed,
    );
    let orders = settle("order_history", port.order_history().await, &mut failed);
    let signups = settle("signup_history", port.signup_history().await, &mut failed);
    let user_types = settle("user_types", port.user_types().await, &mut failed);
    let plans = settle("clients_by_plan", port.clients_by_plan().await, &mut failed);

    AnalyticsSnapshot {
        total_users,
        total_orders,
        total_revenue,
        active_subscriptions,
        monthly_orders: bucket_by_month(&orders, BucketMode::Count),
        monthly_revenue: bucket_by_month(&orders, BucketMode::Sum),
        monthly_users: bucket_by_month(&signups, BucketMode::Count),
        user_types: user_type_slices(&user_types),
        clients_by_plan: plan_slices(&plans),
        failed,
    }
}

/// Creation time and total of each order, for the monthly series.
pub fn order_records(orders: &[Order]) -> Vec<TimestampedRecord> {
    orders
        .iter()
        .map(|order| TimestampedRecord {
            timestamp: order.created_at.clone(),
            amount: Some(order.total),
        })
        .collect()
}

/// [`ReportingPort`] backed by the REST procedures and tables.
pub struct BackendReporting {
    client: BackendClient,
}

impl BackendReporting {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    async fn scalar_count(&self, procedure: &str) -> Fetched<u64> {
        let value: Option<Count> = self.client.rpc(procedure, &serde_json::json!({})).await?;
        Ok(value.map(|c| c.0))
    }
}

#[async_trait(?Send)]
impl ReportingPort for BackendReporting {
    async fn total_users(&self) -> Fetched<u64> {
        self.scalar_count("get_total_users").await
    }

    async fn total_orders(&self) -> Fetched<u64> {
        self.scalar_count("get_total_orders").await
    }

    async fn total_revenue(&self) -> Fetched<Money> {
        self.client
            .rpc("get_total_revenue", &serde_json::json!({}))
            .await
    }

    async fn active_subscriptions(&self) -> Fetched<u64> {
        let count = self
            .client
            .count("user_subscriptions", &Query::new().eq("status", "active"))
            .await?;
        Ok(Some(count))
    }

    async fn order_history(&self) -> Fetched<Vec<TimestampedRecord>> {
        // The orders table is filtered by row-level security; the procedure is not.
        let orders = crate::orders::list_all(&self.client).await?;
        Ok(Some(order_records(&orders)))
    }

    async fn signup_history(&self) -> Fetched<Vec<TimestampedRecord>> {
        let rows = self
            .client
            .select("users", &Query::new().select("created_at"))
            .await?;
        Ok(Some(rows))
    }

    async fn user_types(&self) -> Fetched<Vec<UserTypeCount>> {
        self.client.rpc("get_user_types", &serde_json::json!({})).await
    }

    async fn clients_by_plan(&self) -> Fetched<Vec<PlanClientCount>> {
        self.client
            .rpc("get_clients_by_plan", &serde_json::json!({}))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rows shaped like the `get_all_orders` procedure result.
    fn all_orders() -> Vec<Order> {
        serde_json::from_str(
            r#"[
                {"id":"o1","user_id":"u1","total":"100.00","status":"completed",
                 "created_at":"2024-01-05T10:00:00Z","user_name":"Ana","user_email":"ana@x.com","items":[]},
                {"id":"o2","user_id":"u2","total":200,"status":"pending",
                 "created_at":"2024-01-09T10:00:00Z","user_name":"Bia","user_email":null,"items":null},
                {"id":"o3","total":"100.00","status":"shipped","created_at":"2024-03-01T10:00:00Z"}
            ]"#,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct FakeReporting {
        fail_revenue: bool,
        empty: bool,
    }

    fn or_empty<T>(empty: bool, value: T) -> Fetched<T> {
        Ok(if empty { None } else { Some(value) })
    }

    #[async_trait(?Send)]
    impl ReportingPort for FakeReporting {
        async fn total_users(&self) -> Fetched<u64> {
            or_empty(self.empty, 12)
        }

        async fn total_orders(&self) -> Fetched<u64> {
            or_empty(self.empty, 4)
        }

        async fn total_revenue(&self) -> Fetched<Money> {
            if self.fail_revenue {
                return Err(BackendError::Status {
                    status: 500,
                    message: "function get_total_revenue() does not exist".into(),
                });
            }
            or_empty(self.empty, Money::from_cents(40_000))
        }

        async fn active_subscriptions(&self) -> Fetched<u64> {
            or_empty(self.empty, 3)
        }

        async fn order_history(&self) -> Fetched<Vec<TimestampedRecord>> {
            or_empty(self.empty, order_records(&all_orders()))
        }

        async fn signup_history(&self) -> Fetched<Vec<TimestampedRecord>> {
            or_empty(
                self.empty,
                vec![TimestampedRecord::new("2024-02-01", None)],
            )
        }

        async fn user_types(&self) -> Fetched<Vec<UserTypeCount>> {
            or_empty(
                self.empty,
                vec![
                    UserTypeCount { role: Role::Admin, count: 2 },
                    UserTypeCount { role: Role::Customer, count: 10 },
                ],
            )
        }

        async fn clients_by_plan(&self) -> Fetched<Vec<PlanClientCount>> {
            or_empty(
                self.empty,
                vec![
                    PlanClientCount { plan_name: "Monthly".into(), client_count: 3 },
                    PlanClientCount { plan_name: NO_PLAN.into(), client_count: 7 },
                ],
            )
        }
    }

    #[tokio::test]
    async fn builds_charts_and_slices() {
        let snapshot = load_snapshot(&FakeReporting::default()).await;
        assert_eq!(snapshot.total_users, 12);
        assert_eq!(snapshot.total_revenue, Money::from_cents(40_000));
        assert_eq!(snapshot.average_order_value(), Money::from_cents(10_000));
        assert!(snapshot.failed.is_empty());

        let orders: Vec<(String, Decimal)> = snapshot
            .monthly_orders
            .iter()
            .map(|b| (b.month.to_string(), b.value))
            .collect();
        assert_eq!(
            orders,
            vec![
                ("2024-01".to_string(), Decimal::from(2)),
                ("2024-03".to_string(), Decimal::from(1)),
            ]
        );
        assert_eq!(snapshot.monthly_revenue[0].value, Decimal::from(300));
        assert_eq!(snapshot.monthly_users.len(), 1);

        assert_eq!(snapshot.user_types[0].label, "Admins");
        assert_eq!(snapshot.user_types[1].label, "Customers");
        assert!(!snapshot.clients_by_plan[0].muted);
        assert!(snapshot.clients_by_plan[1].muted);
    }

    #[test]
    fn order_records_keep_timestamp_and_total() {
        let records = order_records(&all_orders());
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp.as_deref(), Some("2024-01-05T10:00:00Z"));
        assert_eq!(records[1].amount, Some(Money::from_cents(20_000)));

        let revenue = bucket_by_month(&records, BucketMode::Sum);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].value, Decimal::from(300));
        assert_eq!(revenue[1].value, Decimal::from(100));
    }

    #[tokio::test]
    async fn empty_results_become_defaults() {
        let snapshot = load_snapshot(&FakeReporting { empty: true, ..Default::default() }).await;
        assert_eq!(snapshot, AnalyticsSnapshot::default());
        assert_eq!(snapshot.average_order_value(), Money::ZERO);
    }

    #[tokio::test]
    async fn failures_are_defaulted_and_reported() {
        let snapshot = load_snapshot(&FakeReporting { fail_revenue: true, ..Default::default() }).await;
        assert_eq!(snapshot.total_revenue, Money::ZERO);
        assert_eq!(snapshot.total_orders, 4);
        assert_eq!(snapshot.failed, vec!["total_revenue"]);
    }

    #[test]
    fn decodes_aggregate_rows_with_string_counts() {
        let types: Vec<UserTypeCount> =
            serde_json::from_str(r#"[{"tipo":"admin","count":"2"},{"tipo":"cliente","count":9}]"#).unwrap();
        assert_eq!(types[0].role, Role::Admin);
        assert_eq!(types[0].count, 2);
        assert_eq!(types[1].role, Role::Customer);

        let plans: Vec<PlanClientCount> =
            serde_json::from_str(r#"[{"plan_name":"Sem Plano","client_count":"5"}]"#).unwrap();
        assert_eq!(plan_slices(&plans)[0].value, 5);
        assert!(plan_slices(&plans)[0].muted);
    }
}
