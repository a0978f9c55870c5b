use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::{null_as_default, BackendClient, BackendError, Query};
use crate::error::AppError;
use crate::money::Money;
use crate::validation::{Required, ValidationError};

pub const ACTIVE: &str = "active";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IptvPlan {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub price: Money,
    pub duration_months: u32,
}

impl IptvPlan {
    pub fn option_label(&self) -> String {
        format!("{} ({})", self.name, self.price)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub name: String,
    pub price: Money,
    pub duration_months: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub status: String,
    #[serde(default)]
    pub next_payment_date: Option<NaiveDate>,
    #[serde(default, rename = "iptv_plans")]
    pub plan: Option<PlanSummary>,
}

impl Subscription {
    pub fn next_payment_label(&self) -> String {
        self.next_payment_date
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Stored values are the labels the backend has always used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "Cartão de Crédito")]
    CreditCard,
    #[serde(rename = "Cartão de Débito")]
    DebitCard,
    #[serde(rename = "PIX")]
    Pix,
    #[serde(rename = "Boleto")]
    Boleto,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Pix,
        PaymentMethod::Boleto,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::DebitCard => "Debit card",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit",
            PaymentMethod::DebitCard => "debit",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Boleto => "boleto",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.key() == key)
    }
}

pub async fn list_plans(client: &BackendClient) -> Result<Vec<IptvPlan>, BackendError> {
    client
        .select("iptv_plans", &Query::new().order("duration_months", true))
        .await
}

pub async fn active_for(client: &BackendClient, user_id: &str) -> Result<Option<Subscription>, BackendError> {
    client
        .select_one(
            "user_subscriptions",
            &Query::new()
                .select("*,iptv_plans(name,price,duration_months)")
                .eq("user_id", user_id)
                .eq("status", ACTIVE),
        )
        .await
}

#[derive(Debug, Serialize, PartialEq)]
struct NewSubscription<'a> {
    user_id: &'a str,
    plan_id: &'a str,
    payment_method: Option<PaymentMethod>,
    status: &'static str,
    next_payment_date: NaiveDate,
}

#[derive(Debug, Serialize, PartialEq)]
struct PlanChange<'a> {
    plan_id: &'a str,
    next_payment_date: Option<NaiveDate>,
}

fn new_subscription<'a>(
    user_id: &'a str,
    plan_id: &'a str,
    next_payment_date: Option<NaiveDate>,
    payment_method: Option<PaymentMethod>,
) -> Result<NewSubscription<'a>, AppError> {
    Required::new()
        .field("Plan", plan_id)
        .present("Next payment date", next_payment_date)
        .check()?;
    let next_payment_date = next_payment_date
        .ok_or_else(|| ValidationError::MissingFields(vec!["Next payment date"]))?;
    Ok(NewSubscription {
        user_id,
        plan_id,
        payment_method,
        status: ACTIVE,
        next_payment_date,
    })
}

fn plan_change<'a>(
    current: &Subscription,
    plan_id: &'a str,
    next_payment_date: Option<NaiveDate>,
) -> Result<PlanChange<'a>, AppError> {
    Required::new().field("Plan", plan_id).check()?;
    Ok(PlanChange {
        plan_id,
        next_payment_date: next_payment_date.or(current.next_payment_date),
    })
}

pub async fn subscribe(
    client: &BackendClient,
    user_id: &str,
    plan_id: &str,
    next_payment_date: Option<NaiveDate>,
    payment_method: Option<PaymentMethod>,
) -> Result<Subscription, AppError> {
    let row = new_subscription(user_id, plan_id, next_payment_date, payment_method)?;
    let created: Subscription = client.insert("user_subscriptions", &row).await?;
    info!(user_id, plan_id, "subscription created");
    Ok(created)
}

pub async fn change_plan(
    client: &BackendClient,
    current: &Subscription,
    plan_id: &str,
    next_payment_date: Option<NaiveDate>,
) -> Result<(), AppError> {
    let changes = plan_change(current, plan_id, next_payment_date)?;
    client
        .update(
            "user_subscriptions",
            &Query::new().eq("id", &current.id),
            &changes,
        )
        .await?;
    info!(subscription_id = %current.id, plan_id, "subscription plan changed");
    Ok(())
}

/// `<input type="date">` value, empty when unset.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> Subscription {
        serde_json::from_str(
            r#"{"id":"s1","user_id":"u1","plan_id":"p1","payment_method":"PIX","status":"active",
                "next_payment_date":"2024-07-10",
                "iptv_plans":{"name":"Monthly","price":29.99,"duration_months":1}}"#,
        )
        .unwrap()
    }

    #[test]
    fn decodes_subscription_with_plan() {
        let sub = current();
        assert_eq!(sub.payment_method, Some(PaymentMethod::Pix));
        assert_eq!(sub.plan.as_ref().map(|p| p.price), Some(Money::from_cents(2_999)));
        assert_eq!(sub.next_payment_label(), "10/07/2024");
    }

    #[test]
    fn payment_methods_keep_stored_values() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CreditCard).unwrap(),
            "\"Cartão de Crédito\""
        );
        for method in PaymentMethod::ALL {
            assert_eq!(PaymentMethod::from_key(method.key()), Some(method));
        }
    }

    #[test]
    fn subscribing_requires_plan_and_date() {
        let err = new_subscription("u1", "", None, None).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation(ValidationError::MissingFields(vec!["Plan", "Next payment date"]))
        );

        let date = parse_date_input("2024-08-01");
        let row = new_subscription("u1", "p2", date, Some(PaymentMethod::Boleto)).unwrap();
        assert_eq!(row.status, "active");
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["next_payment_date"], "2024-08-01");
        assert_eq!(json["payment_method"], "Boleto");
    }

    #[test]
    fn plan_change_keeps_the_current_date_by_default() {
        let sub = current();
        let change = plan_change(&sub, "p3", None).unwrap();
        assert_eq!(change.next_payment_date, NaiveDate::from_ymd_opt(2024, 7, 10));

        let change = plan_change(&sub, "p3", parse_date_input("2024-09-01")).unwrap();
        assert_eq!(change.next_payment_date, NaiveDate::from_ymd_opt(2024, 9, 1));

        assert!(plan_change(&sub, " ", None).is_err());
    }

    #[test]
    fn plans_decode_and_label() {
        let plan: IptvPlan = serde_json::from_str(
            r#"{"id":"p3","name":"Annual","description":null,"price":"299.99","duration_months":12}"#,
        )
        .unwrap();
        assert_eq!(plan.option_label(), "Annual (R$ 299,99)");
        assert!(parse_date_input("").is_none());
    }
}
