use serde::{Deserialize, Serialize};

use crate::backend::{null_as_default, BackendClient, BackendError, Query};
use crate::money::Money;

pub const ALL_CATEGORIES: &str = "All";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A shop product, read from `products` joined with `categories(name)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, rename = "categories")]
    pub category: Option<CategoryRef>,
}

impl Product {
    pub fn image(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// An affiliate ("blog") product: bought on an external site.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffiliateProduct {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub link: String,
}

impl AffiliateProduct {
    pub fn image(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }
}

/// What the search box and category chips filter on.
pub trait Listing {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category_name(&self) -> &str;
}

impl Listing for Product {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category_name(&self) -> &str {
        self.category
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or(UNCATEGORIZED)
    }
}

impl Listing for AffiliateProduct {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category_name(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
    }
}

/// Case-insensitive match on name or description, within one category
/// (or all of them).
pub fn filter_listings<'a, T: Listing>(items: &'a [T], search: &str, category: &str) -> Vec<&'a T> {
    let needle = search.trim().to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item.name().to_lowercase().contains(&needle)
                || item.description().to_lowercase().contains(&needle)
        })
        .filter(|item| category == ALL_CATEGORIES || item.category_name() == category)
        .collect()
}

/// `All` followed by each category in order of first appearance.
pub fn categories_of<T: Listing>(items: &[T]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        let name = item.category_name();
        if !out.iter().any(|c| c == name) {
            out.push(name.to_string());
        }
    }
    out
}

pub async fn load_products(client: &BackendClient) -> Result<Vec<Product>, BackendError> {
    client
        .select(
            "products",
            &Query::new()
                .select("*,categories(name)")
                .order("created_at", false),
        )
        .await
}

pub async fn load_product(client: &BackendClient, id: &str) -> Result<Option<Product>, BackendError> {
    client
        .select_one(
            "products",
            &Query::new().select("*,categories(name)").eq("id", id),
        )
        .await
}

pub async fn load_affiliate_products(
    client: &BackendClient,
) -> Result<Vec<AffiliateProduct>, BackendError> {
    client
        .select("blog_products", &Query::new().order("created_at", false))
        .await
}

pub async fn load_categories(client: &BackendClient) -> Result<Vec<Category>, BackendError> {
    client
        .select("categories", &Query::new().order("name", true))
        .await
}

#[cfg(test)]
pub(crate) fn sample_product(id: &str, name: &str, cents: i64, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} description", name),
        price: Money::from_cents(cents),
        image_url: None,
        category_id: None,
        category: Some(CategoryRef {
            name: category.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf() -> Vec<Product> {
        vec![
            sample_product("1", "Smartphone Galaxy Pro", 229_999, "Smartphones"),
            sample_product("2", "Notebook Gaming Elite", 459_999, "Notebooks"),
            sample_product("3", "Bluetooth Headphones", 29_999, "Audio"),
            sample_product("4", "Smartwatch Fitness", 59_999, "Wearables"),
        ]
    }

    #[test]
    fn search_matches_name_or_description_ignoring_case() {
        let items = shelf();
        let found = filter_listings(&items, "SMART", ALL_CATEGORIES);
        let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let found = filter_listings(&items, "gaming elite description", ALL_CATEGORIES);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn category_narrows_results() {
        let items = shelf();
        let found = filter_listings(&items, "", "Audio");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");
        assert!(filter_listings(&items, "smart", "Audio").is_empty());
    }

    #[test]
    fn categories_keep_first_appearance_order() {
        let mut items = shelf();
        items.push(sample_product("5", "Earbuds", 9_999, "Audio"));
        assert_eq!(
            categories_of(&items),
            vec!["All", "Smartphones", "Notebooks", "Audio", "Wearables"]
        );
    }

    #[test]
    fn missing_category_and_image_have_fallbacks() {
        let row = r#"{"id":"9","name":"Cable","description":null,"price":"19.90","image_url":null,"categories":null}"#;
        let product: Product = serde_json::from_str(row).unwrap();
        assert_eq!(product.category_name(), UNCATEGORIZED);
        assert_eq!(product.image(), PLACEHOLDER_IMAGE);
        assert_eq!(product.description, "");
        assert_eq!(product.price, Money::from_cents(1_990));
    }

    #[test]
    fn affiliate_rows_decode() {
        let row = r#"{"id":"b1","name":"Course","description":"Learn","price":497,"category":"Courses","link":"https://example.com/c"}"#;
        let item: AffiliateProduct = serde_json::from_str(row).unwrap();
        assert_eq!(item.category_name(), "Courses");
        assert_eq!(item.price, Money::from_cents(49_700));
    }
}
