use serde::Serialize;
use tracing::info;

use crate::auth::{PasswordHasher, Role, User};
use crate::backend::{BackendClient, Query};
use crate::catalog::{AffiliateProduct, Product};
use crate::error::AppError;
use crate::money::Money;
use crate::validation::{self, Required};

pub const PRODUCT_IMAGES_BUCKET: &str = "product-images";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Option<Role>,
    pub phone: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            password: String::new(),
            name: user.name.clone(),
            role: Some(user.role),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NewUserRow {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub tipo: Role,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct UserChanges {
    pub email: String,
    pub name: String,
    pub tipo: Role,
    pub phone: Option<String>,
}

impl UserForm {
    pub fn into_new_row(self, hasher: &PasswordHasher) -> Result<NewUserRow, AppError> {
        Required::new()
            .field("Email", &self.email)
            .field("Password", &self.password)
            .field("Name", &self.name)
            .check()?;
        let email = validation::email(&self.email)?;
        validation::password(&self.password)?;
        let password_hash = hasher.hash(&self.password)?;
        Ok(NewUserRow {
            email,
            password_hash,
            name: self.name.trim().to_string(),
            tipo: self.role.unwrap_or(Role::Customer),
            phone: validation::optional(&self.phone),
        })
    }

    pub fn into_changes(self) -> Result<UserChanges, AppError> {
        Required::new()
            .field("Email", &self.email)
            .field("Name", &self.name)
            .check()?;
        Ok(UserChanges {
            email: validation::email(&self.email)?,
            name: self.name.trim().to_string(),
            tipo: self.role.unwrap_or(Role::Customer),
            phone: validation::optional(&self.phone),
        })
    }
}

pub async fn list_users(client: &BackendClient) -> Result<Vec<User>, AppError> {
    Ok(client
        .select(
            "users",
            &Query::new()
                .select("id,email,name,tipo,phone,created_at")
                .order("created_at", false),
        )
        .await?)
}

pub async fn create_user(
    client: &BackendClient,
    hasher: &PasswordHasher,
    form: UserForm,
) -> Result<User, AppError> {
    let row = form.into_new_row(hasher)?;
    let created: User = client.insert("users", &row).await?;
    info!(user_id = %created.id, role = created.role.as_str(), "user created");
    Ok(created)
}

pub async fn update_user(client: &BackendClient, id: &str, form: UserForm) -> Result<(), AppError> {
    let changes = form.into_changes()?;
    client
        .update("users", &Query::new().eq("id", id), &changes)
        .await?;
    info!(user_id = id, "user updated");
    Ok(())
}

pub async fn delete_user(client: &BackendClient, id: &str) -> Result<(), AppError> {
    client.delete("users", &Query::new().eq("id", id)).await?;
    info!(user_id = id, "user deleted");
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category_id: String,
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.amount().to_string(),
            image_url: product.image_url.clone().unwrap_or_default(),
            category_id: product.category_id.clone().unwrap_or_default(),
        }
    }

    pub fn into_row(self) -> Result<ProductRow, AppError> {
        Required::new()
            .field("Name", &self.name)
            .field("Price", &self.price)
            .field("Description", &self.description)
            .check()?;
        Ok(ProductRow {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: validation::positive_amount("Price", &self.price)?,
            image_url: validation::optional(&self.image_url),
            category_id: validation::optional(&self.category_id),
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ProductRow {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub category_id: Option<String>,
}

pub async fn list_products(client: &BackendClient) -> Result<Vec<Product>, AppError> {
    Ok(crate::catalog::load_products(client).await?)
}

/// Inserts when `id` is `None`, otherwise updates that product.
pub async fn save_product(
    client: &BackendClient,
    id: Option<&str>,
    form: ProductForm,
) -> Result<(), AppError> {
    let row = form.into_row()?;
    match id {
        Some(id) => {
            client
                .update("products", &Query::new().eq("id", id), &row)
                .await?;
            info!(product_id = id, "product updated");
        }
        None => {
            let created: Product = client.insert("products", &row).await?;
            info!(product_id = %created.id, "product created");
        }
    }
    Ok(())
}

pub async fn delete_product(client: &BackendClient, id: &str) -> Result<(), AppError> {
    client.delete("products", &Query::new().eq("id", id)).await?;
    info!(product_id = id, "product deleted");
    Ok(())
}

/// Uploads a product photo and returns its public URL.
pub async fn upload_product_image(
    client: &BackendClient,
    file: &web_sys::File,
) -> Result<String, AppError> {
    Ok(client.upload(PRODUCT_IMAGES_BUCKET, file).await?)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AffiliateForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: String,
    pub category: String,
    pub link: String,
}

impl AffiliateForm {
    pub fn from_item(item: &AffiliateProduct) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.amount().to_string(),
            image_url: item.image_url.clone().unwrap_or_default(),
            category: item.category.clone().unwrap_or_default(),
            link: item.link.clone(),
        }
    }

    pub fn into_row(self) -> Result<AffiliateRow, AppError> {
        Required::new()
            .field("Name", &self.name)
            .field("Price", &self.price)
            .field("Description", &self.description)
            .field("Link", &self.link)
            .check()?;
        Ok(AffiliateRow {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            price: validation::positive_amount("Price", &self.price)?,
            image_url: validation::optional(&self.image_url),
            category: validation::optional(&self.category),
            link: validation::url("Link", &self.link)?,
        })
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AffiliateRow {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub link: String,
}

pub async fn save_affiliate(
    client: &BackendClient,
    id: Option<&str>,
    form: AffiliateForm,
) -> Result<(), AppError> {
    let row = form.into_row()?;
    match id {
        Some(id) => {
            client
                .update("blog_products", &Query::new().eq("id", id), &row)
                .await?;
            info!(affiliate_id = id, "affiliate product updated");
        }
        None => {
            let created: AffiliateProduct = client.insert("blog_products", &row).await?;
            info!(affiliate_id = %created.id, "affiliate product created");
        }
    }
    Ok(())
}

pub async fn delete_affiliate(client: &BackendClient, id: &str) -> Result<(), AppError> {
    client
        .delete("blog_products", &Query::new().eq("id", id))
        .await?;
    info!(affiliate_id = id, "affiliate product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::sample_user;
    use crate::catalog::sample_product;
    use crate::validation::ValidationError;

    fn hasher() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1, 1).unwrap()
    }

    #[test]
    fn new_users_need_email_password_and_name() {
        let err = UserForm::default().into_new_row(&hasher()).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation(ValidationError::MissingFields(vec!["Email", "Password", "Name"]))
        );

        let short = UserForm {
            email: "bia@store.com".into(),
            password: "short".into(),
            name: "Bia".into(),
            ..Default::default()
        };
        assert_eq!(
            short.into_new_row(&hasher()).unwrap_err(),
            AppError::Validation(ValidationError::PasswordTooShort)
        );
    }

    #[test]
    fn new_users_store_a_hash_not_the_password() {
        let form = UserForm {
            email: " Bia@Store.com".into(),
            password: "s3cret-pass".into(),
            name: " Bia ".into(),
            role: Some(Role::Admin),
            phone: "".into(),
        };
        let h = hasher();
        let row = form.into_new_row(&h).unwrap();
        assert_eq!(row.email, "bia@store.com");
        assert_eq!(row.name, "Bia");
        assert_eq!(row.phone, None);
        assert!(h.verify("s3cret-pass", &row.password_hash));

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["tipo"], "admin");
        assert!(!json.to_string().contains("s3cret-pass"));
    }

    #[test]
    fn user_edits_default_to_customer_role() {
        let mut form = UserForm::from_user(&sample_user(Role::Customer));
        form.role = None;
        form.phone = "11 98888-0000".into();
        let changes = form.into_changes().unwrap();
        assert_eq!(changes.tipo, Role::Customer);
        assert_eq!(changes.phone.as_deref(), Some("11 98888-0000"));
    }

    #[test]
    fn products_need_a_positive_price() {
        let form = ProductForm {
            name: "Cable".into(),
            description: "USB-C".into(),
            price: "0,00".into(),
            ..Default::default()
        };
        assert_eq!(
            form.into_row().unwrap_err(),
            AppError::Validation(ValidationError::InvalidAmount("Price"))
        );

        let form = ProductForm::from_product(&sample_product("p", "Cable", 1_990, "Audio"));
        let row = form.into_row().unwrap();
        assert_eq!(row.price, Money::from_cents(1_990));
        assert_eq!(row.image_url, None);
    }

    #[test]
    fn affiliate_products_need_a_link() {
        let form = AffiliateForm {
            name: "Course".into(),
            description: "Learn".into(),
            price: "497".into(),
            ..Default::default()
        };
        assert_eq!(
            form.clone().into_row().unwrap_err(),
            AppError::Validation(ValidationError::MissingFields(vec!["Link"]))
        );

        let form = AffiliateForm {
            link: "https://partner.example/course".into(),
            ..form
        };
        let row = form.into_row().unwrap();
        assert_eq!(row.price, Money::from_cents(49_700));
        assert_eq!(row.category, None);
    }
}
