//! In-process store used by the test-suite and `serve --memory`.
//!
//! Enforces the same unique, RESTRICT and CASCADE rules as `migrations/`, so
//! services behave identically against either backend.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::models::*;
use super::{
    AccountRepository, BrandRepository, CommentRepository, DashboardRepository, PhoneRepository,
    ProfileRepository, ReviewRepository, RoleRepository, SpecificationRepository, Store, StoreError,
    StoreResult,
};
use crate::types::{ListQuery, RoleKind, Tier};

#[derive(Default)]
struct Tables {
    next_ids: HashMap<&'static str, i64>,
    roles: BTreeMap<i64, Role>,
    accounts: BTreeMap<i64, Account>,
    profiles: BTreeMap<i64, Profile>,
    brands: BTreeMap<i64, Brand>,
    phones: BTreeMap<i64, Phone>,
    specifications: BTreeMap<i64, Specification>,
    reviews: BTreeMap<i64, Review>,
    comments: BTreeMap<i64, Comment>,
}

fn unique(constraint: &str) -> StoreError {
    StoreError::UniqueViolation(constraint.to_string())
}

fn foreign_key(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation(constraint.to_string())
}

// Mirrors the LOWER(name) unique index on roles
fn same_role_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i64 {
        let id = self.next_ids.entry(table).or_insert(0);
        *id += 1;
        *id
    }

    fn is_admin_account(&self, account: &Account) -> bool {
        self.roles
            .get(&account.role_id)
            .is_some_and(|role| RoleKind::from_name(&role.name).tier() == Tier::Admin)
    }

    fn check_account_unique(&self, id: i64, username: &str, email: &str) -> StoreResult<()> {
        if self.accounts.values().any(|a| a.id != id && a.username == username) {
            return Err(unique("users_username_key"));
        }
        if self.accounts.values().any(|a| a.id != id && a.email == email) {
            return Err(unique("users_email_key"));
        }
        Ok(())
    }

    fn phone_summary(&self, phone: &Phone) -> Option<PhoneSummary> {
        let brand = self.brands.get(&phone.brand_id)?;
        let ratings: Vec<i32> = self
            .reviews
            .values()
            .filter(|r| r.phone_id == phone.id)
            .map(|r| r.rating)
            .collect();
        let avg_rating = (!ratings.is_empty()).then(|| {
            let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
            PhoneSummary::round_rating(sum as f64 / ratings.len() as f64)
        });

        Some(PhoneSummary {
            id: phone.id,
            brand_id: phone.brand_id,
            brand_name: brand.name.clone(),
            full_name: PhoneSummary::full_name(&brand.name, &phone.model),
            model: phone.model.clone(),
            price: phone.price,
            image_url: phone.image_url.clone(),
            release_date: phone.release_date,
            avg_rating,
            created_at: phone.created_at,
            updated_at: phone.updated_at,
        })
    }

    fn remove_review_cascade(&mut self, review_id: i64) -> bool {
        self.comments.retain(|_, c| c.review_id != review_id);
        self.reviews.remove(&review_id).is_some()
    }

    fn remove_phone_cascade(&mut self, phone_id: i64) -> bool {
        self.specifications.retain(|_, s| s.phone_id != phone_id);
        let review_ids: Vec<i64> = self
            .reviews
            .values()
            .filter(|r| r.phone_id == phone_id)
            .map(|r| r.id)
            .collect();
        for id in review_ids {
            self.remove_review_cascade(id);
        }
        self.phones.remove(&phone_id).is_some()
    }

    fn remove_account_cascade(&mut self, account_id: i64) -> bool {
        self.profiles.retain(|_, p| p.user_id != account_id);
        self.comments.retain(|_, c| c.user_id != account_id);
        let review_ids: Vec<i64> = self
            .reviews
            .values()
            .filter(|r| r.user_id == account_id)
            .map(|r| r.id)
            .collect();
        for id in review_ids {
            self.remove_review_cascade(id);
        }
        self.accounts.remove(&account_id).is_some()
    }
}

/// `Store` backed by in-memory tables behind a single lock
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryStore {
    async fn create_account(&self, new: NewAccount) -> StoreResult<Account> {
        let mut t = self.tables.write().await;
        t.check_account_unique(0, &new.username, &new.email)?;
        if !t.roles.contains_key(&new.role_id) {
            return Err(foreign_key("users_role_id_fkey"));
        }

        let now = Utc::now();
        let account = Account {
            id: t.next_id("users"),
            username: new.username,
            email: new.email,
            password: new.password_hash,
            role_id: new.role_id,
            created_at: now,
            updated_at: now,
        };
        t.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_account(&self, id: i64) -> StoreResult<Option<Account>> {
        Ok(self.tables.read().await.accounts.get(&id).cloned())
    }

    async fn find_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let t = self.tables.read().await;
        Ok(t.accounts.values().find(|a| a.username == username).cloned())
    }

    async fn find_account_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        let t = self.tables.read().await;
        Ok(t.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_identity(&self, id: i64) -> StoreResult<Option<AccountIdentity>> {
        let t = self.tables.read().await;
        Ok(t.accounts.get(&id).and_then(|account| {
            t.roles.get(&account.role_id).map(|role| AccountIdentity {
                id: account.id,
                username: account.username.clone(),
                role_name: role.name.clone(),
            })
        }))
    }

    async fn list_accounts(&self, admins: bool, query: &ListQuery) -> StoreResult<Vec<AccountSummary>> {
        let t = self.tables.read().await;
        let mut rows: Vec<AccountSummary> = t
            .accounts
            .values()
            .filter(|a| t.is_admin_account(a) == admins)
            .filter(|a| query.matches(&a.username) || query.matches(&a.email))
            .map(AccountSummary::from)
            .collect();
        query.sort_by_id(&mut rows, |a| a.id);
        Ok(rows)
    }

    async fn update_account(&self, account: &Account) -> StoreResult<Account> {
        let mut t = self.tables.write().await;
        t.check_account_unique(account.id, &account.username, &account.email)?;
        let stored = t.accounts.get_mut(&account.id).ok_or(StoreError::NotFound)?;
        stored.username = account.username.clone();
        stored.email = account.email.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        let mut t = self.tables.write().await;
        let stored = t.accounts.get_mut(&id).ok_or(StoreError::NotFound)?;
        stored.password = password_hash.to_string();
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_account(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_account_cascade(id))
    }
}

#[async_trait]
impl RoleRepository for MemoryStore {
    async fn list_roles(&self, query: &ListQuery) -> StoreResult<Vec<Role>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Role> = t.roles.values().filter(|r| query.matches(&r.name)).cloned().collect();
        query.sort_by_id(&mut rows, |r| r.id);
        Ok(rows)
    }

    async fn find_role(&self, id: i64) -> StoreResult<Option<Role>> {
        Ok(self.tables.read().await.roles.get(&id).cloned())
    }

    async fn find_role_by_name(&self, name: &str) -> StoreResult<Option<Role>> {
        let t = self.tables.read().await;
        Ok(t.roles.values().find(|r| same_role_name(&r.name, name)).cloned())
    }

    async fn create_role(&self, name: &str) -> StoreResult<Role> {
        let mut t = self.tables.write().await;
        if t.roles.values().any(|r| same_role_name(&r.name, name)) {
            return Err(unique("roles_name_key"));
        }
        let now = Utc::now();
        let role = Role {
            id: t.next_id("roles"),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        t.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update_role(&self, role: &Role) -> StoreResult<Role> {
        let mut t = self.tables.write().await;
        if t.roles.values().any(|r| r.id != role.id && same_role_name(&r.name, &role.name)) {
            return Err(unique("roles_name_key"));
        }
        let stored = t.roles.get_mut(&role.id).ok_or(StoreError::NotFound)?;
        stored.name = role.name.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_role(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.roles.contains_key(&id) {
            return Ok(false);
        }
        if t.accounts.values().any(|a| a.role_id == id) {
            return Err(foreign_key("users_role_id_fkey"));
        }
        Ok(t.roles.remove(&id).is_some())
    }

    async fn list_role_accounts(&self, role_id: i64) -> StoreResult<Vec<AccountSummary>> {
        let t = self.tables.read().await;
        Ok(t.accounts
            .values()
            .filter(|a| a.role_id == role_id)
            .map(AccountSummary::from)
            .collect())
    }
}

#[async_trait]
impl BrandRepository for MemoryStore {
    async fn list_brands(&self, query: &ListQuery) -> StoreResult<Vec<Brand>> {
        let t = self.tables.read().await;
        let mut rows: Vec<Brand> = t.brands.values().filter(|b| query.matches(&b.name)).cloned().collect();
        query.sort_by_id(&mut rows, |b| b.id);
        Ok(rows)
    }

    async fn find_brand(&self, id: i64) -> StoreResult<Option<Brand>> {
        Ok(self.tables.read().await.brands.get(&id).cloned())
    }

    async fn find_brand_by_name(&self, name: &str) -> StoreResult<Option<Brand>> {
        let t = self.tables.read().await;
        Ok(t.brands.values().find(|b| b.name == name).cloned())
    }

    async fn create_brand(&self, new: NewBrand) -> StoreResult<Brand> {
        let mut t = self.tables.write().await;
        if t.brands.values().any(|b| b.name == new.name) {
            return Err(unique("brands_name_key"));
        }
        let now = Utc::now();
        let brand = Brand {
            id: t.next_id("brands"),
            name: new.name,
            logo_url: new.logo_url,
            description: new.description,
            created_at: now,
            updated_at: now,
        };
        t.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn update_brand(&self, brand: &Brand) -> StoreResult<Brand> {
        let mut t = self.tables.write().await;
        if t.brands.values().any(|b| b.id != brand.id && b.name == brand.name) {
            return Err(unique("brands_name_key"));
        }
        let stored = t.brands.get_mut(&brand.id).ok_or(StoreError::NotFound)?;
        stored.name = brand.name.clone();
        stored.logo_url = brand.logo_url.clone();
        stored.description = brand.description.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_brand(&self, id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.brands.contains_key(&id) {
            return Ok(false);
        }
        if t.phones.values().any(|p| p.brand_id == id) {
            return Err(foreign_key("phones_brand_id_fkey"));
        }
        Ok(t.brands.remove(&id).is_some())
    }
}

#[async_trait]
impl PhoneRepository for MemoryStore {
    async fn list_phones(&self, query: &ListQuery) -> StoreResult<Vec<PhoneSummary>> {
        let t = self.tables.read().await;
        let mut rows: Vec<PhoneSummary> = t
            .phones
            .values()
            .filter_map(|p| t.phone_summary(p))
            .filter(|s| query.matches(&s.full_name))
            .collect();
        query.sort_by_id(&mut rows, |p| p.id);
        Ok(rows)
    }

    async fn list_brand_phones(&self, brand_id: i64) -> StoreResult<Vec<PhoneSummary>> {
        let t = self.tables.read().await;
        Ok(t.phones
            .values()
            .filter(|p| p.brand_id == brand_id)
            .filter_map(|p| t.phone_summary(p))
            .collect())
    }

    async fn find_phone(&self, id: i64) -> StoreResult<Option<Phone>> {
        Ok(self.tables.read().await.phones.get(&id).cloned())
    }

    async fn find_phone_summary(&self, id: i64) -> StoreResult<Option<PhoneSummary>> {
        let t = self.tables.read().await;
        Ok(t.phones.get(&id).and_then(|p| t.phone_summary(p)))
    }

    async fn create_phone(&self, new: NewPhone) -> StoreResult<Phone> {
        let mut t = self.tables.write().await;
        if !t.brands.contains_key(&new.brand_id) {
            return Err(foreign_key("phones_brand_id_fkey"));
        }
        let now = Utc::now();
        let phone = Phone {
            id: t.next_id("phones"),
            brand_id: new.brand_id,
            model: new.model,
            price: new.price,
            image_url: new.image_url,
            release_date: new.release_date,
            created_at: now,
            updated_at: now,
        };
        t.phones.insert(phone.id, phone.clone());
        Ok(phone)
    }

    async fn update_phone(&self, phone: &Phone) -> StoreResult<Phone> {
        let mut t = self.tables.write().await;
        if !t.brands.contains_key(&phone.brand_id) {
            return Err(foreign_key("phones_brand_id_fkey"));
        }
        let stored = t.phones.get_mut(&phone.id).ok_or(StoreError::NotFound)?;
        stored.brand_id = phone.brand_id;
        stored.model = phone.model.clone();
        stored.price = phone.price;
        stored.image_url = phone.image_url.clone();
        stored.release_date = phone.release_date;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_phone(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_phone_cascade(id))
    }
}

#[async_trait]
impl SpecificationRepository for MemoryStore {
    async fn find_specification(&self, phone_id: i64) -> StoreResult<Option<Specification>> {
        let t = self.tables.read().await;
        Ok(t.specifications.values().find(|s| s.phone_id == phone_id).cloned())
    }

    async fn create_specification(&self, new: NewSpecification) -> StoreResult<Specification> {
        let mut t = self.tables.write().await;
        if !t.phones.contains_key(&new.phone_id) {
            return Err(foreign_key("specifications_phone_id_fkey"));
        }
        if t.specifications.values().any(|s| s.phone_id == new.phone_id) {
            return Err(unique("specifications_phone_id_key"));
        }
        let now = Utc::now();
        let spec = Specification {
            id: t.next_id("specifications"),
            phone_id: new.phone_id,
            network: new.network,
            operating_system: new.operating_system,
            storage: new.storage,
            memory: new.memory,
            camera: new.camera,
            battery: new.battery,
            additional_feature: new.additional_feature,
            created_at: now,
            updated_at: now,
        };
        t.specifications.insert(spec.id, spec.clone());
        Ok(spec)
    }

    async fn update_specification(&self, spec: &Specification) -> StoreResult<Specification> {
        let mut t = self.tables.write().await;
        let stored = t.specifications.get_mut(&spec.id).ok_or(StoreError::NotFound)?;
        *stored = Specification {
            id: stored.id,
            phone_id: stored.phone_id,
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..spec.clone()
        };
        Ok(stored.clone())
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn find_review(&self, id: i64) -> StoreResult<Option<Review>> {
        Ok(self.tables.read().await.reviews.get(&id).cloned())
    }

    async fn find_review_by_author(&self, user_id: i64, phone_id: i64) -> StoreResult<Option<Review>> {
        let t = self.tables.read().await;
        Ok(t.reviews
            .values()
            .find(|r| r.user_id == user_id && r.phone_id == phone_id)
            .cloned())
    }

    async fn create_review(&self, new: NewReview) -> StoreResult<Review> {
        let mut t = self.tables.write().await;
        if !t.accounts.contains_key(&new.user_id) {
            return Err(foreign_key("reviews_user_id_fkey"));
        }
        if !t.phones.contains_key(&new.phone_id) {
            return Err(foreign_key("reviews_phone_id_fkey"));
        }
        if t.reviews.values().any(|r| r.user_id == new.user_id && r.phone_id == new.phone_id) {
            return Err(unique("reviews_user_phone_key"));
        }
        let now = Utc::now();
        let review = Review {
            id: t.next_id("reviews"),
            user_id: new.user_id,
            phone_id: new.phone_id,
            rating: new.rating,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        t.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, review: &Review) -> StoreResult<Review> {
        let mut t = self.tables.write().await;
        let stored = t.reviews.get_mut(&review.id).ok_or(StoreError::NotFound)?;
        stored.rating = review.rating;
        stored.content = review.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_review(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.remove_review_cascade(id))
    }

    async fn list_phone_reviews(&self, phone_id: i64) -> StoreResult<Vec<PhoneReview>> {
        let t = self.tables.read().await;
        Ok(t.reviews
            .values()
            .filter(|r| r.phone_id == phone_id)
            .filter_map(|r| {
                let author = t.accounts.get(&r.user_id)?;
                Some(PhoneReview {
                    id: r.id,
                    user_id: r.user_id,
                    phone_id: r.phone_id,
                    username: author.username.clone(),
                    rating: r.rating,
                    content: r.content.clone(),
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect())
    }

    async fn list_account_reviews(&self, user_id: i64) -> StoreResult<Vec<Review>> {
        let t = self.tables.read().await;
        Ok(t.reviews.values().filter(|r| r.user_id == user_id).cloned().collect())
    }

    async fn list_reviews(&self) -> StoreResult<Vec<ReviewListing>> {
        let t = self.tables.read().await;
        Ok(t.reviews
            .values()
            .filter_map(|r| {
                let author = t.accounts.get(&r.user_id)?;
                let phone = t.phones.get(&r.phone_id)?;
                Some(ReviewListing {
                    id: r.id,
                    user_id: r.user_id,
                    phone_id: r.phone_id,
                    username: author.username.clone(),
                    phone_model: phone.model.clone(),
                    rating: r.rating,
                    content: r.content.clone(),
                    created_at: r.created_at,
                    updated_at: r.updated_at,
                })
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_comment(&self, id: i64) -> StoreResult<Option<Comment>> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn create_comment(&self, new: NewComment) -> StoreResult<Comment> {
        let mut t = self.tables.write().await;
        if !t.accounts.contains_key(&new.user_id) {
            return Err(foreign_key("comments_user_id_fkey"));
        }
        if !t.reviews.contains_key(&new.review_id) {
            return Err(foreign_key("comments_review_id_fkey"));
        }
        let now = Utc::now();
        let comment = Comment {
            id: t.next_id("comments"),
            user_id: new.user_id,
            review_id: new.review_id,
            content: new.content,
            created_at: now,
            updated_at: now,
        };
        t.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> StoreResult<Comment> {
        let mut t = self.tables.write().await;
        let stored = t.comments.get_mut(&comment.id).ok_or(StoreError::NotFound)?;
        stored.content = comment.content.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_comment(&self, id: i64) -> StoreResult<bool> {
        Ok(self.tables.write().await.comments.remove(&id).is_some())
    }

    async fn list_review_comments(&self, review_id: i64) -> StoreResult<Vec<CommentWithAuthor>> {
        let t = self.tables.read().await;
        Ok(t.comments
            .values()
            .filter(|c| c.review_id == review_id)
            .filter_map(|c| {
                let author = t.accounts.get(&c.user_id)?;
                Some(CommentWithAuthor {
                    id: c.id,
                    user_id: c.user_id,
                    review_id: c.review_id,
                    username: author.username.clone(),
                    content: c.content.clone(),
                    created_at: c.created_at,
                    updated_at: c.updated_at,
                })
            })
            .collect())
    }

    async fn list_comments(&self) -> StoreResult<Vec<Comment>> {
        Ok(self.tables.read().await.comments.values().cloned().collect())
    }
}

#[async_trait]
impl ProfileRepository for MemoryStore {
    async fn find_profile_by_account(&self, user_id: i64) -> StoreResult<Option<Profile>> {
        let t = self.tables.read().await;
        Ok(t.profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    async fn create_profile(&self, new: NewProfile) -> StoreResult<Profile> {
        let mut t = self.tables.write().await;
        if !t.accounts.contains_key(&new.user_id) {
            return Err(foreign_key("profiles_user_id_fkey"));
        }
        if t.profiles.values().any(|p| p.user_id == new.user_id) {
            return Err(unique("profiles_user_id_key"));
        }
        let now = Utc::now();
        let profile = Profile {
            id: t.next_id("profiles"),
            user_id: new.user_id,
            full_name: new.full_name,
            biodata: new.biodata,
            image_url: new.image_url,
            birthday: new.birthday,
            created_at: now,
            updated_at: now,
        };
        t.profiles.insert(profile.id, profile.clone());
        Ok(profile)
    }

    async fn update_profile(&self, profile: &Profile) -> StoreResult<Profile> {
        let mut t = self.tables.write().await;
        let stored = t.profiles.get_mut(&profile.id).ok_or(StoreError::NotFound)?;
        stored.full_name = profile.full_name.clone();
        stored.biodata = profile.biodata.clone();
        stored.image_url = profile.image_url.clone();
        stored.birthday = profile.birthday;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }
}

#[async_trait]
impl DashboardRepository for MemoryStore {
    async fn count_all(&self) -> StoreResult<DashboardCounts> {
        let t = self.tables.read().await;
        let admins = t.accounts.values().filter(|a| t.is_admin_account(a)).count() as i64;
        Ok(DashboardCounts {
            users: t.accounts.len() as i64 - admins,
            admins,
            phones: t.phones.len() as i64,
            brands: t.brands.len() as i64,
            reviews: t.reviews.len() as i64,
        })
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::profile::DEFAULT_PROFILE_IMAGE;
    use chrono::NaiveDate;

    async fn store_with_phone() -> (MemoryStore, Account, Phone) {
        let store = MemoryStore::new();
        store.create_role("user").await.unwrap();
        let account = store
            .create_account(NewAccount {
                username: "alice".into(),
                email: "alice@test.com".into(),
                password_hash: "hash".into(),
                role_id: 1,
            })
            .await
            .unwrap();
        let brand = store
            .create_brand(NewBrand {
                name: "Acme".into(),
                logo_url: "https://acme.example.com/logo.png".into(),
                description: String::new(),
            })
            .await
            .unwrap();
        let phone = store
            .create_phone(NewPhone {
                brand_id: brand.id,
                model: "One".into(),
                price: 100,
                image_url: "https://acme.example.com/one.png".into(),
                release_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        (store, account, phone)
    }

    #[tokio::test]
    async fn duplicate_usernames_violate_unique_constraint() {
        let (store, _, _) = store_with_phone().await;
        let err = store
            .create_account(NewAccount {
                username: "alice".into(),
                email: "other@test.com".into(),
                password_hash: "hash".into(),
                role_id: 1,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(c) if c == "users_username_key"));
    }

    #[tokio::test]
    async fn brand_delete_is_restricted_by_phones() {
        let (store, _, phone) = store_with_phone().await;
        let err = store.delete_brand(phone.brand_id).await.unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(store.find_brand(phone.brand_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn phone_delete_cascades_to_reviews_and_comments() {
        let (store, account, phone) = store_with_phone().await;
        let review = store
            .create_review(NewReview { user_id: account.id, phone_id: phone.id, rating: 4, content: "ok".into() })
            .await
            .unwrap();
        store
            .create_comment(NewComment { user_id: account.id, review_id: review.id, content: "+1".into() })
            .await
            .unwrap();

        assert!(store.delete_phone(phone.id).await.unwrap());
        assert!(store.find_review(review.id).await.unwrap().is_none());
        assert!(store.list_comments().await.unwrap().is_empty());
        assert!(!store.delete_phone(phone.id).await.unwrap());
    }

    #[tokio::test]
    async fn average_rating_is_rounded() {
        let (store, account, phone) = store_with_phone().await;
        let bob = store
            .create_account(NewAccount {
                username: "bob".into(),
                email: "bob@test.com".into(),
                password_hash: "hash".into(),
                role_id: 1,
            })
            .await
            .unwrap();
        let carol = store
            .create_account(NewAccount {
                username: "carol".into(),
                email: "carol@test.com".into(),
                password_hash: "hash".into(),
                role_id: 1,
            })
            .await
            .unwrap();
        for (user_id, rating) in [(account.id, 5), (bob.id, 4), (carol.id, 4)] {
            store
                .create_review(NewReview { user_id, phone_id: phone.id, rating, content: "x".into() })
                .await
                .unwrap();
        }

        let summary = store.find_phone_summary(phone.id).await.unwrap().unwrap();
        assert_eq!(summary.avg_rating, Some(4.33));
        assert_eq!(summary.full_name, "Acme One");
    }

    #[tokio::test]
    async fn account_delete_cascades_owned_rows() {
        let (store, account, phone) = store_with_phone().await;
        store
            .create_review(NewReview { user_id: account.id, phone_id: phone.id, rating: 3, content: "x".into() })
            .await
            .unwrap();
        store
            .create_profile(NewProfile {
                user_id: account.id,
                full_name: "Alice".into(),
                biodata: String::new(),
                image_url: DEFAULT_PROFILE_IMAGE.into(),
                birthday: None,
            })
            .await
            .unwrap();

        assert!(store.delete_account(account.id).await.unwrap());
        assert!(store.find_profile_by_account(account.id).await.unwrap().is_none());
        assert!(store.list_account_reviews(account.id).await.unwrap().is_empty());
    }
}
