use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{ApiError, USER_NOT_FOUND};
use crate::models::join::JoinData;
use crate::models::photo_verification::{ImageKind, PhotoVerification};
use crate::models::profile_diff::{Approval, ProfileChanges, ProfileDiff};
use crate::models::user::{Chaincode, Contact, Profile, User};
use crate::models::user_status::{StatusUpdate, UserStatus};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Username {0} is already taken")]
    UsernameTaken(String),
    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Profile diff {0} not found")]
    ProfileDiffNotFound(String),
    #[error("No verification record found for user {0}")]
    VerificationRecordNotFound(String),
    #[error("Join data already present for user {0}")]
    JoinDataExists(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken(_) => ApiError::Conflict(err.to_string()),
            StoreError::UserNotFound(_) => ApiError::not_found(USER_NOT_FOUND),
            StoreError::ProfileDiffNotFound(_) => ApiError::not_found("Profile Diff doesn't exist"),
            StoreError::JoinDataExists(_) => ApiError::Conflict("User data is already present!".into()),
            StoreError::VerificationRecordNotFound(_) => ApiError::internal(err),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Default)]
struct Collections {
    users: HashMap<String, User>,
    profile_diffs: HashMap<String, ProfileDiff>,
    statuses: HashMap<String, UserStatus>,
    chaincodes: HashMap<String, Chaincode>,
    photo_verifications: HashMap<String, PhotoVerification>,
    join_data: HashMap<String, JoinData>,
}

impl Collections {
    fn username_owner(&self, username: &str) -> Option<&str> {
        self.users
            .values()
            .find(|u| u.profile.username == username)
            .map(|u| u.id.as_str())
    }

    fn pending_diff(&self, user_id: &str) -> Option<&ProfileDiff> {
        self.profile_diffs
            .values()
            .find(|d| d.user_id == user_id && d.approval == Approval::Pending)
    }

    /// The diff with `id`, as long as it is still pending.
    fn pending_diff_mut(&mut self, id: &str) -> StoreResult<&mut ProfileDiff> {
        self.profile_diffs
            .get_mut(id)
            .filter(|d| d.approval == Approval::Pending)
            .ok_or_else(|| StoreError::ProfileDiffNotFound(id.to_string()))
    }
}

/// In-process document store. Cloning shares the underlying collections.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<Collections>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the user, or replaces the profile of the user that already
    /// holds the same username. Returns the user id.
    pub async fn add_or_update_user(&self, mut profile: Profile, contact: Contact) -> String {
        profile.username = profile.username.to_lowercase();
        let now = Utc::now();
        let mut db = self.inner.write().await;

        if let Some(id) = db.username_owner(&profile.username).map(str::to_string) {
            if let Some(user) = db.users.get_mut(&id) {
                profile.created_at = user.profile.created_at;
                profile.updated_at = Some(now);
                user.profile = profile;
                user.contact = contact;
            }
            debug!("Updated user {}", id);
            return id;
        }

        profile.created_at = Some(now);
        profile.updated_at = Some(now);
        let id = Uuid::new_v4().to_string();
        db.users.insert(
            id.clone(),
            User {
                id: id.clone(),
                profile,
                contact,
                chaincode: None,
            },
        );
        debug!("Created user {}", id);
        id
    }

    /// Inserts users keeping their ids, as read from a seed file.
    pub async fn load_users(&self, users: Vec<User>) -> StoreResult<usize> {
        let mut db = self.inner.write().await;
        let mut loaded = 0;
        for mut user in users {
            user.profile.username = user.profile.username.to_lowercase();
            if let Some(owner) = db.username_owner(&user.profile.username) {
                if owner != user.id {
                    return Err(StoreError::UsernameTaken(user.profile.username));
                }
            }
            db.users.insert(user.id.clone(), user);
            loaded += 1;
        }
        Ok(loaded)
    }

    pub async fn find_user_by_id(&self, id: &str) -> Option<User> {
        self.inner.read().await.users.get(id).cloned()
    }

    pub async fn find_user_by_username(&self, username: &str) -> Option<User> {
        let username = username.to_lowercase();
        let db = self.inner.read().await;
        db.users
            .values()
            .find(|u| u.profile.username == username)
            .cloned()
    }

    pub async fn is_username_available(&self, username: &str) -> bool {
        let username = username.to_lowercase();
        self.inner.read().await.username_owner(&username).is_none()
    }

    /// Applies `f` to the stored user. A rename onto a taken username is
    /// rolled back.
    pub async fn update_user<F>(&self, id: &str, f: F) -> StoreResult<User>
    where
        F: FnOnce(&mut User),
    {
        let mut db = self.inner.write().await;
        let original = db
            .users
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound(id.to_string()))?;

        let mut updated = original.clone();
        f(&mut updated);
        updated.profile.username = updated.profile.username.to_lowercase();

        if updated.profile.username != original.profile.username {
            if let Some(owner) = db.username_owner(&updated.profile.username) {
                if owner != id {
                    return Err(StoreError::UsernameTaken(updated.profile.username));
                }
            }
        }

        updated.profile.updated_at = Some(Utc::now());
        db.users.insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Users visible in listings: not archived, username starting with
    /// `prefix` when given, ordered by `(username, id)`.
    pub async fn list_active_users(&self, prefix: Option<&str>) -> Vec<User> {
        let prefix = prefix.map(str::to_lowercase);
        let db = self.inner.read().await;
        let mut users: Vec<User> = db
            .users
            .values()
            .filter(|u| !u.profile.roles.archived)
            .filter(|u| match &prefix {
                Some(p) => u.profile.username.starts_with(p.as_str()),
                None => true,
            })
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            (a.profile.username.as_str(), a.id.as_str())
                .cmp(&(b.profile.username.as_str(), b.id.as_str()))
        });
        users
    }

    pub async fn linked_discord_ids(&self) -> HashSet<String> {
        let db = self.inner.read().await;
        db.users
            .values()
            .filter_map(|u| u.profile.discord_id.clone())
            .collect()
    }

    /// Sets `roles.in_discord` to `value` on every user; returns how many changed.
    pub async fn set_in_discord_for_all(&self, value: bool) -> usize {
        let mut db = self.inner.write().await;
        let now = Utc::now();
        let mut changed = 0;
        for user in db.users.values_mut() {
            if user.profile.roles.in_discord != value {
                changed += 1;
            }
            user.profile.roles.in_discord = value;
            user.profile.updated_at = Some(now);
        }
        changed
    }

    pub async fn add_profile_diff(&self, user_id: &str, changes: ProfileChanges) -> String {
        let id = Uuid::new_v4().to_string();
        let diff = ProfileDiff {
            id: id.clone(),
            user_id: user_id.to_string(),
            changes,
            approval: Approval::Pending,
            message: None,
            timestamp: Utc::now(),
        };
        self.inner.write().await.profile_diffs.insert(id.clone(), diff);
        id
    }

    /// Merges `changes` into the user's pending diff, creating one if none
    /// is pending. A user has at most one pending diff.
    pub async fn upsert_pending_diff(&self, user_id: &str, changes: ProfileChanges) -> String {
        let mut db = self.inner.write().await;
        let pending = db.pending_diff(user_id).map(|d| d.id.clone());

        if let Some(diff) = pending.and_then(|id| db.profile_diffs.get_mut(&id)) {
            diff.changes.merge(changes);
            diff.timestamp = Utc::now();
            return diff.id.clone();
        }

        let id = Uuid::new_v4().to_string();
        db.profile_diffs.insert(
            id.clone(),
            ProfileDiff {
                id: id.clone(),
                user_id: user_id.to_string(),
                changes,
                approval: Approval::Pending,
                message: None,
                timestamp: Utc::now(),
            },
        );
        id
    }

    pub async fn pending_diff(&self, user_id: &str) -> Option<ProfileDiff> {
        self.inner.read().await.pending_diff(user_id).cloned()
    }

    pub async fn find_profile_diff(&self, id: &str) -> Option<ProfileDiff> {
        self.inner.read().await.profile_diffs.get(id).cloned()
    }

    /// Settles a pending diff. A diff that was already approved or rejected
    /// counts as missing.
    pub async fn set_diff_approval(
        &self,
        id: &str,
        approval: Approval,
        message: Option<String>,
    ) -> StoreResult<ProfileDiff> {
        let mut db = self.inner.write().await;
        let diff = db.pending_diff_mut(id)?;
        diff.approval = approval;
        diff.message = message;
        Ok(diff.clone())
    }

    /// Applies `changes` to the owner of the pending diff `id` and marks the
    /// diff approved, under one lock. The diff must belong to `user_id`.
    pub async fn approve_diff(
        &self,
        id: &str,
        user_id: &str,
        changes: &ProfileChanges,
        message: Option<String>,
    ) -> StoreResult<ProfileDiff> {
        let mut db = self.inner.write().await;
        if db.pending_diff_mut(id)?.user_id != user_id {
            return Err(StoreError::ProfileDiffNotFound(id.to_string()));
        }

        let user = db
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))?;
        changes.apply_to(&mut user.profile);
        user.profile.updated_at = Some(Utc::now());

        let diff = db.pending_diff_mut(id)?;
        diff.approval = Approval::Approved;
        diff.message = message;
        Ok(diff.clone())
    }

    pub async fn get_user_status(&self, user_id: &str) -> Option<UserStatus> {
        self.inner.read().await.statuses.get(user_id).cloned()
    }

    /// Creates the user's status document on first write.
    pub async fn update_user_status(&self, user_id: &str, update: StatusUpdate) -> UserStatus {
        let mut db = self.inner.write().await;
        let status = db
            .statuses
            .entry(user_id.to_string())
            .or_insert_with(|| UserStatus {
                id: Uuid::new_v4().to_string(),
                user_id: user_id.to_string(),
                current_status: None,
                monthly_hours: None,
            });
        status.apply(update, Utc::now());
        status.clone()
    }

    pub async fn find_join_data(&self, user_id: &str) -> Vec<JoinData> {
        let db = self.inner.read().await;
        db.join_data
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn add_join_data(&self, data: JoinData) -> StoreResult<String> {
        let mut db = self.inner.write().await;
        if db.join_data.values().any(|d| d.user_id == data.user_id) {
            return Err(StoreError::JoinDataExists(data.user_id));
        }
        let id = Uuid::new_v4().to_string();
        db.join_data.insert(id.clone(), data);
        Ok(id)
    }

    /// Records a chaincode for the user and returns it.
    pub async fn create_chaincode(&self, user_id: &str) -> StoreResult<String> {
        let mut db = self.inner.write().await;
        let user = db
            .users
            .get_mut(user_id)
            .ok_or_else(|| StoreError::UserNotFound(user_id.to_string()))?;

        let chaincode = Uuid::new_v4().simple().to_string();
        user.chaincode = Some(chaincode.clone());
        db.chaincodes.insert(
            chaincode.clone(),
            Chaincode {
                user_id: user_id.to_string(),
                timestamp: Utc::now(),
            },
        );
        Ok(chaincode)
    }

    pub async fn find_chaincode(&self, chaincode: &str) -> Option<Chaincode> {
        self.inner.read().await.chaincodes.get(chaincode).cloned()
    }

    /// Replaces the user's verification record.
    pub async fn set_photo_verification(&self, record: PhotoVerification) {
        self.inner
            .write()
            .await
            .photo_verifications
            .insert(record.user_id.clone(), record);
    }

    pub async fn find_photo_verification(&self, user_id: &str) -> StoreResult<PhotoVerification> {
        self.inner
            .read()
            .await
            .photo_verifications
            .get(user_id)
            .cloned()
            .ok_or_else(|| StoreError::VerificationRecordNotFound(user_id.to_string()))
    }

    pub async fn approve_photo(
        &self,
        user_id: &str,
        kind: ImageKind,
    ) -> StoreResult<PhotoVerification> {
        let mut db = self.inner.write().await;
        let record = db
            .photo_verifications
            .get_mut(user_id)
            .ok_or_else(|| StoreError::VerificationRecordNotFound(user_id.to_string()))?;
        record.approve(kind);
        Ok(record.clone())
    }
}
