//! Cursor pagination over the `(username, id)` ordering of users.
//!
//! A cursor is the base64url-encoded sort key of a boundary document, so a
//! listing resumes at the same place even when documents are added or
//! removed in between.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

pub const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid cursor")]
    InvalidCursor,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(rename = "u")]
    pub username: String,
    #[serde(rename = "i")]
    pub id: String,
}

impl Cursor {
    pub fn of(user: &User) -> Self {
        Self {
            username: user.profile.username.clone(),
            id: user.id.clone(),
        }
    }

    pub fn encode(&self) -> String {
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    pub fn decode(raw: &str) -> Result<Self, PaginationError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|_| PaginationError::InvalidCursor)?;
        serde_json::from_slice(&bytes).map_err(|_| PaginationError::InvalidCursor)
    }

    fn key_of(user: &User) -> (&str, &str) {
        (user.profile.username.as_str(), user.id.as_str())
    }

    fn key(&self) -> (&str, &str) {
        (self.username.as_str(), self.id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
    Start,
    Page(usize),
    After(Cursor),
    Before(Cursor),
}

impl Position {
    /// `next`, `prev` and `page` are mutually exclusive; the query schema
    /// rejects combinations before this is reached.
    pub fn from_query(
        page: Option<i64>,
        next: Option<&str>,
        prev: Option<&str>,
    ) -> Result<Self, PaginationError> {
        if let Some(raw) = next {
            return Ok(Self::After(Cursor::decode(raw)?));
        }
        if let Some(raw) = prev {
            return Ok(Self::Before(Cursor::decode(raw)?));
        }
        match page {
            Some(p) if p > 0 => Ok(Self::Page(p as usize)),
            _ => Ok(Self::Start),
        }
    }
}

/// Slices `sorted` (already in `(username, id)` order) at `position`.
pub fn paginate(sorted: Vec<User>, position: &Position, size: usize) -> Vec<User> {
    let size = size.max(1);
    match position {
        Position::Start => sorted.into_iter().take(size).collect(),
        Position::Page(page) => sorted
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect(),
        Position::After(cursor) => sorted
            .into_iter()
            .filter(|u| Cursor::key_of(u) > cursor.key())
            .take(size)
            .collect(),
        Position::Before(cursor) => {
            let before: Vec<User> = sorted
                .into_iter()
                .filter(|u| Cursor::key_of(u) < cursor.key())
                .collect();
            let skip = before.len().saturating_sub(size);
            before.into_iter().skip(skip).collect()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    pub next: String,
    pub prev: String,
}

/// Builds `next`/`prev` links around `items`. Only `search` and `size` are
/// carried over; both links are empty when the page is empty.
pub fn links(base: &str, items: &[User], search: Option<&str>, size: usize) -> Links {
    let (Some(first), Some(last)) = (items.first(), items.last()) else {
        return Links::default();
    };

    let build = |direction: &str, cursor: &Cursor| {
        let mut params = Vec::with_capacity(3);
        if let Some(search) = search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        params.push(format!("size={size}"));
        params.push(format!(
            "{direction}={}",
            urlencoding::encode(&cursor.encode())
        ));
        format!("{base}?{}", params.join("&"))
    };

    Links {
        next: build("next", &Cursor::of(last)),
        prev: build("prev", &Cursor::of(first)),
    }
}
