//! Request/response shapes that exist only at the HTTP boundary.

use serde::{Deserialize, Serialize};

use funnel_auth::{Role, UserRecord};
use funnel_core::UserId;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user; the password hash never crosses this boundary.
#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for UserBody {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slice an already-filtered result set into one page.
///
/// Page numbers are 1-based; out-of-range pages yield an empty slice with
/// honest metadata rather than an error.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, limit: Option<usize>) -> (Vec<T>, PageMeta) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).max(1);

    let total = items.len();
    let total_pages = total.div_ceil(limit);

    // Query values are caller-controlled; the offset must not overflow.
    let offset = (page - 1).saturating_mul(limit);
    let slice: Vec<T> = items.into_iter().skip(offset).take(limit).collect();

    let meta = PageMeta {
        page,
        total_pages,
        total,
        has_next: page < total_pages,
        has_prev: page > 1 && total > 0,
    };

    (slice, meta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_of_many() {
        let (slice, meta) = paginate((0..25).collect(), Some(1), Some(10));
        assert_eq!(slice, (0..10).collect::<Vec<_>>());
        assert_eq!(meta.total, 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn last_partial_page() {
        let (slice, meta) = paginate((0..25).collect(), Some(3), Some(10));
        assert_eq!(slice, vec![20, 21, 22, 23, 24]);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn defaults_are_page_one_limit_ten() {
        let (slice, meta) = paginate((0..12).collect(), None, None);
        assert_eq!(slice.len(), 10);
        assert_eq!(meta.page, 1);
    }

    #[test]
    fn out_of_range_page_is_empty_but_honest() {
        let (slice, meta) = paginate(vec![1, 2, 3], Some(9), Some(10));
        assert!(slice.is_empty());
        assert_eq!(meta.total, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn absurd_page_number_does_not_overflow() {
        let (slice, meta) = paginate(vec![1, 2, 3], Some(usize::MAX), Some(10));
        assert!(slice.is_empty());
        assert_eq!(meta.page, usize::MAX);
        assert_eq!(meta.total, 3);
        assert!(!meta.has_next);
    }

    #[test]
    fn empty_set_has_zero_pages() {
        let (slice, meta) = paginate(Vec::<u8>::new(), None, None);
        assert!(slice.is_empty());
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_prev);
    }
}
