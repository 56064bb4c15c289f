//! Resolved actor identity

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// The authenticated caller of a mutating operation.
///
/// Authentication happens upstream; the core trusts whatever identity is
/// handed to it and only records/authorizes with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub display_name: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn new(user_id: UserId, display_name: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            is_admin,
        }
    }
}
