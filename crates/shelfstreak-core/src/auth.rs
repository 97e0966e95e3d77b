//! Authorization for administrative commands.

use std::collections::HashSet;

use crate::storage::AdminConfig;
use crate::user::UserId;

/// Fixed set of users allowed to run administrative commands.
#[derive(Debug, Clone, Default)]
pub struct AdminAllowList {
    admins: HashSet<UserId>,
}

impl AdminAllowList {
    pub fn new<I, U>(admins: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        Self {
            admins: admins.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.user_ids.iter().map(String::as_str))
    }

    pub fn is_authorized(&self, caller: &UserId) -> bool {
        self.admins.contains(caller)
    }
}
