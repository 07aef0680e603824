//! Role names carried in access tokens and the edit permission rule.

use crate::types::UserId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Whether a user may modify an article: admins always, otherwise only the
/// original creator. Articles without a recorded creator are admin-only.
pub fn can_edit(created_by: Option<UserId>, user_id: UserId, role: &str) -> bool {
    if role == ROLE_ADMIN {
        return true;
    }
    created_by == Some(user_id)
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn admin_can_edit_anything() {
        assert!(can_edit(None, Uuid::new_v4(), ROLE_ADMIN));
        assert!(can_edit(Some(Uuid::new_v4()), Uuid::new_v4(), ROLE_ADMIN));
    }

    #[test]
    fn creator_can_edit_own_article() {
        let me = Uuid::new_v4();
        assert!(can_edit(Some(me), me, ROLE_USER));
        assert!(!can_edit(Some(Uuid::new_v4()), me, ROLE_USER));
        assert!(!can_edit(None, me, ROLE_USER));
    }
}
