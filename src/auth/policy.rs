use super::repo_types::User;

/// Anything with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> i64;
}

/// Edit/delete rule shared by boards and comments: the owner or an administrator.
pub fn can_modify<T: Owned + ?Sized>(user: &User, resource: &T) -> bool {
    user.id == resource.owner_id() || user.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo_types::UserRole;
    use time::OffsetDateTime;

    struct Post(i64);

    impl Owned for Post {
        fn owner_id(&self) -> i64 {
            self.0
        }
    }

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            username: format!("user{id}"),
            password_hash: String::new(),
            role,
            withdrawal: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_may_modify() {
        assert!(can_modify(&user(1, UserRole::Member), &Post(1)));
    }

    #[test]
    fn stranger_may_not_modify() {
        assert!(!can_modify(&user(2, UserRole::Member), &Post(1)));
    }

    #[test]
    fn admin_may_modify_anything() {
        assert!(can_modify(&user(3, UserRole::Admin), &Post(1)));
    }
}
