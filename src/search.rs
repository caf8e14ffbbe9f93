use crate::api::User;

/// True when `needle` (already lower-cased) occurs in the user's name, email
/// or username, ignoring case. An empty needle matches everyone.
pub fn matches(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || user.name.to_lowercase().contains(needle)
        || user.email.to_lowercase().contains(needle)
        || user.username.to_lowercase().contains(needle)
}

/// Order-preserving subset of `users` matching `query`.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let q = query.to_lowercase();
    if q.is_empty() {
        return users.to_vec();
    }
    users.iter().filter(|u| matches(u, &q)).cloned().collect()
}
