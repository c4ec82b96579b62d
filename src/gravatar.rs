/// Gravatar URL for an email address. Stable contract:
/// `https://www.gravatar.com/avatar/{md5 of lowercased email}?d=mm&s=256`
pub fn gravatar_url(email: &str) -> String {
    let digest = md5::compute(email.trim().to_lowercase().as_bytes());
    format!("https://www.gravatar.com/avatar/{digest:x}?d=mm&s=256")
}
