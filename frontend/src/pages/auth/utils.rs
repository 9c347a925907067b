pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 24;
pub const PASSWORD_MIN: usize = 6;

pub fn validate_login(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".into());
    }
    if password.is_empty() {
        return Err("Password is required".into());
    }
    Ok(())
}

/// Mirrors the backend's sign-up rules; username problems are reported
/// before email problems, email before password.
pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), String> {
    let username = username.trim();
    let length = username.chars().count();
    if length == 0 {
        return Err("Username is required".into());
    }
    if length > USERNAME_MAX {
        return Err(format!("Username must be max {} characters", USERNAME_MAX));
    }
    if length < USERNAME_MIN {
        return Err(format!(
            "Username must be at least {} characters long",
            USERNAME_MIN
        ));
    }

    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required".into());
    }
    if !is_valid_email(email) {
        return Err("Invalid email address".into());
    }

    if password.is_empty() {
        return Err("Password is required".into());
    }
    if password.chars().count() < PASSWORD_MIN {
        return Err(format!(
            "Password must be at least {} characters long",
            PASSWORD_MIN
        ));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}
