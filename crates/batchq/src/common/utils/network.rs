pub fn get_hostname(preferred: Option<String>) -> String {
    preferred.unwrap_or_else(|| gethostname::gethostname().to_string_lossy().into_owned())
}

/// Name of the user on whose behalf requests are sent.
pub fn get_username() -> String {
    if let Ok(Some(user)) = nix::unistd::User::from_uid(nix::unistd::getuid()) {
        return user.name;
    }
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .unwrap_or_else(|_| "nobody".to_string())
}
