/// Per-attempt timeout for "what is my IP" services.
pub const PUBLIC_IP_TIMEOUT_SECS: u64 = 3;

/// Tried in order; the first valid public address wins.
pub const PUBLIC_IP_SERVICES: [&str; 5] = [
    "https://api.ipify.org",
    "https://checkip.amazonaws.com",
    "https://icanhazip.com",
    "https://ipecho.net/plain",
    "https://myexternalip.com/raw",
];

pub const LOCALHOST: &str = "localhost";
