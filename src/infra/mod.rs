pub mod ga_client;
pub mod google_auth;
pub mod http_client;
pub mod retry;
