pub mod repository_error;
pub mod user_repo;
pub mod donation_request_repo;
pub mod blog_repo;
pub mod donor_repo;
pub mod reference_repo;

use mongodb::{
    options::{ClientOptions, Credential, ResolverConfig},
    Client, Database,
};

use crate::config::MongoConfig;

/// Open the process-wide store connection. Called once at startup; the
/// resulting handle is shared by every repository.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options =
        ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("DonorlinkBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout =
        Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }
    let client = Client::with_options(client_options)?;
    Ok(client.database(&config.database))
}
