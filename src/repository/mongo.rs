use bson::doc;
use mongodb::{
    options::{ClientOptions, Credential, IndexOptions, ResolverConfig},
    Client, Database, IndexModel,
};
use tracing::{info, instrument};

use crate::config::mongo_conf::MongoConfig;
use crate::repository::repository_error::RepositoryResult;

pub const USERS: &str = "users";
pub const CATEGORIES: &str = "categories";
pub const COURSES: &str = "courses";
pub const ANNOUNCEMENTS: &str = "announcements";

/// Build one client for the whole process; every repository shares its pool.
pub async fn connect(config: &MongoConfig) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse_with_resolver_config(&config.uri, ResolverConfig::cloudflare()).await?;
    client_options.app_name = Some("ElearningBackend".to_string());
    client_options.max_pool_size = Some(config.pool_size);
    client_options.connect_timeout = Some(std::time::Duration::from_secs(config.connection_timeout_secs));
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        client_options.credential = Some(
            Credential::builder()
                .username(username.clone())
                .password(password.clone())
                .build(),
        );
    }
    let client = Client::with_options(client_options)?;
    info!(database = %config.database, "MongoDB client created");
    Ok(client.database(&config.database))
}

#[instrument(skip(db))]
pub async fn ensure_indexes(db: &Database) -> RepositoryResult<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<bson::Document>(USERS)
        .create_index(
            IndexModel::builder().keys(doc! { "email": 1 }).options(unique.clone()).build(),
            None,
        )
        .await?;
    db.collection::<bson::Document>(CATEGORIES)
        .create_index(
            IndexModel::builder().keys(doc! { "name": 1 }).options(unique).build(),
            None,
        )
        .await?;
    db.collection::<bson::Document>(COURSES)
        .create_index(IndexModel::builder().keys(doc! { "instructor": 1 }).build(), None)
        .await?;
    db.collection::<bson::Document>(ANNOUNCEMENTS)
        .create_index(IndexModel::builder().keys(doc! { "createdAt": -1 }).build(), None)
        .await?;

    info!("Collection indexes ensured");
    Ok(())
}
