use crate::entities::{
    comments, likes, photos, profiles, slideshow_photos, user_roles, users, videos,
};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use std::env;
use std::time::Duration;
use tracing::info;

pub async fn setup_database() -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    info!("📂 Database: {}", db_url);

    let mut opt = ConnectOptions::new(&db_url);
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(30))
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;

    info!("✅ Database connected successfully");

    run_migrations(&db).await?;

    Ok(db)
}

pub async fn run_migrations(db: &DatabaseConnection) -> anyhow::Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmts = vec![
        schema
            .create_table_from_entity(users::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(profiles::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(user_roles::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(photos::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(videos::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(slideshow_photos::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(comments::Entity)
            .if_not_exists()
            .to_owned(),
        schema
            .create_table_from_entity(likes::Entity)
            .if_not_exists()
            .to_owned(),
    ];

    for stmt in stmts {
        db.execute(builder.build(&stmt)).await?;
    }

    info!("✅ Schema is up to date");

    Ok(())
}
