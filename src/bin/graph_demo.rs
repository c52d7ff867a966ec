//! Seeds a handful of users and walks friendship, subscription, block and
//! broadcast resolution against the store named in settings.
//!
//! $ cargo run --bin graph_demo -- --settings=settings/dev.toml

use rapport::application_port::count_friends;
use rapport::domain_model::{Caller, Role, UserRecord};
use rapport::logger::*;
use rapport::server::Server;
use rapport::settings::*;

fn emails(users: &[UserRecord]) -> Vec<&str> {
    users.iter().map(|u| u.email.as_str()).collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    logger.reload_from_config(&LogConfig::from(&project_settings.log))?;

    let server = Server::try_new(&project_settings).await?;
    let repos = &server.repos;

    let andy = repos.seed_user("andy@example.com", Role::User).await?;
    let john = repos.seed_user("john@example.com", Role::User).await?;
    let lisa = repos.seed_user("lisa@example.com", Role::User).await?;
    let kate = repos.seed_user("kate@example.com", Role::User).await?;
    let ops = repos.seed_user("ops@example.com", Role::Admin).await?;

    server
        .friendship_service
        .create_friendship(Caller::user(andy), "andy@example.com", "john@example.com")
        .await?;
    server
        .friendship_service
        .create_friendship(Caller::user(lisa), "lisa@example.com", "john@example.com")
        .await?;
    server
        .friendship_service
        .create_friendship(Caller::user(andy), "andy@example.com", "lisa@example.com")
        .await?;

    let friends = server
        .friendship_service
        .retrieve_friends_list(Caller::user(john), "john@example.com")
        .await?;
    info!(friends = ?emails(&friends), count = count_friends(&friends), "john's friends");

    let common = server
        .friendship_service
        .retrieve_common_friends(Caller::user(andy), "andy@example.com", "john@example.com")
        .await?;
    info!(common = ?emails(&common), "common friends of andy and john");

    server
        .subscription_service
        .create_subscription(Caller::user(kate), "kate@example.com", "john@example.com")
        .await?;

    // lisa is john's friend but must subscribe before she can block him
    let rejected = server
        .block_service
        .create_block_relationship(Caller::user(lisa), "lisa@example.com", "john@example.com")
        .await;
    info!(?rejected, "block without subscription");

    server
        .subscription_service
        .create_subscription(Caller::user(lisa), "lisa@example.com", "john@example.com")
        .await?;
    server
        .block_service
        .create_block_relationship(Caller::user(lisa), "lisa@example.com", "john@example.com")
        .await?;

    let recipients = server
        .notification_service
        .get_update_recipients(
            Caller::admin(ops),
            "john@example.com",
            "Hello World! @andy@example.com @ops@example.com",
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&recipients)?);

    server.shutdown().await;
    Ok(())
}
