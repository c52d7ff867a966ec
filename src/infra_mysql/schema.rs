use sqlx::MySqlPool;

const SCHEMA: [&str; 4] = [
    r#"
CREATE TABLE IF NOT EXISTS user (
    user_id    BIGINT       NOT NULL AUTO_INCREMENT,
    email      VARCHAR(256) CHARACTER SET ascii COLLATE ascii_general_ci NOT NULL,
    role       VARCHAR(16)  NOT NULL DEFAULT 'user',
    created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    PRIMARY KEY (user_id),
    UNIQUE KEY uq_user_email (email)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS friendship (
    user_low   BIGINT       NOT NULL,
    user_high  BIGINT       NOT NULL,
    created_at TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    PRIMARY KEY (user_low, user_high),
    KEY idx_friendship_high (user_high),
    CONSTRAINT chk_friendship_canonical CHECK (user_low < user_high),
    CONSTRAINT fk_friendship_low FOREIGN KEY (user_low) REFERENCES user (user_id),
    CONSTRAINT fk_friendship_high FOREIGN KEY (user_high) REFERENCES user (user_id)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS subscription (
    requestor_id BIGINT       NOT NULL,
    target_id    BIGINT       NOT NULL,
    created_at   TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    PRIMARY KEY (requestor_id, target_id),
    KEY idx_subscription_target (target_id),
    CONSTRAINT chk_subscription_self CHECK (requestor_id <> target_id),
    CONSTRAINT fk_subscription_requestor FOREIGN KEY (requestor_id) REFERENCES user (user_id),
    CONSTRAINT fk_subscription_target FOREIGN KEY (target_id) REFERENCES user (user_id)
)
"#,
    r#"
CREATE TABLE IF NOT EXISTS block_relationship (
    requestor_id BIGINT       NOT NULL,
    target_id    BIGINT       NOT NULL,
    created_at   TIMESTAMP(6) NOT NULL DEFAULT CURRENT_TIMESTAMP(6),
    PRIMARY KEY (requestor_id, target_id),
    KEY idx_block_target (target_id),
    CONSTRAINT chk_block_self CHECK (requestor_id <> target_id),
    CONSTRAINT fk_block_requestor FOREIGN KEY (requestor_id) REFERENCES user (user_id),
    CONSTRAINT fk_block_target FOREIGN KEY (target_id) REFERENCES user (user_id)
)
"#,
];

/// Creates the relationship tables if they are missing.
pub async fn migrate(pool: &MySqlPool) -> anyhow::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
