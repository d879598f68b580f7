//! Schema CLI: `cargo run -p migration -- up` applies pending migrations to
//! `DATABASE_URL`, `down` reverts the latest one.

use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(migration::Migrator).await;
}
