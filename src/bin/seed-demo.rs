//! Demo data seed script
//!
//! Seeds the database with:
//! - 4 teachers who can manage announcements
//! - 3 announcements: one expired, one active, one scheduled
//!
//! Usage:
//!   DATABASE_URL=... ./seed-demo [--reset]

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use std::env;

use announcements_api::{
    db::{self, postgres::PgAnnouncementStore, AnnouncementStore},
    models::announcement::NewAnnouncement,
};

#[derive(Parser)]
#[command(name = "seed-demo", about = "Seed demo teachers and announcements")]
struct Args {
    /// Delete every existing announcement before seeding
    #[arg(long)]
    reset: bool,
}

const TEACHERS: &[(&str, &str)] = &[
    ("mrodriguez", "Ms. Rodriguez"),
    ("mchen", "Mr. Chen"),
    ("jwilson", "Mr. Wilson"),
    ("principal", "Principal Martinez"),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Demo Data ===");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;

    if args.reset {
        let removed = sqlx::query("DELETE FROM announcements")
            .execute(&pool)
            .await?
            .rows_affected();
        println!("Removed {removed} existing announcements");
    }

    for &(username, display_name) in TEACHERS {
        sqlx::query(
            "INSERT INTO teachers (username, display_name) VALUES ($1, $2)
             ON CONFLICT (username) DO UPDATE SET display_name = EXCLUDED.display_name",
        )
        .bind(username)
        .bind(display_name)
        .execute(&pool)
        .await
        .with_context(|| format!("Failed to upsert teacher {username}"))?;
    }
    println!("  {} teachers", TEACHERS.len());

    let now = Utc::now();
    let announcements = [
        (
            "Spring concert tickets are sold out. Thank you!",
            Some(now - Duration::days(30)),
            now - Duration::days(7),
        ),
        (
            "Activity registration is open until the end of the month. Don't lose your spot!",
            None,
            now + Duration::days(14),
        ),
        (
            "Summer camp sign-ups open next week in the main office.",
            Some(now + Duration::days(7)),
            now + Duration::days(45),
        ),
    ];

    let store = PgAnnouncementStore::new(pool.clone());
    for (message, start_date, end_date) in announcements {
        let created = store
            .insert(NewAnnouncement {
                message: message.to_string(),
                start_date,
                end_date,
                created_at: now,
            })
            .await?;
        tracing::info!(announcement_id = %created.id, "Seeded announcement");
    }
    println!("  {} announcements", announcements.len());

    println!("Done.");
    Ok(())
}
