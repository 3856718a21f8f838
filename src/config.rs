// src/config.rs

use dotenvy::dotenv;
use std::env;

/// Number of questions sampled for one quiz. A difficulty with fewer
/// questions just yields a shorter quiz.
pub const QUIZ_QUESTION_COUNT: i64 = 5;

/// Points deducted for a wrong answer, regardless of difficulty.
pub const WRONG_ANSWER_PENALTY: i32 = -2;

/// Page size for the results history listing.
pub const RESULTS_PER_PAGE: i64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
        }
    }
}
