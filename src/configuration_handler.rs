use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

/// Room-booking service for campus clubs.
#[derive(Debug, Clone, Parser)]
pub struct ConfigurationHandler {
    /// Port the HTTP server listens on.
    #[arg(long, env = "PORT", default_value = "3000")]
    port: String,

    /// Postgres connection URL. Without it bookings are kept in memory only
    /// and are lost on restart.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Password expected in the x-admin-password header on admin routes.
    #[arg(long, env = "ADMIN_PASSWORD", default_value = "123")]
    admin_password: String,

    /// HTML file served as the booking form.
    #[arg(long, env = "FRONTEND_PATH", default_value = "frontend/index.html")]
    frontend_path: PathBuf,

    /// Title substituted into the served frontend.
    #[arg(long, env = "WEBSITE_TITLE", default_value = "Campus Space Booking")]
    website_title: String,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        dotenvy::dotenv().ok();
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn website_title(&self) -> String {
        self.website_title.clone()
    }

    fn admin_password(&self) -> String {
        self.admin_password.clone()
    }

    fn frontend_path(&self) -> PathBuf {
        self.frontend_path.clone()
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }
}
