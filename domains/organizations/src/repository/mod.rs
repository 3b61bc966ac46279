//! Repository implementations for the organizations domain

pub mod directory;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use directory::DirectoryRepository;
pub use transactions::{insert_app_user_tx, insert_organization_tx, set_current_organization_tx};

/// Combined repository access for the organizations domain
#[derive(Clone)]
pub struct OrganizationsRepositories {
    pool: PgPool,
    pub directory: DirectoryRepository,
}

impl OrganizationsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            directory: DirectoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
