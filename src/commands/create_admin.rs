//! Create-admin command - bootstraps an admin account.
//!
//! Registration only ever creates regular accounts and every
//! admin-creating endpoint requires an existing admin, so a fresh
//! install needs this command once to open the back office.

use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::CreateCustomer;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{Accounts, CustomerService};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let uow = Arc::new(Persistence::new(db.get_connection()));
    let accounts = Accounts::new(uow);

    let admin = accounts
        .create(CreateCustomer {
            name: args.name,
            email: args.email,
            password: args.password,
            gender: None,
            profile: None,
            is_admin: true,
        })
        .await?;

    tracing::info!(id = admin.id, email = %admin.email, "Admin account created");
    println!("Admin account created: {} <{}>", admin.name, admin.email);

    Ok(())
}
