//! Background jobs.
//!
//! Order notifications are queued as durable jobs in Postgres and
//! drained by the `jobs work` command, so a crash between order commit
//! and notification delivery loses nothing.

pub mod email_job;
pub mod telegram_job;

pub use email_job::{email_job_handler, EmailJob};
pub use telegram_job::{telegram_job_handler, TelegramJob};
