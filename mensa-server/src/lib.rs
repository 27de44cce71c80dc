//! Mensa - discount pricing for the school cafeteria
//!
//! # Overview
//!
//! - **Discount engine** (`discount`): cached group lookup, fallback table,
//!   price calculation by group name or legacy account type
//! - **Database** (`db`): SQLite store for discount groups via sqlx
//! - **Services** (`services`): validated group management that keeps the
//!   engine cache in sync
//! - **CLI** (`cli`, `commands`): the `mensa` binary
//!
//! # Layout
//!
//! ```text
//! mensa-server/src/
//! ├── core/          # configuration, environment setup
//! ├── db/            # connection, migrations, repositories
//! ├── discount/      # engine, cache, clock, calculator, fallback
//! ├── services/      # discount group management
//! ├── commands/      # CLI command implementations
//! ├── cli.rs         # clap definitions
//! └── utils/         # errors, logging, validation
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod db;
pub mod discount;
pub mod services;
pub mod utils;

// Re-export common types
pub use core::{Config, setup_environment};
pub use discount::{DiscountEngine, DiscountGroupCache, DiscountGroupSource, GroupOrigin};
pub use services::DiscountGroupService;
pub use utils::{AppError, AppResult, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};
