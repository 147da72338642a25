//! Authentication module
//!
//! This module provides authentication functionality including:
//! - Credential validation and session lifecycle (auth gateway)
//! - Opaque-token session store with a fixed absolute TTL
//! - Password hashing and verification
//! - Session-gating middleware and cookie plumbing

pub mod cookies;
pub mod gateway;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod session;

pub use gateway::AuthGateway;
pub use handlers::{login, login_page, logout, session_check};
pub use middleware::{require_session, CurrentUser};
pub use password::{hash_password, verify_password};
pub use session::{Session, SessionStore};
