// Shared test helpers for database setup, mail doubles and running servers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use esya_ticketing::error_handling::MailError;
use esya_ticketing::{run_migrations, serve, AppState, TicketEmail, TicketMailer};

#[allow(dead_code)] // Used by other test files
pub const BASE_URL: &str = "http://tickets.test";

/// Creates a single-connection in-memory database with migrations applied.
#[allow(dead_code)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Mailer that records every ticket instead of sending it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<TicketEmail>>,
}

#[allow(dead_code)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<TicketEmail> {
        self.sent.lock().expect("mailer lock").clone()
    }
}

#[async_trait]
impl TicketMailer for RecordingMailer {
    async fn send_ticket(&self, email: &TicketEmail) -> Result<(), MailError> {
        self.sent.lock().expect("mailer lock").push(email.clone());
        Ok(())
    }
}

/// Mailer that always fails as if credentials were missing.
#[allow(dead_code)]
pub struct FailingMailer;

#[async_trait]
impl TicketMailer for FailingMailer {
    async fn send_ticket(&self, _email: &TicketEmail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

/// App state backed by an in-memory database and a recording mailer.
#[allow(dead_code)]
pub async fn test_state() -> (AppState, Arc<RecordingMailer>, SqlitePool) {
    let pool = create_test_pool().await;
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(Some(pool.clone()), mailer.clone(), BASE_URL);
    (state, mailer, pool)
}

/// Serves `state` on an ephemeral local port.
///
/// Cancel the returned token to stop the server.
#[allow(dead_code)]
pub async fn spawn_server(state: AppState) -> (SocketAddr, CancellationToken) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        serve(listener, state, shutdown)
            .await
            .expect("test server failed");
    });
    (addr, token)
}

/// Returns a local address with nothing listening on it.
#[allow(dead_code)]
pub async fn closed_port_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}
