//! # Payment Simulation
//!
//! Drives a confirmed checkout through its timed phases:
//!
//! ```text
//! Processing --(processing delay)--> Success --(redirect delay)--> Redirected
//! ```
//!
//! The timer runs once per confirmation and cannot be cancelled. The lock is
//! only held while a transition is applied, never across a sleep.

use crate::config::CheckoutConfig;
use grocer_core::Storefront;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Wait out the simulated payment, then the success screen.
pub async fn run_payment_timer(storefront: Arc<RwLock<Storefront>>, delays: CheckoutConfig) {
    tokio::time::sleep(delays.processing_delay()).await;
    if let Err(e) = storefront.write().await.complete_payment() {
        tracing::warn!("Payment timer stopped: {}", e);
        return;
    }
    tracing::info!("Payment processed");

    tokio::time::sleep(delays.redirect_delay()).await;
    match storefront.write().await.finish_checkout() {
        Ok(_) => tracing::info!("Checkout finished, cart cleared"),
        Err(e) => tracing::warn!("Redirect skipped: {}", e),
    }
}
