use std::time::Duration;

/// Sleeps for `delay`, skipping the timer entirely for zero.
pub(crate) async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
