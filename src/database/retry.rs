use std::future::Future;
use std::time::Duration;

/// Executa `op` até `attempts` vezes, aguardando `delay` entre tentativas.
/// Retorna o último erro quando todas falham.
pub async fn retry_with_delay<T, E, F, Fut>(attempts: u32, delay: Duration, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                let remaining = attempts - attempt;
                log::error!("❌ Attempt {}/{} failed: {}", attempt, attempts, e);

                if remaining == 0 {
                    return Err(e);
                }

                log::info!(
                    "🔁 Retrying in {} seconds... ({} retries left)",
                    delay.as_secs_f32(),
                    remaining
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
