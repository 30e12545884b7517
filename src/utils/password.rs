use super::error::AppError;

/// bcrypt roda no pool de blocking do tokio para não travar o worker.
pub async fn hash_password(plain: &str, cost: u32) -> Result<String, AppError> {
    let plain = plain.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hash task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("password hashing failed: {}", e)))
}

/// `Ok(false)` também quando o valor salvo não é um hash bcrypt válido.
pub async fn verify_password(plain: &str, hashed: &str) -> Result<bool, AppError> {
    let plain = plain.to_string();
    let hashed = hashed.to_string();
    let result = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hashed))
        .await
        .map_err(|e| AppError::Internal(format!("verify task failed: {}", e)))?;

    match result {
        Ok(valid) => Ok(valid),
        Err(e) => {
            log::warn!("⚠️  Stored password is not a valid bcrypt hash: {}", e);
            Ok(false)
        }
    }
}
