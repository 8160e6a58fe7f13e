// Archivo: errors.rs
// Propósito: definir los errores del servicio de algoritmos y el alias
// Result<T> usado por las APIs del crate.
use thiserror::Error;

/// Errores al consumir el servicio remoto de algoritmos.
///
/// El núcleo de reproducción trata todas las variantes por igual: cualquier
/// fallo se convierte en un único mensaje visible para el usuario.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Fallo de transporte (red caída, timeout, conexión rechazada).
    #[error("Error de transporte: {0}")]
    Transport(String),
    /// El servicio respondió con un estado no exitoso.
    #[error("Respuesta HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// El cuerpo de la respuesta no pudo decodificarse al tipo esperado.
    #[error("Error de decodificación: {0}")]
    Decode(String),
}

/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, ServiceError>;

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}
