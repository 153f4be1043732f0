/// Errors raised while loading configuration or level data.
#[derive(Debug)]
pub enum GameError {
    /// File I/O error
    Io(String),
    /// Malformed config or map file
    Parse(String),
    /// Map parsed but cannot be played
    InvalidMap(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::Io(msg) => write!(f, "I/O error: {}", msg),
            GameError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GameError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<std::io::Error> for GameError {
    fn from(e: std::io::Error) -> Self {
        GameError::Io(e.to_string())
    }
}
