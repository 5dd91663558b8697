use crate::errors::CoreError;
use crate::models::book::Book;

/// High-level storage operations: save/load a book to/from JSON bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a book to JSON bytes (portable, platform-independent).
    pub fn save_to_bytes(book: &Book) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec_pretty(book)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize book: {e}")))
    }

    /// Deserialize a book from JSON bytes and validate every record.
    pub fn load_from_bytes(data: &[u8]) -> Result<Book, CoreError> {
        let book: Book = serde_json::from_slice(data)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize book: {e}")))?;
        book.validate()?;
        Ok(book)
    }

    /// Save a book to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(book: &Book, path: &str) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(book)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a book from a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Book, CoreError> {
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
