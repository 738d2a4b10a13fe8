pub const MIGRATIONS: &[&str] = &["CREATE TABLE IF NOT EXISTS files (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        uri TEXT NOT NULL UNIQUE,
        filename TEXT NOT NULL,
        mime_type TEXT NOT NULL,
        description TEXT,
        modified INTEGER NOT NULL,
        size INTEGER NOT NULL,
        content_hash TEXT
    );"];
