mod schemes;
mod scanner;
mod settings;
mod sources;
mod storage;

pub use scanner::WalkdirPdfScanner;
pub use schemes::SchemeRoots;
pub use settings::load_settings;
pub use sources::FsSourceFileStore;
pub use storage::FsPreviewStorage;
