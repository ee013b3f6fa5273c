//! 애플리케이션 포트를 실제 인프라 구현체로 연결하는 어댑터 계층.

mod config_repository;
mod console_screen;
mod export_writer;
mod favorites_store;

pub use config_repository::JsonConfigRepository;
pub use console_screen::{ConsoleScreen, ScreenMode};
pub use export_writer::DirectoryExportWriter;
pub use favorites_store::{FAVORITES_KEY, JsonFavoritesStore};
