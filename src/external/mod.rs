//! Capabilities provided by the host system.
//!
//! The core never touches the clipboard or the file system directly for
//! import and export; it goes through these traits so front ends and tests
//! can supply their own.

mod clipboard;
mod files;

pub use clipboard::{Clipboard, ClipboardTool, SystemClipboard};
pub use files::{DirectorySaver, FileReader, FileSaver, FsReader};
