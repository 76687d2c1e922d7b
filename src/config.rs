//! Run configuration: library list files and layout constants.

use std::path::{Path, PathBuf};

/// Default project library list.
pub const PROJECT_LIBRARY_LIST: &str = "libs.txt";

/// Default user library list, appended after the project libraries.
pub const USER_LIBRARY_LIST: &str = "mylibs.txt";

/// Read a library list file: one path per line, up to the first empty line.
///
/// A missing list is treated as empty.
pub fn read_library_list(path: &Path) -> Vec<PathBuf> {
    let Ok(text) = std::fs::read_to_string(path) else {
        log::debug!("library list {} not found; treating as empty", path.display());
        return Vec::new();
    };
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .take_while(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// All library files in load order: project libraries, then user libraries.
pub fn library_files(project_list: &Path, user_list: &Path) -> Vec<PathBuf> {
    let mut files = read_library_list(project_list);
    files.extend(read_library_list(user_list));
    files
}

/// Sheet layout constants, in schematic units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// X of the first column
    pub start_x: i64,
    /// Y at the top of every column
    pub start_y: i64,
    /// Horizontal distance between columns
    pub column_width: i64,
    /// Vertical gap between instances in a column
    pub spacing: i64,
    /// Length of stubs on left/right ports
    pub stub_horizontal: i64,
    /// Length of stubs on top/bottom ports
    pub stub_vertical: i64,
    /// Height reserved for a connector label
    pub font_height: i64,
    /// The column cursor is rounded up to this grid after annotation blocks
    pub grid: i64,
    /// Font named in connector labels
    pub font: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_x: 320,
            start_y: 320,
            column_width: 400,
            spacing: 16,
            stub_horizontal: 48,
            stub_vertical: 16,
            font_height: 16,
            grid: 8,
            font: "Arial".to_string(),
        }
    }
}
