use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFile {
    pub name: String,
    pub path: String,
}

/// One level of the index directory hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryNode {
    #[serde(default)]
    pub files: Vec<DirectoryFile>,
    #[serde(default, rename = "dirs", alias = "subdirectories")]
    pub subdirectories: BTreeMap<String, DirectoryNode>,
}

impl DirectoryNode {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirectories.is_empty()
    }

    /// Number of files in this node and every descendant.
    pub fn file_count(&self) -> usize {
        self.files.len()
            + self
                .subdirectories
                .values()
                .map(DirectoryNode::file_count)
                .sum::<usize>()
    }

    pub fn find_file(&self, path: &str) -> Option<&DirectoryFile> {
        self.files.iter().find(|f| f.path == path).or_else(|| {
            self.subdirectories
                .values()
                .find_map(|child| child.find_file(path))
        })
    }
}

/// GET `/get_directory_tree`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryTreeResponse {
    #[serde(default)]
    pub tree: DirectoryNode,
}
