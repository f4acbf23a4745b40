//! Directory browser state: the fetched index tree, which folders are open,
//! and whether the tree is shown at all.

use super::backend::SearchBackend;
use crate::shared::error::ApiError;
use contracts::search::DirectoryNode;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    #[error("File path cannot be quoted: {0}")]
    QuoteInPath(String),
}

/// Query text that selects `file_path` as the index: `index="<path>"` and a
/// newline.
pub fn build_query_fragment(file_path: &str) -> Result<String, FragmentError> {
    if file_path.contains('"') {
        return Err(FragmentError::QuoteInPath(file_path.to_string()));
    }
    Ok(format!("index=\"{}\"\n", file_path))
}

/// Folders are keyed by their slash-joined path from the root.
pub fn folder_key(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryBrowser {
    tree: Option<DirectoryNode>,
    expanded: HashSet<String>,
    visible: bool,
}

impl DirectoryBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fetch_tree<B: SearchBackend + ?Sized>(
        backend: &B,
    ) -> Result<DirectoryNode, ApiError> {
        let tree = backend.fetch_directory_tree().await?;
        log::info!("directory tree loaded, {} files", tree.file_count());
        Ok(tree)
    }

    /// Install a fetched tree. A failed fetch leaves the browser as it was.
    pub fn apply_fetch(&mut self, fetched: Result<DirectoryNode, ApiError>) -> Result<(), ApiError> {
        self.set_tree(fetched?);
        Ok(())
    }

    pub fn set_tree(&mut self, tree: DirectoryNode) {
        self.tree = Some(tree);
        self.expanded.clear();
    }

    pub fn tree(&self) -> Option<&DirectoryNode> {
        self.tree.as_ref()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded.contains(key)
    }

    pub fn toggle_folder(&mut self, key: &str) {
        if !self.expanded.remove(key) {
            self.expanded.insert(key.to_string());
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visible(&mut self) {
        self.visible = !self.visible;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.visible {
            "Hide Files"
        } else {
            "Show Files"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::search::{
        DirectoryFile, ExportArtifact, ExportRequest, QueryRequest, QueryResponse,
    };
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Answers directory fetches from a queue of prepared results.
    struct ScriptedBackend {
        trees: RefCell<VecDeque<Result<DirectoryNode, ApiError>>>,
    }

    impl ScriptedBackend {
        fn new(trees: impl IntoIterator<Item = Result<DirectoryNode, ApiError>>) -> Self {
            Self {
                trees: RefCell::new(trees.into_iter().collect()),
            }
        }
    }

    #[async_trait(?Send)]
    impl SearchBackend for ScriptedBackend {
        async fn run_query(&self, _: &QueryRequest) -> Result<QueryResponse, ApiError> {
            unreachable!()
        }

        async fn export_results(&self, _: &ExportRequest) -> Result<ExportArtifact, ApiError> {
            unreachable!()
        }

        async fn fetch_directory_tree(&self) -> Result<DirectoryNode, ApiError> {
            self.trees
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted tree".into())))
        }
    }

    fn tree_with(paths: &[&str]) -> DirectoryNode {
        DirectoryNode {
            files: paths
                .iter()
                .map(|p| DirectoryFile {
                    name: p.rsplit('/').next().unwrap_or(p).to_string(),
                    path: p.to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_tree_installs_tree() {
        let backend = ScriptedBackend::new([Ok(tree_with(&["data/a.log", "data/b.log"]))]);
        let mut browser = DirectoryBrowser::new();
        browser
            .apply_fetch(DirectoryBrowser::fetch_tree(&backend).await)
            .unwrap();
        assert_eq!(browser.tree().map(DirectoryNode::file_count), Some(2));
        assert!(browser.tree().and_then(|t| t.find_file("data/b.log")).is_some());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_browser_state() {
        let backend = ScriptedBackend::new([
            Ok(tree_with(&["data/a.log"])),
            Err(ApiError::Transport("connection refused".into())),
        ]);
        let mut browser = DirectoryBrowser::new();
        browser
            .apply_fetch(DirectoryBrowser::fetch_tree(&backend).await)
            .unwrap();
        browser.toggle_folder("data");
        browser.toggle_visible();
        let before = browser.clone();

        let err = browser
            .apply_fetch(DirectoryBrowser::fetch_tree(&backend).await)
            .unwrap_err();
        assert_eq!(err, ApiError::Transport("connection refused".into()));
        assert_eq!(browser, before);

        let mut empty = DirectoryBrowser::new();
        assert!(empty
            .apply_fetch(DirectoryBrowser::fetch_tree(&backend).await)
            .is_err());
        assert!(empty.tree().is_none());
    }

    #[test]
    fn test_fragment_for_file() {
        assert_eq!(
            build_query_fragment("data/a.log").unwrap(),
            "index=\"data/a.log\"\n"
        );
    }

    #[test]
    fn test_quote_in_path_is_rejected() {
        assert_eq!(
            build_query_fragment("data/we\"ird.log"),
            Err(FragmentError::QuoteInPath("data/we\"ird.log".into()))
        );
    }

    #[test]
    fn test_folder_state_machine() {
        let mut browser = DirectoryBrowser::new();
        let key = folder_key(&folder_key("", "data"), "web");
        assert_eq!(key, "data/web");
        assert!(!browser.is_expanded(&key));
        browser.toggle_folder(&key);
        assert!(browser.is_expanded(&key));
        browser.toggle_folder(&key);
        assert!(!browser.is_expanded(&key));
    }

    #[test]
    fn test_visibility_toggle() {
        let mut browser = DirectoryBrowser::new();
        assert_eq!(browser.toggle_label(), "Show Files");
        browser.toggle_visible();
        assert!(browser.is_visible());
        assert_eq!(browser.toggle_label(), "Hide Files");
        browser.hide();
        assert!(!browser.is_visible());
    }

    #[test]
    fn test_new_tree_collapses_folders() {
        let mut browser = DirectoryBrowser::new();
        browser.toggle_folder("data");
        browser.set_tree(DirectoryNode {
            files: vec![DirectoryFile {
                name: "a.log".into(),
                path: "data/a.log".into(),
            }],
            ..Default::default()
        });
        assert!(!browser.is_expanded("data"));
        assert_eq!(browser.tree().map(DirectoryNode::file_count), Some(1));
    }
}
