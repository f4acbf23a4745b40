use serde::{Deserialize, Serialize};

/// Materialised result of a past query, listed by GET `/get_loadjob_files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadJobFile {
    pub filename: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub filesize: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadJobListResponse {
    #[serde(default)]
    pub files: Vec<LoadJobFile>,
}

/// GET `/get_query_for_loadjob/<filename>` (no status envelope).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadJobQueryResponse {
    pub query: String,
}

/// Query text that reloads `filename`, with the original query kept as
/// commented-out lines below it.
pub fn build_loadjob_command(filename: &str, original_query: &str) -> String {
    let commented = original_query
        .split('\n')
        .map(|line| format!("# {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("| loadjob '{filename}'\n{commented}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loadjob_command() {
        let cmd = build_loadjob_command(
            "1727138492.56_abc.pkl",
            "index=\"output_parquets/*\"\n| eval test=\"test\"",
        );
        assert_eq!(
            cmd,
            "| loadjob '1727138492.56_abc.pkl'\n# index=\"output_parquets/*\"\n# | eval test=\"test\""
        );
    }

    #[test]
    fn test_single_line_query() {
        assert_eq!(build_loadjob_command("f.pkl", "x"), "| loadjob 'f.pkl'\n# x");
    }
}
