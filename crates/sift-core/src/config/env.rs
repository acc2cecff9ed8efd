use std::path::PathBuf;

use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SIFT_PROJECT_NAME") {
            self.project.name = v;
        }
        if let Ok(v) = std::env::var("SIFT_PROJECT_ROOT") {
            self.project.root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("SIFT_PROJECT_SRC_DIRS") {
            self.project.src_dirs = parse_dir_list(&v);
        }
        if let Ok(v) = std::env::var("SIFT_EMBEDDING_URL") {
            self.embedding.base_url = v;
        }
        if let Ok(v) = std::env::var("SIFT_EMBEDDING_MODEL") {
            self.embedding.model = v;
        }
        if let Ok(v) = std::env::var("SIFT_CHROMA_URL") {
            self.store.url = v;
        }
        if let Ok(v) = std::env::var("SIFT_MAX_RESULTS") {
            if let Ok(n) = v.parse::<usize>() {
                self.search.max_results = n;
            } else {
                tracing::warn!("ignoring invalid SIFT_MAX_RESULTS value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SIFT_PAGE_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                self.search.page_size = n;
            } else {
                tracing::warn!("ignoring invalid SIFT_PAGE_SIZE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SIFT_NUM_RESULTS") {
            if let Ok(n) = v.parse::<usize>() {
                self.mcp.num_results = n;
            } else {
                tracing::warn!("ignoring invalid SIFT_NUM_RESULTS value: {v}");
            }
        }
        if let Ok(v) = std::env::var("SIFT_INDEX_BATCH_SIZE") {
            if let Ok(n) = v.parse::<usize>() {
                self.index.batch_size = n;
            } else {
                tracing::warn!("ignoring invalid SIFT_INDEX_BATCH_SIZE value: {v}");
            }
        }
    }
}

/// Comma separated directory list; surrounding commas and slashes ignored.
fn parse_dir_list(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_matches(',')
        .split(',')
        .map(|d| d.trim().trim_matches('/').to_owned())
        .filter(|d| !d.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_dir_list;

    #[test]
    fn dir_list_trims_separators() {
        assert_eq!(parse_dir_list(" src/Pyz/ , vendor/spryker,"), ["src/Pyz", "vendor/spryker"]);
        assert!(parse_dir_list(" , ").is_empty());
    }
}
