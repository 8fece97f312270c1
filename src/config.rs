use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub secret_key: String,
    pub upload_dir: String,
    pub allowed_extensions: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let secret_key = std::env::var("SECRET_KEY")?;
        let upload_dir =
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".into());
        let allowed_extensions = parse_extensions(
            &std::env::var("ALLOWED_EXTENSIONS").unwrap_or_else(|_| "png,jpg,jpeg,gif".into()),
        );
        Ok(Self {
            database_url,
            secret_key,
            upload_dir,
            allowed_extensions,
        })
    }
}

/// Comma-separated allow-list, trimmed and lowercased.
pub fn parse_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_default_extension_list() {
        assert_eq!(
            parse_extensions("png,jpg,jpeg,gif"),
            vec!["png", "jpg", "jpeg", "gif"]
        );
    }

    #[test]
    fn trims_and_lowercases_entries() {
        assert_eq!(parse_extensions(" PNG , Jpg ,"), vec!["png", "jpg"]);
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_extensions("").is_empty());
        assert!(parse_extensions(" , ,").is_empty());
    }
}
