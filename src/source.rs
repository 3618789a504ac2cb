// src/source.rs
use async_trait::async_trait;

use crate::error::SourceError;

/// Port to the external host serving the poll content: two plain-text
/// resources, the question body and the newline-delimited options list.
#[async_trait]
pub trait PollSource: Send + Sync {
    async fn fetch_question(&self) -> Result<String, SourceError>;
    async fn fetch_options(&self) -> Result<String, SourceError>;
}

/// HTTP-backed source. Content is fetched fresh on every request; nothing
/// is cached across requests.
pub struct HttpPollSource {
    client: reqwest::Client,
    question_url: String,
    options_url: String,
}

impl HttpPollSource {
    pub fn new(question_url: String, options_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            question_url,
            options_url,
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError(format!("{} returned {}", url, response.status())));
        }

        response.text().await.map_err(|e| SourceError(e.to_string()))
    }
}

#[async_trait]
impl PollSource for HttpPollSource {
    async fn fetch_question(&self) -> Result<String, SourceError> {
        self.fetch_text(&self.question_url).await
    }

    async fn fetch_options(&self) -> Result<String, SourceError> {
        self.fetch_text(&self.options_url).await
    }
}

/// One option per line; whitespace-only lines are discarded, option text is
/// otherwise kept verbatim.
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_options_on_lines() {
        assert_eq!(parse_options("Red\nBlue"), vec!["Red", "Blue"]);
    }

    #[test]
    fn discards_blank_lines() {
        assert_eq!(parse_options("Red\n\nBlue\n"), vec!["Red", "Blue"]);
        assert_eq!(parse_options("  \n\t\n"), Vec::<String>::new());
    }

    #[test]
    fn keeps_option_text_verbatim() {
        // Only whole-line blanks are filtered; no per-option trimming.
        assert_eq!(parse_options(" Red \nBlue"), vec![" Red ", "Blue"]);
    }
}
