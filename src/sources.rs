use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::{Res, config, vk::VkProxyClient};

/// Where an import's entries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Text file, one entry per non-blank line.
    File(PathBuf),
    /// VK audio or playlist link, resolved through the proxy.
    Vk(String),
}

impl Source {
    /// Short tag used in default playlist names.
    pub fn label(&self) -> &'static str {
        match self {
            Source::File(_) => "TXT",
            Source::Vk(_) => "VK",
        }
    }

    pub async fn load(&self) -> Res<Vec<String>> {
        match self {
            Source::File(path) => read_entries(path).await,
            Source::Vk(link) => {
                let http = Client::builder()
                    .timeout(config::request_timeout())
                    .build()?;
                let proxy = VkProxyClient::new(http, config::vk_proxy_url());
                Ok(proxy.fetch(link).await?)
            }
        }
    }
}

/// Splits text into entries: trimmed, non-blank lines in order.
pub fn parse_entries(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn read_entries(path: &Path) -> Res<Vec<String>> {
    let content = async_fs::read_to_string(path).await?;
    Ok(parse_entries(content.trim_start_matches('\u{feff}')))
}
