#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::{Result, RouterError};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SEARCH_QUERY: &str = "type:ticket status:open";
pub const DEFAULT_UNCATEGORIZED_TAG: &str = "uncategorized";
pub const DEFAULT_MAX_PAGES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    pub helpdesk: ServiceConfig,
    pub inventory: ServiceConfig,
    pub upc_field_id: String,
    pub macros: MacroConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroConfig {
    pub dropship: String,
    pub frame_only: String,
    pub supplied_identity: String,
    pub special_order_identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default = "default_uncategorized_tag")]
    pub uncategorized_tag: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

fn default_query() -> String {
    DEFAULT_SEARCH_QUERY.to_string()
}

fn default_uncategorized_tag() -> String {
    DEFAULT_UNCATEGORIZED_TAG.to_string()
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            query: default_query(),
            uncategorized_tag: default_uncategorized_tag(),
            max_pages: default_max_pages(),
        }
    }
}

impl RouterConfig {
    /// 從環境變數載入配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以任意 key/value 來源建立配置，方便測試時不動到行程環境
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| RouterError::MissingConfig {
                    field: key.to_string(),
                })
        };

        let max_pages = match lookup("SEARCH_MAX_PAGES") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| RouterError::InvalidConfigValue {
                    field: "SEARCH_MAX_PAGES".to_string(),
                    value: raw.clone(),
                    reason: "Value must be a positive integer".to_string(),
                })?,
            None => DEFAULT_MAX_PAGES,
        };

        Ok(Self {
            helpdesk: ServiceConfig {
                api_url: required("ZENDESK_API_URL")?,
                api_key: required("ZENDESK_API_KEY")?,
            },
            inventory: ServiceConfig {
                api_url: required("NETSUITE_API_URL")?,
                api_key: required("NETSUITE_API_KEY")?,
            },
            upc_field_id: required("UPC_FIELD_ID")?,
            macros: MacroConfig {
                dropship: required("DROPSHIP_MACRO_ID")?,
                frame_only: required("FRAME_ONLY_MACRO_ID")?,
                supplied_identity: required("SUPPLIED_IDENTITY_MACRO_ID")?,
                special_order_identity: required("SPECIAL_ORDER_IDENTITY_MACRO_ID")?,
            },
            search: SearchConfig {
                query: lookup("TICKET_SEARCH_QUERY").unwrap_or_else(default_query),
                uncategorized_tag: lookup("UNCATEGORIZED_TAG")
                    .unwrap_or_else(default_uncategorized_tag),
                max_pages,
            },
        })
    }

    /// 從 TOML 檔案載入配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| RouterError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// 替換環境變數 (例如 ${ZENDESK_API_KEY})，找不到的保留原樣
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    use std::sync::OnceLock;

    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}

impl Validate for RouterConfig {
    fn validate(&self) -> Result<()> {
        validate_url("helpdesk.api_url", &self.helpdesk.api_url)?;
        validate_non_empty_string("helpdesk.api_key", &self.helpdesk.api_key)?;
        validate_url("inventory.api_url", &self.inventory.api_url)?;
        validate_non_empty_string("inventory.api_key", &self.inventory.api_key)?;
        validate_non_empty_string("upc_field_id", &self.upc_field_id)?;

        validate_non_empty_string("macros.dropship", &self.macros.dropship)?;
        validate_non_empty_string("macros.frame_only", &self.macros.frame_only)?;
        validate_non_empty_string("macros.supplied_identity", &self.macros.supplied_identity)?;
        validate_non_empty_string(
            "macros.special_order_identity",
            &self.macros.special_order_identity,
        )?;

        validate_non_empty_string("search.query", &self.search.query)?;
        validate_non_empty_string("search.uncategorized_tag", &self.search.uncategorized_tag)?;
        validate_positive_number("search.max_pages", self.search.max_pages, 1)?;

        Ok(())
    }
}
